//! CNAB Engine CLI
//!
//! Imports a fixed-width CNAB transaction file and prints per-store
//! balances.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- transactions.txt            # CSV balance summary
//! cargo run -- transactions.txt --json     # full balance views as JSON
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use cnab_engine::{CnabEngine, EngineError, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(EngineError::MissingArgument);
    }

    let input_path = &args[1];
    let as_json = args.iter().skip(2).any(|a| a == "--json");

    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let mut engine = CnabEngine::new();
    let summary = engine.import(reader);

    if !summary.success {
        eprintln!(
            "Error: {}",
            summary
                .error_message
                .unwrap_or_else(|| "import failed".to_string())
        );
        process::exit(1);
    }

    let stdout = io::stdout();
    let handle = stdout.lock();

    if as_json {
        serde_json::to_writer_pretty(handle, &engine.list_balances())
            .map_err(|e| EngineError::Io(e.into()))?;
        println!();
    } else {
        engine.write_output(handle)?;
    }

    Ok(())
}
