//! # CNAB Engine
//!
//! Parses fixed-width CNAB transaction files, groups transactions by
//! store (name + owner, case-insensitive), and computes signed balances.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: amounts use 2 decimal places via `rust_decimal`
//! - **Whole-file validation**: every invalid line is reported in one pass,
//!   and any error rejects the file (atomic import, no partial commit)
//! - **Explicit state**: the engine is an owned value with an explicit
//!   `reset`, never ambient globals, so independent instances can coexist
//! - **Deterministic output**: stores sorted by name, transactions by
//!   `(date, time)`
//!
//! ## Example
//!
//! ```no_run
//! use cnab_engine::CnabEngine;
//! use std::io::Cursor;
//!
//! let cnab_contents = std::fs::read_to_string("cnab.txt").unwrap();
//! let mut engine = CnabEngine::new();
//! let summary = engine.import(Cursor::new(cnab_contents));
//! assert!(summary.success);
//! for entry in engine.list_balances() {
//!     println!("{}: {}", entry.store_name, entry.balance);
//! }
//! ```

pub mod decoder;
pub mod engine;
pub mod error;
pub mod money;
pub mod parser;
pub mod store;
pub mod transaction;

pub use engine::{CnabEngine, ImportSummary, StoreBalance, TransactionView};
pub use error::{DecodeError, DecodeErrorKind, EngineError, Result};
pub use money::Money;
pub use parser::parse_cnab;
pub use store::Store;
pub use transaction::{TransactionRecord, TransactionType};
