//! CNAB file parser.
//!
//! Drives the line decoder over a whole input stream. Decode failures
//! are collected per line and reported together after the stream is
//! exhausted, so a rejected file comes back with every problem listed
//! rather than one error per upload attempt.

use crate::decoder::decode_line;
use crate::error::{EngineError, Result};
use crate::transaction::TransactionRecord;
use log::{debug, error, info, warn};
use std::io::{BufRead, BufReader, Read};

/// Parses a CNAB input stream into decoded records.
///
/// Lines are split platform-neutrally (`\n` and `\r\n` both end a
/// line). Blank or whitespace-only lines are skipped with a warning;
/// they still advance the line counter. Any decode error rejects the
/// whole file: either every non-blank line decodes or nothing is
/// returned.
///
/// # Errors
///
/// - [`EngineError::Io`] if the stream cannot be read
/// - [`EngineError::ParseFailed`] listing every line that failed
/// - [`EngineError::NoValidTransactions`] if all lines were blank
pub fn parse_cnab<R: Read>(reader: R) -> Result<Vec<TransactionRecord>> {
    let reader = BufReader::new(reader);
    let mut records = Vec::new();
    let mut errors: Vec<String> = Vec::new();

    info!("Starting CNAB file parsing");

    for (line_idx, line) in reader.lines().enumerate() {
        let line_number = line_idx + 1;
        let line = line?;

        if line.trim().is_empty() {
            warn!("Line {}: Skipping empty line", line_number);
            continue;
        }

        match decode_line(&line, line_number) {
            Ok(record) => {
                debug!(
                    "Line {}: Parsed {} transaction for {} - Value: {}",
                    line_number,
                    record.tx_type.label(),
                    record.merchant_name,
                    record.value
                );
                records.push(record);
            }
            Err(e) => {
                error!("Error parsing line {}", line_number);
                errors.push(e.to_string());
            }
        }
    }

    if !errors.is_empty() {
        return Err(EngineError::ParseFailed {
            count: errors.len(),
            details: errors.join("\n"),
        });
    }

    if records.is_empty() {
        return Err(EngineError::NoValidTransactions);
    }

    info!(
        "CNAB file parsing completed successfully. Parsed {} transactions",
        records.len()
    );

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TransactionType;
    use std::io::Cursor;

    const DEBIT_LINE: &str =
        "1201903010000014200096206760171234****7890153453JOAO MACEDO   BAR DO JOAO       ";
    const CREDIT_LINE: &str =
        "4201903010000012340556418150631234****1234100000MARIA JOSEFINALOJA DA MARIA     ";

    fn parse_str(input: &str) -> Result<Vec<TransactionRecord>> {
        parse_cnab(Cursor::new(input.to_string()))
    }

    #[test]
    fn test_parses_multiple_lines_in_order() {
        let input = format!("{DEBIT_LINE}\n{CREDIT_LINE}");
        let records = parse_str(&input).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tx_type, TransactionType::Debit);
        assert_eq!(records[1].tx_type, TransactionType::Credit);
    }

    #[test]
    fn test_handles_crlf_line_endings() {
        let input = format!("{DEBIT_LINE}\r\n{CREDIT_LINE}\r\n");
        let records = parse_str(&input).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_skips_blank_lines() {
        let input = format!("{DEBIT_LINE}\n\n   \n{CREDIT_LINE}");
        let records = parse_str(&input).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_blank_lines_still_advance_line_numbers() {
        // Line 1 blank, line 2 malformed: the error must name line 2.
        let input = "\n12345";
        let err = parse_str(input).unwrap_err();

        match err {
            EngineError::ParseFailed { count, details } => {
                assert_eq!(count, 1);
                assert!(details.contains("Line 2:"), "details: {details}");
            }
            other => panic!("expected ParseFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_one_bad_line_rejects_whole_file() {
        let input = format!("{DEBIT_LINE}\n12345\n{CREDIT_LINE}");
        let err = parse_str(&input).unwrap_err();

        match err {
            EngineError::ParseFailed { count, details } => {
                assert_eq!(count, 1);
                assert!(details.contains("expected 80 characters, got 5"));
            }
            other => panic!("expected ParseFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_all_errors_are_collected() {
        let input = "12345\nabcdef\n";
        let err = parse_str(input).unwrap_err();

        match err {
            EngineError::ParseFailed { count, details } => {
                assert_eq!(count, 2);
                assert!(details.contains("Line 1:"));
                assert!(details.contains("Line 2:"));
            }
            other => panic!("expected ParseFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_stream_has_no_valid_transactions() {
        assert!(matches!(
            parse_str("").unwrap_err(),
            EngineError::NoValidTransactions
        ));
        assert!(matches!(
            parse_str("\n  \n\n").unwrap_err(),
            EngineError::NoValidTransactions
        ));
    }
}
