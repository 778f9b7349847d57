//! CNAB line decoder.
//!
//! Decodes one fixed-width 80-character line into a [`TransactionRecord`],
//! failing fast on the first field that violates the format. Field offsets
//! are character positions, matching the fixed-width layout:
//!
//! | Field       | Range    | Width |
//! |-------------|----------|-------|
//! | type        | [0, 1)   | 1     |
//! | date        | [1, 9)   | 8     |
//! | value       | [9, 19)  | 10    |
//! | tax id      | [19, 30) | 11    |
//! | card number | [30, 42) | 12    |
//! | time        | [42, 48) | 6     |
//! | owner       | [48, 62) | 14    |
//! | store name  | [62, 80) | 18    |

use crate::error::{DecodeError, DecodeErrorKind};
use crate::money::Money;
use crate::transaction::{TransactionRecord, TransactionType};
use chrono::{NaiveDate, NaiveTime};

/// Exact length of a CNAB record in characters.
pub const LINE_LENGTH: usize = 80;

/// Decodes a single CNAB line.
///
/// Pure function of its inputs; `line_number` (1-indexed) is only used
/// to tag errors. Validation is fail-fast: the first violation wins.
pub fn decode_line(line: &str, line_number: usize) -> Result<TransactionRecord, DecodeError> {
    decode_fields(line).map_err(|kind| DecodeError::new(line_number, kind))
}

fn decode_fields(line: &str) -> Result<TransactionRecord, DecodeErrorKind> {
    if line.is_empty() {
        return Err(DecodeErrorKind::EmptyLine);
    }

    // Offsets count characters, not bytes. Store and owner names may
    // contain accented characters, so byte indexing would misalign.
    let chars: Vec<char> = line.chars().collect();
    if chars.len() != LINE_LENGTH {
        return Err(DecodeErrorKind::LengthMismatch {
            expected: LINE_LENGTH,
            actual: chars.len(),
        });
    }

    let field = |start: usize, end: usize| -> String { chars[start..end].iter().collect() };

    Ok(TransactionRecord {
        tx_type: parse_type(&field(0, 1))?,
        date: parse_date(&field(1, 9))?,
        value: parse_value(&field(9, 19))?,
        tax_id: field(19, 30).trim().to_string(),
        card_number: field(30, 42).trim().to_string(),
        time: parse_time(&field(42, 48))?,
        merchant_owner: field(48, 62).trim().to_string(),
        merchant_name: field(62, 80).trim().to_string(),
    })
}

fn parse_type(raw: &str) -> Result<TransactionType, DecodeErrorKind> {
    raw.parse::<u8>()
        .ok()
        .and_then(TransactionType::from_code)
        .ok_or_else(|| DecodeErrorKind::InvalidType {
            found: raw.to_string(),
        })
}

fn parse_date(raw: &str) -> Result<NaiveDate, DecodeErrorKind> {
    NaiveDate::parse_from_str(raw, "%Y%m%d").map_err(|_| DecodeErrorKind::InvalidDate {
        found: raw.to_string(),
    })
}

fn parse_value(raw: &str) -> Result<Money, DecodeErrorKind> {
    let invalid = || DecodeErrorKind::InvalidValue {
        found: raw.to_string(),
    };

    let cents = raw.parse::<i64>().map_err(|_| invalid())?;
    if cents < 0 {
        return Err(invalid());
    }

    // Two implied decimal places: the raw field is an amount in cents.
    Ok(Money::from_cents(cents))
}

fn parse_time(raw: &str) -> Result<NaiveTime, DecodeErrorKind> {
    if raw.len() != 6 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeErrorKind::InvalidTimeFormat {
            found: raw.to_string(),
        });
    }

    // Safety: all-ASCII-digit content was verified above, so byte
    // slicing and parsing cannot fail.
    let component = |range: std::ops::Range<usize>| -> u32 {
        raw[range].parse().expect("ascii digits verified")
    };

    let hour = component(0..2);
    let minute = component(2..4);
    let second = component(4..6);

    if hour > 23 {
        return Err(DecodeErrorKind::InvalidHour { value: hour });
    }
    if minute > 59 {
        return Err(DecodeErrorKind::InvalidMinute { value: minute });
    }
    if second > 59 {
        return Err(DecodeErrorKind::InvalidSecond { value: second });
    }

    // Safety: components range-checked above
    Ok(NaiveTime::from_hms_opt(hour, minute, second).expect("components in range"))
}
