//! Transaction models: the fixed type classification table and the
//! decoded record produced from one CNAB line.

use crate::money::Money;
use chrono::{NaiveDate, NaiveTime};

/// The nine CNAB transaction types.
///
/// The numeric code is the first character of every record. Codes
/// outside 1-9 are rejected at decode time, so every value of this
/// enum is a valid, classifiable type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    /// Code 1, income.
    Debit = 1,

    /// Code 2, expense.
    Boleto = 2,

    /// Code 3, expense.
    Financing = 3,

    /// Code 4, income.
    Credit = 4,

    /// Code 5, income.
    LoanReceipt = 5,

    /// Code 6, income.
    Sales = 6,

    /// Code 7, income.
    TedReceipt = 7,

    /// Code 8, income.
    DocReceipt = 8,

    /// Code 9, expense.
    Rent = 9,
}

impl TransactionType {
    /// Maps a numeric code to its type, or `None` for anything outside 1-9.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(TransactionType::Debit),
            2 => Some(TransactionType::Boleto),
            3 => Some(TransactionType::Financing),
            4 => Some(TransactionType::Credit),
            5 => Some(TransactionType::LoanReceipt),
            6 => Some(TransactionType::Sales),
            7 => Some(TransactionType::TedReceipt),
            8 => Some(TransactionType::DocReceipt),
            9 => Some(TransactionType::Rent),
            _ => None,
        }
    }

    /// Returns `true` if this type credits the store (positive sign).
    pub fn is_income(&self) -> bool {
        matches!(
            self,
            TransactionType::Debit
                | TransactionType::Credit
                | TransactionType::LoanReceipt
                | TransactionType::Sales
                | TransactionType::TedReceipt
                | TransactionType::DocReceipt
        )
    }

    /// Returns `true` if this type debits the store (negative sign).
    pub fn is_expense(&self) -> bool {
        !self.is_income()
    }

    /// Human-readable label used in balance views.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Debit => "Debit",
            TransactionType::Boleto => "Boleto",
            TransactionType::Financing => "Financing",
            TransactionType::Credit => "Credit",
            TransactionType::LoanReceipt => "Loan Receipt",
            TransactionType::Sales => "Sales",
            TransactionType::TedReceipt => "TED Receipt",
            TransactionType::DocReceipt => "DOC Receipt",
            TransactionType::Rent => "Rent",
        }
    }
}

/// A decoded and validated CNAB record.
///
/// Produced by [`crate::decoder::decode_line`] from one 80-character
/// line; immutable thereafter. The engine assigns ids and store links
/// separately, so this struct carries only what the line itself says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Transaction classification (code 1-9).
    pub tx_type: TransactionType,

    /// Calendar date of the transaction (source field `YYYYMMDD`).
    pub date: NaiveDate,

    /// Time of day (source field `HHMMSS`).
    pub time: NaiveTime,

    /// Non-negative amount with two implied decimal places.
    pub value: Money,

    /// Beneficiary tax id, trimmed (11-character source field).
    pub tax_id: String,

    /// Card number, trimmed, possibly masked (12-character source field).
    pub card_number: String,

    /// Store owner name, trimmed (14-character source field).
    pub merchant_owner: String,

    /// Store name, trimmed (18-character source field).
    pub merchant_name: String,
}

impl TransactionRecord {
    /// The amount with the classification sign applied: positive for
    /// income types, negative for expenses.
    pub fn signed_value(&self) -> Money {
        if self.tx_type.is_income() {
            self.value
        } else {
            -self.value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_from_code_covers_all_nine() {
        for code in 1..=9u8 {
            let tx_type = TransactionType::from_code(code).unwrap();
            assert_eq!(tx_type as u8, code);
        }
    }

    #[test]
    fn test_from_code_rejects_out_of_range() {
        assert!(TransactionType::from_code(0).is_none());
        assert!(TransactionType::from_code(10).is_none());
        assert!(TransactionType::from_code(255).is_none());
    }

    #[test]
    fn test_income_classification() {
        assert!(TransactionType::Debit.is_income());
        assert!(TransactionType::Credit.is_income());
        assert!(TransactionType::LoanReceipt.is_income());
        assert!(TransactionType::Sales.is_income());
        assert!(TransactionType::TedReceipt.is_income());
        assert!(TransactionType::DocReceipt.is_income());

        assert!(TransactionType::Boleto.is_expense());
        assert!(TransactionType::Financing.is_expense());
        assert!(TransactionType::Rent.is_expense());
    }

    #[test]
    fn test_labels() {
        assert_eq!(TransactionType::Debit.label(), "Debit");
        assert_eq!(TransactionType::LoanReceipt.label(), "Loan Receipt");
        assert_eq!(TransactionType::TedReceipt.label(), "TED Receipt");
        assert_eq!(TransactionType::Rent.label(), "Rent");
    }

    #[test]
    fn test_signed_value_applies_classification() {
        let record = TransactionRecord {
            tx_type: TransactionType::Rent,
            date: NaiveDate::from_ymd_opt(2019, 3, 1).unwrap(),
            time: NaiveTime::from_hms_opt(15, 34, 53).unwrap(),
            value: Money::from_cents(14200),
            tax_id: "09620676017".to_string(),
            card_number: "1234****7890".to_string(),
            merchant_owner: "JOAO MACEDO".to_string(),
            merchant_name: "BAR DO JOAO".to_string(),
        };

        assert_eq!(record.signed_value(), Money::from_str("-142.00").unwrap());

        let income = TransactionRecord {
            tx_type: TransactionType::Credit,
            ..record
        };
        assert_eq!(income.signed_value(), Money::from_str("142.00").unwrap());
    }
}
