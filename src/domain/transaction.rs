use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{StudentId, date_format};

pub type TransactionId = u32;

/// A single balance-affecting entry for a student.
/// Positive amounts are credits, negative amounts are debits.
/// Transactions are immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: TransactionId,
    pub student_id: StudentId,
    /// Copy of the student's name when the transaction was recorded
    pub student_name: String,
    pub amount: f64,
    #[serde(with = "date_format")]
    pub date: NaiveDate,
}

impl Transaction {
    pub fn new(
        transaction_id: TransactionId,
        student_id: StudentId,
        student_name: impl Into<String>,
        amount: f64,
        date: NaiveDate,
    ) -> Self {
        Self {
            transaction_id,
            student_id,
            student_name: student_name.into(),
            amount,
            date,
        }
    }
}

/// The date used when a caller records a transaction without one.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format an amount the way it is echoed back to users.
/// Example: 50.0 -> "50.00", -20.5 -> "-20.50"
pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}
