use serde::{Deserialize, Serialize};

use crate::domain::{
    StudentId, Transaction, TransactionId, date_format, format_amount, format_date,
};

use super::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

/// Payload returned to front ends: a status, a human-readable message,
/// and the operation's own fields on success.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub status: Status,
    pub message: String,
    #[serde(flatten)]
    pub data: Option<T>,
}

impl<T: Outcome> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: Status::Success,
            message: data.message(),
            data: Some(data),
        }
    }

    pub fn error(err: &AppError) -> Self {
        Self {
            status: Status::Error,
            message: err.to_string(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

/// Convert a service result into a response payload.
pub fn respond<T: Outcome>(result: Result<T, AppError>) -> ApiResponse<T> {
    match result {
        Ok(data) => ApiResponse::success(data),
        Err(err) => ApiResponse::error(&err),
    }
}

/// A successful operation result that can describe itself.
pub trait Outcome {
    fn message(&self) -> String;
}

/// Result of registering a student
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentAdded {
    pub student_id: StudentId,
    #[serde(skip)]
    pub name: String,
}

impl Outcome for StudentAdded {
    fn message(&self) -> String {
        format!("Student {} is added successfully.", self.name)
    }
}

/// Result of recording a transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionAdded {
    pub transaction_id: TransactionId,
    pub student_name: String,
    pub amount: f64,
    #[serde(with = "date_format")]
    pub date: chrono::NaiveDate,
}

impl Outcome for TransactionAdded {
    fn message(&self) -> String {
        format!(
            "Transaction for {} of ${} for {} is added successfully",
            self.student_name,
            format_amount(self.amount),
            format_date(self.date)
        )
    }
}

/// A student's transactions and balance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentStatement {
    pub student_name: String,
    pub student_id: StudentId,
    pub transactions: Vec<Transaction>,
    pub balance: f64,
}

impl Outcome for StudentStatement {
    fn message(&self) -> String {
        format!(
            "Showing student {} info. Total balance: {}",
            self.student_name,
            format_amount(self.balance)
        )
    }
}

/// Balance entry for one student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceEntry {
    pub name: String,
    pub balance: f64,
}
