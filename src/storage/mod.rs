mod error;
mod paths;
mod store;
mod table;

pub use error::*;
pub use paths::*;
pub use store::*;

/// Header of the students table
pub const STUDENT_COLUMNS: [&str; 2] = ["student_id", "name"];

/// Header of the transactions table
pub const TRANSACTION_COLUMNS: [&str; 5] = [
    "transaction_id",
    "student_id",
    "student_name",
    "amount",
    "date",
];
