mod date;
mod ledger;
mod student;
mod transaction;
pub mod validation;

pub use date::*;
pub use ledger::*;
pub use student::*;
pub use transaction::*;
