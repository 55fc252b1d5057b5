use std::path::{Path, PathBuf};

pub const STUDENTS_FILE: &str = "students.csv";
pub const TRANSACTIONS_FILE: &str = "transactions.csv";

/// Locations of the two ledger tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerPaths {
    pub students: PathBuf,
    pub transactions: PathBuf,
}

impl LedgerPaths {
    pub fn new(students: impl Into<PathBuf>, transactions: impl Into<PathBuf>) -> Self {
        Self {
            students: students.into(),
            transactions: transactions.into(),
        }
    }

    /// Both tables under `dir` with their default file names.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(STUDENTS_FILE), dir.join(TRANSACTIONS_FILE))
    }
}

impl Default for LedgerPaths {
    fn default() -> Self {
        Self::new(STUDENTS_FILE, TRANSACTIONS_FILE)
    }
}
