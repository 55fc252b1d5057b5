// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use student_payments::application::LedgerService;
use student_payments::storage::LedgerPaths;
use tempfile::TempDir;

/// Helper to create a test service over an empty temporary directory
pub fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let service = LedgerService::open(LedgerPaths::in_dir(temp_dir.path()))?;
    Ok((service, temp_dir))
}

/// Reopen the ledger stored in `dir`, as a fresh process would
pub fn reopen(dir: &TempDir) -> Result<LedgerService> {
    Ok(LedgerService::open(LedgerPaths::in_dir(dir.path()))?)
}

/// Helper to parse a MM-DD-YYYY date string
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%m-%d-%Y").unwrap()
}

/// Test fixture: a small class with some payment history
pub struct StandardClass;

impl StandardClass {
    /// Register Alice, Bob and Carol Jones
    pub fn create(service: &mut LedgerService) -> Result<()> {
        service.add_student("Alice")?;
        service.add_student("Bob")?;
        service.add_student("Carol Jones")?;
        Ok(())
    }

    /// Register the class and record a few payments and charges
    pub fn create_with_history(service: &mut LedgerService) -> Result<()> {
        Self::create(service)?;
        service.add_transaction("Alice", 100.0, Some(parse_date("01-10-2024")))?;
        service.add_transaction("Bob", 50.0, Some(parse_date("01-15-2024")))?;
        service.add_transaction("Alice", -35.5, Some(parse_date("02-01-2024")))?;
        service.add_transaction("Carol Jones", -10.0, Some(parse_date("02-03-2024")))?;
        Ok(())
    }
}
