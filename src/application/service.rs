use chrono::NaiveDate;
use tracing::info;

use crate::domain::{Student, Transaction, sum_amounts, today};
use crate::storage::{LedgerPaths, LedgerStore};

use super::{AppError, BalanceEntry, StudentAdded, StudentStatement, TransactionAdded};

/// Application service providing the ledger operations.
/// This is the primary interface for any client (CLI, form, tests).
pub struct LedgerService {
    store: LedgerStore,
}

impl LedgerService {
    /// Create a new ledger service around an already loaded store.
    pub fn new(store: LedgerStore) -> Self {
        Self { store }
    }

    /// Load the ledger tables found at `paths`.
    pub fn open(paths: LedgerPaths) -> Result<Self, AppError> {
        let store = LedgerStore::load(paths)?;
        Ok(Self::new(store))
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    // ========================
    // Student operations
    // ========================

    /// Register a new student and persist the students table.
    pub fn add_student(&mut self, name: &str) -> Result<StudentAdded, AppError> {
        if self.store.student_id_by_name(name).is_some() {
            return Err(AppError::DuplicateName(name.to_string()));
        }

        let student_id = self.store.next_student_id()?;
        self.store.upsert_student(Student::new(student_id, name));
        self.store.save_students()?;

        info!(student_id, name, "student added");
        Ok(StudentAdded {
            student_id,
            name: name.to_string(),
        })
    }

    /// Show a student's transactions and balance.
    pub fn show_student(&self, student_name: &str) -> Result<StudentStatement, AppError> {
        let student = self.resolve(student_name)?;
        let transactions: Vec<Transaction> = self
            .store
            .transactions_for(student.student_id)
            .cloned()
            .collect();
        let balance = sum_amounts(&transactions);

        Ok(StudentStatement {
            student_name: student.name.clone(),
            student_id: student.student_id,
            transactions,
            balance,
        })
    }

    /// Balances for every student name, in registration order.
    pub fn show_all_students(&self) -> Vec<BalanceEntry> {
        self.store
            .registered_students()
            .map(|student| BalanceEntry {
                name: student.name.clone(),
                balance: self.store.balance(student.student_id),
            })
            .collect()
    }

    // ========================
    // Transaction operations
    // ========================

    /// Record a transaction for a registered student and persist the
    /// transactions table. Without a date, today's date is used.
    pub fn add_transaction(
        &mut self,
        student_name: &str,
        amount: f64,
        date: Option<NaiveDate>,
    ) -> Result<TransactionAdded, AppError> {
        let student_id = self.resolve(student_name)?.student_id;
        let date = date.unwrap_or_else(today);
        let transaction_id = self.store.next_transaction_id()?;

        self.store.append_transaction(Transaction::new(
            transaction_id,
            student_id,
            student_name,
            amount,
            date,
        ));
        self.store.save_transactions()?;

        info!(
            transaction_id,
            student_id,
            student_name,
            amount,
            %date,
            "transaction added"
        );
        Ok(TransactionAdded {
            transaction_id,
            student_name: student_name.to_string(),
            amount,
            date,
        })
    }

    fn resolve(&self, student_name: &str) -> Result<&Student, AppError> {
        self.store
            .student_id_by_name(student_name)
            .and_then(|id| self.store.student(id))
            .ok_or_else(|| AppError::UnknownStudent(student_name.to_string()))
    }
}
