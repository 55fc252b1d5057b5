use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::domain::{Student, StudentId, Transaction, TransactionId, compute_balance, next_id};

use super::table::{Row, read_table, write_table};
use super::{LedgerPaths, STUDENT_COLUMNS, StoreError, TRANSACTION_COLUMNS};

/// In-memory ledger backed by two CSV tables.
///
/// The store owns every student and transaction. Mutations only touch
/// memory; `save_students` and `save_transactions` rewrite the tables.
#[derive(Debug)]
pub struct LedgerStore {
    paths: LedgerPaths,
    students: BTreeMap<StudentId, Student>,
    name_index: HashMap<String, StudentId>,
    transactions: Vec<Transaction>,
}

impl LedgerStore {
    /// Create an empty store that will save to `paths`.
    pub fn new(paths: LedgerPaths) -> Self {
        Self {
            paths,
            students: BTreeMap::new(),
            name_index: HashMap::new(),
            transactions: Vec::new(),
        }
    }

    /// Load both tables. Missing files load as empty tables.
    pub fn load(paths: LedgerPaths) -> Result<Self, StoreError> {
        let mut store = Self::new(paths);

        let students: Vec<Row<Student>> = read_table(&store.paths.students)?;
        for Row { line, value } in students {
            if value.student_id == 0 {
                return Err(store.malformed_student(line, "student_id must be positive"));
            }
            store.upsert_student(value);
        }

        let transactions: Vec<Row<Transaction>> = read_table(&store.paths.transactions)?;
        for Row { line, value } in transactions {
            if value.transaction_id == 0 {
                return Err(StoreError::MalformedRow {
                    path: store.paths.transactions.clone(),
                    line,
                    reason: "transaction_id must be positive".to_string(),
                });
            }
            store.append_transaction(value);
        }

        debug!(
            students = store.students.len(),
            transactions = store.transactions.len(),
            "ledger loaded"
        );
        Ok(store)
    }

    // ========================
    // Identifier allocation
    // ========================

    /// One more than the largest student id, or 1 for an empty ledger.
    pub fn next_student_id(&self) -> Result<StudentId, StoreError> {
        next_id(self.students.keys().copied()).ok_or_else(|| StoreError::IdsExhausted {
            path: self.paths.students.clone(),
            kind: "student",
        })
    }

    /// One more than the largest transaction id, or 1 for an empty ledger.
    pub fn next_transaction_id(&self) -> Result<TransactionId, StoreError> {
        next_id(self.transactions.iter().map(|t| t.transaction_id)).ok_or_else(|| {
            StoreError::IdsExhausted {
                path: self.paths.transactions.clone(),
                kind: "transaction",
            }
        })
    }

    // ========================
    // Mutations
    // ========================

    /// Insert or overwrite the student stored at `student.student_id`.
    pub fn upsert_student(&mut self, student: Student) {
        if let Some(previous) = self.students.get(&student.student_id) {
            if previous.name != student.name
                && self.name_index.get(&previous.name) == Some(&student.student_id)
            {
                self.name_index.remove(&previous.name);
            }
        }
        self.name_index
            .insert(student.name.clone(), student.student_id);
        self.students.insert(student.student_id, student);
    }

    /// Append a transaction. The referenced student is not checked here.
    pub fn append_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    // ========================
    // Persistence
    // ========================

    /// Rewrite the students table with every student, in id order.
    pub fn save_students(&self) -> Result<(), StoreError> {
        write_table(
            &self.paths.students,
            &STUDENT_COLUMNS,
            self.students.values(),
        )?;
        Ok(())
    }

    /// Rewrite the transactions table with every transaction, in insertion order.
    pub fn save_transactions(&self) -> Result<(), StoreError> {
        write_table(
            &self.paths.transactions,
            &TRANSACTION_COLUMNS,
            &self.transactions,
        )?;
        Ok(())
    }

    // ========================
    // Queries
    // ========================

    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.get(&id)
    }

    pub fn student_id_by_name(&self, name: &str) -> Option<StudentId> {
        self.name_index.get(name).copied()
    }

    /// All student records in id order, which is also registration order.
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    /// Students reachable by name, one per name, in id order.
    /// A hand-edited table may repeat a name; only the record the name
    /// resolves to is listed.
    pub fn registered_students(&self) -> impl Iterator<Item = &Student> {
        self.students
            .values()
            .filter(|s| self.name_index.get(&s.name) == Some(&s.student_id))
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Transactions recorded for one student, in insertion order.
    pub fn transactions_for(&self, student_id: StudentId) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(move |t| t.student_id == student_id)
    }

    pub fn balance(&self, student_id: StudentId) -> f64 {
        compute_balance(student_id, &self.transactions)
    }

    fn malformed_student(&self, line: u64, reason: &str) -> StoreError {
        StoreError::MalformedRow {
            path: self.paths.students.clone(),
            line,
            reason: reason.to_string(),
        }
    }
}
