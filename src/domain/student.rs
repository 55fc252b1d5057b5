use serde::{Deserialize, Serialize};

pub type StudentId = u32;

/// A registered student. The name is the lookup key used by every
/// operation, so it must be unique across the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub student_id: StudentId,
    pub name: String,
}

impl Student {
    pub fn new(student_id: StudentId, name: impl Into<String>) -> Self {
        Self {
            student_id,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_student() {
        let student = Student::new(3, "Ada Lovelace");
        assert_eq!(student.student_id, 3);
        assert_eq!(student.name, "Ada Lovelace");
    }
}
