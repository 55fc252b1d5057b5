use super::{StudentId, Transaction};

/// Compute the balance for a single student from a list of transactions.
/// Balance = sum of the amounts of the student's transactions.
pub fn compute_balance(student_id: StudentId, transactions: &[Transaction]) -> f64 {
    sum_amounts(transactions.iter().filter(|t| t.student_id == student_id))
}

/// Sum of amounts, starting from +0.0 so an empty history reads as `0.00`.
pub fn sum_amounts<'a, I>(transactions: I) -> f64
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions.into_iter().fold(0.0, |total, t| total + t.amount)
}

/// Next identifier after the largest one seen, starting at 1.
/// `None` once the largest id is `u32::MAX`.
pub fn next_id<I>(ids: I) -> Option<u32>
where
    I: IntoIterator<Item = u32>,
{
    ids.into_iter().max().unwrap_or(0).checked_add(1)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn tx(id: u32, student_id: StudentId, amount: f64) -> Transaction {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        Transaction::new(id, student_id, "someone", amount, date)
    }

    #[test]
    fn test_empty_ledger_balance_is_positive_zero() {
        let balance = compute_balance(1, &[]);
        assert_eq!(balance, 0.0);
        assert!(balance.is_sign_positive());
        assert!(sum_amounts(&Vec::<Transaction>::new()).is_sign_positive());
    }

    #[test]
    fn test_balance_only_counts_own_transactions() {
        let transactions = vec![tx(1, 1, 50.0), tx(2, 2, 100.0), tx(3, 1, -20.0)];

        assert_eq!(compute_balance(1, &transactions), 30.0);
        assert_eq!(compute_balance(2, &transactions), 100.0);
        assert!(compute_balance(3, &transactions).is_sign_positive());
    }

    #[test]
    fn test_next_id_starts_at_one() {
        assert_eq!(next_id(std::iter::empty()), Some(1));
    }

    #[test]
    fn test_next_id_follows_maximum_not_count() {
        assert_eq!(next_id([1, 2, 3]), Some(4));
        // Gaps are not filled
        assert_eq!(next_id([1, 7, 3]), Some(8));
    }

    #[test]
    fn test_next_id_exhausted() {
        assert_eq!(next_id([3, u32::MAX]), None);
        assert_eq!(next_id([u32::MAX - 1]), Some(u32::MAX));
    }
}
