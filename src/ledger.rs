use crate::models::{Person, TxnType};

/// Lent, borrowed and net amounts for one person or the whole book.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub lent: f64,
    pub borrowed: f64,
    pub net: f64,
}

impl Totals {
    fn new(lent: f64, borrowed: f64) -> Self {
        Self {
            lent,
            borrowed,
            net: lent - borrowed,
        }
    }
}

pub fn sum_by_type(person: &Person, kind: TxnType) -> f64 {
    person
        .transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

pub fn net_balance(person: &Person) -> f64 {
    sum_by_type(person, TxnType::Lent) - sum_by_type(person, TxnType::Borrowed)
}

pub fn person_totals(person: &Person) -> Totals {
    Totals::new(
        sum_by_type(person, TxnType::Lent),
        sum_by_type(person, TxnType::Borrowed),
    )
}

pub fn global_totals(people: &[Person]) -> Totals {
    let (lent, borrowed) = people.iter().fold((0.0, 0.0), |(l, b), p| {
        (
            l + sum_by_type(p, TxnType::Lent),
            b + sum_by_type(p, TxnType::Borrowed),
        )
    });
    Totals::new(lent, borrowed)
}

/// Refresh the derived fields of `person` from its transactions.
///
/// `last_activity` follows entry order: it is the date of the last remaining
/// transaction, not the latest calendar date.
pub fn recompute(person: &mut Person) {
    person.balance = net_balance(person);
    person.last_activity = person.transactions.last().map(|t| t.date);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Transaction;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn txn(amount: f64, kind: TxnType, date: &str) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            amount,
            kind,
            date: day(date),
            note: String::new(),
        }
    }

    fn person_with(txns: Vec<Transaction>) -> Person {
        let mut p = Person::new("Test".into(), String::new(), day("2024-01-01"));
        p.transactions = txns;
        recompute(&mut p);
        p
    }

    #[test]
    fn test_net_balance_empty_is_zero() {
        let p = person_with(vec![]);
        assert_eq!(net_balance(&p), 0.0);
        assert_eq!(p.balance, 0.0);
        assert_eq!(p.last_activity, None);
    }

    #[test]
    fn test_net_balance_mixed_types() {
        let p = person_with(vec![
            txn(100.0, TxnType::Lent, "2024-01-01"),
            txn(40.0, TxnType::Borrowed, "2024-01-05"),
            txn(15.5, TxnType::Lent, "2024-01-07"),
            txn(200.0, TxnType::Borrowed, "2024-01-09"),
        ]);
        assert_eq!(sum_by_type(&p, TxnType::Lent), 115.5);
        assert_eq!(sum_by_type(&p, TxnType::Borrowed), 240.0);
        assert_eq!(net_balance(&p), -124.5);
        assert_eq!(p.balance, net_balance(&p));
    }

    #[test]
    fn test_last_activity_follows_entry_order() {
        let p = person_with(vec![
            txn(10.0, TxnType::Lent, "2024-03-01"),
            txn(10.0, TxnType::Lent, "2024-02-01"),
        ]);
        assert_eq!(p.last_activity, Some(day("2024-02-01")));
    }

    #[test]
    fn test_global_totals_across_people() {
        let a = person_with(vec![txn(100.0, TxnType::Lent, "2024-01-01")]);
        let b = person_with(vec![
            txn(30.0, TxnType::Borrowed, "2024-01-02"),
            txn(20.0, TxnType::Lent, "2024-01-03"),
        ]);
        let totals = global_totals(&[a, b]);
        assert_eq!(totals.lent, 120.0);
        assert_eq!(totals.borrowed, 30.0);
        assert_eq!(totals.net, 90.0);
        assert_eq!(global_totals(&[]), Totals::default());
    }

    #[test]
    fn test_person_totals() {
        let p = person_with(vec![
            txn(50.0, TxnType::Lent, "2024-01-01"),
            txn(80.0, TxnType::Borrowed, "2024-01-02"),
        ]);
        let t = person_totals(&p);
        assert_eq!((t.lent, t.borrowed, t.net), (50.0, 80.0, -30.0));
    }
}
