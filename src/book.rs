use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{LendlordError, Result};
use crate::ledger::{self, Totals};
use crate::models::{Person, Transaction, TxnType};
use crate::selection;
use crate::store::Store;

const DATE_FMT: &str = "%Y-%m-%d";

/// Parse a user-entered amount: a finite number greater than zero.
pub fn parse_amount(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => Ok(n),
        _ => Err(LendlordError::InvalidAmount(trimmed.to_string())),
    }
}

/// Parse a user-entered date. Blank means `today`.
pub fn parse_date(raw: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    match raw.map(str::trim) {
        None | Some("") => Ok(today),
        Some(s) => NaiveDate::parse_from_str(s, DATE_FMT)
            .map_err(|_| LendlordError::InvalidDate(s.to_string())),
    }
}

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LendlordError::RequiredFieldMissing("Name"));
    }
    Ok(name.to_string())
}

/// The loaded people collection together with the current selection.
///
/// Every mutating method validates first, then changes memory, refreshes
/// derived fields and writes the whole collection back to the store.
pub struct Book {
    store: Store,
    people: Vec<Person>,
    selected: Option<Uuid>,
    today: NaiveDate,
}

impl Book {
    /// Load the book. A document the decoder had to repair (for example one
    /// written without ids) is saved straight back, so generated ids stay
    /// stable across runs.
    pub fn open(store: Store, today: NaiveDate) -> Result<Self> {
        let (people, report) = store.load_with_report(today);
        if !report.is_clean() {
            store.save(&people)?;
        }
        let selected = store
            .load_selection()
            .filter(|id| people.iter().any(|p| p.id == *id));
        Ok(Self {
            store,
            people,
            selected,
            today,
        })
    }

    #[cfg(test)]
    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    #[cfg(test)]
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn totals(&self) -> Totals {
        ledger::global_totals(&self.people)
    }

    fn save(&self) -> Result<()> {
        self.store.save(&self.people)
    }

    fn position(&self, id: Uuid) -> Result<usize> {
        self.people
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| LendlordError::UnknownPerson(id.to_string()))
    }

    pub fn person(&self, id: Uuid) -> Result<&Person> {
        Ok(&self.people[self.position(id)?])
    }

    /// Id of the person at a zero-based stored position.
    pub fn id_at(&self, index: usize) -> Result<Uuid> {
        self.people
            .get(index)
            .map(|p| p.id)
            .ok_or(LendlordError::OutOfRange {
                what: "person",
                index: index + 1,
                len: self.people.len(),
            })
    }

    /// Resolve a 1-based list position or a case-insensitive exact name.
    pub fn resolve(&self, who: &str) -> Result<Uuid> {
        let who = who.trim();
        if let Ok(pos) = who.parse::<usize>() {
            return match pos.checked_sub(1) {
                Some(index) => self.id_at(index),
                None => Err(LendlordError::OutOfRange {
                    what: "person",
                    index: pos,
                    len: self.people.len(),
                }),
            };
        }
        let wanted = who.to_lowercase();
        self.people
            .iter()
            .find(|p| p.name.to_lowercase() == wanted)
            .map(|p| p.id)
            .ok_or_else(|| LendlordError::UnknownPerson(who.to_string()))
    }

    /// `who` if given, otherwise the current selection.
    pub fn target(&self, who: Option<&str>) -> Result<Uuid> {
        match who {
            Some(w) => self.resolve(w),
            None => self.selected.ok_or(LendlordError::NoSelection),
        }
    }

    // -- selection ---------------------------------------------------------

    pub fn selected(&self) -> Option<&Person> {
        self.selected
            .and_then(|id| self.people.iter().find(|p| p.id == id))
    }

    pub fn select(&mut self, index: usize) -> Result<&Person> {
        let id = self.id_at(index)?;
        self.select_id(id)
    }

    pub fn select_id(&mut self, id: Uuid) -> Result<&Person> {
        let pos = self.position(id)?;
        self.store.save_selection(Some(id))?;
        self.selected = Some(id);
        Ok(&self.people[pos])
    }

    pub fn clear_selection(&mut self) -> Result<()> {
        self.store.save_selection(None)?;
        self.selected = None;
        Ok(())
    }

    // -- ordering ----------------------------------------------------------

    /// Rewrite the canonical order alphabetically and persist it.
    pub fn sort_by_name(&mut self) -> Result<()> {
        selection::sort_by_name(&mut self.people);
        self.save()?;
        log::info!("event=sort_by_name people={}", self.people.len());
        Ok(())
    }

    // -- people ------------------------------------------------------------

    pub fn add_person(&mut self, name: &str, notes: &str) -> Result<&Person> {
        let name = validate_name(name)?;
        let person = Person::new(name, notes.trim().to_string(), self.today);
        self.people.push(person);
        self.save()?;
        let person = &self.people[self.people.len() - 1];
        log::info!("event=add_person id={}", person.id);
        Ok(person)
    }

    pub fn edit_person(&mut self, id: Uuid, name: &str, notes: &str) -> Result<&Person> {
        let name = validate_name(name)?;
        let pos = self.position(id)?;
        let person = &mut self.people[pos];
        person.name = name;
        person.notes = notes.trim().to_string();
        self.save()?;
        log::info!("event=edit_person id={id}");
        Ok(&self.people[pos])
    }

    /// Remove a person with all of their transactions. Positions are turned
    /// into ids with [`Book::id_at`] first.
    pub fn delete_person_id(&mut self, id: Uuid) -> Result<Person> {
        let pos = self.position(id)?;
        let removed = self.people.remove(pos);
        self.save()?;
        if self.selected == Some(id) {
            self.clear_selection()?;
        }
        log::info!(
            "event=delete_person id={id} transactions={}",
            removed.transactions.len()
        );
        Ok(removed)
    }

    // -- transactions ------------------------------------------------------

    /// Validate raw input and append a transaction. Nothing changes when any
    /// field is rejected.
    pub fn add_transaction(
        &mut self,
        person: Uuid,
        amount: &str,
        kind: &str,
        date: Option<&str>,
        note: &str,
    ) -> Result<&Transaction> {
        let amount = parse_amount(amount)?;
        let kind: TxnType = kind.trim().parse()?;
        let date = parse_date(date, self.today)?;
        let pos = self.position(person)?;

        let txn = Transaction {
            id: Uuid::new_v4(),
            amount,
            kind,
            date,
            note: note.trim().to_string(),
        };
        let p = &mut self.people[pos];
        p.transactions.push(txn);
        ledger::recompute(p);
        self.save()?;
        log::info!("event=add_transaction person={person} type={kind}");

        let p = &self.people[pos];
        Ok(&p.transactions[p.transactions.len() - 1])
    }

    /// Id of the transaction at a zero-based position in `person`'s list.
    pub fn transaction_id_at(&self, person: Uuid, index: usize) -> Result<Uuid> {
        let p = self.person(person)?;
        p.transactions
            .get(index)
            .map(|t| t.id)
            .ok_or(LendlordError::OutOfRange {
                what: "transaction",
                index: index + 1,
                len: p.transactions.len(),
            })
    }

    pub fn delete_transaction_id(&mut self, person: Uuid, txn: Uuid) -> Result<Transaction> {
        let pos = self.position(person)?;
        let p = &mut self.people[pos];
        let idx = p
            .transactions
            .iter()
            .position(|t| t.id == txn)
            .ok_or(LendlordError::OutOfRange {
                what: "transaction",
                index: 0,
                len: p.transactions.len(),
            })?;
        let removed = p.transactions.remove(idx);
        ledger::recompute(p);
        self.save()?;
        log::info!("event=delete_transaction person={person} txn={txn}");
        Ok(removed)
    }

    pub fn delete_transaction(&mut self, person: Uuid, index: usize) -> Result<Transaction> {
        let txn = self.transaction_id_at(person, index)?;
        self.delete_transaction_id(person, txn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PEOPLE_KEY;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn test_book() -> Book {
        Book::open(Store::in_memory().unwrap(), day("2025-06-01")).unwrap()
    }

    fn stored(book: &Book) -> Vec<Person> {
        book.store().load(book.today())
    }

    #[test]
    fn test_add_person_defaults() {
        let mut book = test_book();
        let p = book.add_person("  Alex ", " school friend ").unwrap().clone();
        assert_eq!(p.name, "Alex");
        assert_eq!(p.notes, "school friend");
        assert_eq!(p.balance, 0.0);
        assert!(p.transactions.is_empty());
        assert_eq!(p.last_activity, None);
        assert_eq!(p.created_at, day("2025-06-01"));
        assert_eq!(stored(&book), vec![p]);
    }

    #[test]
    fn test_add_person_rejects_blank_name() {
        let mut book = test_book();
        for name in ["", "  "] {
            assert!(matches!(
                book.add_person(name, ""),
                Err(LendlordError::RequiredFieldMissing(_))
            ));
        }
        assert!(book.people().is_empty());
        assert!(book.store().read_slot(PEOPLE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_edit_person_keeps_transactions() {
        let mut book = test_book();
        let id = book.add_person("Sam", "").unwrap().id;
        book.add_transaction(id, "10", "lent", None, "").unwrap();
        assert!(matches!(
            book.edit_person(id, " ", "x"),
            Err(LendlordError::RequiredFieldMissing(_))
        ));
        let p = book.edit_person(id, "Samuel", "cousin").unwrap();
        assert_eq!(p.name, "Samuel");
        assert_eq!(p.notes, "cousin");
        assert_eq!(p.transactions.len(), 1);
        assert_eq!(p.balance, 10.0);
        assert_eq!(stored(&book)[0].name, "Samuel");
    }

    #[test]
    fn test_sam_scenario() {
        let mut book = test_book();
        let id = book.add_person("Sam", "").unwrap().id;
        book.add_transaction(id, "100", "lent", Some("2024-01-01"), "").unwrap();
        book.add_transaction(id, "40", "borrowed", Some("2024-01-05"), "").unwrap();

        let p = book.person(id).unwrap();
        assert_eq!(ledger::net_balance(p), 60.0);
        assert_eq!(p.balance, 60.0);
        assert_eq!(p.last_activity, Some(day("2024-01-05")));

        book.delete_transaction(id, 1).unwrap();
        let p = book.person(id).unwrap();
        assert_eq!(ledger::net_balance(p), 100.0);
        assert_eq!(p.last_activity, Some(day("2024-01-01")));
        assert_eq!(stored(&book)[0].balance, 100.0);
    }

    #[test]
    fn test_deleting_only_transaction_resets_person() {
        let mut book = test_book();
        let id = book.add_person("Sam", "").unwrap().id;
        book.add_transaction(id, "25", "borrowed", Some("2024-03-03"), "").unwrap();
        book.delete_transaction(id, 0).unwrap();
        let p = book.person(id).unwrap();
        assert_eq!(p.balance, 0.0);
        assert_eq!(p.last_activity, None);
        assert!(stored(&book)[0].last_activity.is_none());
    }

    #[test]
    fn test_add_transaction_rejects_bad_input() {
        let mut book = test_book();
        let id = book.add_person("Sam", "").unwrap().id;
        for amount in ["0", "-5", "", "   ", "abc", "NaN", "inf"] {
            assert!(
                matches!(
                    book.add_transaction(id, amount, "lent", None, ""),
                    Err(LendlordError::InvalidAmount(_))
                ),
                "accepted amount {amount:?}"
            );
        }
        assert!(matches!(
            book.add_transaction(id, "5", "gift", None, ""),
            Err(LendlordError::InvalidType(_))
        ));
        assert!(matches!(
            book.add_transaction(id, "5", "lent", Some("01/02/2024"), ""),
            Err(LendlordError::InvalidDate(_))
        ));
        assert!(book.person(id).unwrap().transactions.is_empty());
        assert!(stored(&book)[0].transactions.is_empty());
    }

    #[test]
    fn test_add_transaction_blank_date_is_today() {
        let mut book = test_book();
        let id = book.add_person("Sam", "").unwrap().id;
        let t = book.add_transaction(id, "12.50", "lent", Some("  "), " pizza ").unwrap();
        assert_eq!(t.date, day("2025-06-01"));
        assert_eq!(t.amount, 12.5);
        assert_eq!(t.note, "pizza");
    }

    #[test]
    fn test_delete_transaction_out_of_range() {
        let mut book = test_book();
        let id = book.add_person("Sam", "").unwrap().id;
        book.add_transaction(id, "1", "lent", None, "").unwrap();
        assert!(matches!(
            book.delete_transaction(id, 1),
            Err(LendlordError::OutOfRange { what: "transaction", .. })
        ));
        assert_eq!(book.person(id).unwrap().transactions.len(), 1);
    }

    #[test]
    fn test_delete_person_cascades_and_clears_selection() {
        let mut book = test_book();
        let sam = book.add_person("Sam", "").unwrap().id;
        book.add_person("Amy", "").unwrap();
        book.add_transaction(sam, "30", "lent", None, "").unwrap();
        book.select(0).unwrap();
        assert_eq!(book.selected().map(|p| p.id), Some(sam));

        let removed = book.delete_person_id(book.id_at(0).unwrap()).unwrap();
        assert_eq!(removed.transactions.len(), 1);
        assert!(book.selected().is_none());
        assert_eq!(book.store().load_selection(), None);

        let left = stored(&book);
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].name, "Amy");
        assert_eq!(book.totals().lent, 0.0);

        assert!(matches!(
            book.select(1),
            Err(LendlordError::OutOfRange { what: "person", .. })
        ));
    }

    #[test]
    fn test_delete_other_person_keeps_selection() {
        let mut book = test_book();
        book.add_person("Sam", "").unwrap();
        let amy = book.add_person("Amy", "").unwrap().id;
        book.select_id(amy).unwrap();
        book.delete_person_id(book.id_at(0).unwrap()).unwrap();
        assert_eq!(book.selected().map(|p| p.id), Some(amy));
    }

    #[test]
    fn test_selection_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lendlord.db");
        let today = day("2025-06-01");
        let amy = {
            let mut book = Book::open(Store::open(&path).unwrap(), today).unwrap();
            book.add_person("Sam", "").unwrap();
            let amy = book.add_person("Amy", "").unwrap().id;
            book.select(1).unwrap();
            amy
        };
        let book = Book::open(Store::open(&path).unwrap(), today).unwrap();
        assert_eq!(book.selected().map(|p| p.id), Some(amy));
        assert_eq!(book.target(None).unwrap(), amy);
    }

    #[test]
    fn test_selection_survives_reopen_of_document_without_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lendlord.db");
        let today = day("2025-06-01");
        Store::open(&path)
            .unwrap()
            .write_slot(
                PEOPLE_KEY,
                r#"[{"name":"Sam","notes":"","transactions":[
                    {"amount":100,"type":"lent","date":"2024-01-01","note":""}
                ],"balance":100,"lastActivity":"2024-01-01","createdAt":"2024-01-01"}]"#,
            )
            .unwrap();

        let sam = {
            let mut book = Book::open(Store::open(&path).unwrap(), today).unwrap();
            book.select(0).unwrap().id
        };
        let mut book = Book::open(Store::open(&path).unwrap(), today).unwrap();
        assert_eq!(book.selected().map(|p| p.id), Some(sam));
        let target = book.target(None).unwrap();
        book.add_transaction(target, "10", "lent", None, "").unwrap();
        assert_eq!(book.person(sam).unwrap().balance, 110.0);
    }

    #[test]
    fn test_repaired_document_is_written_back_once() {
        let store = Store::in_memory().unwrap();
        store
            .write_slot(PEOPLE_KEY, r#"[{"name":"Amy","createdAt":"2024-01-01"}]"#)
            .unwrap();
        let book = Book::open(store, day("2025-06-01")).unwrap();
        let (people, report) = book.store().load_with_report(book.today());
        assert!(report.is_clean());
        assert_eq!(people[0].id, book.people()[0].id);
    }

    #[test]
    fn test_delete_unknown_transaction_id_is_out_of_range() {
        let mut book = test_book();
        let id = book.add_person("Sam", "").unwrap().id;
        book.add_transaction(id, "5", "lent", None, "").unwrap();
        assert!(matches!(
            book.delete_transaction_id(id, Uuid::new_v4()),
            Err(LendlordError::OutOfRange { what: "transaction", len: 1, .. })
        ));
        assert_eq!(book.person(id).unwrap().transactions.len(), 1);
    }

    #[test]
    fn test_resolve_by_position_or_name() {
        let mut book = test_book();
        let sam = book.add_person("Sam", "").unwrap().id;
        let amy = book.add_person("Amy", "").unwrap().id;
        assert_eq!(book.resolve("1").unwrap(), sam);
        assert_eq!(book.resolve("amy").unwrap(), amy);
        assert!(matches!(book.resolve("0"), Err(LendlordError::OutOfRange { .. })));
        assert!(matches!(book.resolve("3"), Err(LendlordError::OutOfRange { .. })));
        assert!(matches!(book.resolve("Zed"), Err(LendlordError::UnknownPerson(_))));
        assert!(matches!(book.target(None), Err(LendlordError::NoSelection)));
    }

    #[test]
    fn test_sort_by_name_persists() {
        let mut book = test_book();
        for n in ["Bob", "amy", "Zed"] {
            book.add_person(n, "").unwrap();
        }
        book.sort_by_name().unwrap();
        let order: Vec<String> = stored(&book).into_iter().map(|p| p.name).collect();
        assert_eq!(order, vec!["amy", "Bob", "Zed"]);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount(" 42.5 ").unwrap(), 42.5);
        assert!(parse_amount("1e400").is_err());
        assert!(parse_amount("0.0").is_err());
    }
}
