use crate::error::{LendlordError, Result};
use crate::fmt::money;
use crate::settings::load_settings;

use super::open_book;
use super::people::signed;

pub fn add(
    amount: &str,
    kind: &str,
    date: Option<&str>,
    note: &str,
    person: Option<&str>,
) -> Result<()> {
    let settings = load_settings();
    let mut book = open_book()?;
    let id = book.target(person)?;
    let txn = book.add_transaction(id, amount, kind, date, note)?;
    let line = format!(
        "Recorded {} {} on {}",
        money(txn.amount, &settings.currency),
        txn.kind,
        txn.date
    );
    let p = book.person(id)?;
    println!("{line} for {}", p.name);
    println!("Net with {}: {}", p.name, signed(p.balance, &settings.currency));
    Ok(())
}

pub fn delete(row: usize, person: Option<&str>) -> Result<()> {
    let settings = load_settings();
    let mut book = open_book()?;
    let id = book.target(person)?;
    let Some(index) = row.checked_sub(1) else {
        return Err(LendlordError::OutOfRange {
            what: "transaction",
            index: row,
            len: book.person(id)?.transactions.len(),
        });
    };
    let removed = book.delete_transaction(id, index)?;
    let p = book.person(id)?;
    println!(
        "Deleted {} {} from {}",
        money(removed.amount, &settings.currency),
        removed.kind,
        removed.date
    );
    println!("Net with {}: {}", p.name, signed(p.balance, &settings.currency));
    Ok(())
}
