use std::io::Write;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::book::Book;
use crate::error::{LendlordError, Result};
use crate::fmt::{activity, money};
use crate::ledger::{net_balance, person_totals};
use crate::models::{Person, TxnType};
use crate::selection::{arrange, SortMode};
use crate::settings::load_settings;

use super::open_book;

pub(crate) fn signed(amount: f64, currency: &str) -> String {
    let text = money(amount, currency);
    if amount >= 0.0 {
        text.green().to_string()
    } else {
        text.red().to_string()
    }
}

pub(crate) fn print_list(book: &Book, search: &str, sort: SortMode, currency: &str) {
    let rows = arrange(book.people(), search, sort);
    if rows.is_empty() {
        if book.people().is_empty() {
            println!("No people yet. Add one with `lendlord add <NAME>`.");
        } else {
            println!("No one matches '{}'.", search.trim());
        }
        return;
    }

    let selected = book.selected().map(|p| p.id);
    let mut table = Table::new();
    table.set_header(vec!["#", "Name", "Last", "Balance"]);
    for (pos, p) in rows {
        let marker = if Some(p.id) == selected { "*" } else { "" };
        table.add_row(vec![
            Cell::new(format!("{}{marker}", pos + 1)),
            Cell::new(&p.name),
            Cell::new(activity(p.last_activity)),
            Cell::new(signed(net_balance(p), currency)),
        ]);
    }
    println!("People\n{table}");
}

pub fn list(search: Option<String>, sort: SortMode) -> Result<()> {
    let settings = load_settings();
    let book = open_book()?;
    print_list(&book, search.as_deref().unwrap_or(""), sort, &settings.currency);
    Ok(())
}

pub fn add(name: &str, notes: &str) -> Result<()> {
    let mut book = open_book()?;
    let person = book.add_person(name, notes)?;
    println!("Added {}", person.name);
    Ok(())
}

pub fn edit(who: Option<&str>, name: Option<&str>, notes: Option<&str>) -> Result<()> {
    let mut book = open_book()?;
    let id = book.target(who)?;
    let current = book.person(id)?;
    let name = name.unwrap_or(current.name.as_str()).to_string();
    let notes = notes.unwrap_or(current.notes.as_str()).to_string();
    let person = book.edit_person(id, &name, &notes)?;
    println!("Updated {}", person.name);
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N]: ");
    std::io::stdout().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}

pub fn remove(who: Option<&str>, yes: bool) -> Result<()> {
    let mut book = open_book()?;
    let id = book.target(who)?;
    let name = book.person(id)?.name.clone();
    if !yes && !confirm(&format!("Delete {name}? This will remove all transactions."))? {
        println!("{}", "Cancelled.".yellow());
        return Ok(());
    }
    let removed = book.delete_person_id(id)?;
    println!(
        "Deleted {} ({} transactions)",
        removed.name,
        removed.transactions.len()
    );
    Ok(())
}

pub fn sort() -> Result<()> {
    let mut book = open_book()?;
    book.sort_by_name()?;
    println!("Sorted {} people by name.", book.people().len());
    Ok(())
}

pub fn select(who: Option<&str>, clear: bool) -> Result<()> {
    let mut book = open_book()?;
    if clear {
        book.clear_selection()?;
        println!("Selection cleared.");
        return Ok(());
    }
    let who = who.ok_or(LendlordError::RequiredFieldMissing("Person"))?;
    let position = who.trim().parse::<usize>().ok().and_then(|n| n.checked_sub(1));
    let person = match position {
        Some(index) => book.select(index)?,
        None => {
            let id = book.resolve(who)?;
            book.select_id(id)?
        }
    };
    println!("Selected {}", person.name);
    Ok(())
}

pub(crate) fn print_person(person: &Person, currency: &str) {
    let totals = person_totals(person);
    println!("{}", person.name.bold());
    if !person.notes.is_empty() {
        println!("{}", person.notes.dimmed());
    }
    println!();
    println!("Owed to you:  {}", money(totals.lent, currency).green());
    println!("You owe:      {}", money(totals.borrowed, currency).red());
    println!("Net:          {}", signed(totals.net, currency));
    println!();

    if person.transactions.is_empty() {
        println!("No transactions yet.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec!["#", "Date", "Amount", "Type", "Note"]);
    for (i, t) in person.transactions.iter().enumerate() {
        let label = match t.kind {
            TxnType::Lent => t.kind.label().green(),
            TxnType::Borrowed => t.kind.label().red(),
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(t.date),
            Cell::new(money(t.amount, currency)),
            Cell::new(label),
            Cell::new(&t.note),
        ]);
    }
    println!("Transactions\n{table}");
}

pub fn show(who: Option<&str>) -> Result<()> {
    let settings = load_settings();
    let book = open_book()?;
    let id = book.target(who)?;
    print_person(book.person(id)?, &settings.currency);
    Ok(())
}
