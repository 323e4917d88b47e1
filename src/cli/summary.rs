use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::book::Book;
use crate::error::Result;
use crate::fmt::money;
use crate::selection::SortMode;
use crate::settings::load_settings;

use super::open_book;
use super::people::{print_list, signed};

fn print_totals(book: &Book, currency: &str) {
    let totals = book.totals();
    let mut table = Table::new();
    table.set_header(vec!["", "Amount"]);
    table.add_row(vec![
        Cell::new("Owed to you".green().bold()),
        Cell::new(money(totals.lent, currency)),
    ]);
    table.add_row(vec![
        Cell::new("You owe".red().bold()),
        Cell::new(money(totals.borrowed, currency)),
    ]);
    table.add_row(vec![
        Cell::new("Net".bold()),
        Cell::new(signed(totals.net, currency)),
    ]);
    println!("Summary\n{table}");
}

pub fn run() -> Result<()> {
    let settings = load_settings();
    let book = open_book()?;
    print_totals(&book, &settings.currency);
    Ok(())
}

/// Shown when no subcommand is given.
pub fn home() -> Result<()> {
    let settings = load_settings();
    let book = open_book()?;
    print_totals(&book, &settings.currency);
    println!();
    print_list(&book, "", SortMode::Stored, &settings.currency);
    if let Some(p) = book.selected() {
        println!("\nSelected: {}", p.name.bold());
    }
    Ok(())
}
