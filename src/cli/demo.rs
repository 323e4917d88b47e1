use colored::Colorize;

use crate::error::Result;

use super::open_book;

// (name, notes, [(amount, type, date, note)])
const DEMO_PEOPLE: &[(&str, &str, &[(&str, &str, &str, &str)])] = &[
    (
        "Priya",
        "Flatmate",
        &[
            ("1200", "lent", "2025-01-03", "Electricity bill"),
            ("450", "borrowed", "2025-01-10", "Groceries"),
            ("300", "lent", "2025-02-01", "Cab to airport"),
        ],
    ),
    (
        "Marco",
        "Climbing club",
        &[("2500", "borrowed", "2025-01-20", "Harness and shoes")],
    ),
    (
        "Dee",
        "Cousin",
        &[
            ("5000", "lent", "2024-12-24", "Holiday travel"),
            ("5000", "borrowed", "2025-02-14", "Paid back in kind"),
        ],
    ),
    ("Tom", "New neighbour", &[]),
];

pub fn run() -> Result<()> {
    let mut book = open_book()?;
    let mut added = 0usize;
    let mut entries = 0usize;

    for (name, notes, txns) in DEMO_PEOPLE {
        if book.resolve(name).is_ok() {
            println!("{} already exists, skipping", name.yellow());
            continue;
        }
        let id = book.add_person(name, notes)?.id;
        for (amount, kind, date, note) in txns.iter() {
            book.add_transaction(id, amount, kind, Some(*date), note)?;
            entries += 1;
        }
        added += 1;
    }

    println!("Loaded {added} people with {entries} transactions.");
    println!("Try `lendlord list --sort recent` or `lendlord show Priya`.");
    Ok(())
}
