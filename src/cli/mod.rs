pub mod backup;
pub mod currency;
pub mod demo;
pub mod init;
pub mod people;
pub mod status;
pub mod summary;
pub mod txn;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::book::Book;
use crate::error::Result;
use crate::selection::SortMode;
use crate::settings::load_settings;
use crate::store::Store;

pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub(crate) fn open_book() -> Result<Book> {
    let settings = load_settings();
    let store = Store::open(&settings.db_path())?;
    Book::open(store, today())
}

#[derive(Parser)]
#[command(name = "lendlord", about = "Keep track of who owes you and who you owe.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and create the ledger database.
    Init {
        /// Path for lendlord data (default: ~/Documents/lendlord)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Add a person.
    Add {
        /// Display name
        name: String,
        /// Free-text notes
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Change a person's name or notes.
    Edit {
        /// List position or name (default: selected person)
        who: Option<String>,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a person and all of their transactions.
    Remove {
        /// List position or name (default: selected person)
        who: Option<String>,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// List people with their balances.
    List {
        /// Only show people whose name or notes contain this text
        #[arg(long, short)]
        search: Option<String>,
        /// Display order
        #[arg(long, value_enum, default_value_t = SortMode::Stored)]
        sort: SortMode,
    },
    /// Reorder the stored list alphabetically.
    Sort,
    /// Choose the person that other commands act on.
    Select {
        /// List position or name
        #[arg(required_unless_present = "clear")]
        who: Option<String>,
        /// Clear the current selection
        #[arg(long, conflicts_with = "who")]
        clear: bool,
    },
    /// Show a person's totals and transactions.
    Show {
        /// List position or name (default: selected person)
        who: Option<String>,
    },
    /// Add or delete transactions.
    Txn {
        #[command(subcommand)]
        command: TxnCommands,
    },
    /// Totals across everyone.
    Summary,
    /// Show or set the currency used to label amounts.
    Currency {
        /// Three-letter code, e.g. INR, USD, EUR
        code: Option<String>,
    },
    /// Load sample people and transactions to explore lendlord.
    Demo,
    /// Back up the ledger database.
    Backup {
        /// Output path (default: <data_dir>/backups/lendlord-YYYYMMDD-HHMMSS.db)
        #[arg(long)]
        output: Option<String>,
    },
    /// Show settings, paths and counts.
    Status,
}

#[derive(Subcommand)]
pub enum TxnCommands {
    /// Record money lent or borrowed.
    #[command(allow_negative_numbers = true)]
    Add {
        /// Amount, greater than zero
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// lent (they owe you) or borrowed (you owe them)
        #[arg(long = "type", default_value = "lent")]
        kind: String,
        /// Date: YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Short note
        #[arg(long, default_value = "")]
        note: String,
        /// List position or name (default: selected person)
        #[arg(long)]
        person: Option<String>,
    },
    /// Delete a transaction by its row number in `lendlord show`.
    Delete {
        /// Row number
        row: usize,
        /// List position or name (default: selected person)
        #[arg(long)]
        person: Option<String>,
    },
}
