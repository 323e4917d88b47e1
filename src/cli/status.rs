use crate::error::Result;
use crate::fmt::format_bytes;
use crate::settings::{load_settings, settings_path};
use crate::store::Store;

use super::today;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let db_path = settings.db_path();

    println!("Settings:   {}", settings_path().display());
    println!("Data dir:   {}", settings.data_dir);
    println!("Database:   {}", db_path.display());
    println!("Currency:   {}", settings.currency);
    println!("Logs:       {}", settings.log_dir().display());

    if db_path.exists() {
        let size = std::fs::metadata(&db_path)?.len();
        println!("DB size:    {}", format_bytes(size));

        let store = Store::open(&db_path)?;
        let people = store.load(today());
        let transactions: usize = people.iter().map(|p| p.transactions.len()).sum();
        let selected = store
            .load_selection()
            .and_then(|id| people.iter().find(|p| p.id == id))
            .map(|p| p.name.as_str())
            .unwrap_or("(none)");

        println!();
        println!("People:        {}", people.len());
        println!("Transactions:  {transactions}");
        println!("Selected:      {selected}");
    } else {
        println!();
        println!("Database not found. Run `lendlord init` to set up.");
    }

    Ok(())
}
