mod book;
mod cli;
mod codec;
mod error;
mod fmt;
mod ledger;
mod logging;
mod models;
mod selection;
mod settings;
mod store;

use clap::Parser;

use cli::{Cli, Commands, TxnCommands};

fn main() {
    let cli = Cli::parse();

    let settings = settings::load_settings();
    // Best-effort: the ledger works without a log file.
    let logger = logging::init_logging(&settings.log_level, &settings.log_dir()).ok();

    let result = match cli.command {
        None => cli::summary::home(),
        Some(command) => match command {
            Commands::Init { data_dir } => cli::init::run(data_dir),
            Commands::Add { name, notes } => cli::people::add(&name, &notes),
            Commands::Edit { who, name, notes } => {
                cli::people::edit(who.as_deref(), name.as_deref(), notes.as_deref())
            }
            Commands::Remove { who, yes } => cli::people::remove(who.as_deref(), yes),
            Commands::List { search, sort } => cli::people::list(search, sort),
            Commands::Sort => cli::people::sort(),
            Commands::Select { who, clear } => cli::people::select(who.as_deref(), clear),
            Commands::Show { who } => cli::people::show(who.as_deref()),
            Commands::Txn { command } => match command {
                TxnCommands::Add {
                    amount,
                    kind,
                    date,
                    note,
                    person,
                } => cli::txn::add(&amount, &kind, date.as_deref(), &note, person.as_deref()),
                TxnCommands::Delete { row, person } => cli::txn::delete(row, person.as_deref()),
            },
            Commands::Summary => cli::summary::run(),
            Commands::Currency { code } => cli::currency::run(code.as_deref()),
            Commands::Demo => cli::demo::run(),
            Commands::Backup { output } => cli::backup::run(output),
            Commands::Status => cli::status::run(),
        },
    };

    if let Err(e) = result {
        log::warn!("event=command_failed error={e}");
        eprintln!("Error: {e}");
        drop(logger);
        std::process::exit(1);
    }
}
