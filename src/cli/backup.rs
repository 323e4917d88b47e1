use std::path::PathBuf;

use crate::error::Result;
use crate::fmt::format_bytes;
use crate::settings::load_settings;
use crate::store::Store;

pub fn run(output: Option<String>) -> Result<()> {
    let settings = load_settings();
    let store = Store::open(&settings.db_path())?;

    let dest = match output {
        Some(p) => PathBuf::from(p),
        None => {
            let dir = PathBuf::from(&settings.data_dir).join("backups");
            std::fs::create_dir_all(&dir)?;
            let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
            dir.join(format!("lendlord-{stamp}.db"))
        }
    };

    let size = store.backup_to(&dest)?;
    println!("Backed up ledger to {} ({})", dest.display(), format_bytes(size));
    Ok(())
}
