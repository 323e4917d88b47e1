use std::path::PathBuf;

use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_path, shellexpand_path, Settings};
use crate::store::Store;

pub fn run(data_dir: Option<String>) -> Result<()> {
    let mut settings = load_settings();

    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    } else if !settings_path().exists() {
        // First run: offer to change the data dir
        let default = Settings::default().data_dir;
        println!("Data directory [{default}]: ");
        let mut input = String::new();
        std::io::stdin().read_line(&mut input).ok();
        let chosen = input.trim();
        if !chosen.is_empty() {
            settings.data_dir = shellexpand_path(chosen);
        }
    }

    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&resolved)?;
    Store::open(&settings.db_path())?;

    println!("Initialized lendlord at {}", resolved.display());
    Ok(())
}
