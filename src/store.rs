use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;
use rusqlite::backup::Backup;
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::codec::{self, LoadReport};
use crate::error::Result;
use crate::models::Person;

pub const PEOPLE_KEY: &str = "lendlord_people_v1";
pub const SELECTION_KEY: &str = "lendlord_selection_v1";

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS slots (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT DEFAULT (datetime('now'))
);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Key-value slots in a local SQLite file. Every write replaces a whole slot
/// in one statement, so readers never see a partial document.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = get_connection(db_path)?;
        init_db(&conn)?;
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_db(&conn)?;
        Ok(Self { conn })
    }

    /// Copy the whole database to `dest` while it stays open. Returns the
    /// size of the copy in bytes.
    pub fn backup_to(&self, dest: &Path) -> Result<u64> {
        let mut dest_conn = Connection::open(dest)?;
        let backup = Backup::new(&self.conn, &mut dest_conn)?;
        backup.run_to_completion(100, Duration::from_millis(10), None)?;
        drop(backup);
        drop(dest_conn);
        let size = std::fs::metadata(dest)?.len();
        log::info!("event=backup path={} bytes={size}", dest.display());
        Ok(size)
    }

    pub fn read_slot(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> = self
            .conn
            .query_row("SELECT value FROM slots WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    pub fn write_slot(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }

    pub fn clear_slot(&self, key: &str) -> Result<()> {
        self.conn.execute("DELETE FROM slots WHERE key = ?1", [key])?;
        Ok(())
    }

    /// Load the people collection. A missing, unreadable or unparsable slot
    /// yields an empty collection.
    pub fn load(&self, today: NaiveDate) -> Vec<Person> {
        self.load_with_report(today).0
    }

    /// Like [`Store::load`], also returning what the decoder had to repair.
    /// An empty or corrupt slot reports clean: there is nothing to write back.
    pub fn load_with_report(&self, today: NaiveDate) -> (Vec<Person>, LoadReport) {
        let raw = match self.read_slot(PEOPLE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return (Vec::new(), LoadReport::default()),
            Err(e) => {
                log::warn!("event=load status=unavailable error={e}");
                return (Vec::new(), LoadReport::default());
            }
        };
        match codec::decode(&raw, today) {
            Ok((people, report)) => {
                if !report.is_clean() {
                    log::warn!(
                        "event=load status=repaired people={} repaired={} dropped={}",
                        people.len(),
                        report.repaired,
                        report.dropped
                    );
                }
                (people, report)
            }
            Err(e) => {
                log::warn!("event=load status=corrupt error={e}");
                (Vec::new(), LoadReport::default())
            }
        }
    }

    pub fn save(&self, people: &[Person]) -> Result<()> {
        let doc = codec::encode(people)?;
        self.write_slot(PEOPLE_KEY, &doc)?;
        log::debug!("event=save people={} bytes={}", people.len(), doc.len());
        Ok(())
    }

    pub fn load_selection(&self) -> Option<Uuid> {
        self.read_slot(SELECTION_KEY)
            .ok()
            .flatten()
            .and_then(|s| Uuid::parse_str(s.trim()).ok())
    }

    pub fn save_selection(&self, selected: Option<Uuid>) -> Result<()> {
        match selected {
            Some(id) => self.write_slot(SELECTION_KEY, &id.to_string()),
            None => self.clear_slot(SELECTION_KEY),
        }
    }
}
