use thiserror::Error;

#[derive(Error, Debug)]
pub enum LendlordError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0} is required.")]
    RequiredFieldMissing(&'static str),

    #[error("Please enter a valid amount (got '{0}').")]
    InvalidAmount(String),

    #[error("Invalid type '{0}': expected 'lent' or 'borrowed'.")]
    InvalidType(String),

    #[error("Invalid date '{0}': expected YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("No {what} at position {index} (have {len}).")]
    OutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Unknown person: {0}")]
    UnknownPerson(String),

    #[error("Select a person first (`lendlord select <WHO>`).")]
    NoSelection,

    #[error("Stored data is unreadable: {0}")]
    Corrupt(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, LendlordError>;
