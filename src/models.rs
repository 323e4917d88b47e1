use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::LendlordError;

/// Direction of a debt relative to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnType {
    /// The user handed money over; the person owes it back.
    Lent,
    /// The user received money; the user owes it back.
    Borrowed,
}

impl TxnType {
    pub fn as_str(self) -> &'static str {
        match self {
            TxnType::Lent => "lent",
            TxnType::Borrowed => "borrowed",
        }
    }

    /// Label shown next to a transaction in the detail view.
    pub fn label(self) -> &'static str {
        match self {
            TxnType::Lent => "They owe you",
            TxnType::Borrowed => "You owe",
        }
    }
}

impl fmt::Display for TxnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxnType {
    type Err = LendlordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lent" => Ok(TxnType::Lent),
            "borrowed" => Ok(TxnType::Borrowed),
            other => Err(LendlordError::InvalidType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TxnType,
    pub date: NaiveDate,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: Uuid,
    pub name: String,
    pub notes: String,
    pub transactions: Vec<Transaction>,
    /// Cached net balance. Derived from `transactions`; see `ledger::recompute`.
    pub balance: f64,
    pub last_activity: Option<NaiveDate>,
    pub created_at: NaiveDate,
}

impl Person {
    pub fn new(name: String, notes: String, created_at: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            notes,
            transactions: Vec::new(),
            balance: 0.0,
            last_activity: None,
            created_at,
        }
    }
}
