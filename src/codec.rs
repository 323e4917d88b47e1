//! Encoding and validating decode of the people document.
//!
//! Stored documents have no version field and may have been written by older
//! builds or edited by hand. Decoding walks the JSON tree and either repairs a
//! field with a fixed default or drops the record, counting both in a
//! [`LoadReport`]. Derived fields (`balance`, `lastActivity`) are never trusted
//! and are always recomputed.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{LendlordError, Result};
use crate::ledger::recompute;
use crate::models::{Person, Transaction, TxnType};

pub const UNNAMED: &str = "(unnamed)";
const DATE_FMT: &str = "%Y-%m-%d";

#[derive(Debug, Default, Clone, PartialEq)]
pub struct LoadReport {
    /// Fields replaced by a default.
    pub repaired: usize,
    /// People or transactions discarded as unusable.
    pub dropped: usize,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.repaired == 0 && self.dropped == 0
    }
}

pub fn encode(people: &[Person]) -> Result<String> {
    Ok(serde_json::to_string(people)?)
}

/// Decode a stored document. Fails only when the document as a whole is
/// unusable; individual records are repaired or dropped.
pub fn decode(raw: &str, today: NaiveDate) -> Result<(Vec<Person>, LoadReport)> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| LendlordError::Corrupt(e.to_string()))?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(LendlordError::Corrupt(format!(
                "expected a list of people, found {}",
                kind_of(&other)
            )))
        }
    };

    let mut report = LoadReport::default();
    let mut people = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Object(obj) => people.push(decode_person(&obj, today, &mut report)),
            _ => report.dropped += 1,
        }
    }
    Ok((people, report))
}

fn decode_person(obj: &Map<String, Value>, today: NaiveDate, report: &mut LoadReport) -> Person {
    let id = parse_id(obj.get("id"), report);

    let name = match obj.get("name").and_then(Value::as_str).map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => {
            report.repaired += 1;
            UNNAMED.to_string()
        }
    };
    let notes = text_or_empty(obj.get("notes"), report);

    let created_at = match obj.get("createdAt").and_then(parse_date) {
        Some(d) => d,
        None => {
            report.repaired += 1;
            today
        }
    };

    let transactions = match obj.get("transactions") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|t| decode_transaction(t, created_at, report))
            .collect(),
        None | Some(Value::Null) => Vec::new(),
        Some(_) => {
            report.repaired += 1;
            Vec::new()
        }
    };

    let mut person = Person {
        id,
        name,
        notes,
        transactions,
        balance: 0.0,
        last_activity: None,
        created_at,
    };
    recompute(&mut person);

    let stored_balance = obj.get("balance").and_then(Value::as_f64);
    if stored_balance.is_some_and(|b| (b - person.balance).abs() > f64::EPSILON) {
        report.repaired += 1;
    }
    person
}

fn decode_transaction(
    value: &Value,
    fallback_date: NaiveDate,
    report: &mut LoadReport,
) -> Option<Transaction> {
    let Some(obj) = value.as_object() else {
        report.dropped += 1;
        return None;
    };

    let amount = obj.get("amount").and_then(parse_amount);
    let kind = obj
        .get("type")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<TxnType>().ok());
    let (Some(amount), Some(kind)) = (amount, kind) else {
        report.dropped += 1;
        return None;
    };

    let date = match obj.get("date").and_then(parse_date) {
        Some(d) => d,
        None => {
            report.repaired += 1;
            fallback_date
        }
    };

    Some(Transaction {
        id: parse_id(obj.get("id"), report),
        amount,
        kind,
        date,
        note: text_or_empty(obj.get("note"), report),
    })
}

fn parse_id(value: Option<&Value>, report: &mut LoadReport) -> Uuid {
    match value.and_then(Value::as_str).and_then(|s| Uuid::parse_str(s).ok()) {
        Some(id) => id,
        None => {
            report.repaired += 1;
            Uuid::new_v4()
        }
    }
}

/// Missing and null text is a legitimate empty value; anything else that is
/// not a string counts as a repair.
fn text_or_empty(value: Option<&Value>, report: &mut LoadReport) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => String::new(),
        Some(_) => {
            report.repaired += 1;
            String::new()
        }
    }
}

fn parse_amount(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (n.is_finite() && n > 0.0).then_some(n)
}

fn parse_date(value: &Value) -> Option<NaiveDate> {
    let s = value.as_str()?;
    // Older documents may carry full timestamps; keep the calendar date.
    let day = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(day, DATE_FMT).ok()
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
