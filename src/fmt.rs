use chrono::NaiveDate;

/// Display symbol for a currency code, if we know one.
fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "INR" => Some("\u{20b9}"),
        "USD" => Some("$"),
        "EUR" => Some("\u{20ac}"),
        "GBP" => Some("\u{a3}"),
        "JPY" => Some("\u{a5}"),
        _ => None,
    }
}

/// Normalize a user-entered currency code: three ASCII letters, upper-cased.
pub fn currency_code(raw: &str) -> Option<String> {
    let code = raw.trim().to_ascii_uppercase();
    (code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())).then_some(code)
}

/// Format an amount with thousands separators under a currency label:
/// `money(1234.5, "USD")` is `$1,234.50`. The label never changes the value.
pub fn money(val: f64, currency: &str) -> String {
    let negative = val < 0.0;
    let cents = format!("{:.2}", val.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    let prefix = match currency_symbol(currency) {
        Some(sym) => sym.to_string(),
        None => format!("{currency} "),
    };
    // -0.00 is not a debt
    let sign = if negative && cents != "0.00" { "-" } else { "" };
    format!("{sign}{prefix}{with_commas}.{dec_part}")
}

/// Last-activity cell text.
pub fn activity(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string())
        .unwrap_or_else(|| "\u{2014}".to_string())
}

pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
