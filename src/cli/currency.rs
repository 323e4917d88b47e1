use crate::error::{LendlordError, Result};
use crate::fmt::{currency_code, money};
use crate::settings::{load_settings, save_settings};

pub fn run(code: Option<&str>) -> Result<()> {
    let mut settings = load_settings();
    let Some(raw) = code else {
        println!(
            "Currency: {} (e.g. {})",
            settings.currency,
            money(1234.5, &settings.currency)
        );
        return Ok(());
    };

    let code = currency_code(raw).ok_or_else(|| {
        LendlordError::Settings(format!("'{raw}' is not a three-letter currency code"))
    })?;
    settings.currency = code;
    save_settings(&settings)?;
    log::info!("event=set_currency code={}", settings.currency);
    println!(
        "Amounts are now labelled {} (e.g. {}). Stored amounts are unchanged.",
        settings.currency,
        money(1234.5, &settings.currency)
    );
    Ok(())
}
