//! Parsing of the `DD.MM.YYYY` / `HH:MM` birth input format.
//!
//! Only the shape is checked here; calendar validity is left to
//! `natal::normalize_time`.

use natal::{CivilDate, CivilTime};

fn field<T: std::str::FromStr>(text: &str, what: &str, input: &str) -> anyhow::Result<T> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        anyhow::bail!("Bad {} in {:?}", what, input);
    }
    text.parse()
        .map_err(|_| anyhow::anyhow!("Bad {} in {:?}", what, input))
}

pub fn parse_date(input: &str) -> anyhow::Result<CivilDate> {
    let parts: Vec<&str> = input.trim().split('.').collect();
    let [day, month, year] = parts.as_slice() else {
        anyhow::bail!("Expected date as DD.MM.YYYY, got {:?}", input);
    };
    Ok(CivilDate::new(
        field(day, "day", input)?,
        field(month, "month", input)?,
        field(year, "year", input)?,
    ))
}

pub fn parse_time(input: &str) -> anyhow::Result<CivilTime> {
    let Some((hour, minute)) = input.trim().split_once(':') else {
        anyhow::bail!("Expected time as HH:MM, got {:?}", input);
    };
    Ok(CivilTime::new(
        field(hour, "hour", input)?,
        field(minute, "minute", input)?,
    ))
}
