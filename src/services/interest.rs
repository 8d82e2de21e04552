// src/services/interest.rs
use anyhow::{bail, Result};

/// Simple annual rate for a given year of holding. Year 1 earns nothing,
/// then the tier steps up to a flat 18% from year 5 onward.
pub fn rate_for_year(year_of_holding: u32) -> Result<f64> {
    let rate = match year_of_holding {
        0 => bail!("year of holding must be at least 1"),
        1 => 0.0,
        2 => 0.06,
        3 => 0.09,
        4 => 0.12,
        _ => 0.18,
    };
    Ok(rate)
}

/// Interest accrued on `principal` for `year_of_holding`, non-compounding:
/// exactly `principal * rate(year)`.
pub fn accrued_interest(principal: f64, year_of_holding: u32) -> Result<f64> {
    let rate = rate_for_year(year_of_holding)?;
    Ok(principal * rate)
}
