use alloy_primitives::U256;

use crate::{Error, Result};

/// Largest decimal count whose scale factor fits in 256 bits.
pub const MAX_DECIMALS: u8 = 77;

/// Parse a human decimal literal such as `"0.1"` into raw units.
pub fn parse_units(literal: &str, decimals: u8) -> Result<U256> {
    if decimals > MAX_DECIMALS {
        return Err(Error::InvalidAmount(format!(
            "{} decimal places is more than supported",
            decimals
        )));
    }

    let literal = literal.trim();
    let (int_part, frac_part) = literal.split_once('.').unwrap_or((literal, ""));

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(Error::InvalidAmount(format!("'{}' is not a number", literal)));
    }
    if !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidAmount(format!("'{}' is not a number", literal)));
    }
    if frac_part.len() > decimals as usize {
        return Err(Error::InvalidAmount(format!(
            "'{}' has more than {} fractional digits",
            literal, decimals
        )));
    }

    let padding = "0".repeat(decimals as usize - frac_part.len());
    let digits = format!("{}{}{}", int_part, frac_part, padding);
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }

    U256::from_str_radix(digits, 10)
        .map_err(|e| Error::InvalidAmount(format!("'{}' is out of range: {}", literal, e)))
}

fn split_units(raw: U256, decimals: u8) -> (String, String) {
    let digits = raw.to_string();
    let scale = decimals as usize;
    let padded = if digits.len() <= scale {
        format!("{}{}", "0".repeat(scale - digits.len() + 1), digits)
    } else {
        digits
    };
    let (int_part, frac_part) = padded.split_at(padded.len() - scale);
    (int_part.to_string(), frac_part.to_string())
}

/// Full precision decimal string, e.g. `1500000000000000000` at 18 decimals is `"1.5"`.
pub fn format_units(raw: U256, decimals: u8) -> String {
    let (int_part, frac_part) = split_units(raw, decimals);
    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.is_empty() {
        format!("{}.0", int_part)
    } else {
        format!("{}.{}", int_part, frac_part)
    }
}

/// Decimal string truncated (never rounded up) to `places` fractional digits.
pub fn format_display(raw: U256, decimals: u8, places: u8) -> String {
    let (int_part, frac_part) = split_units(raw, decimals);
    if places == 0 {
        return int_part;
    }
    let mut shown: String = frac_part.chars().take(places as usize).collect();
    while shown.len() < places as usize {
        shown.push('0');
    }
    format!("{}.{}", int_part, shown)
}
