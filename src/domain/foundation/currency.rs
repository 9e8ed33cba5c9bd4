//! ISO-4217 style currency code value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

const ZERO_DECIMAL: &[&str] = &["JPY", "KRW", "VND", "CLP", "ISK", "UGX", "XAF", "XOF"];
const THREE_DECIMAL: &[&str] = &["BHD", "KWD", "OMR", "JOD", "TND", "LYD", "IQD"];

/// Three-letter uppercase currency code, e.g. `EUR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parses a currency code, upper-casing the input.
    pub fn new(code: impl AsRef<str>) -> Result<Self, ValidationError> {
        let code = code.as_ref().trim().to_ascii_uppercase();
        if code.is_empty() {
            return Err(ValidationError::empty_field("currency"));
        }
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(ValidationError::invalid_format(
                "currency",
                format!("expected three letters, got '{}'", code),
            ));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of decimal places in the currency's minor unit.
    pub fn minor_units(&self) -> u32 {
        if ZERO_DECIMAL.contains(&self.as_str()) {
            0
        } else if THREE_DECIMAL.contains(&self.as_str()) {
            3
        } else {
            2
        }
    }

    /// Rounds an amount to the currency's minor-unit precision.
    ///
    /// Halves round away from zero as written in decimal: `1.005` EUR is
    /// `1.01`, even though the nearest `f64` lies just below the half.
    /// Works on the shortest decimal form of the float, which is the form
    /// the amount was entered or computed in.
    pub fn round(&self, amount: f64) -> f64 {
        round_decimal(amount, self.minor_units())
    }
}

/// Rounds half away from zero on the shortest round-trip decimal digits.
fn round_decimal(amount: f64, places: u32) -> f64 {
    if !amount.is_finite() {
        return amount;
    }

    let digits = amount.abs().to_string();
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));
    let places = places as usize;
    if fraction.len() <= places {
        return amount;
    }

    let kept = format!("{}{}", whole, &fraction[..places]);
    let round_up = fraction.as_bytes()[places] >= b'5';

    match kept.parse::<u64>() {
        Ok(units) if units < (1 << 53) => {
            let units = if round_up { units + 1 } else { units };
            let magnitude = units as f64 / 10_f64.powi(places as i32);
            magnitude.copysign(amount)
        }
        // Too many digits to count exactly; the float itself is coarser than a minor unit here.
        _ => amount,
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
