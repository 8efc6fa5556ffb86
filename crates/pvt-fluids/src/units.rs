//! Text input with unit tags.
//!
//! Parses user text such as `"150 barg"`, `"180F"` or `"35%"` into a canonical
//! value: pressure in Pa (absolute), temperature in K, fractions as 0..1,
//! liquid rate in m³/day. Gauge pressures are referenced to one standard
//! atmosphere.

use pvt_core::units::{BAR_PER_ATM, KELVIN_OFFSET, PSI_PER_BAR};
use std::fmt;
use thiserror::Error;

const PA_PER_BAR: f64 = 1e5;
const M3_PER_BBL: f64 = 0.158_987_294_928;

/// Dimension/quantity family for a numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Temperature (canonical: K)
    Temperature,
    /// Pressure, absolute or gauge-tagged (canonical: absolute Pa)
    Pressure,
    /// Fraction in [0, 1], plain or percent (water cut)
    Fraction,
    /// Plain number or percent (specific gravity, ratios)
    Dimensionless,
    /// Volumetric liquid rate (canonical: m³/day)
    LiquidRate,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "Temperature"),
            Self::Pressure => write!(f, "Pressure"),
            Self::Fraction => write!(f, "Fraction"),
            Self::Dimensionless => write!(f, "Dimensionless"),
            Self::LiquidRate => write!(f, "Liquid Rate"),
        }
    }
}

/// Error in unit parsing or conversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Unknown unit '{unit}' for {quantity}")]
    UnknownUnit { unit: String, quantity: Quantity },

    /// Unit not allowed as-is (plain "psi" needs "psia" or "psig").
    #[error("Ambiguous unit '{unit}': {reason}")]
    AmbiguousUnit { unit: String, reason: &'static str },

    #[error("Value {value} out of range: {reason}")]
    OutOfRange { value: f64, reason: &'static str },
}

/// Parse a quantity value from user input text into its canonical unit.
///
/// - `raw_text`: user input (e.g., "70F", "2000 psia", "50%")
/// - `quantity`: dimension family the text must belong to
pub fn parse_quantity(raw_text: &str, quantity: Quantity) -> Result<f64, UnitError> {
    let trimmed = raw_text.trim();

    match quantity {
        Quantity::Temperature => parse_temperature(trimmed),
        Quantity::Pressure => parse_pressure(trimmed),
        Quantity::Fraction => parse_fraction(trimmed),
        Quantity::Dimensionless => parse_dimensionless(trimmed),
        Quantity::LiquidRate => parse_liquid_rate(trimmed),
    }
}

/// Parse temperature, return Kelvin. Bare numbers are Kelvin.
fn parse_temperature(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let kelvin = match unit.to_lowercase().as_str() {
        "k" | "kelvin" => value,
        "c" | "°c" | "degc" | "celsius" => value + KELVIN_OFFSET,
        "f" | "°f" | "degf" | "fahrenheit" => (value + 459.67) * 5.0 / 9.0,
        "r" | "°r" | "degr" | "rankine" => value * 5.0 / 9.0,
        "" => value,
        _ => {
            return Err(UnitError::UnknownUnit {
                unit,
                quantity: Quantity::Temperature,
            });
        }
    };

    if kelvin <= 0.0 {
        return Err(UnitError::OutOfRange {
            value: kelvin,
            reason: "absolute temperature must be > 0 K",
        });
    }

    Ok(kelvin)
}

/// Parse pressure, return absolute Pa. Bare numbers are bar.
fn parse_pressure(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let p_bar = match unit.to_lowercase().as_str() {
        "pa" | "pascal" => value / PA_PER_BAR,
        "kpa" => value * 1e3 / PA_PER_BAR,
        "mpa" => value * 1e6 / PA_PER_BAR,
        "bar" | "bara" | "" => value,
        "atm" => value * BAR_PER_ATM,
        "psia" => value / PSI_PER_BAR,
        "barg" => value + BAR_PER_ATM,
        "psig" => value / PSI_PER_BAR + BAR_PER_ATM,
        "kpag" => value * 1e3 / PA_PER_BAR + BAR_PER_ATM,
        "mpag" => value * 1e6 / PA_PER_BAR + BAR_PER_ATM,
        "psi" => {
            return Err(UnitError::AmbiguousUnit {
                unit,
                reason: "use 'psia' (absolute) or 'psig' (gauge)",
            });
        }
        _ => {
            return Err(UnitError::UnknownUnit {
                unit,
                quantity: Quantity::Pressure,
            });
        }
    };

    let pa = p_bar * PA_PER_BAR;
    if pa <= 0.0 {
        return Err(UnitError::OutOfRange {
            value: pa,
            reason: "absolute pressure must be > 0",
        });
    }

    Ok(pa)
}

/// Parse a fraction in [0, 1], accepting percent notation.
fn parse_fraction(input: &str) -> Result<f64, UnitError> {
    let value = parse_dimensionless(input)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(UnitError::OutOfRange {
            value,
            reason: "fraction must be between 0 and 1",
        });
    }
    Ok(value)
}

/// Parse a plain number or percent.
fn parse_dimensionless(input: &str) -> Result<f64, UnitError> {
    let trimmed = input.trim();
    let parse = |text: &str| {
        text.trim().parse::<f64>().map_err(|_| {
            UnitError::ParseError(format!("could not parse dimensionless value from '{input}'"))
        })
    };
    match trimmed.strip_suffix('%') {
        Some(percent) => Ok(parse(percent)? / 100.0),
        None => parse(trimmed),
    }
}

/// Parse a liquid rate, return m³/day. Bare numbers are m³/day.
fn parse_liquid_rate(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let m3_day = match unit.to_lowercase().as_str() {
        "m3/day" | "m3/d" | "m³/day" | "m³/d" | "" => value,
        "bbl/day" | "bbl/d" | "bpd" => value * M3_PER_BBL,
        "m3/h" | "m³/h" => value * 24.0,
        _ => {
            return Err(UnitError::UnknownUnit {
                unit,
                quantity: Quantity::LiquidRate,
            });
        }
    };

    if m3_day <= 0.0 {
        return Err(UnitError::OutOfRange {
            value: m3_day,
            reason: "liquid rate must be positive",
        });
    }

    Ok(m3_day)
}

/// Split a value+unit string into (numeric_value, unit_string).
///
/// Examples:
/// - "70F" -> (70.0, "F")
/// - "2000 psia" -> (2000.0, "psia")
/// - "300" -> (300.0, "")
fn split_value_and_unit(input: &str) -> Result<(f64, String), UnitError> {
    let trimmed = input.trim();

    // Exponent markers count as numeric only when followed by a digit or sign
    let bytes = trimmed.as_bytes();
    let mut split_idx = trimmed.len();
    for (i, c) in trimmed.char_indices() {
        let numeric = c.is_ascii_digit()
            || c == '.'
            || ((c == '-' || c == '+') && (i == 0 || matches!(bytes[i - 1], b'e' | b'E')))
            || ((c == 'e' || c == 'E')
                && i > 0
                && bytes
                    .get(i + 1)
                    .is_some_and(|b| b.is_ascii_digit() || *b == b'-' || *b == b'+'));
        if !numeric {
            split_idx = i;
            break;
        }
    }

    let (num_part, unit_part) = trimmed.split_at(split_idx);
    let value: f64 = num_part.trim().parse().map_err(|_| {
        UnitError::ParseError(format!("could not parse numeric value from '{input}'"))
    })?;

    Ok((value, unit_part.trim().to_string()))
}
