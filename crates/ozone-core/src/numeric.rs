//! Numeric coercion for user-entered quantities.
//!
//! Quantities arrive as whatever the user typed or the backend prefilled:
//! decimals, exponent notation, blanks or nothing at all. Every rule is
//! written against [`value_converter`], which never fails, and [`do_sum`],
//! which accumulates in `Decimal` so `0.1 + 0.2` is exactly `0.3`.

use crate::field::FieldValue;
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::debug;

/// Largest exponent magnitude `Decimal` can hold: 28 digits of scale, and
/// under 8e28 in magnitude.
const MAX_EXPONENT: i32 = 28;

/// Parse a plain or exponent-notation decimal string. Blank input and
/// anything that is not entirely numeric yields `None`.
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = Decimal::from_str(s) {
        return Some(d);
    }
    let lower = s.to_ascii_lowercase();
    let (_, exp) = lower.split_once('e')?;
    match exp.parse::<i32>() {
        Ok(e) if e.abs() <= MAX_EXPONENT => Decimal::from_scientific(&lower).ok(),
        Ok(e) => {
            debug!(input = s, exponent = e, "exponent out of decimal range");
            None
        }
        Err(_) => None,
    }
}

/// Coerce a field value to a decimal: absent, blank, non-numeric text,
/// booleans and lists all count as zero.
pub fn value_converter(value: Option<&FieldValue>) -> Decimal {
    match value {
        Some(FieldValue::Number(d)) => *d,
        Some(FieldValue::Text(s)) => parse_decimal(s).unwrap_or(Decimal::ZERO),
        Some(FieldValue::Bool(_)) | Some(FieldValue::List(_)) | None => Decimal::ZERO,
    }
}

/// Exact sum of [`value_converter`] over `items`. The empty sum is zero.
pub fn do_sum<'a, I>(items: I) -> Decimal
where
    I: IntoIterator<Item = Option<&'a FieldValue>>,
{
    items
        .into_iter()
        .map(value_converter)
        .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v))
}

/// Plain decimal rendering without exponent notation or trailing zeros.
pub fn format_decimal(d: Decimal) -> String {
    if d.is_zero() {
        return "0".to_string();
    }
    d.normalize().to_string()
}

/// Whether a value counts as "filled in" for aggregation: non-zero numbers,
/// non-blank text that is not a numeric zero, `true`, and non-empty lists.
pub fn is_truthy(value: Option<&FieldValue>) -> bool {
    match value {
        None => false,
        Some(FieldValue::Number(d)) => !d.is_zero(),
        Some(FieldValue::Text(s)) => {
            let t = s.trim();
            !t.is_empty() && parse_decimal(t).map_or(true, |d| !d.is_zero())
        }
        Some(FieldValue::Bool(b)) => *b,
        Some(FieldValue::List(items)) => !items.is_empty(),
    }
}
