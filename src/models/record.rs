//! Portfolio records and their JSON rendering.
//!
//! DynamoDB stores numbers as arbitrary-precision decimals sent over the wire
//! as strings. Clients expect plain JSON numbers, so every `N` attribute goes
//! through [`normalize_number`]: integral values become JSON integers
//! (`5`, never `5.0`), everything else becomes a JSON float (`4.5`).

use crate::error::AppError;
use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Number, Value};
use std::collections::HashMap;

/// Longest integer DynamoDB can hold (`1E+125` has 126 digits).
const MAX_INTEGER_DIGITS: i64 = 126;

/// A raw item as returned by a scan.
pub type Item = HashMap<String, AttributeValue>;

/// Render a whole scan result as a JSON array.
pub fn items_to_json(items: Vec<Item>) -> Result<Value, AppError> {
    items
        .into_iter()
        .map(item_to_json)
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

/// Render one item as a JSON object.
pub fn item_to_json(item: Item) -> Result<Value, AppError> {
    let mut object = Map::with_capacity(item.len());
    for (name, attribute) in item {
        let value = attribute_to_json(&name, attribute)?;
        object.insert(name, value);
    }
    Ok(Value::Object(object))
}

/// Convert a single attribute value.
///
/// # Mapping
///
/// - `S` → string, `BOOL` → bool, `NULL` → null
/// - `N` → normalized number
/// - `L` → array, `M` → object
/// - `SS` → array of strings, `NS` → array of normalized numbers
/// - `B`, `BS` → error (binary has no JSON form)
fn attribute_to_json(name: &str, attribute: AttributeValue) -> Result<Value, AppError> {
    let value = match attribute {
        AttributeValue::S(s) => Value::String(s),
        AttributeValue::N(n) => Value::Number(normalize_number(&n)?),
        AttributeValue::Bool(b) => Value::Bool(b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(list) => Value::Array(
            list.into_iter()
                .map(|element| attribute_to_json(name, element))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(map) => {
            let mut object = Map::with_capacity(map.len());
            for (key, element) in map {
                let value = attribute_to_json(&key, element)?;
                object.insert(key, value);
            }
            Value::Object(object)
        }
        AttributeValue::Ss(strings) => {
            Value::Array(strings.into_iter().map(Value::String).collect())
        }
        AttributeValue::Ns(numbers) => Value::Array(
            numbers
                .iter()
                .map(|n| normalize_number(n).map(Value::Number))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::B(_) => return Err(unsupported(name, "Binary")),
        AttributeValue::Bs(_) => return Err(unsupported(name, "BinarySet")),
        _ => return Err(unsupported(name, "Unknown")),
    };
    Ok(value)
}

fn unsupported(attribute: &str, kind: &'static str) -> AppError {
    AppError::UnsupportedAttribute {
        attribute: attribute.to_string(),
        kind,
    }
}

/// Normalize a DynamoDB decimal string into a JSON number.
///
/// Accepts an optional sign, digits with an optional fractional part, and an
/// optional exponent (`"5"`, `"-4.50"`, `"1E+2"`, `"12.5e-1"`).
///
/// - Zero fractional part: exact integer (`"5.00"` → `5`, `"1E+2"` → `100`),
///   including values beyond 64 bits.
/// - Otherwise: `f64` (`"4.5"` → `4.5`).
///
/// # Errors
///
/// [`AppError::InvalidNumber`] if the string is not a decimal.
pub fn normalize_number(raw: &str) -> Result<Number, AppError> {
    let invalid = || AppError::InvalidNumber(raw.to_string());
    let text = raw.trim();

    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => {
            let exponent = unsigned[at + 1..].parse::<i64>().map_err(|_| invalid())?;
            (&unsigned[..at], exponent)
        }
        None => (unsigned, 0),
    };

    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    // value = digits * 10^scale
    let digits = format!("{whole}{fraction}");
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(Number::from(0u64));
    }
    let stripped = significant.trim_end_matches('0');
    let scale = exponent
        .saturating_sub(fraction.len() as i64)
        .saturating_add((significant.len() - stripped.len()) as i64);

    if scale >= 0 {
        if let Some(integer) = integral_number(negative, stripped, scale) {
            return Ok(integer);
        }
    }

    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or_else(invalid)
}

/// `digits * 10^scale` as an exact integer.
///
/// Numbers are kept as their decimal text, so 38-digit values survive intact.
fn integral_number(negative: bool, digits: &str, scale: i64) -> Option<Number> {
    // DynamoDB tops out at 1E+125
    if (digits.len() as i64).saturating_add(scale) > MAX_INTEGER_DIGITS {
        return None;
    }
    let mut literal = String::with_capacity(digits.len() + scale as usize + 1);
    if negative {
        literal.push('-');
    }
    literal.push_str(digits);
    literal.extend(std::iter::repeat_n('0', scale as usize));

    literal.parse::<Number>().ok()
}
