//! Text to typed value conversion for field defaults, environment values and
//! flag arguments.
//!
//! Integers accept the same base prefixes as source literals: `0x` hex, `0o`
//! or a leading `0` octal, `0b` binary, decimal otherwise. Underscores may
//! separate digits in any base and may directly follow a base prefix.

use crate::duration::parse_duration;
use crate::error::CoerceError;
use crate::types::{Kind, Value};

/// Convert `text` into a value of `kind`.
///
/// Returns `Ok(None)` for [`Kind::Map`] and [`Kind::Unsupported`]: those kinds
/// have no textual form and are skipped rather than treated as errors.
pub fn coerce(text: &str, kind: Kind) -> Result<Option<Value>, CoerceError> {
    let value = match kind {
        Kind::Str => Value::Str(text.to_string()),
        Kind::Bool => Value::Bool(parse_bool(text).ok_or_else(|| syntax(kind, text))?),
        Kind::Int | Kind::I8 | Kind::I16 | Kind::I32 | Kind::I64 => {
            let v = if text.is_empty() {
                0
            } else {
                parse_int(text, kind)?
            };
            signed_value(kind, v)
        }
        Kind::Duration => {
            if text.is_empty() {
                Value::Duration(std::time::Duration::ZERO)
            } else {
                let d = parse_duration(text).map_err(|reason| CoerceError::Duration {
                    text: text.to_string(),
                    reason,
                })?;
                Value::Duration(d)
            }
        }
        Kind::Uint | Kind::U8 | Kind::U16 | Kind::U32 | Kind::U64 => {
            unsigned_value(kind, parse_uint(text, kind)?)
        }
        Kind::F32 => {
            let v: f32 = parse_float(text, kind)?;
            Value::F32(v)
        }
        Kind::F64 => Value::F64(parse_float(text, kind)?),
        Kind::StringList => Value::StringList(text.split(',').map(str::to_string).collect()),
        Kind::Map | Kind::Unsupported => return Ok(None),
    };
    Ok(Some(value))
}

/// Coerce a command-line argument. Unlike [`coerce`], kinds without a textual
/// form are an error here since no flag is ever registered for them.
pub fn parse_flag_value(text: &str, kind: Kind) -> Result<Value, CoerceError> {
    coerce(text, kind)?.ok_or(CoerceError::NotBindable { kind })
}

fn syntax(kind: Kind, text: &str) -> CoerceError {
    CoerceError::Syntax {
        kind,
        text: text.to_string(),
    }
}

fn range(kind: Kind, text: &str) -> CoerceError {
    CoerceError::Range {
        kind,
        text: text.to_string(),
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Split an unsigned literal into radix and digits, honouring base prefixes.
fn split_radix(text: &str) -> (u32, &str, bool) {
    let prefixed = |p: &str| {
        text.len() > p.len()
            && text
                .get(..p.len())
                .is_some_and(|s| s.eq_ignore_ascii_case(p))
    };
    if prefixed("0x") {
        (16, &text[2..], true)
    } else if prefixed("0o") {
        (8, &text[2..], true)
    } else if prefixed("0b") {
        (2, &text[2..], true)
    } else if text.len() > 1 && text.starts_with('0') {
        (8, &text[1..], true)
    } else {
        (10, text, false)
    }
}

/// Parse the magnitude of an integer literal (no sign).
fn parse_magnitude(text: &str, kind: Kind) -> Result<u128, CoerceError> {
    let (radix, digits, prefixed) = split_radix(text);

    // `_` separates digits, or follows a base prefix.
    let cleaned: String = if digits.contains('_') {
        if digits.ends_with('_')
            || digits.contains("__")
            || (!prefixed && digits.starts_with('_'))
        {
            return Err(syntax(kind, text));
        }
        digits.chars().filter(|c| *c != '_').collect()
    } else {
        digits.to_string()
    };

    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_digit(radix)) {
        return Err(syntax(kind, text));
    }
    u128::from_str_radix(&cleaned, radix).map_err(|_| range(kind, text))
}

fn parse_int(text: &str, kind: Kind) -> Result<i128, CoerceError> {
    let bits = kind.bits().unwrap_or(64);
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = parse_magnitude(body, kind).map_err(|e| match e {
        CoerceError::Syntax { .. } => syntax(kind, text),
        _ => range(kind, text),
    })?;

    let limit: u128 = 1 << (bits - 1);
    if negative {
        if magnitude > limit {
            return Err(range(kind, text));
        }
        Ok(-(magnitude as i128))
    } else {
        if magnitude >= limit {
            return Err(range(kind, text));
        }
        Ok(magnitude as i128)
    }
}

fn parse_uint(text: &str, kind: Kind) -> Result<u128, CoerceError> {
    let bits = kind.bits().unwrap_or(64);
    if text.starts_with(['-', '+']) {
        return Err(syntax(kind, text));
    }
    let magnitude = parse_magnitude(text, kind)?;
    if magnitude > u128::from(u64::MAX) >> (64 - bits) {
        return Err(range(kind, text));
    }
    Ok(magnitude)
}

fn parse_float<F>(text: &str, kind: Kind) -> Result<F, CoerceError>
where
    F: std::str::FromStr + Into<f64> + Copy,
{
    let v: F = text.parse().map_err(|_| syntax(kind, text))?;
    let unsigned = text.trim_start_matches(['-', '+']);
    let spelled_infinite = unsigned
        .get(..3)
        .is_some_and(|p| p.eq_ignore_ascii_case("inf"));
    let wide: f64 = v.into();
    if wide.is_infinite() && !spelled_infinite {
        return Err(range(kind, text));
    }
    Ok(v)
}

// Range has been checked against the kind's width by `parse_int`.
fn signed_value(kind: Kind, v: i128) -> Value {
    match kind {
        Kind::I8 => Value::I8(v as i8),
        Kind::I16 => Value::I16(v as i16),
        Kind::I32 => Value::I32(v as i32),
        Kind::I64 => Value::I64(v as i64),
        _ => Value::Int(v as isize),
    }
}

// Range has been checked against the kind's width by `parse_uint`.
fn unsigned_value(kind: Kind, v: u128) -> Value {
    match kind {
        Kind::U8 => Value::U8(v as u8),
        Kind::U16 => Value::U16(v as u16),
        Kind::U32 => Value::U32(v as u32),
        Kind::U64 => Value::U64(v as u64),
        _ => Value::Uint(v as usize),
    }
}
