//! Duration literals such as `720h1m3s`, `1.5s` or `300ms`.
//!
//! The grammar is `[-+]?([0-9]*(\.[0-9]*)?unit)+` with units `ns`, `us`
//! (also `µs`/`μs`), `ms`, `s`, `m` and `h`. The bare literal `0` needs no unit.
//! Durations are unsigned, so a negative non-zero literal is rejected.

use std::fmt::Write;
use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Largest representable duration, in nanoseconds (`i64::MAX`).
const MAX_NANOS: u128 = i64::MAX as u128;

/// Parse a duration literal. The error is a short reason suitable for
/// [`CoerceError::Duration`](crate::error::CoerceError::Duration).
pub fn parse_duration(text: &str) -> Result<Duration, &'static str> {
    let mut rest = text;
    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    }

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err("empty duration");
    }

    let mut total: u128 = 0;
    while !rest.is_empty() {
        if !rest.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err("expected a number");
        }

        let int_len = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (int_digits, after_int) = rest.split_at(int_len);
        rest = after_int;

        let mut frac_digits = "";
        if let Some(after_dot) = rest.strip_prefix('.') {
            let frac_len = after_dot
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(after_dot.len());
            (frac_digits, rest) = after_dot.split_at(frac_len);
        }
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err("expected a number");
        }

        let unit_len = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_len == 0 {
            return Err("missing unit");
        }
        let (unit, after_unit) = rest.split_at(unit_len);
        rest = after_unit;
        let unit = unit_nanos(unit).ok_or("unknown unit")?;

        let whole = parse_digits(int_digits).ok_or("overflow")?;
        total += whole.checked_mul(unit).ok_or("overflow")?;
        total += fraction_nanos(frac_digits, unit);
        if total > MAX_NANOS {
            return Err("overflow");
        }
    }

    if negative && total != 0 {
        return Err("negative durations are not supported");
    }
    u64::try_from(total)
        .map(Duration::from_nanos)
        .map_err(|_| "overflow")
}

fn unit_nanos(unit: &str) -> Option<u128> {
    let nanos = match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => NANOS_PER_SEC,
        "m" => 60 * NANOS_PER_SEC,
        "h" => 3_600 * NANOS_PER_SEC,
        _ => return None,
    };
    Some(nanos)
}

fn parse_digits(digits: &str) -> Option<u128> {
    if digits.is_empty() {
        return Some(0);
    }
    let value: u128 = digits.parse().ok()?;
    (value <= MAX_NANOS).then_some(value)
}

/// Nanoseconds contributed by the fractional digits of one component.
/// Digits beyond nanosecond precision of the largest unit are dropped.
fn fraction_nanos(digits: &str, unit: u128) -> u128 {
    let mut numerator: u128 = 0;
    let mut scale: u128 = 1;
    for c in digits.chars().take(19) {
        numerator = numerator * 10 + u128::from(c.to_digit(10).unwrap_or(0));
        scale *= 10;
    }
    numerator * unit / scale
}

/// Render a duration in the same literal grammar, e.g. `720h1m3s`, `1.5s`,
/// `250ms`, `0s`.
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }

    if nanos < NANOS_PER_SEC {
        let (unit, scale) = if nanos < 1_000 {
            ("ns", 1)
        } else if nanos < 1_000_000 {
            ("µs", 1_000)
        } else {
            ("ms", 1_000_000)
        };
        return format!("{}{unit}", fixed(nanos, scale));
    }

    let secs = duration.as_secs();
    let hours = secs / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = u128::from(secs % 60) * NANOS_PER_SEC + u128::from(duration.subsec_nanos());

    let mut out = String::new();
    if hours > 0 {
        let _ = write!(out, "{hours}h");
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(out, "{minutes}m");
    }
    let _ = write!(out, "{}s", fixed(seconds, NANOS_PER_SEC));
    out
}

/// `value / scale` as a decimal with trailing zeros trimmed.
fn fixed(value: u128, scale: u128) -> String {
    let whole = value / scale;
    let frac = value % scale;
    if frac == 0 {
        return whole.to_string();
    }
    let width = scale.to_string().len() - 1;
    let digits = format!("{frac:0width$}");
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
