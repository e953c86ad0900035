//! Built-in cast rules applied when a stored raw value is read through its attribute.
//!
//! Casting never fails: input that cannot be interpreted either collapses to the kind's
//! zero value (numbers) or to `Value::Null` (dates and times). Out-of-range integers
//! saturate. `Null` always stays `Null`.

use crate::core::Value;
use bigdecimal::{BigDecimal, FromPrimitive, ToPrimitive, Zero};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::str::FromStr;

const TRUE_VALUES: &[&str] = &["1", "t", "T", "true", "TRUE", "on", "ON"];

pub fn to_string(raw: &Value) -> Value {
    match raw {
        Value::Null => Value::Null,
        Value::Text(s) => Value::Text(s.clone()),
        Value::Blob(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
        other => Value::Text(other.to_string()),
    }
}

pub fn to_boolean(raw: &Value) -> Value {
    match raw {
        Value::Null => Value::Null,
        Value::Boolean(b) => Value::Boolean(*b),
        Value::Integer(i) => Value::Boolean(*i == 1),
        Value::Text(s) if s.is_empty() => Value::Null,
        Value::Text(s) => Value::Boolean(TRUE_VALUES.contains(&s.as_str())),
        _ => Value::Boolean(false),
    }
}

pub fn to_integer(raw: &Value) -> Value {
    match raw {
        Value::Null => Value::Null,
        Value::Integer(i) => Value::Integer(*i),
        Value::Float(f) if f.is_finite() => Value::Integer(f.trunc() as i64),
        Value::Decimal(d) => d.with_scale(0).to_i64().map_or(Value::Null, Value::Integer),
        Value::Boolean(b) => Value::Integer(i64::from(*b)),
        Value::Text(s) if s.trim().is_empty() => Value::Null,
        Value::Text(s) => Value::Integer(integer_prefix(s).map_or(0, parse_saturating)),
        _ => Value::Null,
    }
}

/// Non-finite results become `Null`: codecs cannot store them faithfully.
pub fn to_float(raw: &Value) -> Value {
    let cast = match raw {
        Value::Null => Value::Null,
        Value::Float(f) => Value::Float(*f),
        Value::Integer(i) => Value::Float(*i as f64),
        Value::Decimal(d) => d.to_f64().map_or(Value::Null, Value::Float),
        Value::Boolean(b) => Value::Float(if *b { 1.0 } else { 0.0 }),
        Value::Text(s) if s.trim().is_empty() => Value::Null,
        Value::Text(s) => Value::Float(number_prefix(s).and_then(|p| p.parse().ok()).unwrap_or(0.0)),
        _ => Value::Null,
    };
    match cast {
        Value::Float(f) if !f.is_finite() => Value::Null,
        other => other,
    }
}

pub fn to_decimal(raw: &Value) -> Value {
    match raw {
        Value::Null => Value::Null,
        Value::Decimal(d) => Value::Decimal(d.clone()),
        Value::Integer(i) => Value::Decimal(BigDecimal::from(*i)),
        Value::Float(f) => BigDecimal::from_f64(*f).map_or(Value::Null, Value::Decimal),
        Value::Boolean(b) => Value::Decimal(BigDecimal::from(i64::from(*b))),
        Value::Text(s) if s.trim().is_empty() => Value::Null,
        Value::Text(s) => Value::Decimal(
            number_prefix(s)
                .and_then(|p| BigDecimal::from_str(p).ok())
                .unwrap_or_else(BigDecimal::zero),
        ),
        _ => Value::Null,
    }
}

pub fn to_date(raw: &Value) -> Value {
    match raw {
        Value::Date(d) => Value::Date(*d),
        Value::Timestamp(t) => Value::Date(t.date_naive()),
        Value::Text(s) => {
            let s = s.trim();
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .or_else(|| parse_timestamp(s).map(|t| t.date_naive()))
                .map_or(Value::Null, Value::Date)
        }
        _ => Value::Null,
    }
}

pub fn to_timestamp(raw: &Value) -> Value {
    match raw {
        Value::Timestamp(t) => Value::Timestamp(*t),
        Value::Date(d) => d
            .and_hms_opt(0, 0, 0)
            .map_or(Value::Null, |dt| Value::Timestamp(dt.and_utc())),
        Value::Integer(secs) => DateTime::from_timestamp(*secs, 0).map_or(Value::Null, Value::Timestamp),
        Value::Text(s) => {
            let s = s.trim();
            parse_timestamp(s)
                .or_else(|| {
                    NaiveDate::parse_from_str(s, "%Y-%m-%d")
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                        .map(|dt| dt.and_utc())
                })
                .map_or(Value::Null, Value::Timestamp)
        }
        _ => Value::Null,
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// Parses a digit prefix, clamping out-of-range values to the `i64` bounds.
fn parse_saturating(prefix: &str) -> i64 {
    prefix.parse().unwrap_or(if prefix.starts_with('-') { i64::MIN } else { i64::MAX })
}

/// Leading `[+-]?digits` of the trimmed input.
fn integer_prefix(s: &str) -> Option<&str> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    (end > digits_start).then(|| &s[..end])
}

/// Leading `[+-]?digits[.digits][e[+-]digits]` of the trimmed input.
fn number_prefix(s: &str) -> Option<&str> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = integer_prefix(s)?.len();

    if bytes.get(end) == Some(&b'.') && bytes.get(end + 1).is_some_and(u8::is_ascii_digit) {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        if bytes.get(exp).is_some_and(u8::is_ascii_digit) {
            while exp < bytes.len() && bytes[exp].is_ascii_digit() {
                exp += 1;
            }
            end = exp;
        }
    }

    Some(&s[..end])
}
