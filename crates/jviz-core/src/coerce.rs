//! Integer coercion for attribute strings and loosely-typed JSON options.
//!
//! Attribute values and JS option objects arrive as strings or floats.
//! They are folded into integers with `parseInt` rules and then clamped
//! into the non-negative `u32` range used for every dimension.

use serde::{Deserialize, Deserializer};

/// Parse the leading integer of `text` the way JavaScript's `parseInt` does.
///
/// Leading whitespace is skipped, an optional sign is honoured, a `0x`/`0X`
/// prefix switches to base 16, and parsing stops at the first character that
/// is not a digit. Returns `None` when no digit is found. Saturates on overflow.
pub fn parse_int(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, s) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for c in s.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        seen = true;
        value = value.saturating_mul(i64::from(radix)).saturating_add(i64::from(d));
    }
    if !seen {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Clamp an integer into the dimension range `0..=u32::MAX`.
pub fn to_dimension(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// Parse an attribute string straight to a dimension.
pub fn parse_dimension(text: &str) -> Option<u32> {
    parse_int(text).map(to_dimension)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Int(i64),
    Float(f64),
    Text(String),
}

/// `deserialize_with` helper: accepts a number or a numeric string and
/// yields a clamped dimension. Unparseable input is treated as absent.
pub fn opt_dimension<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Loose>::deserialize(deserializer)?;
    Ok(raw.and_then(|loose| match loose {
        Loose::Int(n) => Some(to_dimension(n)),
        Loose::Float(f) if f.is_finite() => Some(to_dimension(f.trunc() as i64)),
        Loose::Float(f) => {
            log::warn!("ignoring non-finite dimension {f}");
            None
        }
        Loose::Text(s) => {
            let parsed = parse_dimension(&s);
            if parsed.is_none() {
                log::warn!("ignoring unparseable dimension {s:?}");
            }
            parsed
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_int_follows_js_rules() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("  42px"), Some(42));
        assert_eq!(parse_int("-7"), Some(-7));
        assert_eq!(parse_int("+3.9"), Some(3));
        assert_eq!(parse_int("0x1F"), Some(31));
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("-"), None);
    }

    #[test]
    fn parse_int_saturates() {
        assert_eq!(parse_int("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn dimensions_clamp_at_zero() {
        assert_eq!(to_dimension(-5), 0);
        assert_eq!(to_dimension(i64::MAX), u32::MAX);
        assert_eq!(parse_dimension("-20"), Some(0));
        assert_eq!(parse_dimension("120"), Some(120));
    }

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "opt_dimension")]
        v: Option<u32>,
    }

    fn probe(json: &str) -> Option<u32> {
        serde_json::from_str::<Probe>(json).unwrap().v
    }

    #[test]
    fn opt_dimension_accepts_loose_values() {
        assert_eq!(probe(r#"{"v": 12}"#), Some(12));
        assert_eq!(probe(r#"{"v": 12.8}"#), Some(12));
        assert_eq!(probe(r#"{"v": "30px"}"#), Some(30));
        assert_eq!(probe(r#"{"v": -4}"#), Some(0));
        assert_eq!(probe(r#"{"v": "wide"}"#), None);
        assert_eq!(probe(r#"{"v": null}"#), None);
        assert_eq!(probe(r#"{}"#), None);
    }
}
