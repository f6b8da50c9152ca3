//! Safe coercion of loosely-typed JSON scalars.
//!
//! Every function here is total: malformed input produces the caller's
//! default, never an error, and never a non-finite float.

use std::borrow::Cow;

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

/// Convert a JSON value to a finite `f64`, or return `default`.
///
/// Accepts numbers, numeric strings (surrounding whitespace ignored, `_`
/// allowed between digits) and booleans (`true` is 1.0). `null`, containers, unparsable strings and
/// non-finite results all fall back to `default`.
#[must_use]
pub fn safe_f64(value: Option<&Value>, default: f64) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => numeric_literal(s).and_then(|s| s.parse::<f64>().ok()),
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    parsed.filter(|f| f.is_finite()).unwrap_or(default)
}

/// Convert a JSON value to an `i64`, or return `default`.
///
/// Floats truncate toward zero. Strings must hold an integer literal;
/// `"3.5"` is rejected, matching integer parsing rather than float parsing.
/// Values outside the `i64` range fall back to `default`.
#[must_use]
pub fn safe_i64(value: Option<&Value>, default: i64) -> i64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().and_then(truncate_f64)),
        Some(Value::String(s)) => numeric_literal(s).and_then(|s| s.parse::<i64>().ok()),
        Some(Value::Bool(b)) => Some(i64::from(*b)),
        _ => None,
    };
    parsed.unwrap_or(default)
}

/// Trim whitespace and drop `_` digit separators (`"1_000"` is `"1000"`).
///
/// A separator must sit between two ASCII digits; `"_1"`, `"1__0"` and
/// `"1_"` are not numeric literals.
pub(crate) fn numeric_literal(s: &str) -> Option<Cow<'_, str>> {
    let s = s.trim();
    if !s.contains('_') {
        return Some(Cow::Borrowed(s));
    }

    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    for (i, &c) in chars.iter().enumerate() {
        if c != '_' {
            out.push(c);
            continue;
        }
        let before = i.checked_sub(1).and_then(|j| chars.get(j));
        let after = chars.get(i + 1);
        if !(before.is_some_and(char::is_ascii_digit) && after.is_some_and(char::is_ascii_digit)) {
            return None;
        }
    }
    Some(Cow::Owned(out))
}

fn truncate_f64(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let t = f.trunc();
    (t.is_finite() && t >= -LIMIT && t < LIMIT).then_some(t as i64)
}

/// Truthiness of a JSON value: `null`, `false`, zero, and empty strings,
/// arrays and objects are false; everything else is true.
#[must_use]
pub fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

/// Categorical label of a JSON scalar.
///
/// Strings pass through unchanged; numbers and booleans use their JSON text.
/// `null` and containers have no label.
#[must_use]
pub fn label(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Some(v.to_string()),
        _ => None,
    }
}

/// Name of a JSON value's type, for log and error messages.
#[must_use]
pub const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

// serde adapters used by `payload` field attributes. None of them can fail
// once the input is syntactically valid JSON.

pub(crate) fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(safe_f64(Some(&value), 0.0))
}

pub(crate) fn lenient_i64<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(safe_i64(Some(&value), 0))
}

pub(crate) fn lenient_truthy<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(truthy(Some(&value)))
}

pub(crate) fn lenient_label<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(label(Some(&value)))
}

pub(crate) fn lenient_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Value>, D::Error> {
    match Value::deserialize(d)? {
        Value::Array(items) => Ok(items),
        _ => Ok(Vec::new()),
    }
}

/// A nested section that is not an object becomes `T::default()`.
pub(crate) fn lenient_section<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(d)?;
    if !value.is_object() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn safe_f64_accepts_numbers_and_numeric_strings() {
        assert_eq!(safe_f64(Some(&json!(2.5)), 0.0), 2.5);
        assert_eq!(safe_f64(Some(&json!(7)), 0.0), 7.0);
        assert_eq!(safe_f64(Some(&json!(" 12.25 ")), 0.0), 12.25);
        assert_eq!(safe_f64(Some(&json!("1e3")), 0.0), 1000.0);
        assert_eq!(safe_f64(Some(&json!(true)), 0.0), 1.0);
    }

    #[test]
    fn safe_f64_falls_back_on_garbage() {
        assert_eq!(safe_f64(None, 0.0), 0.0);
        assert_eq!(safe_f64(Some(&Value::Null), 0.0), 0.0);
        assert_eq!(safe_f64(Some(&json!("abc")), 0.0), 0.0);
        assert_eq!(safe_f64(Some(&json!([1.0])), 4.0), 4.0);
        assert_eq!(safe_f64(Some(&json!({"v": 1})), 0.0), 0.0);
    }

    #[test]
    fn safe_f64_never_returns_non_finite() {
        assert_eq!(safe_f64(Some(&json!("nan")), 0.0), 0.0);
        assert_eq!(safe_f64(Some(&json!("inf")), 0.0), 0.0);
        assert_eq!(safe_f64(Some(&json!("-infinity")), 0.0), 0.0);
    }

    #[test]
    fn safe_i64_truncates_floats_but_rejects_float_strings() {
        assert_eq!(safe_i64(Some(&json!(3.9)), 0), 3);
        assert_eq!(safe_i64(Some(&json!(-3.9)), 0), -3);
        assert_eq!(safe_i64(Some(&json!("15")), 0), 15);
        assert_eq!(safe_i64(Some(&json!("3.5")), 0), 0);
        assert_eq!(safe_i64(Some(&json!(1e300)), 0), 0);
        assert_eq!(safe_i64(Some(&json!(u64::MAX)), 0), 0);
        assert_eq!(safe_i64(Some(&json!(false)), 9), 0);
        assert_eq!(safe_i64(Some(&Value::Null), 9), 9);
    }

    #[test]
    fn digit_separators_are_accepted_between_digits() {
        assert_eq!(safe_f64(Some(&json!("1_000")), 0.0), 1000.0);
        assert_eq!(safe_f64(Some(&json!(" 2_500.25 ")), 0.0), 2500.25);
        assert_eq!(safe_i64(Some(&json!("1_000_000")), 0), 1_000_000);
        assert_eq!(safe_f64(Some(&json!("_1")), 7.0), 7.0);
        assert_eq!(safe_f64(Some(&json!("1__0")), 7.0), 7.0);
        assert_eq!(safe_i64(Some(&json!("10_")), 7), 7);
        assert_eq!(safe_i64(Some(&json!("1_.5")), 7), 7);
    }

    #[test]
    fn truthiness_follows_emptiness() {
        assert!(!truthy(None));
        assert!(!truthy(Some(&json!(0))));
        assert!(!truthy(Some(&json!(""))));
        assert!(!truthy(Some(&json!([]))));
        assert!(truthy(Some(&json!("no"))));
        assert!(truthy(Some(&json!(0.5))));
        assert!(truthy(Some(&json!({"a": null}))));
    }

    #[test]
    fn label_stringifies_scalars_only() {
        assert_eq!(label(Some(&json!("CLAY"))).as_deref(), Some("CLAY"));
        assert_eq!(label(Some(&json!(4))).as_deref(), Some("4"));
        assert_eq!(label(Some(&json!(["CLAY"]))), None);
        assert_eq!(label(Some(&Value::Null)), None);
    }
}
