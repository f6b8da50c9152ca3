//! Structural validation of scoring requests.
//!
//! This is the primary input-correctness gate: the request must have the
//! expected shape and field types, otherwise the client gets a 400 with
//! per-field messages and the scorer is never invoked. Accepted values are
//! normalized (numeric strings become numbers, text is trimmed), unknown
//! fields are dropped, and declared defaults are filled in for every section
//! that is present.

use serde_json::{json, Map, Value};

use crate::domain::coerce::numeric_literal;

const NOT_NULL: &str = "This field may not be null.";
const INVALID_NUMBER: &str = "A valid number is required.";
const INVALID_INTEGER: &str = "A valid integer is required.";
const INVALID_BOOLEAN: &str = "Must be a valid boolean.";
const INVALID_STRING: &str = "Not a valid string.";
const BLANK_STRING: &str = "This field may not be blank.";

const TRUE_STRINGS: [&str; 14] = [
    "t", "T", "y", "Y", "yes", "Yes", "YES", "true", "True", "TRUE", "on", "On", "ON", "1",
];
const FALSE_STRINGS: [&str; 14] = [
    "f", "F", "n", "N", "no", "No", "NO", "false", "False", "FALSE", "off", "Off", "OFF", "0",
];

#[derive(Debug, Clone, Copy)]
enum Kind {
    Float,
    Integer,
    Boolean,
    Text,
    TextList,
    Section(&'static [Field]),
}

/// Value filled in when a field is absent.
#[derive(Debug, Clone, Copy)]
enum Fallback {
    Absent,
    Float(f64),
    Integer(i64),
    Boolean(bool),
    Text(&'static str),
    EmptyList,
}

#[derive(Debug, Clone, Copy)]
struct Field {
    name: &'static str,
    kind: Kind,
    fallback: Fallback,
}

const fn field(name: &'static str, kind: Kind, fallback: Fallback) -> Field {
    Field {
        name,
        kind,
        fallback,
    }
}

const CARBON_PROJECT: &[Field] = &[
    field("carbonAmount", Kind::Float, Fallback::Float(0.0)),
    field("validityYears", Kind::Integer, Fallback::Integer(0)),
];

const LAND: &[Field] = &[
    field("landArea", Kind::Float, Fallback::Float(0.0)),
    field("latitude", Kind::Float, Fallback::Float(0.0)),
    field("longitude", Kind::Float, Fallback::Float(0.0)),
    field("soilType", Kind::Text, Fallback::Text("UNKNOWN")),
];

const FARM_DETAILS: &[Field] = &[
    field("landAreaInAcres", Kind::Float, Fallback::Float(0.0)),
    field("irrigationAvailable", Kind::Boolean, Fallback::Boolean(false)),
];

const FARMER_ADDRESS: &[Field] = &[field("state", Kind::Text, Fallback::Text("UNKNOWN"))];

const FARMER: &[Field] = &[
    field("farmDetails", Kind::Section(FARM_DETAILS), Fallback::Absent),
    field("address", Kind::Section(FARMER_ADDRESS), Fallback::Absent),
    field("cropTypes", Kind::TextList, Fallback::EmptyList),
];

const REQUEST: &[Field] = &[
    field("carbonProject", Kind::Section(CARBON_PROJECT), Fallback::Absent),
    field("land", Kind::Section(LAND), Fallback::Absent),
    field("farmer", Kind::Section(FARMER), Fallback::Absent),
];

impl Fallback {
    fn value(self) -> Option<Value> {
        match self {
            Fallback::Absent => None,
            Fallback::Float(f) => Some(json!(f)),
            Fallback::Integer(i) => Some(json!(i)),
            Fallback::Boolean(b) => Some(json!(b)),
            Fallback::Text(s) => Some(json!(s)),
            Fallback::EmptyList => Some(json!([])),
        }
    }
}

/// Validate a request body.
///
/// Returns the normalized payload, or a JSON object of field errors shaped
/// like the request (`{"land": {"landArea": ["A valid number is required."]}}`).
pub fn validate_request(body: &Value) -> Result<Value, Value> {
    validate_section(REQUEST, body).map(Value::Object)
}

fn validate_section(fields: &[Field], value: &Value) -> Result<Map<String, Value>, Value> {
    let Some(object) = value.as_object() else {
        return Err(json!({
            "non_field_errors": [format!(
                "Invalid data. Expected a dictionary, but got {}.",
                python_type(value)
            )],
        }));
    };

    let mut validated = Map::new();
    let mut errors = Map::new();

    for field in fields {
        match object.get(field.name) {
            None => {
                if let Some(default) = field.fallback.value() {
                    validated.insert(field.name.to_string(), default);
                }
            }
            Some(Value::Null) => {
                errors.insert(field.name.to_string(), json!([NOT_NULL]));
            }
            Some(raw) => match validate_field(field.kind, raw) {
                Ok(clean) => {
                    validated.insert(field.name.to_string(), clean);
                }
                Err(e) => {
                    errors.insert(field.name.to_string(), e);
                }
            },
        }
    }

    if errors.is_empty() {
        Ok(validated)
    } else {
        Err(Value::Object(errors))
    }
}

fn validate_field(kind: Kind, raw: &Value) -> Result<Value, Value> {
    match kind {
        Kind::Float => parse_float(raw).map(Value::from).ok_or_else(|| json!([INVALID_NUMBER])),
        Kind::Integer => parse_integer(raw)
            .map(Value::from)
            .ok_or_else(|| json!([INVALID_INTEGER])),
        Kind::Boolean => parse_boolean(raw)
            .map(Value::from)
            .ok_or_else(|| json!([INVALID_BOOLEAN])),
        Kind::Text => parse_text(raw).map(Value::from).map_err(|e| json!([e])),
        Kind::TextList => parse_text_list(raw),
        Kind::Section(fields) => validate_section(fields, raw).map(Value::Object),
    }
}

fn parse_float(raw: &Value) -> Option<f64> {
    let parsed = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => numeric_literal(s).and_then(|s| s.parse::<f64>().ok()),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    parsed.filter(|f| f.is_finite())
}

fn parse_integer(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < 9.0e15)
                .map(|f| f as i64)
        }),
        Value::String(s) => {
            numeric_literal(s).and_then(|s| strip_zero_fraction(&s).parse::<i64>().ok())
        }
        _ => None,
    }
}

/// `"12.000"` → `"12"`; anything else unchanged.
fn strip_zero_fraction(s: &str) -> &str {
    match s.split_once('.') {
        Some((whole, frac)) if frac.bytes().all(|b| b == b'0') => whole,
        _ => s,
    }
}

fn parse_boolean(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 1.0 => Some(true),
            Some(f) if f == 0.0 => Some(false),
            _ => None,
        },
        Value::String(s) if TRUE_STRINGS.contains(&s.as_str()) => Some(true),
        Value::String(s) if FALSE_STRINGS.contains(&s.as_str()) => Some(false),
        _ => None,
    }
}

fn parse_text(raw: &Value) -> Result<String, &'static str> {
    let text = match raw {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return Err(INVALID_STRING),
    };
    if text.is_empty() {
        return Err(BLANK_STRING);
    }
    Ok(text)
}

fn parse_text_list(raw: &Value) -> Result<Value, Value> {
    let Some(items) = raw.as_array() else {
        return Err(json!([format!(
            "Expected a list of items but got type \"{}\".",
            python_type(raw)
        )]));
    };

    let mut clean = Vec::with_capacity(items.len());
    let mut errors = Map::new();
    for (index, item) in items.iter().enumerate() {
        let parsed = match item {
            Value::Null => Err(NOT_NULL),
            other => parse_text(other),
        };
        match parsed {
            Ok(text) => clean.push(Value::String(text)),
            Err(e) => {
                errors.insert(index.to_string(), json!([e]));
            }
        }
    }

    if errors.is_empty() {
        Ok(Value::Array(clean))
    } else {
        Err(Value::Object(errors))
    }
}

/// Type names as API clients of the original service saw them.
fn python_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
