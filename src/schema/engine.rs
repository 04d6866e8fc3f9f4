//! The generic validation and serialization engine shared by every record.

use serde_json::{Map, Number, Value};
use tracing::{debug, trace};

use super::{
    FieldValue, FieldViolation, Fields, Keying, ValidationReport, Violation,
    field::{Field, Kind, Schema},
    timestamp,
};
use crate::domain::{InvalidKeywordError, Keyword};

/// Checks a raw record against a schema.
///
/// Every declared field is checked before reporting, so the report holds
/// every violation in the record rather than only the first. Keys may be
/// either the field alias or its internal name; undeclared keys are ignored.
///
/// # Errors
///
/// Returns a [`ValidationReport`] if any field violates its constraint.
pub fn validate_fields(
    schema: &'static Schema,
    raw: &Map<String, Value>,
) -> Result<Fields, ValidationReport> {
    let mut violations = Vec::new();
    let fields = check_object(schema, raw, &mut violations);

    match ValidationReport::from_violations(schema.entity, violations) {
        None => {
            debug!(entity = schema.entity, fields = fields.len(), "record is valid");
            Ok(fields)
        }
        Some(report) => {
            debug!(
                entity = schema.entity,
                violations = report.len(),
                "record is invalid"
            );
            Err(report)
        }
    }
}

/// Checks an arbitrary JSON value against a schema.
///
/// # Errors
///
/// Returns a [`ValidationReport`] if the value is not an object, or if any
/// field violates its constraint.
pub fn validate_value(schema: &'static Schema, raw: &Value) -> Result<Fields, ValidationReport> {
    match raw {
        Value::Object(map) => validate_fields(schema, map),
        other => Err(ValidationReport::single(
            schema.entity,
            FieldViolation::new(
                "",
                Violation::TypeMismatch {
                    expected: "object",
                    actual: json_type(other),
                },
            ),
        )),
    }
}

/// Converts checked fields back into a raw record.
///
/// Fields are emitted in declaration order, keyed by the requested
/// convention. Absent fields are omitted rather than emitted as `null`.
#[must_use]
pub fn serialize_fields(schema: &Schema, fields: &Fields, keying: Keying) -> Map<String, Value> {
    schema
        .fields
        .iter()
        .filter_map(|field| {
            fields.get(field.name).map(|value| {
                (
                    field.key(keying).to_string(),
                    to_json(value, nested_schema(field.kind), keying),
                )
            })
        })
        .collect()
}

fn check_object(
    schema: &Schema,
    raw: &Map<String, Value>,
    violations: &mut Vec<FieldViolation>,
) -> Fields {
    for key in raw.keys() {
        if schema.field_by_key(key).is_none() {
            trace!(entity = schema.entity, key = key.as_str(), "ignoring undeclared key");
        }
    }

    let mut fields = Fields::new();
    for field in schema.fields {
        match lookup(field, raw) {
            None | Some(Value::Null) if !field.required => {}
            None => violations.push(FieldViolation::new(
                field.name,
                Violation::MissingRequiredField,
            )),
            Some(value) => {
                if let Some(checked) = check_value(field.name, field.kind, value, violations) {
                    fields.insert(field.name, checked);
                }
            }
        }
    }
    fields
}

/// Finds a field's raw value by alias or internal name, preferring the alias.
fn lookup<'a>(field: &Field, raw: &'a Map<String, Value>) -> Option<&'a Value> {
    let by_alias = raw.get(field.alias);
    if field.alias == field.name {
        return by_alias;
    }

    match (by_alias, raw.get(field.name)) {
        (Some(value), Some(_)) => {
            debug!(
                field = field.name,
                alias = field.alias,
                "both alias and internal name supplied; using alias"
            );
            Some(value)
        }
        (by_alias, by_name) => by_alias.or(by_name),
    }
}

fn check_value(
    path: &str,
    kind: Kind,
    value: &Value,
    violations: &mut Vec<FieldViolation>,
) -> Option<FieldValue> {
    let mismatch = |violations: &mut Vec<FieldViolation>| {
        violations.push(FieldViolation::new(
            path,
            Violation::TypeMismatch {
                expected: kind.expected_type(),
                actual: json_type(value),
            },
        ));
    };

    match kind {
        Kind::Text { min, max } => {
            let Some(s) = value.as_str() else {
                mismatch(violations);
                return None;
            };
            check_length(path, s, min, max, violations).then(|| FieldValue::Text(s.to_string()))
        }
        Kind::Integer { min, max } => {
            let Some(i) = as_integer(value) else {
                mismatch(violations);
                return None;
            };
            check_range(path, i, min, max, violations).then_some(FieldValue::Integer(i))
        }
        Kind::Timestamp => {
            let Some(dt) = timestamp::parse(value) else {
                mismatch(violations);
                return None;
            };
            Some(FieldValue::Timestamp(dt))
        }
        Kind::Vocabulary(allowed) => {
            let Some(s) = value.as_str() else {
                mismatch(violations);
                return None;
            };
            if allowed.contains(&s) {
                Some(FieldValue::Text(s.to_string()))
            } else {
                violations.push(FieldViolation::new(
                    path,
                    Violation::EnumMembership {
                        value: s.to_string(),
                        allowed,
                    },
                ));
                None
            }
        }
        Kind::Keywords => {
            let Some(items) = value.as_array() else {
                mismatch(violations);
                return None;
            };
            check_items(path, items, violations, check_keyword).map(FieldValue::Keywords)
        }
        Kind::Numbers => {
            let Some(items) = value.as_array() else {
                mismatch(violations);
                return None;
            };
            check_items(path, items, violations, check_number).map(FieldValue::Numbers)
        }
        Kind::Object(schema) => {
            let Some(map) = value.as_object() else {
                mismatch(violations);
                return None;
            };
            check_nested(path, schema, map, violations).map(FieldValue::Object)
        }
        Kind::Objects(schema) => {
            let Some(items) = value.as_array() else {
                mismatch(violations);
                return None;
            };
            check_items(path, items, violations, |item_path, item, violations| {
                let Some(map) = item.as_object() else {
                    violations.push(FieldViolation::new(
                        item_path,
                        Violation::TypeMismatch {
                            expected: "object",
                            actual: json_type(item),
                        },
                    ));
                    return None;
                };
                check_nested(item_path, schema, map, violations)
            })
            .map(FieldValue::Objects)
        }
    }
}

/// Checks every element of a list, addressing element violations by index.
///
/// Returns `None` if any element failed.
fn check_items<T>(
    path: &str,
    items: &[Value],
    violations: &mut Vec<FieldViolation>,
    check: impl Fn(&str, &Value, &mut Vec<FieldViolation>) -> Option<T>,
) -> Option<Vec<T>> {
    let before = violations.len();
    let checked: Vec<T> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| check(&format!("{path}.{index}"), item, violations))
        .collect();

    (violations.len() == before).then_some(checked)
}

fn check_keyword(
    path: &str,
    item: &Value,
    violations: &mut Vec<FieldViolation>,
) -> Option<Keyword> {
    let Some(s) = item.as_str() else {
        violations.push(FieldViolation::new(
            path,
            Violation::TypeMismatch {
                expected: "string",
                actual: json_type(item),
            },
        ));
        return None;
    };

    Keyword::new(s.to_string())
        .map_err(|error| {
            let (min, max) = match error {
                InvalidKeywordError::Empty => (Some(Keyword::MIN_LEN), None),
                InvalidKeywordError::TooLong { .. } => (None, Some(Keyword::MAX_LEN)),
            };
            violations.push(FieldViolation::new(
                path,
                Violation::LengthConstraint {
                    min,
                    max,
                    actual: error.actual(),
                },
            ));
        })
        .ok()
}

fn check_number(path: &str, item: &Value, violations: &mut Vec<FieldViolation>) -> Option<f64> {
    let number = item.as_f64();
    if number.is_none() {
        violations.push(FieldViolation::new(
            path,
            Violation::TypeMismatch {
                expected: "number",
                actual: json_type(item),
            },
        ));
    }
    number
}

/// Checks a nested value object, qualifying its violations by `path`.
fn check_nested(
    path: &str,
    schema: &Schema,
    map: &Map<String, Value>,
    violations: &mut Vec<FieldViolation>,
) -> Option<Fields> {
    let mut nested = Vec::new();
    let fields = check_object(schema, map, &mut nested);
    if nested.is_empty() {
        Some(fields)
    } else {
        violations.extend(nested.into_iter().map(|v| v.nested_under(path)));
        None
    }
}

fn check_length(
    path: &str,
    s: &str,
    min: Option<usize>,
    max: Option<usize>,
    violations: &mut Vec<FieldViolation>,
) -> bool {
    let actual = s.chars().count();
    let violation = match (min, max) {
        (Some(min), _) if actual < min => Violation::LengthConstraint {
            min: Some(min),
            max: None,
            actual,
        },
        (_, Some(max)) if actual > max => Violation::LengthConstraint {
            min: None,
            max: Some(max),
            actual,
        },
        _ => return true,
    };
    violations.push(FieldViolation::new(path, violation));
    false
}

fn check_range(
    path: &str,
    actual: i128,
    min: Option<i64>,
    max: Option<i64>,
    violations: &mut Vec<FieldViolation>,
) -> bool {
    let violation = match (min, max) {
        (Some(min), _) if actual < i128::from(min) => Violation::RangeConstraint {
            min: Some(min),
            max: None,
            actual,
        },
        (_, Some(max)) if actual > i128::from(max) => Violation::RangeConstraint {
            min: None,
            max: Some(max),
            actual,
        },
        _ => return true,
    };
    violations.push(FieldViolation::new(path, violation));
    false
}

/// Reads a whole number, accepting floats with no fractional part.
///
/// Covers the full `i64` and `u64` ranges.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn as_integer(value: &Value) -> Option<i128> {
    value
        .as_i64()
        .map(i128::from)
        .or_else(|| value.as_u64().map(i128::from))
        .or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < u64::MAX as f64)
                .map(|f| f as i128)
        })
}

/// Converts a checked whole number back to JSON.
///
/// Checked integers always come from the `i64` or `u64` range.
fn integer_to_json(i: i128) -> Value {
    i64::try_from(i).map_or_else(
        |_| u64::try_from(i).map_or(Value::Null, Value::from),
        Value::from,
    )
}

/// The JSON type name of a raw value.
pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

const fn nested_schema(kind: Kind) -> Option<&'static Schema> {
    match kind {
        Kind::Object(schema) | Kind::Objects(schema) => Some(schema),
        _ => None,
    }
}

fn to_json(value: &FieldValue, nested: Option<&Schema>, keying: Keying) -> Value {
    match value {
        FieldValue::Text(s) => Value::String(s.clone()),
        FieldValue::Integer(i) => integer_to_json(*i),
        FieldValue::Timestamp(dt) => Value::String(timestamp::format(dt)),
        FieldValue::Keywords(keywords) => keywords
            .iter()
            .map(|keyword| Value::String(keyword.to_string()))
            .collect(),
        FieldValue::Numbers(numbers) => numbers
            .iter()
            .map(|n| Number::from_f64(*n).map_or(Value::Null, Value::Number))
            .collect(),
        FieldValue::Object(fields) => Value::Object(object_to_json(fields, nested, keying)),
        FieldValue::Objects(items) => items
            .iter()
            .map(|fields| Value::Object(object_to_json(fields, nested, keying)))
            .collect(),
    }
}

fn object_to_json(fields: &Fields, nested: Option<&Schema>, keying: Keying) -> Map<String, Value> {
    match nested {
        Some(schema) => serialize_fields(schema, fields, keying),
        None => fields
            .iter()
            .map(|(name, value)| (name.to_string(), to_json(value, None, keying)))
            .collect(),
    }
}
