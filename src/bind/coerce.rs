// ABOUTME: Coercion engine - converts untyped JSON values into the canonical
// ABOUTME: form of a target TypeShape, following a fixed conversion matrix.

use serde_json::{Map, Number, Value};

use super::MissingFieldPolicy;
use crate::error::ConversionError;
use crate::shape::{FloatKind, IntKind, RecordShape, TypeShape};

/// Coerce a value to a target shape with the default (zero-fill) policy.
pub fn coerce(value: &Value, target: &TypeShape) -> Result<Value, ConversionError> {
    Coercer::new(MissingFieldPolicy::ZeroFill).coerce(value, target)
}

/// The empty value of a shape.
pub fn zero_value(shape: &TypeShape) -> Value {
    zero_in(shape, &mut Vec::new())
}

fn zero_in(shape: &TypeShape, stack: &mut Vec<String>) -> Value {
    match shape {
        TypeShape::Unit | TypeShape::Any | TypeShape::Optional(_) => Value::Null,
        TypeShape::Bool => Value::Bool(false),
        TypeShape::Integer(_) => Value::from(0),
        TypeShape::Float(_) => Value::from(0.0),
        TypeShape::String => Value::String(String::new()),
        TypeShape::Char => Value::String('\0'.to_string()),
        TypeShape::Enum(members) => members
            .first()
            .map(|m| Value::String(m.clone()))
            .unwrap_or(Value::Null),
        TypeShape::Sequence(_) => Value::Array(Vec::new()),
        TypeShape::Array { item, len } => {
            Value::Array((0..*len).map(|_| zero_in(item, stack)).collect())
        }
        TypeShape::Map { .. } => Value::Object(Map::new()),
        TypeShape::Record(record) => {
            // A record that contains itself has no finite zero value.
            let signature = record.signature();
            if stack.contains(&signature) {
                return Value::Null;
            }
            stack.push(signature);
            let fields = record
                .wire_fields()
                .map(|f| (f.wire_name().to_string(), zero_in(&f.shape(), stack)))
                .collect();
            stack.pop();
            Value::Object(fields)
        }
    }
}

/// Applies the conversion matrix under a missing-field policy.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Coercer {
    missing_fields: MissingFieldPolicy,
}

impl Coercer {
    pub(crate) fn new(missing_fields: MissingFieldPolicy) -> Self {
        Self { missing_fields }
    }

    pub(crate) fn coerce(
        &self,
        value: &Value,
        target: &TypeShape,
    ) -> Result<Value, ConversionError> {
        if value.is_null() {
            return Ok(zero_value(target));
        }

        match target {
            TypeShape::Any => Ok(value.clone()),
            TypeShape::Optional(inner) => self.coerce(value, inner),
            TypeShape::String => Ok(Value::String(text_of(value))),
            TypeShape::Char => to_char(value),
            TypeShape::Bool => to_bool(value),
            TypeShape::Integer(kind) => to_integer(value, *kind),
            TypeShape::Float(kind) => to_float(value, *kind),
            TypeShape::Enum(members) => {
                let text = text_of(value);
                if members.contains(&text) {
                    Ok(Value::String(text))
                } else {
                    Err(ConversionError::mismatch(value, target.to_string()))
                }
            }
            TypeShape::Sequence(inner) => match value {
                Value::Array(items) => self.elements(items, inner),
                _ => Err(ConversionError::mismatch(value, "slice")),
            },
            TypeShape::Array { item, len } => match value {
                Value::Array(items) if items.len() == *len => self.elements(items, item),
                Value::Array(items) => Err(ConversionError::Length {
                    value: value.to_string(),
                    target: target.to_string(),
                    expected: *len,
                    found: items.len(),
                }),
                _ => Err(ConversionError::mismatch(value, target.to_string())),
            },
            TypeShape::Map {
                text_keys: true,
                value: inner,
            } => match value {
                Value::Object(entries) => {
                    let mut out = Map::new();
                    for (key, item) in entries {
                        let converted = self.coerce(item, inner).map_err(|e| {
                            ConversionError::Entry {
                                key: key.clone(),
                                source: Box::new(e),
                            }
                        })?;
                        out.insert(key.clone(), converted);
                    }
                    Ok(Value::Object(out))
                }
                _ => Err(ConversionError::mismatch(value, "map")),
            },
            TypeShape::Record(record) => match value {
                Value::Object(entries) => self
                    .record(record, entries)
                    .map(Value::Object)
                    .map_err(|(field, source)| ConversionError::Field {
                        field,
                        source: Box::new(source),
                    }),
                _ => Err(ConversionError::mismatch(value, target.to_string())),
            },
            TypeShape::Map {
                text_keys: false, ..
            }
            | TypeShape::Unit => Err(ConversionError::mismatch(value, target.to_string())),
        }
    }

    fn elements(&self, items: &[Value], inner: &TypeShape) -> Result<Value, ConversionError> {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                self.coerce(item, inner).map_err(|e| ConversionError::Element {
                    index,
                    source: Box::new(e),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }

    /// Bind an object against a record's fields.
    ///
    /// On failure, returns the wire name of the offending field and the cause.
    /// Absent fields are zero-filled, or rejected when required under `Reject`.
    pub(crate) fn record(
        &self,
        record: &RecordShape,
        input: &Map<String, Value>,
    ) -> Result<Map<String, Value>, (String, ConversionError)> {
        let mut out = Map::new();
        for field in record.wire_fields() {
            let name = field.wire_name();
            let shape = field.shape();
            let value = match input.get(name) {
                Some(raw) => self
                    .coerce(raw, &shape)
                    .map_err(|e| (name.to_string(), e))?,
                None if field.is_required()
                    && self.missing_fields == MissingFieldPolicy::Reject =>
                {
                    return Err((
                        name.to_string(),
                        ConversionError::MissingField(name.to_string()),
                    ));
                }
                None => zero_value(&shape),
            };
            out.insert(name.to_string(), value);
        }
        Ok(out)
    }
}

/// Default textual representation of a value.
fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn to_char(value: &Value) -> Result<Value, ConversionError> {
    let text = text_of(value);
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(_), None) => Ok(Value::String(text)),
        _ => Err(ConversionError::parse(&text, "char", "expected a single character")),
    }
}

/// Strict boolean literal parse.
fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn to_bool(value: &Value) -> Result<Value, ConversionError> {
    match value {
        Value::Bool(b) => Ok(Value::Bool(*b)),
        Value::Number(n) => Ok(Value::Bool(n.as_f64().is_some_and(|f| f != 0.0))),
        Value::String(s) => parse_bool(s)
            .map(Value::Bool)
            .ok_or_else(|| ConversionError::parse(s, "bool", "invalid syntax")),
        other => Err(ConversionError::mismatch(other, "bool")),
    }
}

/// Read a JSON number as a wide integer, truncating floats toward zero.
fn wide_integer(n: &Number) -> Option<i128> {
    if let Some(i) = n.as_i64() {
        Some(i128::from(i))
    } else if let Some(u) = n.as_u64() {
        Some(i128::from(u))
    } else {
        n.as_f64().map(|f| f.trunc() as i128)
    }
}

fn to_integer(value: &Value, kind: IntKind) -> Result<Value, ConversionError> {
    match value {
        Value::Number(n) => wide_integer(n)
            .map(|v| kind.wrap(v))
            .ok_or_else(|| ConversionError::mismatch(value, "int")),
        Value::String(s) => {
            let parsed = if kind.is_unsigned() {
                s.parse::<u64>().map(i128::from)
            } else {
                s.parse::<i64>().map(i128::from)
            };
            parsed
                .map(|v| kind.wrap(v))
                .map_err(|e| ConversionError::parse(s, "int", e))
        }
        other => Err(ConversionError::mismatch(other, "int")),
    }
}

fn to_float(value: &Value, kind: FloatKind) -> Result<Value, ConversionError> {
    let wide = match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| ConversionError::mismatch(value, "float"))?,
        Value::String(s) => s
            .parse::<f64>()
            .map_err(|e| ConversionError::parse(s, "float", e))?,
        other => return Err(ConversionError::mismatch(other, "float")),
    };
    let narrowed = match kind {
        FloatKind::F32 => f64::from(wide as f32),
        FloatKind::F64 => wide,
    };
    Number::from_f64(narrowed)
        .map(Value::Number)
        .ok_or_else(|| ConversionError::NotRepresentable {
            value: value.to_string(),
            target: "float".to_string(),
        })
}
