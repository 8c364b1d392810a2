// ABOUTME: Schema synthesizer - derives a JSON-Schema-like input schema from
// ABOUTME: a ParameterShape by walking field descriptors recursively.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::shape::{ParameterShape, RecordShape, TypeShape, VALUE_KEY};

/// Input schema advertised for a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub required: Vec<String>,
}

impl Schema {
    /// An object schema with no properties.
    pub fn empty() -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: Map::new(),
            required: Vec::new(),
        }
    }

    /// Derive the schema for a parameter shape.
    pub fn for_shape(shape: &ParameterShape) -> Self {
        synthesize(shape)
    }

    /// Whether the schema gives callers no structural guidance.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.required.is_empty()
    }

    /// Check that every required name is a declared property.
    pub fn validate(&self) -> Result<(), String> {
        match self
            .required
            .iter()
            .find(|name| !self.properties.contains_key(name.as_str()))
        {
            Some(name) => Err(format!("required property '{name}' is not declared")),
            None => Ok(()),
        }
    }

    /// The schema as a JSON value.
    pub fn to_value(&self) -> Value {
        json!({
            "type": self.schema_type,
            "properties": self.properties,
            "required": self.required,
        })
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::empty()
    }
}

/// Derive the root schema for a function's parameters.
pub fn synthesize(shape: &ParameterShape) -> Schema {
    let mut schema = Schema::empty();
    match shape {
        ParameterShape::Empty | ParameterShape::OpaqueMap => {}
        ParameterShape::Record(record) => {
            let mut walker = Walker::default();
            walker.stack.push(record.signature());
            let (properties, required) = walker.fields(record);
            schema.properties = properties;
            schema.required = required;
        }
        ParameterShape::Single(inner) => {
            schema
                .properties
                .insert(VALUE_KEY.to_string(), type_schema(inner));
            schema.required.push(VALUE_KEY.to_string());
        }
    }
    schema
}

/// Derive the schema for a single type.
pub fn type_schema(shape: &TypeShape) -> Value {
    Value::Object(Walker::default().walk(shape))
}

/// Tracks the signatures of records being walked so self-references terminate.
#[derive(Default)]
struct Walker {
    stack: Vec<String>,
}

impl Walker {
    fn walk(&mut self, shape: &TypeShape) -> Map<String, Value> {
        let mut schema = Map::new();
        match shape {
            TypeShape::Optional(inner) => {
                let mut schema = self.walk(inner);
                if let Some(Value::Array(members)) = schema.get_mut("enum") {
                    members.push(Value::Null);
                }
                return schema;
            }
            TypeShape::Bool => {
                schema.insert("type".into(), "boolean".into());
            }
            TypeShape::Integer(_) => {
                schema.insert("type".into(), "integer".into());
            }
            TypeShape::Float(_) => {
                schema.insert("type".into(), "number".into());
            }
            TypeShape::String => {
                schema.insert("type".into(), "string".into());
            }
            TypeShape::Char => {
                schema.insert("type".into(), "string".into());
                schema.insert("minLength".into(), Value::from(1));
                schema.insert("maxLength".into(), Value::from(1));
            }
            TypeShape::Enum(members) => {
                schema.insert("type".into(), "string".into());
                schema.insert("enum".into(), members.iter().cloned().collect());
            }
            TypeShape::Sequence(inner) => {
                schema.insert("type".into(), "array".into());
                schema.insert("items".into(), Value::Object(self.walk(inner)));
            }
            TypeShape::Array { item, len } => {
                schema.insert("type".into(), "array".into());
                schema.insert("items".into(), Value::Object(self.walk(item)));
                schema.insert("minItems".into(), (*len).into());
                schema.insert("maxItems".into(), (*len).into());
            }
            TypeShape::Map { text_keys, value } => {
                schema.insert("type".into(), "object".into());
                let additional = if *text_keys {
                    Value::Object(self.walk(value))
                } else {
                    Value::Bool(true)
                };
                schema.insert("additionalProperties".into(), additional);
            }
            TypeShape::Record(record) => {
                schema.insert("type".into(), "object".into());
                let signature = record.signature();
                if self.stack.contains(&signature) {
                    return schema;
                }
                self.stack.push(signature);
                let (properties, required) = self.fields(record);
                self.stack.pop();
                schema.insert("properties".into(), Value::Object(properties));
                schema.insert(
                    "required".into(),
                    required.into_iter().map(Value::String).collect(),
                );
            }
            // No precise representation; fall back to a permissive leaf.
            TypeShape::Unit | TypeShape::Any => {
                schema.insert("type".into(), "string".into());
            }
        }
        schema
    }

    fn fields(&mut self, record: &RecordShape) -> (Map<String, Value>, Vec<String>) {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for field in record.wire_fields() {
            let name = field.wire_name().to_string();
            if field.is_required() {
                required.push(name.clone());
            }
            let mut schema = self.walk(&field.shape());
            if let Some(description) = &field.description {
                schema.insert("description".into(), description.clone().into());
            }
            properties.insert(name, Value::Object(schema));
        }
        (properties, required)
    }
}
