// ABOUTME: Defines TypeShape and friends - the structural description of a
// ABOUTME: function's parameter type used by both schema synthesis and binding.

use std::fmt;

use super::Shaped;

/// Width of an integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntKind {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
}

impl IntKind {
    /// Whether the target is an unsigned integer.
    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            Self::U8 | Self::U16 | Self::U32 | Self::U64 | Self::Usize
        )
    }

    /// Reinterpret a wide integer at this width, wrapping like an `as` cast.
    pub fn wrap(self, v: i128) -> serde_json::Value {
        match self {
            Self::I8 => (v as i8).into(),
            Self::I16 => (v as i16).into(),
            Self::I32 => (v as i32).into(),
            Self::I64 => (v as i64).into(),
            Self::Isize => (v as isize as i64).into(),
            Self::U8 => (v as u8).into(),
            Self::U16 => (v as u16).into(),
            Self::U32 => (v as u32).into(),
            Self::U64 => (v as u64).into(),
            Self::Usize => (v as usize as u64).into(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
        }
    }
}

/// Width of a floating point type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatKind {
    F32,
    F64,
}

/// Structural description of a single type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeShape {
    /// No value at all.
    Unit,
    Bool,
    Integer(IntKind),
    Float(FloatKind),
    String,
    /// A single character, carried as one-character text.
    Char,
    /// A text value restricted to a fixed set of members.
    Enum(Vec<String>),
    /// A nullable wrapper around another type.
    Optional(Box<TypeShape>),
    /// An ordered sequence.
    Sequence(Box<TypeShape>),
    /// A sequence of exactly `len` items.
    Array { item: Box<TypeShape>, len: usize },
    /// An associative map. `text_keys` is false for maps keyed by numbers.
    Map {
        text_keys: bool,
        value: Box<TypeShape>,
    },
    /// A structured type with named fields.
    Record(RecordShape),
    /// An untyped value, or a type the walker knows nothing about.
    Any,
}

impl TypeShape {
    /// Shape of an enumeration with the given member names.
    pub fn enumeration<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum(members.into_iter().map(Into::into).collect())
    }

    /// Whether this is a text-keyed map of untyped values.
    pub fn is_untyped_map(&self) -> bool {
        matches!(self, Self::Map { text_keys: true, value } if **value == Self::Any)
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => f.write_str("()"),
            Self::Bool => f.write_str("bool"),
            Self::Integer(kind) => f.write_str(kind.name()),
            Self::Float(FloatKind::F32) => f.write_str("f32"),
            Self::Float(FloatKind::F64) => f.write_str("f64"),
            Self::String => f.write_str("string"),
            Self::Char => f.write_str("char"),
            Self::Enum(members) => write!(f, "enum({})", members.join("|")),
            Self::Optional(inner) => write!(f, "Option<{inner}>"),
            Self::Sequence(inner) => write!(f, "[{inner}]"),
            Self::Array { item, len } => write!(f, "[{item}; {len}]"),
            Self::Map { text_keys, value } => {
                let key = if *text_keys { "string" } else { "integer" };
                write!(f, "map[{key}]{value}")
            }
            Self::Record(record) => f.write_str(&record.name),
            Self::Any => f.write_str("any"),
        }
    }
}

impl From<RecordShape> for TypeShape {
    fn from(record: RecordShape) -> Self {
        Self::Record(record)
    }
}

/// Describes a record type field by field.
///
/// The name identifies the record when walking nested shapes, so distinct
/// records should carry distinct names. Generic records should include their
/// type arguments, as in `Page<User>`.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordShape {
    pub name: String,
    pub fields: Vec<FieldShape>,
}

impl RecordShape {
    /// Start describing a record with the given type name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field descriptor.
    pub fn field(mut self, field: FieldShape) -> Self {
        self.fields.push(field);
        self
    }

    /// Identity used to detect a record nested inside itself.
    ///
    /// Combines the name with each wire field's name and one-level type, so two
    /// records that share a name but differ in field types are kept apart.
    pub fn signature(&self) -> String {
        let fields: Vec<String> = self
            .wire_fields()
            .map(|f| format!("{}:{}", f.wire_name(), f.shape()))
            .collect();
        format!("{}{{{}}}", self.name, fields.join(","))
    }

    /// Fields that take part in the wire form, in declaration order.
    pub fn wire_fields(&self) -> impl Iterator<Item = &FieldShape> {
        self.fields.iter().filter(|f| !f.is_skipped())
    }
}

/// Sentinel wire-name that removes a field, as `skip` does.
pub const SKIP_MARKER: &str = "-";

/// Per-field descriptor: wire name, optionality, documentation and type.
///
/// The field's type is resolved lazily so that a record may refer to itself
/// (through `Option<Box<Self>>` or `Vec<Self>`) without looping at build time.
#[derive(Debug, Clone)]
pub struct FieldShape {
    pub name: String,
    pub rename: Option<String>,
    pub omit_empty: bool,
    pub skip: bool,
    pub description: Option<String>,
    shape: fn() -> TypeShape,
}

impl FieldShape {
    /// Describe a field declared as `name: T`.
    pub fn new<T: Shaped>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rename: None,
            omit_empty: false,
            skip: false,
            description: None,
            shape: T::shape,
        }
    }

    /// Use a different name on the wire.
    pub fn rename(mut self, wire_name: impl Into<String>) -> Self {
        self.rename = Some(wire_name.into());
        self
    }

    /// Mark the field as optional ("omit if empty").
    pub fn omit_empty(mut self) -> Self {
        self.omit_empty = true;
        self
    }

    /// Keep the field out of the wire form entirely.
    pub fn skip(mut self) -> Self {
        self.skip = true;
        self
    }

    /// Attach a human-readable description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The name used on the wire.
    pub fn wire_name(&self) -> &str {
        self.rename.as_deref().unwrap_or(&self.name)
    }

    pub fn is_skipped(&self) -> bool {
        self.skip || self.wire_name() == SKIP_MARKER
    }

    pub fn is_required(&self) -> bool {
        !self.omit_empty
    }

    /// Resolve the field's type one level.
    pub fn shape(&self) -> TypeShape {
        (self.shape)()
    }
}

impl PartialEq for FieldShape {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.rename == other.rename
            && self.omit_empty == other.omit_empty
            && self.skip == other.skip
            && self.description == other.description
            && std::ptr::fn_addr_eq(self.shape, other.shape)
    }
}

/// Shape of a function's non-context parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterShape {
    /// The function takes nothing beyond the call context.
    Empty,
    /// A single text-keyed map of untyped values; passed through unchecked.
    OpaqueMap,
    /// A single structured parameter.
    Record(RecordShape),
    /// A single primitive or collection, bound from the synthetic `value` key.
    Single(TypeShape),
}

/// Key used for the synthetic field of a `Single` parameter.
pub const VALUE_KEY: &str = "value";

impl ParameterShape {
    /// Classify a parameter type.
    pub fn of<P: Shaped>() -> Self {
        Self::from_type(P::shape())
    }

    pub fn from_type(shape: TypeShape) -> Self {
        match shape {
            TypeShape::Unit => Self::Empty,
            shape if shape.is_untyped_map() => Self::OpaqueMap,
            TypeShape::Record(record) => Self::Record(record),
            other => Self::Single(other),
        }
    }
}
