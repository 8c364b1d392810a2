// ABOUTME: The Shaped trait - maps a Rust type to its TypeShape.
// ABOUTME: Implemented for primitives and std collections; records use RecordShape.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use super::{FloatKind, IntKind, TypeShape};

/// A type whose structure can be described without a value.
///
/// Records implement this by hand:
///
/// ```
/// use fntool::shape::{FieldShape, RecordShape, Shaped, TypeShape};
///
/// struct Lookup {
///     id: i64,
///     note: Option<String>,
/// }
///
/// impl Shaped for Lookup {
///     fn shape() -> TypeShape {
///         RecordShape::new("Lookup")
///             .field(FieldShape::new::<i64>("id"))
///             .field(FieldShape::new::<Option<String>>("note").omit_empty())
///             .into()
///     }
/// }
/// ```
pub trait Shaped {
    fn shape() -> TypeShape;
}

/// Types usable as map keys, split into text and non-text keys.
pub trait MapKey {
    const TEXT: bool;
}

impl MapKey for String {
    const TEXT: bool = true;
}

macro_rules! numeric_keys {
    ($($t:ty),*) => {
        $(impl MapKey for $t {
            const TEXT: bool = false;
        })*
    };
}

numeric_keys!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! int_shapes {
    ($($t:ty => $kind:ident),*) => {
        $(impl Shaped for $t {
            fn shape() -> TypeShape {
                TypeShape::Integer(IntKind::$kind)
            }
        })*
    };
}

int_shapes!(
    i8 => I8, i16 => I16, i32 => I32, i64 => I64, isize => Isize,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64, usize => Usize
);

impl Shaped for () {
    fn shape() -> TypeShape {
        TypeShape::Unit
    }
}

impl Shaped for bool {
    fn shape() -> TypeShape {
        TypeShape::Bool
    }
}

impl Shaped for f32 {
    fn shape() -> TypeShape {
        TypeShape::Float(FloatKind::F32)
    }
}

impl Shaped for f64 {
    fn shape() -> TypeShape {
        TypeShape::Float(FloatKind::F64)
    }
}

impl Shaped for String {
    fn shape() -> TypeShape {
        TypeShape::String
    }
}

impl Shaped for char {
    fn shape() -> TypeShape {
        TypeShape::Char
    }
}

impl Shaped for serde_json::Value {
    fn shape() -> TypeShape {
        TypeShape::Any
    }
}

impl Shaped for serde_json::Map<String, serde_json::Value> {
    fn shape() -> TypeShape {
        TypeShape::Map {
            text_keys: true,
            value: Box::new(TypeShape::Any),
        }
    }
}

impl<T: Shaped> Shaped for Option<T> {
    fn shape() -> TypeShape {
        TypeShape::Optional(Box::new(T::shape()))
    }
}

impl<T: Shaped> Shaped for Box<T> {
    fn shape() -> TypeShape {
        T::shape()
    }
}

impl<T: Shaped> Shaped for Vec<T> {
    fn shape() -> TypeShape {
        TypeShape::Sequence(Box::new(T::shape()))
    }
}

impl<T: Shaped, const N: usize> Shaped for [T; N] {
    fn shape() -> TypeShape {
        TypeShape::Array {
            item: Box::new(T::shape()),
            len: N,
        }
    }
}

impl<T: Shaped, S> Shaped for HashSet<T, S> {
    fn shape() -> TypeShape {
        TypeShape::Sequence(Box::new(T::shape()))
    }
}

impl<T: Shaped> Shaped for BTreeSet<T> {
    fn shape() -> TypeShape {
        TypeShape::Sequence(Box::new(T::shape()))
    }
}

impl<K: MapKey, V: Shaped, S> Shaped for HashMap<K, V, S> {
    fn shape() -> TypeShape {
        TypeShape::Map {
            text_keys: K::TEXT,
            value: Box::new(V::shape()),
        }
    }
}

impl<K: MapKey, V: Shaped> Shaped for BTreeMap<K, V> {
    fn shape() -> TypeShape {
        TypeShape::Map {
            text_keys: K::TEXT,
            value: Box::new(V::shape()),
        }
    }
}
