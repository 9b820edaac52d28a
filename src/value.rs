//! The value model: tags, the recursive `Value` tree, and its structural
//! utilities (clone, equality, typed accessors).

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Ordered string-keyed map backing FSON objects. Insertion order is part of
/// the value's identity (see [`Value`]'s equality contract), which is why
/// this is an [`IndexMap`] rather than a [`std::collections::HashMap`].
pub type ObjectMap = IndexMap<String, Value>;

/// The discriminant of a [`Value`]. Also doubles as the declared
/// element-type of an array (where [`Tag::Mix`] additionally makes sense,
/// since no scalar value is ever itself tagged `mix`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Null,
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Hex,
    Oct,
    Bin,
    Cstr,
    Enum,
    Datetime,
    Duration,
    Array,
    Object,
    /// Only meaningful as an array's declared element-type; never the tag
    /// of an actual `Value`.
    Mix,
}

impl Tag {
    /// Canonical lowercase short name, as used by the serializer and by
    /// `type_name`.
    pub fn name(self) -> &'static str {
        match self {
            Tag::Null => "null",
            Tag::Bool => "bool",
            Tag::I8 => "i8",
            Tag::I16 => "i16",
            Tag::I32 => "i32",
            Tag::I64 => "i64",
            Tag::U8 => "u8",
            Tag::U16 => "u16",
            Tag::U32 => "u32",
            Tag::U64 => "u64",
            Tag::F32 => "f32",
            Tag::F64 => "f64",
            Tag::Hex => "hex",
            Tag::Oct => "oct",
            Tag::Bin => "bin",
            Tag::Cstr => "cstr",
            Tag::Enum => "enum",
            Tag::Datetime => "datetime",
            Tag::Duration => "duration",
            Tag::Array => "array",
            Tag::Object => "object",
            Tag::Mix => "mix",
        }
    }

    /// Parses a type-tag identifier (the `type` production in the
    /// grammar, minus any `<...>` type arguments). Unknown identifiers are
    /// a caller error to be reported as `TYPE` by the parser, not here.
    pub fn from_name(name: &str) -> Option<Tag> {
        Some(match name {
            "null" => Tag::Null,
            "bool" => Tag::Bool,
            "i8" => Tag::I8,
            "i16" => Tag::I16,
            "i32" => Tag::I32,
            "i64" => Tag::I64,
            "u8" => Tag::U8,
            "u16" => Tag::U16,
            "u32" => Tag::U32,
            "u64" => Tag::U64,
            "f32" => Tag::F32,
            "f64" => Tag::F64,
            "hex" => Tag::Hex,
            "oct" => Tag::Oct,
            "bin" => Tag::Bin,
            "cstr" => Tag::Cstr,
            "enum" => Tag::Enum,
            "datetime" => Tag::Datetime,
            "duration" => Tag::Duration,
            "array" => Tag::Array,
            "object" => Tag::Object,
            "mix" => Tag::Mix,
            _ => return None,
        })
    }
}

/// An array value: an ordered sequence of children plus the declared
/// element-type tag (spec §3.1's array row). `element_type` is
/// [`Tag::Mix`] for both the untyped `array: [...]` form and the explicit
/// `array<mix>: [...]` form — the two are not distinguished once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    pub element_type: Tag,
    pub items: Vec<Value>,
}

/// A recursively owned FSON value. Container variants ([`Value::Array`],
/// [`Value::Object`]) exclusively own their children; a `Value` never
/// appears in more than one parent at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Hex(u64),
    Oct(u64),
    Bin(u64),
    Cstr(String),
    Enum(String),
    Datetime(String),
    Duration(String),
    Array(Array),
    Object(ObjectMap),
}

impl Value {
    /// The runtime tag of this value. For containers this is
    /// [`Tag::Array`]/[`Tag::Object`] themselves, not the element type.
    pub fn tag(&self) -> Tag {
        match self {
            Value::Null => Tag::Null,
            Value::Bool(_) => Tag::Bool,
            Value::I8(_) => Tag::I8,
            Value::I16(_) => Tag::I16,
            Value::I32(_) => Tag::I32,
            Value::I64(_) => Tag::I64,
            Value::U8(_) => Tag::U8,
            Value::U16(_) => Tag::U16,
            Value::U32(_) => Tag::U32,
            Value::U64(_) => Tag::U64,
            Value::F32(_) => Tag::F32,
            Value::F64(_) => Tag::F64,
            Value::Hex(_) => Tag::Hex,
            Value::Oct(_) => Tag::Oct,
            Value::Bin(_) => Tag::Bin,
            Value::Cstr(_) => Tag::Cstr,
            Value::Enum(_) => Tag::Enum,
            Value::Datetime(_) => Tag::Datetime,
            Value::Duration(_) => Tag::Duration,
            Value::Array(_) => Tag::Array,
            Value::Object(_) => Tag::Object,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.tag().name()
    }

    /// Structural equality: equal tag and equal payload. Numeric variants
    /// compare by tag *and* width, so `Value::I32(1)` is never equal to
    /// `Value::I64(1)`. Objects compare key-for-key in insertion order
    /// (this falls straight out of `IndexMap`'s own `PartialEq`, which is
    /// order-sensitive).
    pub fn equals(&self, other: &Value) -> bool {
        self == other
    }

    /// Deep, independent copy. Every owned child is freshly allocated —
    /// this is exactly `Clone::clone`, exposed under the name spec.md's
    /// API surface uses.
    pub fn deep_clone(&self) -> Value {
        self.clone()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn object_get<'a>(&'a self, key: &str) -> Option<&'a Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    pub fn array_get(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(arr) => arr.items.get(index),
            _ => None,
        }
    }

    /// Number of elements, or `None` if this value is not an array.
    pub fn array_size(&self) -> Option<usize> {
        match self {
            Value::Array(arr) => Some(arr.items.len()),
            _ => None,
        }
    }

    fn type_error(&self, want: &str) -> Error {
        Error::type_error(
            0,
            format!("expected {}, found {}", want, self.type_name()),
        )
    }

    pub fn get_bool(&self) -> Result<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            _ => Err(self.type_error("bool")),
        }
    }

    pub fn get_i32(&self) -> Result<i32> {
        match self {
            Value::I32(n) => Ok(*n),
            _ => Err(self.type_error("i32")),
        }
    }

    pub fn get_i64(&self) -> Result<i64> {
        match self {
            Value::I64(n) => Ok(*n),
            _ => Err(self.type_error("i64")),
        }
    }

    pub fn get_u64(&self) -> Result<u64> {
        match self {
            Value::U64(n) => Ok(*n),
            _ => Err(self.type_error("u64")),
        }
    }

    pub fn get_f64(&self) -> Result<f64> {
        match self {
            Value::F64(n) => Ok(*n),
            _ => Err(self.type_error("f64")),
        }
    }

    pub fn get_cstr(&self) -> Result<&str> {
        match self {
            Value::Cstr(s) => Ok(s.as_str()),
            _ => Err(self.type_error("cstr")),
        }
    }

    pub fn get_hex(&self) -> Result<u64> {
        match self {
            Value::Hex(n) => Ok(*n),
            _ => Err(self.type_error("hex")),
        }
    }

    pub fn get_oct(&self) -> Result<u64> {
        match self {
            Value::Oct(n) => Ok(*n),
            _ => Err(self.type_error("oct")),
        }
    }

    pub fn get_bin(&self) -> Result<u64> {
        match self {
            Value::Bin(n) => Ok(*n),
            _ => Err(self.type_error("bin")),
        }
    }
}

/// Releases a value tree. In safe Rust this is ordinary `Drop` — there is
/// no manual bookkeeping to do — but the function is kept so the crate's
/// API surface matches spec.md's language-neutral contract (`free(root)`,
/// tolerant of an absent root) even though callers are free to just let a
/// `Value` go out of scope instead.
pub fn free(_value: Option<Value>) {}
