//! Provide the in-memory side of serialization.
//!
//! ## Menu
//!
//! - [`Value`]: A dynamically typed value, the input of serializers
//!   and the output of deserializers.
//! - [`DynamicRecord`]: Named fields of a record value.
//! - [`DynamicVariant`]: The selected variant of a union value.
//!
//! A `Value` does not carry its type, the compiled table decides how it
//! is interpreted.

// -----------------------------------------------------------------------------
// Modules

mod dynamic;

// -----------------------------------------------------------------------------
// Exports

pub use dynamic::{DynamicRecord, DynamicVariant};

// -----------------------------------------------------------------------------
// Value

use alloc::string::String;
use alloc::vec::Vec;

use chrono::NaiveDateTime;
use uuid::Uuid;

/// A dynamically typed value.
///
/// # Examples
///
/// ```
/// use sg_graph::value::Value;
///
/// let value = Value::Seq(vec![Value::from(1_i64), Value::None, Value::from(3_i64)]);
/// assert_eq!(value.kind_name(), "sequence");
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// An absent optional value.
    #[default]
    None,
    Unit,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Uuid(Uuid),
    DateTime(NaiveDateTime),
    Seq(Vec<Value>),
    Tuple(Vec<Value>),
    /// Key-value pairs, keeping insertion order.
    Map(Vec<(Value, Value)>),
    Record(DynamicRecord),
    Variant(DynamicVariant),
}

impl Value {
    /// Returns a short name of the value shape, used in error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Unit => "unit",
            Self::Bool(_) => "bool",
            Self::Int(_) => "i64",
            Self::UInt(_) => "u64",
            Self::Float(_) => "f64",
            Self::Str(_) => "str",
            Self::Bytes(_) => "bytes",
            Self::Uuid(_) => "uuid",
            Self::DateTime(_) => "datetime",
            Self::Seq(_) => "sequence",
            Self::Tuple(_) => "tuple",
            Self::Map(_) => "mapping",
            Self::Record(_) => "record",
            Self::Variant(_) => "variant",
        }
    }

    #[inline]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Creates a union value, see [`DynamicVariant`].
    #[inline]
    pub fn variant(name: impl Into<String>, value: Value) -> Self {
        Self::Variant(DynamicVariant::new(name, value))
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => UInt,
    u16 => UInt,
    u32 => UInt,
    u64 => UInt,
    f32 => Float,
    f64 => Float,
    String => Str,
    &str => Str,
    Uuid => Uuid,
    NaiveDateTime => DateTime,
    DynamicRecord => Record,
    DynamicVariant => Variant,
}

impl From<()> for Value {
    #[inline]
    fn from(_: ()) -> Self {
        Self::Unit
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Self::None,
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    #[inline]
    fn from(value: Vec<T>) -> Self {
        Self::Seq(value.into_iter().map(Into::into).collect())
    }
}

// -----------------------------------------------------------------------------
// Tests
