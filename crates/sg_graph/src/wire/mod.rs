//! Provide the wire side of serialization.
//!
//! ## Menu
//!
//! - [`WireValue`]: A JSON-like tree, the output of serializers
//!   and the input of deserializers.
//! - [`WireMap`]: An order preserving string keyed map.
//!
//! Both implement `serde::Serialize` and `serde::Deserialize`, so any serde
//! data format can be used as the final encoding.

// -----------------------------------------------------------------------------
// Modules

mod de;
mod map;
mod ser;

// -----------------------------------------------------------------------------
// Exports

pub use map::WireMap;

// -----------------------------------------------------------------------------
// WireValue

use alloc::string::String;
use alloc::vec::Vec;

/// A serialized value.
///
/// Bytes do not exist on the wire, they are encoded as base64 strings.
///
/// # Examples
///
/// ```
/// use sg_graph::wire::{WireMap, WireValue};
///
/// let mut map = WireMap::new();
/// map.insert("value", WireValue::Int(1));
///
/// let wire = WireValue::Map(map);
/// assert_eq!(wire.get("value"), Some(&WireValue::Int(1)));
/// assert_eq!(wire.kind_name(), "map");
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum WireValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Seq(Vec<WireValue>),
    Map(WireMap),
}

impl WireValue {
    /// Returns a short name of the wire shape, used in error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "i64",
            Self::UInt(_) => "u64",
            Self::Float(_) => "f64",
            Self::Str(_) => "str",
            Self::Seq(_) => "sequence",
            Self::Map(_) => "map",
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Looks up `key` if this is a map.
    pub fn get(&self, key: &str) -> Option<&WireValue> {
        match self {
            Self::Map(map) => map.get(key),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for WireValue {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for WireValue {
    #[inline]
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for WireValue {
    #[inline]
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<f64> for WireValue {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for WireValue {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for WireValue {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<WireMap> for WireValue {
    #[inline]
    fn from(value: WireMap) -> Self {
        Self::Map(value)
    }
}
