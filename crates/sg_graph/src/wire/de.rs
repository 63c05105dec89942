use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Formatter};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_core::de::{MapAccess, SeqAccess, Visitor};
use serde_core::{Deserialize, Deserializer};

use crate::wire::{WireMap, WireValue};

// -----------------------------------------------------------------------------
// WireValue

/// A [`Visitor`] accepting any self-describing input.
struct WireValueVisitor;

impl<'de> Visitor<'de> for WireValueVisitor {
    type Value = WireValue;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("any wire value")
    }

    #[inline]
    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E> {
        Ok(WireValue::Bool(v))
    }

    #[inline]
    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
        Ok(WireValue::Int(v))
    }

    #[inline]
    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
        Ok(WireValue::UInt(v))
    }

    #[inline]
    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
        Ok(WireValue::Float(v))
    }

    #[inline]
    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E> {
        Ok(WireValue::Str(v.into()))
    }

    #[inline]
    fn visit_string<E>(self, v: String) -> Result<Self::Value, E> {
        Ok(WireValue::Str(v))
    }

    // Raw bytes of binary formats become the base64 string bytes are written as.
    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E> {
        Ok(WireValue::Str(STANDARD.encode(v)))
    }

    #[inline]
    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(WireValue::Null)
    }

    #[inline]
    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(WireValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<V>(self, mut seq: V) -> Result<Self::Value, V::Error>
    where
        V: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or_default().min(4096));
        while let Some(item) = seq.next_element::<WireValue>()? {
            items.push(item);
        }
        Ok(WireValue::Seq(items))
    }

    fn visit_map<V>(self, map: V) -> Result<Self::Value, V::Error>
    where
        V: MapAccess<'de>,
    {
        WireMapVisitor.visit_map(map).map(WireValue::Map)
    }
}

impl<'de> Deserialize<'de> for WireValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(WireValueVisitor)
    }
}

// -----------------------------------------------------------------------------
// WireMap

struct WireMapVisitor;

impl<'de> Visitor<'de> for WireMapVisitor {
    type Value = WireMap;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str("a string keyed map")
    }

    fn visit_map<V>(self, mut map: V) -> Result<Self::Value, V::Error>
    where
        V: MapAccess<'de>,
    {
        let mut result = WireMap::with_capacity(map.size_hint().unwrap_or_default().min(4096));
        while let Some((key, value)) = map.next_entry::<String, WireValue>()? {
            result.insert(key, value);
        }
        Ok(result)
    }
}

impl<'de> Deserialize<'de> for WireMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(WireMapVisitor)
    }
}

// -----------------------------------------------------------------------------
// Tests
