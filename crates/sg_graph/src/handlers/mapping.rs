use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::compile::{Bindings, DeserializeFn, DeserializerRef, SerializeFn, SerializerRef};
use crate::context::ResolveContext;
use crate::error::{GraphError, ValueError};
use crate::info::TypeDesc;
use crate::registry::{HandlerRegistry, TypeHandler};
use crate::value::Value;
use crate::wire::{WireMap, WireValue};

/// Handles [`TypeDesc::Mapping`].
///
/// Wire maps are keyed by strings, so serialized keys must be scalars:
/// strings are kept, numbers and booleans are formatted. When reading,
/// a key that parses as a number or boolean is first offered to the key
/// deserializer in that form, then as the plain string.
///
/// Entry order is preserved. A repeated key keeps the last value.
#[derive(Debug, Clone, Copy, Default)]
pub struct MappingHandler;

fn key_to_string(key: WireValue) -> Result<String, ValueError> {
    match key {
        WireValue::Str(s) => Ok(s),
        WireValue::Int(v) => Ok(v.to_string()),
        WireValue::UInt(v) => Ok(v.to_string()),
        WireValue::Bool(v) => Ok(v.to_string()),
        WireValue::Float(v) => Ok(v.to_string()),
        other => Err(ValueError::InvalidKey(other.kind_name())),
    }
}

fn parse_key(key: &str) -> Option<WireValue> {
    if let Ok(v) = key.parse::<i64>() {
        Some(WireValue::Int(v))
    } else if let Ok(v) = key.parse::<u64>() {
        Some(WireValue::UInt(v))
    } else if let Ok(v) = key.parse::<bool>() {
        Some(WireValue::Bool(v))
    } else if let Ok(v) = key.parse::<f64>() {
        Some(WireValue::Float(v))
    } else {
        None
    }
}

fn deserialize_key(
    key_de: DeserializerRef,
    bindings: &Bindings,
    key: &str,
) -> Result<Value, ValueError> {
    if let Some(parsed) = parse_key(key)
        && let Ok(value) = key_de.deserialize(bindings, &parsed)
    {
        return Ok(value);
    }
    key_de.deserialize(bindings, &WireValue::Str(key.into()))
}

impl TypeHandler for MappingHandler {
    fn name(&self) -> &'static str {
        "Mapping"
    }

    fn matches(&self, ty: &TypeDesc) -> Result<bool, GraphError> {
        Ok(matches!(ty, TypeDesc::Mapping(..)))
    }

    fn normalize(
        &self,
        registry: &HandlerRegistry,
        ty: &TypeDesc,
        cx: &ResolveContext,
    ) -> Result<TypeDesc, GraphError> {
        match ty {
            TypeDesc::Mapping(key, value) => Ok(TypeDesc::mapping(
                registry.normalize(key, cx)?,
                registry.normalize(value, cx)?,
            )),
            _ => Err(super::unexpected("mapping", ty)),
        }
    }

    fn children_of(&self, ty: &TypeDesc) -> Result<Vec<TypeDesc>, GraphError> {
        match ty {
            TypeDesc::Mapping(key, value) => Ok(alloc::vec![(**key).clone(), (**value).clone()]),
            _ => Err(super::unexpected("mapping", ty)),
        }
    }

    fn build_serializer(
        &self,
        ty: &TypeDesc,
        children: Vec<SerializerRef>,
    ) -> Result<SerializeFn, GraphError> {
        let [key_ser, value_ser] = super::expect_children(ty, children)?;
        Ok(Box::new(move |bindings, value| match value {
            Value::Map(entries) => {
                let mut map = WireMap::with_capacity(entries.len());
                for (k, v) in entries {
                    let key = key_to_string(key_ser.serialize(bindings, k)?)?;
                    map.insert(key, value_ser.serialize(bindings, v)?);
                }
                Ok(WireValue::Map(map))
            }
            _ => Err(ValueError::mismatch("mapping", value.kind_name())),
        }))
    }

    fn build_deserializer(
        &self,
        ty: &TypeDesc,
        children: Vec<DeserializerRef>,
    ) -> Result<DeserializeFn, GraphError> {
        let [key_de, value_de] = super::expect_children(ty, children)?;
        Ok(Box::new(move |bindings, wire| match wire {
            WireValue::Map(map) => map
                .iter()
                .map(|(k, w)| -> Result<(Value, Value), ValueError> {
                    let key = deserialize_key(key_de, bindings, k)?;
                    Ok((key, value_de.deserialize(bindings, w)?))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Map),
            _ => Err(ValueError::mismatch("map", wire.kind_name())),
        }))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec;

    use crate::info::TypeDesc;
    use crate::value::Value;
    use crate::wire::{WireMap, WireValue};
    use crate::{HandlerRegistry, ResolveContext, ValueError, compile};

    #[test]
    fn integer_keys() {
        let ty = TypeDesc::mapping(TypeDesc::int(), TypeDesc::bool());
        let table = compile(&ty, &HandlerRegistry::new(), &ResolveContext::new()).unwrap();

        let value = Value::Map(vec![
            (Value::Int(-1), Value::Bool(true)),
            (Value::Int(10), Value::Bool(false)),
        ]);
        let wire = table.serialize(&ty, &value).unwrap();

        let expected: WireMap = [("-1", WireValue::Bool(true)), ("10", WireValue::Bool(false))]
            .into_iter()
            .collect();
        assert_eq!(wire, WireValue::Map(expected));
        assert_eq!(table.deserialize(&ty, &wire), Ok(value));
    }

    #[test]
    fn numeric_looking_string_keys() {
        let ty = TypeDesc::mapping(TypeDesc::str(), TypeDesc::int());
        let table = compile(&ty, &HandlerRegistry::new(), &ResolveContext::new()).unwrap();

        let value = Value::Map(vec![
            (Value::from("1"), Value::Int(1)),
            (Value::from("true"), Value::Int(2)),
        ]);
        let wire = table.serialize(&ty, &value).unwrap();
        assert_eq!(table.deserialize(&ty, &wire), Ok(value));
    }

    #[test]
    fn non_scalar_keys_are_rejected() {
        let ty = TypeDesc::mapping(TypeDesc::sequence(TypeDesc::int()), TypeDesc::int());
        let table = compile(&ty, &HandlerRegistry::new(), &ResolveContext::new()).unwrap();

        let value = Value::Map(vec![(Value::Seq(vec![]), Value::Int(1))]);
        assert_eq!(table.serialize(&ty, &value), Err(ValueError::InvalidKey("sequence")));
    }
}
