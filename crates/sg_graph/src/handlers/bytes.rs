use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::compile::{DeserializeFn, DeserializerRef, SerializeFn, SerializerRef};
use crate::error::{GraphError, ValueError};
use crate::info::TypeDesc;
use crate::registry::TypeHandler;
use crate::value::Value;
use crate::wire::WireValue;

/// Handles [`TypeDesc::Bytes`], carried as a standard base64 string.
#[derive(Debug, Clone, Copy, Default)]
pub struct BytesHandler;

impl TypeHandler for BytesHandler {
    fn name(&self) -> &'static str {
        "Bytes"
    }

    fn matches(&self, ty: &TypeDesc) -> Result<bool, GraphError> {
        Ok(matches!(ty, TypeDesc::Bytes))
    }

    fn children_of(&self, _: &TypeDesc) -> Result<Vec<TypeDesc>, GraphError> {
        Ok(Vec::new())
    }

    fn build_serializer(
        &self,
        _: &TypeDesc,
        _: Vec<SerializerRef>,
    ) -> Result<SerializeFn, GraphError> {
        Ok(Box::new(|_, value| match value {
            Value::Bytes(bytes) => Ok(WireValue::Str(STANDARD.encode(bytes))),
            _ => Err(ValueError::mismatch("bytes", value.kind_name())),
        }))
    }

    fn build_deserializer(
        &self,
        _: &TypeDesc,
        _: Vec<DeserializerRef>,
    ) -> Result<DeserializeFn, GraphError> {
        Ok(Box::new(|_, wire| match wire {
            WireValue::Str(text) => STANDARD
                .decode(text)
                .map(Value::Bytes)
                .map_err(|e| ValueError::InvalidData(e.to_string())),
            _ => Err(ValueError::mismatch("base64 string", wire.kind_name())),
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
    use crate::wire::WireValue;
    use crate::{HandlerRegistry, ResolveContext, ValueError, compile};

    #[test]
    fn base64() {
        let ty = TypeDesc::bytes();
        let table = compile(&ty, &HandlerRegistry::new(), &ResolveContext::new()).unwrap();

        let value = Value::Bytes(vec![0, 1, 2, 250]);
        let wire = table.serialize(&ty, &value).unwrap();
        assert_eq!(wire, WireValue::from("AAEC+g=="));
        assert_eq!(table.deserialize(&ty, &wire), Ok(value));

        assert!(matches!(
            table.deserialize(&ty, &WireValue::from("not base64!")),
            Err(ValueError::InvalidData(_)),
        ));
    }
}
