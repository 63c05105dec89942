use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;

use ::uuid::Uuid;

use crate::compile::{DeserializeFn, DeserializerRef, SerializeFn, SerializerRef};
use crate::error::{GraphError, ValueError};
use crate::info::TypeDesc;
use crate::registry::TypeHandler;
use crate::value::Value;
use crate::wire::WireValue;

/// Handles [`TypeDesc::Uuid`], carried as 32 lowercase hex digits.
///
/// Reading also accepts the hyphenated, braced and URN forms.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidHandler;

impl TypeHandler for UuidHandler {
    fn name(&self) -> &'static str {
        "Uuid"
    }

    fn matches(&self, ty: &TypeDesc) -> Result<bool, GraphError> {
        Ok(matches!(ty, TypeDesc::Uuid))
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
            Value::Uuid(id) => Ok(WireValue::Str(id.simple().to_string())),
            _ => Err(ValueError::mismatch("uuid", value.kind_name())),
        }))
    }

    fn build_deserializer(
        &self,
        _: &TypeDesc,
        _: Vec<DeserializerRef>,
    ) -> Result<DeserializeFn, GraphError> {
        Ok(Box::new(|_, wire| match wire {
            WireValue::Str(text) => Uuid::parse_str(text)
                .map(Value::Uuid)
                .map_err(|e| ValueError::InvalidData(e.to_string())),
            _ => Err(ValueError::mismatch("hex string", wire.kind_name())),
        }))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use ::uuid::Uuid;

    use crate::info::TypeDesc;
    use crate::value::Value;
    use crate::wire::WireValue;
    use crate::{HandlerRegistry, ResolveContext, ValueError, compile};

    const ID: u128 = 0x67e5_5044_10b1_426f_9247_bb68_0e5f_e0c8;

    #[test]
    fn hex_string() {
        let ty = TypeDesc::uuid();
        let table = compile(&ty, &HandlerRegistry::new(), &ResolveContext::new()).unwrap();

        let value = Value::Uuid(Uuid::from_u128(ID));
        let wire = table.serialize(&ty, &value).unwrap();
        assert_eq!(wire, WireValue::from("67e5504410b1426f9247bb680e5fe0c8"));
        assert_eq!(table.deserialize(&ty, &wire), Ok(value.clone()));

        let hyphenated = WireValue::from("67e55044-10b1-426f-9247-bb680e5fe0c8");
        assert_eq!(table.deserialize(&ty, &hyphenated), Ok(value));
    }

    #[test]
    fn bad_input() {
        let ty = TypeDesc::uuid();
        let table = compile(&ty, &HandlerRegistry::new(), &ResolveContext::new()).unwrap();

        assert!(matches!(
            table.deserialize(&ty, &WireValue::from("67e55044")),
            Err(ValueError::InvalidData(_)),
        ));
        assert_eq!(
            table.deserialize(&ty, &WireValue::UInt(7)),
            Err(ValueError::mismatch("hex string", "u64")),
        );
        assert_eq!(
            table.serialize(&ty, &Value::from("67e5504410b1426f9247bb680e5fe0c8")),
            Err(ValueError::mismatch("uuid", "str")),
        );
    }
}
