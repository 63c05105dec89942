use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::compile::{DeserializeFn, DeserializerRef, SerializeFn, SerializerRef};
use crate::context::ResolveContext;
use crate::error::{GraphError, ValueError};
use crate::info::TypeDesc;
use crate::registry::{HandlerRegistry, TypeHandler};
use crate::value::Value;
use crate::wire::WireValue;

/// Handles [`TypeDesc::Tuple`].
///
/// A [`Value::Tuple`] is carried as a wire sequence, and both directions
/// check the number of items.
#[derive(Debug, Clone, Copy, Default)]
pub struct TupleHandler;

fn check_len(expected: usize, found: usize) -> Result<(), ValueError> {
    if expected == found {
        Ok(())
    } else {
        Err(ValueError::InvalidLength { expected, found })
    }
}

impl TypeHandler for TupleHandler {
    fn name(&self) -> &'static str {
        "Tuple"
    }

    fn matches(&self, ty: &TypeDesc) -> Result<bool, GraphError> {
        Ok(matches!(ty, TypeDesc::Tuple(_)))
    }

    fn normalize(
        &self,
        registry: &HandlerRegistry,
        ty: &TypeDesc,
        cx: &ResolveContext,
    ) -> Result<TypeDesc, GraphError> {
        match ty {
            TypeDesc::Tuple(items) => items
                .iter()
                .map(|item| registry.normalize(item, cx))
                .collect::<Result<Box<[_]>, _>>()
                .map(TypeDesc::Tuple),
            _ => Err(super::unexpected("tuple", ty)),
        }
    }

    fn children_of(&self, ty: &TypeDesc) -> Result<Vec<TypeDesc>, GraphError> {
        match ty {
            TypeDesc::Tuple(items) => Ok(items.to_vec()),
            _ => Err(super::unexpected("tuple", ty)),
        }
    }

    fn build_serializer(
        &self,
        _: &TypeDesc,
        children: Vec<SerializerRef>,
    ) -> Result<SerializeFn, GraphError> {
        Ok(Box::new(move |bindings, value| match value {
            Value::Tuple(items) => {
                check_len(children.len(), items.len())?;
                children
                    .iter()
                    .zip(items)
                    .map(|(child, v)| child.serialize(bindings, v))
                    .collect::<Result<Vec<_>, _>>()
                    .map(WireValue::Seq)
            }
            _ => Err(ValueError::mismatch("tuple", value.kind_name())),
        }))
    }

    fn build_deserializer(
        &self,
        _: &TypeDesc,
        children: Vec<DeserializerRef>,
    ) -> Result<DeserializeFn, GraphError> {
        Ok(Box::new(move |bindings, wire| match wire {
            WireValue::Seq(items) => {
                check_len(children.len(), items.len())?;
                children
                    .iter()
                    .zip(items)
                    .map(|(child, w)| child.deserialize(bindings, w))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Value::Tuple)
            }
            _ => Err(ValueError::mismatch("tuple", wire.kind_name())),
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
    fn length_is_checked() {
        let ty = TypeDesc::tuple([TypeDesc::int(), TypeDesc::str()]);
        let table = compile(&ty, &HandlerRegistry::new(), &ResolveContext::new()).unwrap();

        let value = Value::Tuple(vec![Value::Int(1), Value::from("a")]);
        let wire = table.serialize(&ty, &value).unwrap();
        assert_eq!(wire, WireValue::Seq(vec![WireValue::Int(1), WireValue::from("a")]));
        assert_eq!(table.deserialize(&ty, &wire), Ok(value));

        assert_eq!(
            table.deserialize(&ty, &WireValue::Seq(vec![WireValue::Int(1)])),
            Err(ValueError::InvalidLength { expected: 2, found: 1 }),
        );
        assert_eq!(
            table.serialize(&ty, &Value::Tuple(vec![])),
            Err(ValueError::InvalidLength { expected: 2, found: 0 }),
        );
    }

    #[test]
    fn empty_tuple() {
        let ty = TypeDesc::tuple([]);
        let table = compile(&ty, &HandlerRegistry::new(), &ResolveContext::new()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.serialize(&ty, &Value::Tuple(vec![])), Ok(WireValue::Seq(vec![])));
    }
}
