use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::compile::{DeserializeFn, DeserializerRef, SerializeFn, SerializerRef};
use crate::context::ResolveContext;
use crate::error::GraphError;
use crate::info::{ScalarKind, TypeDesc};
use crate::registry::{HandlerRegistry, TypeHandler};
use crate::value::Value;
use crate::wire::WireValue;

/// Handles [`TypeDesc::Optional`].
///
/// [`Value::None`] is written as [`WireValue::Null`], anything else is
/// forwarded to the inner type. Reading `null` always yields `None`.
///
/// `null` must stay free for `None`, so an optional of an optional or of
/// `unit` is rejected with [`GraphError::MalformedDescriptor`], also when
/// the inner type only becomes one of them after normalization.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionalHandler;

fn check_inner(ty: &TypeDesc, inner: &TypeDesc) -> Result<(), GraphError> {
    match inner {
        TypeDesc::Optional(_) => Err(GraphError::malformed(ty, "nested optional")),
        TypeDesc::Scalar(ScalarKind::Unit) => Err(GraphError::malformed(ty, "optional unit")),
        _ => Ok(()),
    }
}

impl TypeHandler for OptionalHandler {
    fn name(&self) -> &'static str {
        "Optional"
    }

    fn matches(&self, ty: &TypeDesc) -> Result<bool, GraphError> {
        let TypeDesc::Optional(inner) = ty else {
            return Ok(false);
        };
        check_inner(ty, inner)?;
        Ok(true)
    }

    fn normalize(
        &self,
        registry: &HandlerRegistry,
        ty: &TypeDesc,
        cx: &ResolveContext,
    ) -> Result<TypeDesc, GraphError> {
        let TypeDesc::Optional(inner) = ty else {
            return Err(super::unexpected("optional", ty));
        };
        let inner = registry.normalize(inner, cx)?;
        check_inner(ty, &inner)?;
        Ok(TypeDesc::optional(inner))
    }

    fn children_of(&self, ty: &TypeDesc) -> Result<Vec<TypeDesc>, GraphError> {
        match ty {
            TypeDesc::Optional(inner) => Ok(alloc::vec![(**inner).clone()]),
            _ => Err(super::unexpected("optional", ty)),
        }
    }

    fn build_serializer(
        &self,
        ty: &TypeDesc,
        children: Vec<SerializerRef>,
    ) -> Result<SerializeFn, GraphError> {
        let [inner] = super::expect_children(ty, children)?;
        Ok(Box::new(move |bindings, value| match value {
            Value::None => Ok(WireValue::Null),
            _ => inner.serialize(bindings, value),
        }))
    }

    fn build_deserializer(
        &self,
        ty: &TypeDesc,
        children: Vec<DeserializerRef>,
    ) -> Result<DeserializeFn, GraphError> {
        let [inner] = super::expect_children(ty, children)?;
        Ok(Box::new(move |bindings, wire| match wire {
            WireValue::Null => Ok(Value::None),
            _ => inner.deserialize(bindings, wire),
        }))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::info::{ScalarKind, TypeDesc};
    use crate::value::Value;
    use crate::wire::WireValue;
    use crate::{GraphError, HandlerRegistry, ResolveContext, ValueError, compile};

    #[test]
    fn none_is_null() {
        let ty = TypeDesc::optional(TypeDesc::str());
        let table = compile(&ty, &HandlerRegistry::new(), &ResolveContext::new()).unwrap();

        assert_eq!(table.serialize(&ty, &Value::None), Ok(WireValue::Null));
        assert_eq!(table.serialize(&ty, &Value::from("a")), Ok(WireValue::from("a")));
        assert_eq!(table.deserialize(&ty, &WireValue::Null), Ok(Value::None));
        assert_eq!(
            table.deserialize(&ty, &WireValue::Bool(true)),
            Err(ValueError::mismatch("str", "bool")),
        );
    }

    #[test]
    fn inner_is_normalized() {
        let cx = ResolveContext::new().with("Name", TypeDesc::str());
        let table = compile(
            &TypeDesc::optional(TypeDesc::reference("Name")),
            &HandlerRegistry::new(),
            &cx,
        )
        .unwrap();

        assert_eq!(table.root(), Some(&TypeDesc::optional(TypeDesc::str())));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn null_is_reserved_for_none() {
        let registry = HandlerRegistry::new();
        let malformed = |ty: &TypeDesc, cx: &ResolveContext| {
            matches!(compile(ty, &registry, cx), Err(GraphError::MalformedDescriptor { .. }))
        };
        let cx = ResolveContext::new();

        assert!(malformed(&TypeDesc::optional(TypeDesc::unit()), &cx));
        assert!(malformed(&TypeDesc::optional(TypeDesc::optional(TypeDesc::int())), &cx));
        assert!(malformed(
            &TypeDesc::sequence(TypeDesc::optional(TypeDesc::unit())),
            &cx,
        ));

        // Found only once the reference is resolved.
        let cx = ResolveContext::new()
            .with("Nothing", TypeDesc::unit())
            .with("MaybeInt", TypeDesc::optional(TypeDesc::int()));
        assert!(malformed(&TypeDesc::optional(TypeDesc::reference("Nothing")), &cx));
        assert!(malformed(&TypeDesc::optional(TypeDesc::reference("MaybeInt")), &cx));
    }

    #[test]
    fn round_trips_present_values() {
        let ty = TypeDesc::optional(TypeDesc::bool());
        let table = compile(&ty, &HandlerRegistry::new(), &ResolveContext::new()).unwrap();

        for value in [Value::None, Value::Bool(false), Value::Bool(true)] {
            let wire = table.serialize(&ty, &value).unwrap();
            assert_eq!(table.deserialize(&ty, &wire), Ok(value));
        }
    }
}
