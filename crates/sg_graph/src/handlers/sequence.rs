use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::compile::{DeserializeFn, DeserializerRef, SerializeFn, SerializerRef};
use crate::context::ResolveContext;
use crate::error::{GraphError, ValueError};
use crate::info::TypeDesc;
use crate::registry::{HandlerRegistry, TypeHandler};
use crate::value::Value;
use crate::wire::WireValue;

/// Handles [`TypeDesc::Sequence`], [`Value::Seq`] on both sides.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceHandler;

impl TypeHandler for SequenceHandler {
    fn name(&self) -> &'static str {
        "Sequence"
    }

    fn matches(&self, ty: &TypeDesc) -> Result<bool, GraphError> {
        Ok(matches!(ty, TypeDesc::Sequence(_)))
    }

    fn normalize(
        &self,
        registry: &HandlerRegistry,
        ty: &TypeDesc,
        cx: &ResolveContext,
    ) -> Result<TypeDesc, GraphError> {
        match ty {
            TypeDesc::Sequence(item) => Ok(TypeDesc::sequence(registry.normalize(item, cx)?)),
            _ => Err(super::unexpected("sequence", ty)),
        }
    }

    fn children_of(&self, ty: &TypeDesc) -> Result<Vec<TypeDesc>, GraphError> {
        match ty {
            TypeDesc::Sequence(item) => Ok(alloc::vec![(**item).clone()]),
            _ => Err(super::unexpected("sequence", ty)),
        }
    }

    fn build_serializer(
        &self,
        ty: &TypeDesc,
        children: Vec<SerializerRef>,
    ) -> Result<SerializeFn, GraphError> {
        let [item] = super::expect_children(ty, children)?;
        Ok(Box::new(move |bindings, value| match value {
            Value::Seq(items) => items
                .iter()
                .map(|v| item.serialize(bindings, v))
                .collect::<Result<Vec<_>, _>>()
                .map(WireValue::Seq),
            _ => Err(ValueError::mismatch("sequence", value.kind_name())),
        }))
    }

    fn build_deserializer(
        &self,
        ty: &TypeDesc,
        children: Vec<DeserializerRef>,
    ) -> Result<DeserializeFn, GraphError> {
        let [item] = super::expect_children(ty, children)?;
        Ok(Box::new(move |bindings, wire| match wire {
            WireValue::Seq(items) => items
                .iter()
                .map(|w| item.deserialize(bindings, w))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Seq),
            _ => Err(ValueError::mismatch("sequence", wire.kind_name())),
        }))
    }
}
