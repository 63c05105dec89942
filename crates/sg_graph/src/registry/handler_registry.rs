use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::compile::{DeserializeFn, DeserializerRef, SerializeFn, SerializerRef};
use crate::context::ResolveContext;
use crate::error::GraphError;
use crate::graph::GraphNode;
use crate::handlers;
use crate::info::TypeDesc;
use crate::registry::TypeHandler;

// -----------------------------------------------------------------------------
// HandlerRegistry

/// An ordered list of [`TypeHandler`]s.
///
/// Dispatch asks each handler in registration order and uses the first one
/// that matches, so a handler registered earlier overrides the built-in ones
/// for the shapes it accepts.
///
/// Cloning is cheap, handlers are shared.
///
/// # Examples
///
/// ```
/// use sg_graph::{GraphError, HandlerRegistry};
/// use sg_graph::handlers::{OptionalHandler, ScalarHandler, SequenceHandler};
/// use sg_graph::info::TypeDesc;
///
/// let registry = HandlerRegistry::empty()
///     .with(OptionalHandler)
///     .with(SequenceHandler)
///     .with(ScalarHandler);
///
/// assert_eq!(registry.names(), ["Optional", "Sequence", "Scalar"]);
/// assert_eq!(registry.handler_for(&TypeDesc::int()).unwrap().name(), "Scalar");
/// assert!(matches!(
///     registry.handler_for(&TypeDesc::bytes()),
///     Err(GraphError::NoHandler(_)),
/// ));
/// ```
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: Vec<Arc<dyn TypeHandler>>,
}

impl HandlerRegistry {
    /// Creates a registry without any handler.
    ///
    /// Every lookup fails with [`GraphError::NoHandler`].
    #[inline]
    pub const fn empty() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Creates a registry with all built-in handlers.
    ///
    /// In order: `Reference`, `Param`, `Optional`, `Sequence`, `Tuple`,
    /// `Mapping`, `Record`, `Union`, `Bytes`, `Uuid`, `DateTime`, `Scalar`.
    pub fn new() -> Self {
        Self::empty()
            .with(handlers::ReferenceHandler)
            .with(handlers::ParamHandler)
            .with(handlers::OptionalHandler)
            .with(handlers::SequenceHandler)
            .with(handlers::TupleHandler)
            .with(handlers::MappingHandler)
            .with(handlers::RecordHandler::new())
            .with(handlers::UnionHandler)
            .with(handlers::BytesHandler)
            .with(handlers::UuidHandler)
            .with(handlers::DateTimeHandler)
            .with(handlers::ScalarHandler)
    }

    /// Appends a handler, it has the lowest priority so far.
    pub fn push(&mut self, handler: impl TypeHandler) -> &mut Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    /// Builder form of [`HandlerRegistry::push`].
    #[inline]
    pub fn with(mut self, handler: impl TypeHandler) -> Self {
        self.push(handler);
        self
    }

    /// Returns the handler names in priority order.
    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|handler| handler.name()).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Returns the first handler that matches `ty`.
    pub fn handler_for(&self, ty: &TypeDesc) -> Result<&dyn TypeHandler, GraphError> {
        for handler in &self.handlers {
            if handler.matches(ty)? {
                return Ok(&**handler);
            }
        }
        Err(GraphError::NoHandler(ty.clone()))
    }

    /// Returns the canonical identity of `ty`.
    #[inline]
    pub fn normalize(&self, ty: &TypeDesc, cx: &ResolveContext) -> Result<TypeDesc, GraphError> {
        self.handler_for(ty)?.normalize(self, ty, cx)
    }

    /// Expands a normalized identity into its [`GraphNode`].
    ///
    /// Children are normalized, so the node dependencies are identities too.
    pub fn step(&self, ty: &TypeDesc, cx: &ResolveContext) -> Result<GraphNode, GraphError> {
        let children = self.handler_for(ty)?.children_of(ty)?;
        let deps = children
            .iter()
            .map(|child| self.normalize(child, cx))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(GraphNode::new(ty.clone(), deps))
    }

    /// Builds the serializer of `ty` with the matched handler.
    #[inline]
    pub fn build_serializer(
        &self,
        ty: &TypeDesc,
        children: Vec<SerializerRef>,
    ) -> Result<SerializeFn, GraphError> {
        self.handler_for(ty)?.build_serializer(ty, children)
    }

    /// Builds the deserializer of `ty` with the matched handler.
    #[inline]
    pub fn build_deserializer(
        &self,
        ty: &TypeDesc,
        children: Vec<DeserializerRef>,
    ) -> Result<DeserializeFn, GraphError> {
        self.handler_for(ty)?.build_deserializer(ty, children)
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.handlers.iter().map(|h| h.name())).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::HandlerRegistry;
    use crate::compile::{DeserializeFn, DeserializerRef, SerializeFn, SerializerRef};
    use crate::handlers::{ScalarHandler, SequenceHandler};
    use crate::info::{FieldInfo, RecordInfo, TypeDesc};
    use crate::value::Value;
    use crate::wire::WireValue;
    use crate::{GraphError, ResolveContext, TypeHandler, compile};

    // Serializes every integer as the string "int".
    struct Shadow;

    impl TypeHandler for Shadow {
        fn name(&self) -> &'static str {
            "Shadow"
        }

        fn matches(&self, ty: &TypeDesc) -> Result<bool, GraphError> {
            Ok(*ty == TypeDesc::int())
        }

        fn children_of(&self, _: &TypeDesc) -> Result<Vec<TypeDesc>, GraphError> {
            Ok(Vec::new())
        }

        fn build_serializer(
            &self,
            _: &TypeDesc,
            _: Vec<SerializerRef>,
        ) -> Result<SerializeFn, GraphError> {
            Ok(alloc::boxed::Box::new(|_, _| Ok(WireValue::from("int"))))
        }

        fn build_deserializer(
            &self,
            _: &TypeDesc,
            _: Vec<DeserializerRef>,
        ) -> Result<DeserializeFn, GraphError> {
            Ok(alloc::boxed::Box::new(|_, _| Ok(Value::Int(0))))
        }
    }

    #[test]
    fn default_order() {
        let registry = HandlerRegistry::new();
        assert_eq!(registry.names(), [
            "Reference", "Param", "Optional", "Sequence", "Tuple", "Mapping", "Record", "Union",
            "Bytes", "Uuid", "DateTime", "Scalar",
        ]);
    }

    #[test]
    fn first_match_wins() {
        let registry = HandlerRegistry::empty()
            .with(Shadow)
            .with(SequenceHandler)
            .with(ScalarHandler);

        let ty = TypeDesc::sequence(TypeDesc::int());
        let table = compile(&ty, &registry, &ResolveContext::new()).unwrap();
        let wire = table.serialize(&ty, &Value::Seq([Value::Int(5)].into())).unwrap();
        assert_eq!(wire, WireValue::Seq([WireValue::from("int")].into()));
    }

    #[test]
    fn matches_can_fail() {
        let info = RecordInfo::new("Dup", [
            FieldInfo::new("a", TypeDesc::int()),
            FieldInfo::new("a", TypeDesc::int()),
        ]);
        let registry = HandlerRegistry::new();
        let err = registry.normalize(&TypeDesc::record(info), &ResolveContext::new()).unwrap_err();
        assert!(matches!(err, GraphError::MalformedDescriptor { .. }));
    }
}
