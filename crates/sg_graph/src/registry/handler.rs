use alloc::vec::Vec;

use crate::compile::{DeserializeFn, DeserializerRef, SerializeFn, SerializerRef};
use crate::context::ResolveContext;
use crate::error::GraphError;
use crate::info::TypeDesc;
use crate::registry::HandlerRegistry;

/// A strategy for one shape of [`TypeDesc`].
///
/// Handlers are shared read-only by the registry and keep no per-call state.
/// Every method is handed the descriptor again, and only ever descriptors for
/// which [`matches`](TypeHandler::matches) returned `true`.
///
/// # Contract
///
/// - `children_of` returns the direct dependencies in a fixed order,
///   and the builders receive one reference per child in that same order.
/// - `normalize` must return an identity: equal types found along different
///   paths normalize to equal descriptors. Container handlers normalize their
///   children through the registry.
/// - Builders may only capture handles, the referenced closures are reached
///   through the sealed arena at call time.
///
/// # Examples
///
/// A handler for an opaque timestamp, carried as an integer:
///
/// ```
/// use sg_graph::{GraphError, HandlerRegistry, ResolveContext, TypeHandler, ValueError, compile};
/// use sg_graph::compile::{DeserializeFn, DeserializerRef, SerializeFn, SerializerRef};
/// use sg_graph::info::TypeDesc;
/// use sg_graph::value::Value;
/// use sg_graph::wire::WireValue;
///
/// struct Timestamp;
///
/// impl TypeHandler for Timestamp {
///     fn name(&self) -> &'static str {
///         "Timestamp"
///     }
///
///     fn matches(&self, ty: &TypeDesc) -> Result<bool, GraphError> {
///         Ok(matches!(ty, TypeDesc::Opaque(name) if name == "Timestamp"))
///     }
///
///     fn children_of(&self, _: &TypeDesc) -> Result<Vec<TypeDesc>, GraphError> {
///         Ok(Vec::new())
///     }
///
///     fn build_serializer(&self, _: &TypeDesc, _: Vec<SerializerRef>) -> Result<SerializeFn, GraphError> {
///         Ok(Box::new(|_, value| match value {
///             Value::Int(secs) => Ok(WireValue::Int(*secs)),
///             other => Err(ValueError::Mismatch { expected: "timestamp".into(), found: other.kind_name().into() }),
///         }))
///     }
///
///     fn build_deserializer(&self, _: &TypeDesc, _: Vec<DeserializerRef>) -> Result<DeserializeFn, GraphError> {
///         Ok(Box::new(|_, wire| match wire {
///             WireValue::Int(secs) => Ok(Value::Int(*secs)),
///             other => Err(ValueError::Mismatch { expected: "timestamp".into(), found: other.kind_name().into() }),
///         }))
///     }
/// }
///
/// let registry = HandlerRegistry::new().with(Timestamp);
/// let ty = TypeDesc::optional(TypeDesc::opaque("Timestamp"));
/// let table = compile(&ty, &registry, &ResolveContext::new()).unwrap();
///
/// assert_eq!(table.serialize(&ty, &Value::Int(42)), Ok(WireValue::Int(42)));
/// assert_eq!(table.serialize(&ty, &Value::None), Ok(WireValue::Null));
/// ```
pub trait TypeHandler: Send + Sync + 'static {
    /// A diagnostic name.
    fn name(&self) -> &'static str;

    /// Returns `true` if this handler is responsible for `ty`.
    ///
    /// May only fail with [`GraphError::MalformedDescriptor`], when `ty` has
    /// the right shape but cannot be handled as described.
    fn matches(&self, ty: &TypeDesc) -> Result<bool, GraphError>;

    /// Returns the canonical identity of `ty`.
    ///
    /// The default keeps `ty` unchanged, which is right for leaves
    /// and nominal types without arguments.
    fn normalize(
        &self,
        registry: &HandlerRegistry,
        ty: &TypeDesc,
        cx: &ResolveContext,
    ) -> Result<TypeDesc, GraphError> {
        let _ = (registry, cx);
        Ok(ty.clone())
    }

    /// Returns the direct dependencies of `ty`, before normalization.
    fn children_of(&self, ty: &TypeDesc) -> Result<Vec<TypeDesc>, GraphError>;

    /// Builds the serializer of `ty`.
    fn build_serializer(
        &self,
        ty: &TypeDesc,
        children: Vec<SerializerRef>,
    ) -> Result<SerializeFn, GraphError>;

    /// Builds the deserializer of `ty`.
    fn build_deserializer(
        &self,
        ty: &TypeDesc,
        children: Vec<DeserializerRef>,
    ) -> Result<DeserializeFn, GraphError>;
}
