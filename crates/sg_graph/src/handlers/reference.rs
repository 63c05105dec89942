use alloc::vec::Vec;

use crate::compile::{DeserializeFn, DeserializerRef, SerializeFn, SerializerRef};
use crate::context::ResolveContext;
use crate::error::GraphError;
use crate::info::TypeDesc;
use crate::registry::{HandlerRegistry, TypeHandler};

// Both handlers replace their descriptor during normalization, they are
// never asked for children or closures of a normalized identity.
fn unresolved(ty: &TypeDesc) -> GraphError {
    GraphError::malformed(ty, "used before normalization")
}

// -----------------------------------------------------------------------------
// ReferenceHandler

/// Handles [`TypeDesc::Reference`] by looking the name up in the
/// [`ResolveContext`] and normalizing the target.
///
/// An alias chain that comes back to itself without crossing a nominal
/// type fails with [`GraphError::ReferenceCycle`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceHandler;

impl TypeHandler for ReferenceHandler {
    fn name(&self) -> &'static str {
        "Reference"
    }

    fn matches(&self, ty: &TypeDesc) -> Result<bool, GraphError> {
        Ok(matches!(ty, TypeDesc::Reference(_)))
    }

    fn normalize(
        &self,
        registry: &HandlerRegistry,
        ty: &TypeDesc,
        cx: &ResolveContext,
    ) -> Result<TypeDesc, GraphError> {
        let TypeDesc::Reference(name) = ty else {
            return Err(super::unexpected("reference", ty));
        };
        let _guard = cx.enter(ty)?;
        registry.normalize(cx.resolve(name)?, cx)
    }

    fn children_of(&self, ty: &TypeDesc) -> Result<Vec<TypeDesc>, GraphError> {
        Err(unresolved(ty))
    }

    fn build_serializer(
        &self,
        ty: &TypeDesc,
        _: Vec<SerializerRef>,
    ) -> Result<SerializeFn, GraphError> {
        Err(unresolved(ty))
    }

    fn build_deserializer(
        &self,
        ty: &TypeDesc,
        _: Vec<DeserializerRef>,
    ) -> Result<DeserializeFn, GraphError> {
        Err(unresolved(ty))
    }
}

// -----------------------------------------------------------------------------
// ParamHandler

/// Handles [`TypeDesc::Param`] by looking the binding up in the
/// [`ResolveContext`].
///
/// Parameters of generic records are substituted by the record handler
/// before they reach this handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParamHandler;

impl TypeHandler for ParamHandler {
    fn name(&self) -> &'static str {
        "Param"
    }

    fn matches(&self, ty: &TypeDesc) -> Result<bool, GraphError> {
        Ok(matches!(ty, TypeDesc::Param(_)))
    }

    fn normalize(
        &self,
        registry: &HandlerRegistry,
        ty: &TypeDesc,
        cx: &ResolveContext,
    ) -> Result<TypeDesc, GraphError> {
        let TypeDesc::Param(name) = ty else {
            return Err(super::unexpected("parameter", ty));
        };
        let _guard = cx.enter(ty)?;
        registry.normalize(cx.param(name)?, cx)
    }

    fn children_of(&self, ty: &TypeDesc) -> Result<Vec<TypeDesc>, GraphError> {
        Err(unresolved(ty))
    }

    fn build_serializer(
        &self,
        ty: &TypeDesc,
        _: Vec<SerializerRef>,
    ) -> Result<SerializeFn, GraphError> {
        Err(unresolved(ty))
    }

    fn build_deserializer(
        &self,
        ty: &TypeDesc,
        _: Vec<DeserializerRef>,
    ) -> Result<DeserializeFn, GraphError> {
        Err(unresolved(ty))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::info::TypeDesc;
    use crate::{GraphError, HandlerRegistry, ResolveContext};

    #[test]
    fn alias_chain() {
        let cx = ResolveContext::new()
            .with("A", TypeDesc::reference("B"))
            .with("B", TypeDesc::sequence(TypeDesc::param("T")))
            .with_param("T", TypeDesc::int());

        let ty = HandlerRegistry::new().normalize(&TypeDesc::reference("A"), &cx).unwrap();
        assert_eq!(ty, TypeDesc::sequence(TypeDesc::int()));
    }

    #[test]
    fn unresolved() {
        let registry = HandlerRegistry::new();
        let cx = ResolveContext::new();

        assert_eq!(
            registry.normalize(&TypeDesc::reference("Nope"), &cx),
            Err(GraphError::UnresolvedReference("Nope".into())),
        );
        assert_eq!(
            registry.normalize(&TypeDesc::optional(TypeDesc::param("T")), &cx),
            Err(GraphError::UnboundParameter("T".into())),
        );
    }

    #[test]
    fn structural_cycles_are_reported() {
        let registry = HandlerRegistry::new();

        let cx = ResolveContext::new().with("List", TypeDesc::optional(TypeDesc::reference("List")));
        assert_eq!(
            registry.normalize(&TypeDesc::reference("List"), &cx),
            Err(GraphError::ReferenceCycle("@List".into())),
        );

        let cx = ResolveContext::new()
            .with("A", TypeDesc::reference("B"))
            .with("B", TypeDesc::reference("A"));
        assert_eq!(
            registry.normalize(&TypeDesc::reference("A"), &cx),
            Err(GraphError::ReferenceCycle("@A".into())),
        );
    }
}
