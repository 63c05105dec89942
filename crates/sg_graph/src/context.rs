//! Provide [`ResolveContext`], the scope used to resolve references and parameters.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use sg_utils::hash::HashMap;

use crate::error::GraphError;
use crate::info::{RecordInfo, TypeDesc, UnionInfo};

// -----------------------------------------------------------------------------
// ResolveContext

/// Name scope for [`TypeDesc::Reference`] and [`TypeDesc::Param`].
///
/// References are resolved against *symbols*, parameters against *params*.
/// Records and unions registered with [`define_record`] and [`define_union`]
/// are reachable through their full type path.
///
/// The context also tracks which descriptors are being normalized, so that
/// an alias resolving to itself (directly or through other aliases) is
/// reported instead of recursing forever.
///
/// # Examples
///
/// ```
/// use sg_graph::ResolveContext;
/// use sg_graph::info::TypeDesc;
///
/// let cx = ResolveContext::new()
///     .with("Id", TypeDesc::uint())
///     .with_param("T", TypeDesc::str());
///
/// assert_eq!(cx.resolve("Id").unwrap(), &TypeDesc::uint());
/// assert_eq!(cx.param("T").unwrap(), &TypeDesc::str());
/// assert!(cx.resolve("Missing").is_err());
/// ```
///
/// [`define_record`]: ResolveContext::define_record
/// [`define_union`]: ResolveContext::define_union
#[derive(Debug, Default)]
pub struct ResolveContext {
    symbols: HashMap<String, TypeDesc>,
    params: HashMap<String, TypeDesc>,
    active: RefCell<Vec<TypeDesc>>,
}

impl Clone for ResolveContext {
    fn clone(&self) -> Self {
        Self {
            symbols: self.symbols.clone(),
            params: self.params.clone(),
            active: RefCell::new(Vec::new()),
        }
    }
}

impl ResolveContext {
    /// Creates an empty context.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a symbol, replacing any previous definition.
    pub fn define(&mut self, name: impl Into<String>, ty: TypeDesc) -> &mut Self {
        self.symbols.insert(name.into(), ty);
        self
    }

    /// Builder form of [`ResolveContext::define`].
    #[inline]
    pub fn with(mut self, name: impl Into<String>, ty: TypeDesc) -> Self {
        self.define(name, ty);
        self
    }

    /// Defines a record under its type path.
    pub fn define_record(&mut self, info: RecordInfo) -> &mut Self {
        let name = info.path().to_string();
        self.define(name, TypeDesc::record(info))
    }

    /// Builder form of [`ResolveContext::define_record`].
    #[inline]
    pub fn with_record(mut self, info: RecordInfo) -> Self {
        self.define_record(info);
        self
    }

    /// Defines a union under its type path.
    pub fn define_union(&mut self, info: UnionInfo) -> &mut Self {
        let name = info.path().to_string();
        self.define(name, TypeDesc::union(info))
    }

    /// Builder form of [`ResolveContext::define_union`].
    #[inline]
    pub fn with_union(mut self, info: UnionInfo) -> Self {
        self.define_union(info);
        self
    }

    /// Binds a generic parameter.
    pub fn bind_param(&mut self, name: impl Into<String>, ty: TypeDesc) -> &mut Self {
        self.params.insert(name.into(), ty);
        self
    }

    /// Builder form of [`ResolveContext::bind_param`].
    #[inline]
    pub fn with_param(mut self, name: impl Into<String>, ty: TypeDesc) -> Self {
        self.bind_param(name, ty);
        self
    }

    /// Looks up a symbol.
    pub fn resolve(&self, name: &str) -> Result<&TypeDesc, GraphError> {
        self.symbols
            .get(name)
            .ok_or_else(|| GraphError::UnresolvedReference(name.into()))
    }

    /// Looks up a generic parameter.
    pub fn param(&self, name: &str) -> Result<&TypeDesc, GraphError> {
        self.params
            .get(name)
            .ok_or_else(|| GraphError::UnboundParameter(name.into()))
    }

    /// Marks `ty` as being normalized until the returned guard is dropped.
    ///
    /// Fails with [`GraphError::ReferenceCycle`] if `ty` is already active,
    /// which means it can only be expanded into itself.
    pub fn enter(&self, ty: &TypeDesc) -> Result<ResolveGuard<'_>, GraphError> {
        let mut active = self.active.borrow_mut();
        if active.contains(ty) {
            return Err(GraphError::ReferenceCycle(ty.to_string()));
        }
        active.push(ty.clone());
        Ok(ResolveGuard { cx: self })
    }
}

// -----------------------------------------------------------------------------
// ResolveGuard

/// Returned by [`ResolveContext::enter`], pops the active descriptor on drop.
#[must_use]
pub struct ResolveGuard<'a> {
    cx: &'a ResolveContext,
}

impl Drop for ResolveGuard<'_> {
    #[inline]
    fn drop(&mut self) {
        self.cx.active.borrow_mut().pop();
    }
}

// -----------------------------------------------------------------------------
// Tests
