use alloc::boxed::Box;
use core::fmt;

use crate::info::TypeDesc;

// -----------------------------------------------------------------------------
// NodeId

/// The position of a node in its [`DependencyGraph`](crate::graph::DependencyGraph).
///
/// Ids are assigned in discovery order and are stable for a graph and
/// the table compiled from it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a `NodeId` from an index.
    ///
    /// # Panics
    ///
    /// Panics if `index` does not fit in `u32`.
    #[inline]
    pub const fn new(index: usize) -> Self {
        assert!(index <= u32::MAX as usize, "too many graph nodes");
        Self(index as u32)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

// -----------------------------------------------------------------------------
// GraphNode

/// A type identity and the identities it directly depends on.
///
/// Dependencies keep the order given by the handler's `children_of`,
/// duplicates included (e.g. both items of `(i64, i64)`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
    ty: TypeDesc,
    deps: Box<[TypeDesc]>,
}

impl GraphNode {
    #[inline]
    pub fn new(ty: TypeDesc, deps: impl Into<Box<[TypeDesc]>>) -> Self {
        Self {
            ty,
            deps: deps.into(),
        }
    }

    /// Returns the normalized type identity.
    #[inline]
    pub fn ty(&self) -> &TypeDesc {
        &self.ty
    }

    /// Returns the direct dependencies, normalized.
    #[inline]
    pub fn deps(&self) -> &[TypeDesc] {
        &self.deps
    }

    /// Returns `true` if the node has no dependency.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.deps.is_empty()
    }
}
