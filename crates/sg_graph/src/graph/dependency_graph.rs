use alloc::vec::Vec;

use sg_utils::hash::HashMap;

use crate::context::ResolveContext;
use crate::error::GraphError;
use crate::graph::{GraphNode, NodeId};
use crate::info::TypeDesc;
use crate::registry::HandlerRegistry;

// -----------------------------------------------------------------------------
// DependencyGraph

/// The set of type identities reachable from one or more roots.
///
/// Each identity has exactly one [`GraphNode`], nodes are stored in
/// discovery order and indexed by [`NodeId`].
///
/// # Examples
///
/// ```
/// use sg_graph::{HandlerRegistry, ResolveContext};
/// use sg_graph::graph::DependencyGraph;
/// use sg_graph::info::TypeDesc;
///
/// let registry = HandlerRegistry::new();
/// let cx = ResolveContext::new();
///
/// let a = DependencyGraph::walk(&registry, &TypeDesc::sequence(TypeDesc::int()), &cx).unwrap();
/// let b = DependencyGraph::walk(&registry, &TypeDesc::optional(TypeDesc::int()), &cx).unwrap();
///
/// let merged = a.merge(&b);
/// assert_eq!(merged.len(), 3);
/// assert_eq!(merged.roots().len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DependencyGraph {
    nodes: Vec<GraphNode>,
    index: HashMap<TypeDesc, NodeId>,
    roots: Vec<TypeDesc>,
}

impl DependencyGraph {
    /// Creates an empty graph.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discovers every type reachable from `root`.
    ///
    /// The root is normalized first, then a breadth-first work list expands
    /// one identity at a time through [`HandlerRegistry::step`]. An identity
    /// is queued at most once, so cycles and self references terminate.
    ///
    /// The first error aborts the walk and is returned unmodified.
    pub fn walk(
        registry: &HandlerRegistry,
        root: &TypeDesc,
        cx: &ResolveContext,
    ) -> Result<Self, GraphError> {
        let root = registry.normalize(root, cx)?;

        let mut index = HashMap::default();
        let mut queue: Vec<TypeDesc> = Vec::new();
        let mut nodes: Vec<GraphNode> = Vec::new();

        index.insert(root.clone(), NodeId::new(0));
        queue.push(root.clone());

        // `queue[cursor..]` are pending, `queue[..cursor]` are visited.
        let mut cursor = 0;
        while cursor < queue.len() {
            let node = registry.step(&queue[cursor], cx)?;
            cursor += 1;

            for dep in node.deps() {
                if !index.contains_key(dep) {
                    index.insert(dep.clone(), NodeId::new(queue.len()));
                    queue.push(dep.clone());
                }
            }

            crate::cfg::debug! {
                log::trace!("discovered `{}` with {} deps", node.ty(), node.deps().len());
            }
            nodes.push(node);
        }

        log::debug!("walked `{root}`: {} reachable types", nodes.len());

        Ok(Self {
            nodes,
            index,
            roots: alloc::vec![root],
        })
    }

    /// Inserts a node if its identity is absent.
    ///
    /// Returns the id of the node now holding this identity, which is
    /// the existing one when the identity was already present.
    pub fn insert(&mut self, node: GraphNode) -> NodeId {
        if let Some(&id) = self.index.get(node.ty()) {
            return id;
        }
        let id = NodeId::new(self.nodes.len());
        self.index.insert(node.ty().clone(), id);
        self.nodes.push(node);
        id
    }

    /// Adds a root identity, ignoring duplicates.
    pub fn add_root(&mut self, root: TypeDesc) {
        if !self.roots.contains(&root) {
            self.roots.push(root);
        }
    }

    /// Moves every node and root of `other` absent from `self` into `self`.
    pub fn absorb(&mut self, other: &DependencyGraph) {
        for node in &other.nodes {
            self.insert(node.clone());
        }
        for root in &other.roots {
            self.add_root(root.clone());
        }
    }

    /// Returns the union of two graphs keyed by identity.
    ///
    /// Nodes of `self` come first. When both graphs hold the same identity,
    /// the node of `self` is kept and the other one is dropped.
    pub fn merge(&self, other: &DependencyGraph) -> DependencyGraph {
        let mut merged = self.clone();
        merged.absorb(other);

        log::debug!(
            "merged graphs of {} and {} types into {}",
            self.len(),
            other.len(),
            merged.len()
        );
        merged
    }

    /// Folds any number of graphs with [`DependencyGraph::merge`] semantics.
    pub fn merge_all<'a>(graphs: impl IntoIterator<Item = &'a DependencyGraph>) -> Self {
        let mut merged = Self::new();
        for graph in graphs {
            merged.absorb(graph);
        }
        merged
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the roots this graph was built from.
    #[inline]
    pub fn roots(&self) -> &[TypeDesc] {
        &self.roots
    }

    /// Returns all nodes in discovery order.
    #[inline]
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    #[inline]
    pub fn contains(&self, ty: &TypeDesc) -> bool {
        self.index.contains_key(ty)
    }

    /// Returns the id of a type identity.
    #[inline]
    pub fn id_of(&self, ty: &TypeDesc) -> Option<NodeId> {
        self.index.get(ty).copied()
    }

    /// Returns the node of a type identity.
    pub fn get(&self, ty: &TypeDesc) -> Option<&GraphNode> {
        self.id_of(ty).map(|id| &self.nodes[id.index()])
    }

    /// Returns the node at `id`.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id.index())
    }

    /// Iterates type identities in discovery order.
    pub fn types(&self) -> impl ExactSizeIterator<Item = &TypeDesc> {
        self.nodes.iter().map(GraphNode::ty)
    }
}

// -----------------------------------------------------------------------------
// Tests
