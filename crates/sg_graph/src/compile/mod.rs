//! Provide the compiled lookup table of serializers and deserializers.
//!
//! ## Menu
//!
//! - [`compile`]: Walks a root type and compiles the whole graph.
//! - [`CompiledTable`]: The lookup table, keyed by type identity.
//! - [`SerializerRef`] / [`DeserializerRef`]: Handles to the closures of
//!   another node, given to handlers while building.
//! - [`SerializeFn`] / [`DeserializeFn`]: The compiled closure types.
//! - [`Bindings`]: The sealed arena the handles point into.
//!
//! ## Binding
//!
//! Closures of a recursive type refer to each other, so they are bound in
//! two phases:
//!
//! 1. One empty slot pair is allocated per node, and every dependency is
//!    turned into a `NodeId` handle.
//! 2. Each node's handler builds its closures from the handles of its
//!    dependencies, the results fill the slots.
//!
//! Handles are resolved through the sealed arena at call time, so there is
//! no reference cycle between closures.

// -----------------------------------------------------------------------------
// Modules

mod bindings;
mod table;

// -----------------------------------------------------------------------------
// Exports

pub use bindings::{Bindings, DeserializeFn, DeserializerRef, SerializeFn, SerializerRef};
pub use table::CompiledTable;

// -----------------------------------------------------------------------------
// compile

use crate::context::ResolveContext;
use crate::error::GraphError;
use crate::graph::DependencyGraph;
use crate::info::TypeDesc;
use crate::registry::HandlerRegistry;

/// Discovers every type reachable from `root` and compiles them.
///
/// This is [`DependencyGraph::walk`] followed by
/// [`CompiledTable::from_graph`]. No partial table is ever returned.
///
/// # Examples
///
/// ```
/// use sg_graph::{HandlerRegistry, ResolveContext, compile};
/// use sg_graph::info::{FieldInfo, RecordInfo, TypeDesc};
/// use sg_graph::value::{DynamicRecord, Value};
///
/// let cx = ResolveContext::new().with_record(RecordInfo::new("Node", [
///     FieldInfo::new("value", TypeDesc::int()),
///     FieldInfo::new("children", TypeDesc::sequence(TypeDesc::reference("Node"))),
/// ]));
///
/// let table = compile(&TypeDesc::reference("Node"), &HandlerRegistry::new(), &cx).unwrap();
/// let node = table.root().cloned().unwrap();
///
/// let leaf = DynamicRecord::new("Node")
///     .with_field("value", 2_i64)
///     .with_field("children", Value::Seq(vec![]));
/// let tree = Value::Record(
///     DynamicRecord::new("Node")
///         .with_field("value", 1_i64)
///         .with_field("children", vec![leaf]),
/// );
///
/// let wire = table.serialize(&node, &tree).unwrap();
/// assert_eq!(table.deserialize(&node, &wire).unwrap(), tree);
/// ```
pub fn compile(
    root: &TypeDesc,
    registry: &HandlerRegistry,
    cx: &ResolveContext,
) -> Result<CompiledTable, GraphError> {
    let graph = DependencyGraph::walk(registry, root, cx)?;
    CompiledTable::from_graph(&graph, registry)
}
