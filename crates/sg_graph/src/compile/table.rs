use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;

use serde_core::Deserializer;
use sg_utils::hash::HashMap;

use crate::compile::bindings::Slots;
use crate::compile::{Bindings, DeserializeFn, DeserializerRef, SerializeFn, SerializerRef};
use crate::error::{GraphError, ValueError};
use crate::graph::{DependencyGraph, GraphNode, NodeId};
use crate::info::TypeDesc;
use crate::registry::HandlerRegistry;
use crate::value::Value;
use crate::wire::WireValue;

// -----------------------------------------------------------------------------
// CompiledTable

/// A flat table of compiled serializers and deserializers.
///
/// Holds exactly one closure pair per type identity of the compiled graph,
/// and can be used for any of them at any depth without walking types
/// again. The table is immutable, `Send` and `Sync`.
///
/// # Examples
///
/// ```
/// use sg_graph::{HandlerRegistry, ResolveContext, compile};
/// use sg_graph::info::TypeDesc;
/// use sg_graph::value::Value;
/// use sg_graph::wire::WireValue;
///
/// let root = TypeDesc::sequence(TypeDesc::optional(TypeDesc::int()));
/// let table = compile(&root, &HandlerRegistry::new(), &ResolveContext::new()).unwrap();
///
/// assert_eq!(table.len(), 3);
///
/// // Inner types are usable on their own.
/// let inner = TypeDesc::optional(TypeDesc::int());
/// assert_eq!(table.serialize(&inner, &Value::None).unwrap(), WireValue::Null);
/// ```
pub struct CompiledTable {
    index: HashMap<TypeDesc, NodeId>,
    types: Box<[TypeDesc]>,
    roots: Box<[TypeDesc]>,
    bindings: Bindings,
}

impl CompiledTable {
    /// Compiles every node of `graph` with the matched handlers.
    ///
    /// Fails with [`GraphError::IncompleteBinding`] when a node depends on an
    /// identity absent from the graph, or when a slot is left empty.
    pub fn from_graph(graph: &DependencyGraph, registry: &HandlerRegistry) -> Result<Self, GraphError> {
        let types: Box<[TypeDesc]> = graph.types().cloned().collect();

        // Phase 1: one empty slot pair per node.
        let mut slots = Slots::new(types.len());

        // Phase 2: build every node from the handles of its dependencies.
        let build = |node: &GraphNode| -> Result<(SerializeFn, DeserializeFn), GraphError> {
            let ids = node
                .deps()
                .iter()
                .map(|dep| {
                    graph
                        .id_of(dep)
                        .ok_or_else(|| GraphError::IncompleteBinding(dep.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;

            let serializer = registry.build_serializer(
                node.ty(),
                ids.iter().copied().map(SerializerRef::new).collect(),
            )?;
            let deserializer = registry.build_deserializer(
                node.ty(),
                ids.iter().copied().map(DeserializerRef::new).collect(),
            )?;

            crate::cfg::debug! {
                log::trace!("bound `{}` to {} dependencies", node.ty(), ids.len());
            }
            Ok((serializer, deserializer))
        };

        let built = crate::cfg::parallel! {
            if {
                {
                    use rayon::prelude::*;
                    graph.nodes().par_iter().map(build).collect::<Result<Vec<_>, _>>()?
                }
            } else {
                graph.nodes().iter().map(build).collect::<Result<Vec<_>, _>>()?
            }
        };

        for (index, (serializer, deserializer)) in built.into_iter().enumerate() {
            slots.fill(NodeId::new(index), serializer, deserializer);
        }

        let bindings = slots.seal(&types)?;
        let index = types
            .iter()
            .enumerate()
            .map(|(i, ty)| (ty.clone(), NodeId::new(i)))
            .collect::<HashMap<_, _>>();

        log::debug!(
            "compiled {} types from {} roots",
            types.len(),
            graph.roots().len()
        );

        Ok(Self {
            index,
            types,
            roots: graph.roots().into(),
            bindings,
        })
    }

    /// Returns the first root of the table.
    ///
    /// For a table built by [`compile`](crate::compile), this is the
    /// normalized form of the given root. `None` if the graph had no root,
    /// as for a graph filled through [`DependencyGraph::insert`] only.
    #[inline]
    pub fn root(&self) -> Option<&TypeDesc> {
        self.roots.first()
    }

    /// Returns all roots of the compiled graph.
    #[inline]
    pub fn roots(&self) -> &[TypeDesc] {
        &self.roots
    }

    /// Returns all compiled type identities, in discovery order.
    #[inline]
    pub fn types(&self) -> &[TypeDesc] {
        &self.types
    }

    #[inline]
    pub fn contains(&self, ty: &TypeDesc) -> bool {
        self.index.contains_key(ty)
    }

    #[inline]
    pub fn id_of(&self, ty: &TypeDesc) -> Option<NodeId> {
        self.index.get(ty).copied()
    }

    /// Returns the number of compiled types.
    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn lookup(&self, ty: &TypeDesc) -> Result<NodeId, ValueError> {
        self.id_of(ty).ok_or_else(|| ValueError::UnknownType(ty.clone()))
    }

    /// Serializes `value` as type `ty`.
    ///
    /// `ty` must be a normalized identity, as listed by [`types`](Self::types).
    pub fn serialize(&self, ty: &TypeDesc, value: &Value) -> Result<WireValue, ValueError> {
        let id = self.lookup(ty)?;
        SerializerRef::new(id).serialize(&self.bindings, value)
    }

    /// Deserializes `wire` as type `ty`.
    ///
    /// `ty` must be a normalized identity, as listed by [`types`](Self::types).
    pub fn deserialize(&self, ty: &TypeDesc, wire: &WireValue) -> Result<Value, ValueError> {
        let id = self.lookup(ty)?;
        DeserializerRef::new(id).deserialize(&self.bindings, wire)
    }

    /// Reads a wire value from any serde format, then deserializes it as `ty`.
    ///
    /// Format errors are reported as [`ValueError::InvalidData`].
    ///
    /// The wire has no bytes type: raw bytes handed out by a binary format
    /// are read as their base64 string, the form [`TypeDesc::Bytes`] is
    /// written in. A `str` target therefore receives the base64 text of
    /// such input, not an error.
    pub fn deserialize_from<'de, D: Deserializer<'de>>(
        &self,
        ty: &TypeDesc,
        deserializer: D,
    ) -> Result<Value, ValueError> {
        let id = self.lookup(ty)?;
        let wire = <WireValue as serde_core::Deserialize>::deserialize(deserializer)
            .map_err(|e| ValueError::InvalidData(e.to_string()))?;
        DeserializerRef::new(id).deserialize(&self.bindings, &wire)
    }
}

impl core::fmt::Debug for CompiledTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CompiledTable")
            .field("types", &self.types)
            .field("roots", &self.roots)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec;

    use serde_json::json;

    use super::CompiledTable;
    use crate::graph::{DependencyGraph, GraphNode};
    use crate::handlers::{
        OptionalHandler, RecordHandler, ReferenceHandler, ScalarHandler, SequenceHandler,
    };
    use crate::info::{FieldInfo, RecordInfo, TypeDesc};
    use crate::value::{DynamicRecord, Value};
    use crate::wire::WireValue;
    use crate::{GraphError, HandlerRegistry, ResolveContext, ValueError, compile};

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn table_is_send_sync() {
        assert_send_sync::<CompiledTable>();
        assert_send_sync::<Arc<CompiledTable>>();
    }

    #[test]
    fn sequence_of_optional() {
        let registry = HandlerRegistry::empty()
            .with(OptionalHandler)
            .with(SequenceHandler)
            .with(ScalarHandler);
        let root = TypeDesc::sequence(TypeDesc::optional(TypeDesc::int()));

        let graph = DependencyGraph::walk(&registry, &root, &ResolveContext::new()).unwrap();
        assert_eq!(graph.len(), 3);

        let table = CompiledTable::from_graph(&graph, &registry).unwrap();
        let value = Value::Seq(vec![Value::Int(1), Value::None, Value::Int(3)]);
        let wire = table.serialize(&root, &value).unwrap();

        assert_eq!(
            wire,
            WireValue::Seq(vec![WireValue::Int(1), WireValue::Null, WireValue::Int(3)]),
        );
        assert_eq!(serde_json::to_value(&wire).unwrap(), json!([1, null, 3]));
        assert_eq!(table.deserialize(&root, &wire), Ok(value.clone()));

        let from_json = table.deserialize_from(&root, json!([1, null, 3])).unwrap();
        assert_eq!(from_json, value);
    }

    #[test]
    fn self_referential_record() {
        let cx = ResolveContext::new().with_record(RecordInfo::new("Node", [
            FieldInfo::new("value", TypeDesc::int()),
            FieldInfo::new("children", TypeDesc::sequence(TypeDesc::reference("Node"))),
        ]));
        let registry = HandlerRegistry::empty()
            .with(ReferenceHandler)
            .with(RecordHandler::new())
            .with(SequenceHandler)
            .with(ScalarHandler);

        let table = compile(&TypeDesc::reference("Node"), &registry, &cx).unwrap();
        // Node, i64, Sequence<Node>.
        assert_eq!(table.len(), 3);

        let node = |value: i64, children: vec::Vec<Value>| {
            Value::Record(
                DynamicRecord::new("Node")
                    .with_field("value", value)
                    .with_field("children", Value::Seq(children)),
            )
        };
        let tree = node(1, vec![node(2, vec![]), node(3, vec![node(4, vec![])])]);

        let ty = table.root().cloned().unwrap();
        let wire = table.serialize(&ty, &tree).unwrap();
        assert_eq!(
            serde_json::to_value(&wire).unwrap(),
            json!({
                "value": 1,
                "children": [
                    { "value": 2, "children": [] },
                    { "value": 3, "children": [{ "value": 4, "children": [] }] }
                ]
            }),
        );
        assert_eq!(table.deserialize(&ty, &wire), Ok(tree));
    }

    #[test]
    fn unknown_type() {
        let table = compile(&TypeDesc::int(), &HandlerRegistry::new(), &ResolveContext::new())
            .unwrap();
        assert_eq!(
            table.serialize(&TypeDesc::str(), &Value::from("x")),
            Err(ValueError::UnknownType(TypeDesc::str())),
        );
    }

    #[test]
    fn dependency_outside_graph() {
        let registry = HandlerRegistry::new();
        let mut graph = DependencyGraph::new();
        graph.insert(GraphNode::new(TypeDesc::sequence(TypeDesc::int()), [TypeDesc::int()]));

        assert_eq!(
            CompiledTable::from_graph(&graph, &registry).unwrap_err(),
            GraphError::IncompleteBinding(TypeDesc::int()),
        );
    }

    #[test]
    fn graph_without_root() {
        let registry = HandlerRegistry::new();
        let mut graph = DependencyGraph::new();
        graph.insert(GraphNode::new(TypeDesc::int(), vec::Vec::<TypeDesc>::new()));

        let table = CompiledTable::from_graph(&graph, &registry).unwrap();
        assert_eq!(table.root(), None);
        assert!(table.roots().is_empty());
        assert_eq!(table.serialize(&TypeDesc::int(), &Value::Int(4)), Ok(WireValue::Int(4)));

        let empty = CompiledTable::from_graph(&DependencyGraph::new(), &registry).unwrap();
        assert_eq!(empty.root(), None);
        assert!(empty.is_empty());
    }

    #[test]
    fn merged_graphs() {
        let registry = HandlerRegistry::new();
        let cx = ResolveContext::new();
        let a = DependencyGraph::walk(&registry, &TypeDesc::sequence(TypeDesc::str()), &cx).unwrap();
        let b = DependencyGraph::walk(&registry, &TypeDesc::bytes(), &cx).unwrap();

        let table = CompiledTable::from_graph(&a.merge(&b), &registry).unwrap();
        assert_eq!(table.roots(), [TypeDesc::sequence(TypeDesc::str()), TypeDesc::bytes()]);
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.serialize(&TypeDesc::bytes(), &Value::Bytes(vec![255])),
            Ok(WireValue::from("/w==")),
        );
    }

    #[test]
    fn deserialize_from_reports_format_errors() {
        let table = compile(&TypeDesc::bool(), &HandlerRegistry::new(), &ResolveContext::new())
            .unwrap();
        let mut de = serde_json::Deserializer::from_str("[1,");
        assert!(matches!(
            table.deserialize_from(&TypeDesc::bool(), &mut de),
            Err(ValueError::InvalidData(_)),
        ));
    }

    #[test]
    fn deserialize_from_raw_bytes() {
        use serde_core::de::value::{BytesDeserializer, Error};

        let registry = HandlerRegistry::new();
        let cx = ResolveContext::new();
        let raw: &[u8] = &[0, 1, 2, 250];

        let table = compile(&TypeDesc::bytes(), &registry, &cx).unwrap();
        assert_eq!(
            table.deserialize_from(&TypeDesc::bytes(), BytesDeserializer::<Error>::new(raw)),
            Ok(Value::Bytes(raw.into())),
        );

        let table = compile(&TypeDesc::str(), &registry, &cx).unwrap();
        assert_eq!(
            table.deserialize_from(&TypeDesc::str(), BytesDeserializer::<Error>::new(raw)),
            Ok(Value::from("AAEC+g==")),
        );
    }
}
