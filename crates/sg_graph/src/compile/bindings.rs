use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::error::{GraphError, ValueError};
use crate::graph::NodeId;
use crate::info::TypeDesc;
use crate::value::Value;
use crate::wire::WireValue;

// -----------------------------------------------------------------------------
// Closure types

/// A compiled serializer.
///
/// The first argument is the sealed arena, used to reach child serializers
/// through [`SerializerRef`].
pub type SerializeFn =
    Box<dyn Fn(&Bindings, &Value) -> Result<WireValue, ValueError> + Send + Sync>;

/// A compiled deserializer, see [`SerializeFn`].
pub type DeserializeFn =
    Box<dyn Fn(&Bindings, &WireValue) -> Result<Value, ValueError> + Send + Sync>;

// -----------------------------------------------------------------------------
// References

/// A handle to the serializer of another node.
///
/// Handles are created before any closure exists, so a closure can capture
/// the handle of a node whose closure is built later, or of its own node.
/// The call is forwarded to the sealed arena at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SerializerRef(NodeId);

impl SerializerRef {
    #[inline]
    pub(crate) const fn new(id: NodeId) -> Self {
        Self(id)
    }

    /// Returns the node this handle points to.
    #[inline]
    pub const fn id(self) -> NodeId {
        self.0
    }

    /// Serializes `value` with the referenced serializer.
    #[inline]
    pub fn serialize(self, bindings: &Bindings, value: &Value) -> Result<WireValue, ValueError> {
        (bindings.serializers[self.0.index()])(bindings, value)
    }
}

/// A handle to the deserializer of another node, see [`SerializerRef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeserializerRef(NodeId);

impl DeserializerRef {
    #[inline]
    pub(crate) const fn new(id: NodeId) -> Self {
        Self(id)
    }

    /// Returns the node this handle points to.
    #[inline]
    pub const fn id(self) -> NodeId {
        self.0
    }

    /// Deserializes `wire` with the referenced deserializer.
    #[inline]
    pub fn deserialize(self, bindings: &Bindings, wire: &WireValue) -> Result<Value, ValueError> {
        (bindings.deserializers[self.0.index()])(bindings, wire)
    }
}

// -----------------------------------------------------------------------------
// Bindings

/// The sealed arena of compiled closures, one pair per node.
///
/// Every handle given to a handler was created from a node of the same
/// graph, so indexing never goes out of bounds.
pub struct Bindings {
    serializers: Box<[SerializeFn]>,
    deserializers: Box<[DeserializeFn]>,
}

impl Bindings {
    #[inline]
    pub fn len(&self) -> usize {
        self.serializers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.serializers.is_empty()
    }
}

impl fmt::Debug for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bindings")
            .field("len", &self.serializers.len())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Slots

/// The unsealed arena, every slot starts empty.
pub(crate) struct Slots {
    serializers: Vec<Option<SerializeFn>>,
    deserializers: Vec<Option<DeserializeFn>>,
}

impl Slots {
    pub fn new(len: usize) -> Self {
        let mut serializers = Vec::with_capacity(len);
        let mut deserializers = Vec::with_capacity(len);
        serializers.resize_with(len, || None);
        deserializers.resize_with(len, || None);
        Self {
            serializers,
            deserializers,
        }
    }

    #[inline]
    pub fn fill(&mut self, id: NodeId, serializer: SerializeFn, deserializer: DeserializeFn) {
        self.serializers[id.index()] = Some(serializer);
        self.deserializers[id.index()] = Some(deserializer);
    }

    /// Seals the arena, `types` gives the identity of each slot for errors.
    pub fn seal(self, types: &[TypeDesc]) -> Result<Bindings, GraphError> {
        let incomplete = |index: usize| GraphError::IncompleteBinding(types[index].clone());

        let serializers = self
            .serializers
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.ok_or_else(|| incomplete(index)))
            .collect::<Result<Box<[_]>, _>>()?;
        let deserializers = self
            .deserializers
            .into_iter()
            .enumerate()
            .map(|(index, slot)| slot.ok_or_else(|| incomplete(index)))
            .collect::<Result<Box<[_]>, _>>()?;

        Ok(Bindings {
            serializers,
            deserializers,
        })
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::vec;

    use super::{DeserializerRef, SerializerRef, Slots};
    use crate::GraphError;
    use crate::graph::NodeId;
    use crate::info::TypeDesc;
    use crate::value::Value;
    use crate::wire::WireValue;

    #[test]
    fn empty_slot_is_incomplete() {
        let types = vec![TypeDesc::int(), TypeDesc::str()];
        let mut slots = Slots::new(2);
        slots.fill(
            NodeId::new(0),
            Box::new(|_, _| Ok(WireValue::Null)),
            Box::new(|_, _| Ok(Value::Unit)),
        );

        let err = slots.seal(&types).unwrap_err();
        assert_eq!(err, GraphError::IncompleteBinding(TypeDesc::str()));
    }

    #[test]
    fn refs_forward_to_sealed_slots() {
        let types = vec![TypeDesc::int(), TypeDesc::optional(TypeDesc::int())];
        let inner = SerializerRef::new(NodeId::new(0));
        let inner_de = DeserializerRef::new(NodeId::new(0));

        // Slot 1 captures the handle of slot 0 before slot 0 is filled.
        let mut slots = Slots::new(2);
        slots.fill(
            NodeId::new(1),
            Box::new(move |b, v| inner.serialize(b, v)),
            Box::new(move |b, w| inner_de.deserialize(b, w)),
        );
        slots.fill(
            NodeId::new(0),
            Box::new(|_, _| Ok(WireValue::Int(7))),
            Box::new(|_, _| Ok(Value::Int(7))),
        );

        let bindings = slots.seal(&types).unwrap();
        let outer = SerializerRef::new(NodeId::new(1));
        assert_eq!(outer.serialize(&bindings, &Value::None), Ok(WireValue::Int(7)));
        let outer = DeserializerRef::new(NodeId::new(1));
        assert_eq!(outer.deserialize(&bindings, &WireValue::Null), Ok(Value::Int(7)));
    }
}
