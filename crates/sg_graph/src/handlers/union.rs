use alloc::boxed::Box;
use alloc::format;
use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::compile::{DeserializeFn, DeserializerRef, SerializeFn, SerializerRef};
use crate::error::{GraphError, ValueError};
use crate::info::{TypeDesc, UnionInfo};
use crate::registry::TypeHandler;
use crate::value::{DynamicVariant, Value};
use crate::wire::{WireMap, WireValue};

/// Handles [`TypeDesc::Union`].
///
/// The selected variant is written as a single entry map,
/// `{"Variant": payload}`, the payload uses the variant type.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnionHandler;

fn union_of(ty: &TypeDesc) -> Result<&Arc<UnionInfo>, GraphError> {
    match ty {
        TypeDesc::Union(info) => Ok(info),
        _ => Err(super::unexpected("union", ty)),
    }
}

fn unknown_variant(info: &UnionInfo, variant: &str) -> ValueError {
    ValueError::UnknownVariant {
        owner: info.path().to_string(),
        variant: variant.to_string(),
    }
}

impl TypeHandler for UnionHandler {
    fn name(&self) -> &'static str {
        "Union"
    }

    fn matches(&self, ty: &TypeDesc) -> Result<bool, GraphError> {
        let TypeDesc::Union(info) = ty else {
            return Ok(false);
        };
        if info.variant_len() == 0 {
            return Err(GraphError::malformed(ty, "union without variant"));
        }
        if let Some(variant) = info.duplicate_variant() {
            return Err(GraphError::malformed(ty, format!("duplicate variant `{variant}`")));
        }
        Ok(true)
    }

    fn children_of(&self, ty: &TypeDesc) -> Result<Vec<TypeDesc>, GraphError> {
        let info = union_of(ty)?;
        Ok(info.variants().iter().map(|v| v.ty().clone()).collect())
    }

    fn build_serializer(
        &self,
        ty: &TypeDesc,
        children: Vec<SerializerRef>,
    ) -> Result<SerializeFn, GraphError> {
        let info = union_of(ty)?.clone();

        Ok(Box::new(move |bindings, value| {
            let Value::Variant(variant) = value else {
                return Err(ValueError::mismatch(info.path(), value.kind_name()));
            };
            let Some(index) = info.index_of(variant.name()) else {
                return Err(unknown_variant(&info, variant.name()));
            };

            let payload = children[index].serialize(bindings, variant.value())?;
            let mut map = WireMap::with_capacity(1);
            map.insert(variant.name(), payload);
            Ok(WireValue::Map(map))
        }))
    }

    fn build_deserializer(
        &self,
        ty: &TypeDesc,
        children: Vec<DeserializerRef>,
    ) -> Result<DeserializeFn, GraphError> {
        let info = union_of(ty)?.clone();

        Ok(Box::new(move |bindings, wire| {
            let WireValue::Map(map) = wire else {
                return Err(ValueError::mismatch(info.path(), wire.kind_name()));
            };
            if map.len() != 1 {
                return Err(ValueError::InvalidLength {
                    expected: 1,
                    found: map.len(),
                });
            }

            let mut entries = map.iter();
            let Some((name, payload)) = entries.next() else {
                return Err(ValueError::InvalidLength { expected: 1, found: 0 });
            };
            let Some(index) = info.index_of(name) else {
                return Err(unknown_variant(&info, name));
            };

            let value = children[index].deserialize(bindings, payload)?;
            Ok(Value::Variant(DynamicVariant::new(name.as_str(), value)))
        }))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::info::{TypeDesc, UnionInfo, VariantInfo};
    use crate::value::Value;
    use crate::wire::{WireMap, WireValue};
    use crate::{GraphError, HandlerRegistry, ResolveContext, ValueError, compile};

    fn shape() -> TypeDesc {
        TypeDesc::union(UnionInfo::new("geo::Shape", [
            VariantInfo::new("Circle", TypeDesc::float()),
            VariantInfo::new("Square", TypeDesc::float()),
            VariantInfo::new("Empty", TypeDesc::unit()),
        ]))
    }

    #[test]
    fn single_entry_map() {
        let ty = shape();
        let table = compile(&ty, &HandlerRegistry::new(), &ResolveContext::new()).unwrap();
        // Shape, f64, unit.
        assert_eq!(table.len(), 3);

        let value = Value::variant("Square", Value::Float(2.0));
        let wire = table.serialize(&ty, &value).unwrap();
        assert_eq!(wire.get("Square"), Some(&WireValue::Float(2.0)));
        assert_eq!(table.deserialize(&ty, &wire), Ok(value));

        let empty = Value::variant("Empty", Value::Unit);
        let wire = table.serialize(&ty, &empty).unwrap();
        assert_eq!(wire.get("Empty"), Some(&WireValue::Null));
        assert_eq!(table.deserialize(&ty, &wire), Ok(empty));
    }

    #[test]
    fn bad_input() {
        let ty = shape();
        let table = compile(&ty, &HandlerRegistry::new(), &ResolveContext::new()).unwrap();

        assert_eq!(
            table.serialize(&ty, &Value::variant("Triangle", Value::Unit)),
            Err(ValueError::UnknownVariant {
                owner: "geo::Shape".into(),
                variant: "Triangle".into(),
            }),
        );

        let two: WireMap = [("Circle", WireValue::Float(1.0)), ("Square", WireValue::Float(1.0))]
            .into_iter()
            .collect();
        assert_eq!(
            table.deserialize(&ty, &WireValue::Map(two)),
            Err(ValueError::InvalidLength { expected: 1, found: 2 }),
        );
    }

    #[test]
    fn malformed_unions() {
        let registry = HandlerRegistry::new();
        let cx = ResolveContext::new();

        let empty = TypeDesc::union(UnionInfo::new("Never", []));
        assert!(matches!(
            compile(&empty, &registry, &cx),
            Err(GraphError::MalformedDescriptor { .. }),
        ));

        let dup = TypeDesc::union(UnionInfo::new("Dup", [
            VariantInfo::new("A", TypeDesc::unit()),
            VariantInfo::new("A", TypeDesc::int()),
        ]));
        assert!(matches!(
            compile(&dup, &registry, &cx),
            Err(GraphError::MalformedDescriptor { .. }),
        ));
    }
}
