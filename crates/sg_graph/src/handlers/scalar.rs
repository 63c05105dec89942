use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;

use crate::compile::{DeserializeFn, DeserializerRef, SerializeFn, SerializerRef};
use crate::error::{GraphError, ValueError};
use crate::info::{ScalarKind, TypeDesc};
use crate::registry::TypeHandler;
use crate::value::Value;
use crate::wire::WireValue;

/// Handles [`TypeDesc::Scalar`].
///
/// Integers convert between signed and unsigned when the number fits,
/// and floats also accept integers from the wire. Other conversions fail
/// with [`ValueError::Mismatch`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarHandler;

fn kind_of(ty: &TypeDesc) -> Result<ScalarKind, GraphError> {
    match ty {
        TypeDesc::Scalar(kind) => Ok(*kind),
        _ => Err(super::unexpected("scalar", ty)),
    }
}

fn to_i64(value: u64) -> Result<i64, ValueError> {
    i64::try_from(value).map_err(|_| ValueError::InvalidData(format!("{value} does not fit in i64")))
}

fn to_u64(value: i64) -> Result<u64, ValueError> {
    u64::try_from(value).map_err(|_| ValueError::InvalidData(format!("{value} does not fit in u64")))
}

pub(super) fn serialize_scalar(kind: ScalarKind, value: &Value) -> Result<WireValue, ValueError> {
    match (kind, value) {
        (ScalarKind::Unit, Value::Unit) => Ok(WireValue::Null),
        (ScalarKind::Bool, Value::Bool(v)) => Ok(WireValue::Bool(*v)),
        (ScalarKind::Int, Value::Int(v)) => Ok(WireValue::Int(*v)),
        (ScalarKind::Int, Value::UInt(v)) => to_i64(*v).map(WireValue::Int),
        (ScalarKind::UInt, Value::UInt(v)) => Ok(WireValue::UInt(*v)),
        (ScalarKind::UInt, Value::Int(v)) => to_u64(*v).map(WireValue::UInt),
        (ScalarKind::Float, Value::Float(v)) => Ok(WireValue::Float(*v)),
        (ScalarKind::Str, Value::Str(v)) => Ok(WireValue::Str(v.clone())),
        _ => Err(ValueError::mismatch(kind.name(), value.kind_name())),
    }
}

pub(super) fn deserialize_scalar(kind: ScalarKind, wire: &WireValue) -> Result<Value, ValueError> {
    match (kind, wire) {
        (ScalarKind::Unit, WireValue::Null) => Ok(Value::Unit),
        (ScalarKind::Bool, WireValue::Bool(v)) => Ok(Value::Bool(*v)),
        (ScalarKind::Int, WireValue::Int(v)) => Ok(Value::Int(*v)),
        (ScalarKind::Int, WireValue::UInt(v)) => to_i64(*v).map(Value::Int),
        (ScalarKind::UInt, WireValue::UInt(v)) => Ok(Value::UInt(*v)),
        (ScalarKind::UInt, WireValue::Int(v)) => to_u64(*v).map(Value::UInt),
        (ScalarKind::Float, WireValue::Float(v)) => Ok(Value::Float(*v)),
        (ScalarKind::Float, WireValue::Int(v)) => Ok(Value::Float(*v as f64)),
        (ScalarKind::Float, WireValue::UInt(v)) => Ok(Value::Float(*v as f64)),
        (ScalarKind::Str, WireValue::Str(v)) => Ok(Value::Str(v.clone())),
        _ => Err(ValueError::mismatch(kind.name(), wire.kind_name())),
    }
}

impl TypeHandler for ScalarHandler {
    fn name(&self) -> &'static str {
        "Scalar"
    }

    fn matches(&self, ty: &TypeDesc) -> Result<bool, GraphError> {
        Ok(matches!(ty, TypeDesc::Scalar(_)))
    }

    fn children_of(&self, _: &TypeDesc) -> Result<Vec<TypeDesc>, GraphError> {
        Ok(Vec::new())
    }

    fn build_serializer(
        &self,
        ty: &TypeDesc,
        _: Vec<SerializerRef>,
    ) -> Result<SerializeFn, GraphError> {
        let kind = kind_of(ty)?;
        Ok(Box::new(move |_, value| serialize_scalar(kind, value)))
    }

    fn build_deserializer(
        &self,
        ty: &TypeDesc,
        _: Vec<DeserializerRef>,
    ) -> Result<DeserializeFn, GraphError> {
        let kind = kind_of(ty)?;
        Ok(Box::new(move |_, wire| deserialize_scalar(kind, wire)))
    }
}

// -----------------------------------------------------------------------------
// Tests
