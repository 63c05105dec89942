use alloc::boxed::Box;
use alloc::format;
use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::compile::{DeserializeFn, DeserializerRef, SerializeFn, SerializerRef};
use crate::context::ResolveContext;
use crate::error::{GraphError, ValueError};
use crate::info::{RecordInfo, TypeDesc};
use crate::registry::{HandlerRegistry, TypeHandler};
use crate::value::{DynamicRecord, Value};
use crate::wire::{WireMap, WireValue};

/// Handles [`TypeDesc::Record`].
///
/// A record is written as a wire map with one entry per field, in
/// declaration order. When reading:
///
/// - A missing entry is read as `None` when the field deserializer maps
///   `null` to `None`, so optional fields may be omitted. Other fields,
///   `unit` ones included, report [`ValueError::MissingField`].
/// - Unknown entries are ignored, unless
///   [`deny_unknown_fields`](RecordHandler::deny_unknown_fields) is set.
///
/// Generic records get their parameters substituted by the type arguments
/// before the field types are discovered.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordHandler {
    deny_unknown_fields: bool,
}

impl RecordHandler {
    #[inline]
    pub const fn new() -> Self {
        Self {
            deny_unknown_fields: false,
        }
    }

    /// Rejects unknown fields with [`ValueError::UnknownField`],
    /// on both the value and the wire side.
    #[inline]
    pub const fn deny_unknown_fields(mut self, deny: bool) -> Self {
        self.deny_unknown_fields = deny;
        self
    }
}

fn record_of(ty: &TypeDesc) -> Result<(&Arc<RecordInfo>, &[TypeDesc]), GraphError> {
    match ty {
        TypeDesc::Record { info, args } => Ok((info, &**args)),
        _ => Err(super::unexpected("record", ty)),
    }
}

fn unknown_field(info: &RecordInfo, field: &str) -> ValueError {
    ValueError::UnknownField {
        record: info.path().to_string(),
        field: field.to_string(),
    }
}

fn missing_field(info: &RecordInfo, field: &str) -> ValueError {
    ValueError::MissingField {
        record: info.path().to_string(),
        field: field.to_string(),
    }
}

impl TypeHandler for RecordHandler {
    fn name(&self) -> &'static str {
        "Record"
    }

    fn matches(&self, ty: &TypeDesc) -> Result<bool, GraphError> {
        let TypeDesc::Record { info, args } = ty else {
            return Ok(false);
        };
        if let Some(field) = info.duplicate_field() {
            return Err(GraphError::malformed(ty, format!("duplicate field `{field}`")));
        }
        if info.params().len() != args.len() {
            return Err(GraphError::malformed(
                ty,
                format!(
                    "expected {} type arguments, found {}",
                    info.params().len(),
                    args.len()
                ),
            ));
        }
        Ok(true)
    }

    fn normalize(
        &self,
        registry: &HandlerRegistry,
        ty: &TypeDesc,
        cx: &ResolveContext,
    ) -> Result<TypeDesc, GraphError> {
        let (info, args) = record_of(ty)?;
        if args.is_empty() {
            return Ok(ty.clone());
        }
        let args = args
            .iter()
            .map(|arg| registry.normalize(arg, cx))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TypeDesc::generic(info.clone(), args))
    }

    fn children_of(&self, ty: &TypeDesc) -> Result<Vec<TypeDesc>, GraphError> {
        let (info, args) = record_of(ty)?;
        Ok(info
            .fields()
            .iter()
            .map(|field| field.ty().substitute(info.params(), args))
            .collect())
    }

    fn build_serializer(
        &self,
        ty: &TypeDesc,
        children: Vec<SerializerRef>,
    ) -> Result<SerializeFn, GraphError> {
        let (info, _) = record_of(ty)?;
        let info = info.clone();
        let deny_unknown_fields = self.deny_unknown_fields;

        Ok(Box::new(move |bindings, value| {
            let Value::Record(record) = value else {
                return Err(ValueError::mismatch(info.path(), value.kind_name()));
            };
            if record.name() != info.path() {
                return Err(ValueError::mismatch(info.path(), record.name()));
            }
            if deny_unknown_fields
                && let Some((name, _)) = record.iter().find(|(name, _)| info.field(name).is_none())
            {
                return Err(unknown_field(&info, name));
            }

            let mut map = WireMap::with_capacity(info.field_len());
            for (field, child) in info.fields().iter().zip(&children) {
                let Some(v) = record.field(field.name()) else {
                    return Err(missing_field(&info, field.name()));
                };
                map.insert(field.name(), child.serialize(bindings, v)?);
            }
            Ok(WireValue::Map(map))
        }))
    }

    fn build_deserializer(
        &self,
        ty: &TypeDesc,
        children: Vec<DeserializerRef>,
    ) -> Result<DeserializeFn, GraphError> {
        let (info, _) = record_of(ty)?;
        let info = info.clone();
        let deny_unknown_fields = self.deny_unknown_fields;

        Ok(Box::new(move |bindings, wire| {
            let WireValue::Map(map) = wire else {
                return Err(ValueError::mismatch(info.path(), wire.kind_name()));
            };
            if deny_unknown_fields
                && let Some(key) = map.keys().find(|key| info.field(key).is_none())
            {
                return Err(unknown_field(&info, key));
            }

            let mut record = DynamicRecord::new(info.path());
            for (field, child) in info.fields().iter().zip(&children) {
                let value = match map.get(field.name()) {
                    Some(w) => child.deserialize(bindings, w)?,
                    // Only an optional field reads a missing entry as `None`.
                    None => match child.deserialize(bindings, &WireValue::Null) {
                        Ok(Value::None) => Value::None,
                        _ => return Err(missing_field(&info, field.name())),
                    },
                };
                record.insert(field.name(), value);
            }
            Ok(Value::Record(record))
        }))
    }
}

// -----------------------------------------------------------------------------
// Tests
