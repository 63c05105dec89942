use alloc::boxed::Box;
use alloc::format;
use alloc::string::ToString;
use alloc::vec::Vec;

use chrono::{NaiveDateTime, Timelike};

use crate::compile::{DeserializeFn, DeserializerRef, SerializeFn, SerializerRef};
use crate::error::{GraphError, ValueError};
use crate::info::TypeDesc;
use crate::registry::TypeHandler;
use crate::value::Value;
use crate::wire::WireValue;

/// Written with exactly six fraction digits.
const WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// The fraction is optional and may have any number of digits.
const READ_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Handles [`TypeDesc::DateTime`], carried as an ISO 8601 string with
/// microseconds, `2024-05-01T12:30:05.000250`.
///
/// A value finer than a microsecond cannot be written without loss and
/// fails with [`ValueError::InvalidData`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeHandler;

impl TypeHandler for DateTimeHandler {
    fn name(&self) -> &'static str {
        "DateTime"
    }

    fn matches(&self, ty: &TypeDesc) -> Result<bool, GraphError> {
        Ok(matches!(ty, TypeDesc::DateTime))
    }

    fn children_of(&self, _: &TypeDesc) -> Result<Vec<TypeDesc>, GraphError> {
        Ok(Vec::new())
    }

    fn build_serializer(
        &self,
        _: &TypeDesc,
        _: Vec<SerializerRef>,
    ) -> Result<SerializeFn, GraphError> {
        Ok(Box::new(|_, value| match value {
            Value::DateTime(time) if time.nanosecond() % 1_000 != 0 => Err(
                ValueError::InvalidData(format!("`{time}` is finer than a microsecond")),
            ),
            Value::DateTime(time) => Ok(WireValue::Str(time.format(WRITE_FORMAT).to_string())),
            _ => Err(ValueError::mismatch("datetime", value.kind_name())),
        }))
    }

    fn build_deserializer(
        &self,
        _: &TypeDesc,
        _: Vec<DeserializerRef>,
    ) -> Result<DeserializeFn, GraphError> {
        Ok(Box::new(|_, wire| match wire {
            WireValue::Str(text) => NaiveDateTime::parse_from_str(text, READ_FORMAT)
                .map(Value::DateTime)
                .map_err(|e| ValueError::InvalidData(format!("`{text}`: {e}"))),
            _ => Err(ValueError::mismatch("ISO 8601 string", wire.kind_name())),
        }))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::info::TypeDesc;
    use crate::value::Value;
    use crate::wire::WireValue;
    use crate::{HandlerRegistry, ResolveContext, ValueError, compile};

    fn at(micro: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_micro_opt(12, 30, 5, micro)
            .unwrap()
    }

    #[test]
    fn iso_string() {
        let ty = TypeDesc::datetime();
        let table = compile(&ty, &HandlerRegistry::new(), &ResolveContext::new()).unwrap();

        let value = Value::DateTime(at(250));
        let wire = table.serialize(&ty, &value).unwrap();
        assert_eq!(wire, WireValue::from("2024-05-01T12:30:05.000250"));
        assert_eq!(table.deserialize(&ty, &wire), Ok(value));

        let whole = table.serialize(&ty, &Value::DateTime(at(0))).unwrap();
        assert_eq!(whole, WireValue::from("2024-05-01T12:30:05.000000"));

        // The fraction may be left out.
        assert_eq!(
            table.deserialize(&ty, &WireValue::from("2024-05-01T12:30:05")),
            Ok(Value::DateTime(at(0))),
        );
    }

    #[test]
    fn bad_input() {
        let ty = TypeDesc::datetime();
        let table = compile(&ty, &HandlerRegistry::new(), &ResolveContext::new()).unwrap();

        let nanos = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_nano_opt(12, 30, 5, 1)
            .unwrap();
        assert!(matches!(
            table.serialize(&ty, &Value::DateTime(nanos)),
            Err(ValueError::InvalidData(_)),
        ));
        assert!(matches!(
            table.deserialize(&ty, &WireValue::from("2024-13-01T00:00:00")),
            Err(ValueError::InvalidData(_)),
        ));
        assert_eq!(
            table.deserialize(&ty, &WireValue::Int(0)),
            Err(ValueError::mismatch("ISO 8601 string", "i64")),
        );
    }
}
