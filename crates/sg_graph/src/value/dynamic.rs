use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::value::Value;

// -----------------------------------------------------------------------------
// DynamicRecord

/// A record value: a type name and its fields.
///
/// Field order is irrelevant for serialization, the serializer follows the
/// declaration order of the record type.
///
/// # Examples
///
/// ```
/// use sg_graph::value::{DynamicRecord, Value};
///
/// let record = DynamicRecord::new("geo::Point")
///     .with_field("x", 1.0_f64)
///     .with_field("y", 2.0_f64);
///
/// assert_eq!(record.field("y"), Some(&Value::Float(2.0)));
/// assert_eq!(record.field_len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub struct DynamicRecord {
    name: String,
    fields: Vec<(String, Value)>,
}

impl DynamicRecord {
    /// Creates an empty record of type `name`.
    ///
    /// The name should be the record type path.
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Returns the type path of this record.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts a field, replacing the previous value with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Builder form of [`DynamicRecord::insert`].
    #[inline]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Iterates fields in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

// -----------------------------------------------------------------------------
// DynamicVariant

/// A union value: the selected variant name and its payload.
#[derive(Clone, Debug, PartialEq)]
pub struct DynamicVariant {
    name: String,
    value: Box<Value>,
}

impl DynamicVariant {
    #[inline]
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value: Box::new(value),
        }
    }

    /// Returns the variant name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the variant payload.
    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[inline]
    pub fn into_value(self) -> Value {
        *self.value
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::DynamicRecord;
    use crate::value::Value;

    #[test]
    fn insert_replaces() {
        let mut record = DynamicRecord::new("Pair");
        record.insert("left", 1_i64);
        record.insert("right", 2_i64);
        record.insert("left", 3_i64);

        assert_eq!(record.field_len(), 2);
        assert_eq!(record.field("left"), Some(&Value::Int(3)));

        let names: alloc::vec::Vec<_> = record.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["left", "right"]);
    }
}
