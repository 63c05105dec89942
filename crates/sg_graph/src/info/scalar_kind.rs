use core::fmt;

/// An enumeration of the primitive value kinds.
///
/// Each kind corresponds to one [`Value`](crate::value::Value) variant
/// and one [`WireValue`](crate::wire::WireValue) variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Unit,
    Bool,
    Int,
    UInt,
    Float,
    Str,
}

impl ScalarKind {
    /// Returns the name used in type paths and error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Bool => "bool",
            Self::Int => "i64",
            Self::UInt => "u64",
            Self::Float => "f64",
            Self::Str => "str",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
