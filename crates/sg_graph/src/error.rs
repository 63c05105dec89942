use alloc::borrow::Cow;
use alloc::string::String;

use thiserror::Error;

use crate::info::TypeDesc;

// -----------------------------------------------------------------------------
// GraphError

/// Structural errors raised while discovering or compiling a type graph.
///
/// All of them describe a mismatch between the type graph and the
/// registered handlers, they are surfaced to the caller of
/// [`compile`](crate::compile) unmodified and never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphError {
    #[error("no handler matches type `{0}`")]
    NoHandler(TypeDesc),

    #[error("malformed type `{ty}`: {reason}")]
    MalformedDescriptor {
        ty: TypeDesc,
        reason: Cow<'static, str>,
    },

    #[error("type `{0}` was left without a bound serializer or deserializer")]
    IncompleteBinding(TypeDesc),

    #[error("reference `{0}` cannot be resolved in the current context")]
    UnresolvedReference(String),

    #[error("reference `{0}` resolves to itself")]
    ReferenceCycle(String),

    #[error("generic parameter `{0}` is not bound")]
    UnboundParameter(String),
}

impl GraphError {
    #[inline]
    pub(crate) fn malformed(ty: &TypeDesc, reason: impl Into<Cow<'static, str>>) -> Self {
        Self::MalformedDescriptor {
            ty: ty.clone(),
            reason: reason.into(),
        }
    }
}

// -----------------------------------------------------------------------------
// ValueError

/// Value level errors returned by compiled serializers and deserializers.
///
/// A successfully compiled table never reports structural problems,
/// these errors only describe values that do not fit their type.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ValueError {
    #[error("expected {expected}, found {found}")]
    Mismatch { expected: String, found: String },

    #[error("record `{record}` is missing field `{field}`")]
    MissingField { record: String, field: String },

    #[error("record `{record}` has no field named `{field}`")]
    UnknownField { record: String, field: String },

    #[error("union `{owner}` has no variant named `{variant}`")]
    UnknownVariant { owner: String, variant: String },

    #[error("expected {expected} elements, found {found}")]
    InvalidLength { expected: usize, found: usize },

    #[error("mapping keys must serialize to a scalar, found {0}")]
    InvalidKey(&'static str),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("type `{0}` is not compiled into this table")]
    UnknownType(TypeDesc),
}

impl ValueError {
    #[inline]
    pub(crate) fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::Mismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}
