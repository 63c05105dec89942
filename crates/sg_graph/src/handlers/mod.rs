//! Provide the built-in [`TypeHandler`]s.
//!
//! ## Menu
//!
//! - [`ReferenceHandler`]: Resolves `Reference` through the context, never compiled.
//! - [`ParamHandler`]: Resolves `Param` through the context, never compiled.
//! - [`OptionalHandler`]: `Optional<T>`, `None` on the wire is `null`.
//! - [`SequenceHandler`]: `Sequence<T>`, a wire sequence.
//! - [`TupleHandler`]: `(T1, .., Tn)`, a wire sequence of fixed length.
//! - [`MappingHandler`]: `Mapping<K, V>`, a wire map with stringified keys.
//! - [`RecordHandler`]: Named fields, a wire map in declaration order.
//! - [`UnionHandler`]: Named variants, a single entry wire map `{variant: payload}`.
//! - [`BytesHandler`]: A byte buffer, a base64 string.
//! - [`UuidHandler`]: A UUID, a hex string.
//! - [`DateTimeHandler`]: A date and time, an ISO 8601 string with microseconds.
//! - [`ScalarHandler`]: Primitive values.
//!
//! [`TypeHandler`]: crate::TypeHandler

// -----------------------------------------------------------------------------
// Modules

mod bytes;
mod datetime;
mod mapping;
mod optional;
mod record;
mod reference;
mod scalar;
mod sequence;
mod tuple;
mod union;
mod uuid;

// -----------------------------------------------------------------------------
// Exports

pub use bytes::BytesHandler;
pub use datetime::DateTimeHandler;
pub use mapping::MappingHandler;
pub use optional::OptionalHandler;
pub use record::RecordHandler;
pub use reference::{ParamHandler, ReferenceHandler};
pub use scalar::ScalarHandler;
pub use sequence::SequenceHandler;
pub use tuple::TupleHandler;
pub use union::UnionHandler;
pub use self::uuid::UuidHandler;

// -----------------------------------------------------------------------------
// Helpers

use alloc::vec::Vec;

use crate::error::GraphError;
use crate::info::TypeDesc;

/// Converts the child references given to a builder into a fixed size array.
fn expect_children<T, const N: usize>(ty: &TypeDesc, children: Vec<T>) -> Result<[T; N], GraphError> {
    let len = children.len();
    children.try_into().map_err(|_| {
        GraphError::malformed(
            ty,
            alloc::format!("expected {N} child references, found {len}"),
        )
    })
}

/// The error of a handler asked about a shape it does not accept.
#[inline]
fn unexpected(handler: &'static str, ty: &TypeDesc) -> GraphError {
    GraphError::malformed(ty, alloc::format!("not a {handler} type"))
}
