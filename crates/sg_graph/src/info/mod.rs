//! Provide type descriptors, the input of graph discovery.
//!
//! ## Menu
//!
//! - [`TypeDesc`]: A enum describing one type, the inner is one of following shapes:
//!     - `Scalar`: A primitive value, see [`ScalarKind`].
//!     - `Bytes`: A byte buffer.
//!     - `Uuid`, `DateTime`: Identifiers and timestamps, carried as strings.
//!     - `Optional`, `Sequence`, `Tuple`, `Mapping`: Structural containers.
//!     - `Record`: A nominal record with named fields, see [`RecordInfo`].
//!     - `Union`: A nominal union of named variants, see [`UnionInfo`].
//!     - `Reference`: A forward reference by name, resolved through a [`ResolveContext`].
//!     - `Param`: A generic parameter, bound through a [`ResolveContext`] or record arguments.
//!     - `Opaque`: A named type only understood by a custom handler.
//!
//! - Record and union parts:
//!     - [`FieldInfo`]: A record field, including field name and field type.
//!     - [`VariantInfo`]: A union variant, including variant name and payload type.
//!
//! A normalized `TypeDesc` is the *type identity* used as graph key.
//! Records and unions compare by their type path, all other shapes compare structurally.
//!
//! [`ResolveContext`]: crate::ResolveContext

// -----------------------------------------------------------------------------
// Modules

mod record_info;
mod scalar_kind;
mod type_desc;
mod union_info;

// -----------------------------------------------------------------------------
// Exports

pub use record_info::{FieldInfo, RecordInfo};
pub use scalar_kind::ScalarKind;
pub use type_desc::TypeDesc;
pub use union_info::{UnionInfo, VariantInfo};
