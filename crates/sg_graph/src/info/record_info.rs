use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::hash::{Hash, Hasher};

use sg_utils::hash::{FixedHashState, HashSet};

use crate::info::TypeDesc;

// -----------------------------------------------------------------------------
// FieldInfo

/// Information for a named record field.
///
/// # Examples
///
/// ```
/// use sg_graph::info::{FieldInfo, TypeDesc};
///
/// let field = FieldInfo::new("value", TypeDesc::int());
///
/// assert_eq!(field.name(), "value");
/// assert_eq!(field.ty(), &TypeDesc::int());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldInfo {
    name: Cow<'static, str>,
    ty: TypeDesc,
}

impl FieldInfo {
    /// Creates a new [`FieldInfo`] for the given field `name` and type.
    #[inline]
    pub fn new(name: impl Into<Cow<'static, str>>, ty: TypeDesc) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Returns the field name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared field type.
    ///
    /// This may contain forward references or generic parameters
    /// of the owning record.
    #[inline]
    pub fn ty(&self) -> &TypeDesc {
        &self.ty
    }
}

// -----------------------------------------------------------------------------
// RecordInfo

/// A container for named record info.
///
/// Records are nominal: two `RecordInfo` are the same type identity
/// when their [type path](RecordInfo::path) is equal, regardless of fields.
/// Fields may refer back to the record itself through
/// [`TypeDesc::reference`], which is how recursive types are described.
///
/// # Examples
///
/// ```
/// use sg_graph::info::{FieldInfo, RecordInfo, TypeDesc};
///
/// let info = RecordInfo::new("tree::Node", [
///     FieldInfo::new("value", TypeDesc::int()),
///     FieldInfo::new("children", TypeDesc::sequence(TypeDesc::reference("tree::Node"))),
/// ]);
///
/// assert_eq!(info.name(), "Node");
/// assert_eq!(info.field_len(), 2);
/// assert_eq!(info.index_of("children"), Some(1));
/// ```
#[derive(Clone, Debug)]
pub struct RecordInfo {
    path: Cow<'static, str>,
    params: Box<[Cow<'static, str>]>,
    fields: Box<[FieldInfo]>,
}

impl RecordInfo {
    /// Create a new [`RecordInfo`].
    ///
    /// The order of fields is fixed, depends on the input order.
    pub fn new(
        path: impl Into<Cow<'static, str>>,
        fields: impl IntoIterator<Item = FieldInfo>,
    ) -> Self {
        Self {
            path: path.into(),
            params: Box::new([]),
            fields: fields.into_iter().collect(),
        }
    }

    /// Declares the generic parameters of this record.
    ///
    /// Field types may then refer to them through [`TypeDesc::param`],
    /// and the record is used through [`TypeDesc::generic`].
    pub fn with_params<S: Into<Cow<'static, str>>>(
        mut self,
        params: impl IntoIterator<Item = S>,
    ) -> Self {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the full type path, a unique identifier of the record.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the name without module path.
    pub fn name(&self) -> &str {
        match self.path.rsplit_once("::") {
            Some((_, name)) => name,
            None => &self.path,
        }
    }

    /// Returns the declared generic parameters.
    #[inline]
    pub fn params(&self) -> &[Cow<'static, str>] {
        &self.params
    }

    /// Returns the fields in **declaration order**.
    #[inline]
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }

    /// Returns the [`FieldInfo`] for the given `name`, if present.
    pub fn field(&self, name: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Returns the index for the given field `name`, if present.
    ///
    /// This is O(N) complexity.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name() == name)
    }

    /// Returns the number of fields.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Returns the first field name declared more than once.
    pub fn duplicate_field(&self) -> Option<&str> {
        let mut seen = HashSet::with_capacity_and_hasher(self.fields.len(), FixedHashState);
        self.fields
            .iter()
            .map(FieldInfo::name)
            .find(|name| !seen.insert(*name))
    }
}

impl PartialEq for RecordInfo {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for RecordInfo {}

impl Hash for RecordInfo {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

// -----------------------------------------------------------------------------
// Tests
