use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::hash::{Hash, Hasher};

use sg_utils::hash::{FixedHashState, HashSet};

use crate::info::TypeDesc;

// -----------------------------------------------------------------------------
// VariantInfo

/// Information for a union variant, a name and its payload type.
///
/// Unit-like variants use [`TypeDesc::unit`] as payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VariantInfo {
    name: Cow<'static, str>,
    ty: TypeDesc,
}

impl VariantInfo {
    /// Creates a new [`VariantInfo`].
    #[inline]
    pub fn new(name: impl Into<Cow<'static, str>>, ty: TypeDesc) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Returns the variant name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the payload type.
    #[inline]
    pub fn ty(&self) -> &TypeDesc {
        &self.ty
    }
}

// -----------------------------------------------------------------------------
// UnionInfo

/// A container for named union info.
///
/// Like [`RecordInfo`](crate::info::RecordInfo), unions are nominal
/// and compare by their type path.
///
/// # Examples
///
/// ```
/// use sg_graph::info::{TypeDesc, UnionInfo, VariantInfo};
///
/// let info = UnionInfo::new("shape::Shape", [
///     VariantInfo::new("Circle", TypeDesc::float()),
///     VariantInfo::new("Empty", TypeDesc::unit()),
/// ]);
///
/// assert_eq!(info.name(), "Shape");
/// assert_eq!(info.index_of("Empty"), Some(1));
/// ```
#[derive(Clone, Debug)]
pub struct UnionInfo {
    path: Cow<'static, str>,
    variants: Box<[VariantInfo]>,
}

impl UnionInfo {
    /// Create a new [`UnionInfo`], variants keep the input order.
    pub fn new(
        path: impl Into<Cow<'static, str>>,
        variants: impl IntoIterator<Item = VariantInfo>,
    ) -> Self {
        Self {
            path: path.into(),
            variants: variants.into_iter().collect(),
        }
    }

    /// Returns the full type path.
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

    /// Returns the variants in declaration order.
    #[inline]
    pub fn variants(&self) -> &[VariantInfo] {
        &self.variants
    }

    /// Returns the [`VariantInfo`] for the given `name`, if present.
    pub fn variant(&self, name: &str) -> Option<&VariantInfo> {
        self.variants.iter().find(|variant| variant.name() == name)
    }

    /// Returns the index for the given variant `name`, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|variant| variant.name() == name)
    }

    /// Returns the number of variants.
    #[inline]
    pub fn variant_len(&self) -> usize {
        self.variants.len()
    }

    /// Returns the first variant name declared more than once.
    pub fn duplicate_variant(&self) -> Option<&str> {
        let mut seen = HashSet::with_capacity_and_hasher(self.variants.len(), FixedHashState);
        self.variants
            .iter()
            .map(VariantInfo::name)
            .find(|name| !seen.insert(*name))
    }
}

impl PartialEq for UnionInfo {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for UnionInfo {}

impl Hash for UnionInfo {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}
