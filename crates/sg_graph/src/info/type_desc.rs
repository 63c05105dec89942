use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::info::{RecordInfo, ScalarKind, UnionInfo};

// -----------------------------------------------------------------------------
// TypeDesc

/// A type descriptor, the external representation of a type being walked.
///
/// Descriptors are cheap to clone: records and unions are shared
/// through [`Arc`], containers own their (small) element descriptors.
///
/// # Identity
///
/// After normalization by a [`HandlerRegistry`], a descriptor is used as a
/// *type identity*: it is hashed and compared to deduplicate graph nodes.
///
/// - `Record` and `Union` compare by type path (and type arguments).
/// - All other shapes compare structurally.
/// - `Reference` and `Param` never survive normalization.
///
/// # Examples
///
/// ```
/// use sg_graph::info::TypeDesc;
///
/// let a = TypeDesc::sequence(TypeDesc::optional(TypeDesc::int()));
/// let b = TypeDesc::sequence(TypeDesc::optional(TypeDesc::int()));
///
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "Sequence<Optional<i64>>");
/// ```
///
/// [`HandlerRegistry`]: crate::registry::HandlerRegistry
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeDesc {
    Scalar(ScalarKind),
    Bytes,
    Uuid,
    DateTime,
    Optional(Box<TypeDesc>),
    Sequence(Box<TypeDesc>),
    Tuple(Box<[TypeDesc]>),
    Mapping(Box<TypeDesc>, Box<TypeDesc>),
    Record {
        info: Arc<RecordInfo>,
        args: Box<[TypeDesc]>,
    },
    Union(Arc<UnionInfo>),
    Reference(Cow<'static, str>),
    Param(Cow<'static, str>),
    Opaque(Cow<'static, str>),
}

impl TypeDesc {
    /// A unit type, serialized as `null`.
    #[inline]
    pub const fn unit() -> Self {
        Self::Scalar(ScalarKind::Unit)
    }

    #[inline]
    pub const fn bool() -> Self {
        Self::Scalar(ScalarKind::Bool)
    }

    /// A signed 64 bits integer.
    #[inline]
    pub const fn int() -> Self {
        Self::Scalar(ScalarKind::Int)
    }

    /// An unsigned 64 bits integer.
    #[inline]
    pub const fn uint() -> Self {
        Self::Scalar(ScalarKind::UInt)
    }

    #[inline]
    pub const fn float() -> Self {
        Self::Scalar(ScalarKind::Float)
    }

    #[inline]
    pub const fn str() -> Self {
        Self::Scalar(ScalarKind::Str)
    }

    #[inline]
    pub const fn bytes() -> Self {
        Self::Bytes
    }

    #[inline]
    pub const fn uuid() -> Self {
        Self::Uuid
    }

    /// A date and time without time zone.
    #[inline]
    pub const fn datetime() -> Self {
        Self::DateTime
    }

    #[inline]
    pub fn optional(inner: TypeDesc) -> Self {
        Self::Optional(Box::new(inner))
    }

    #[inline]
    pub fn sequence(item: TypeDesc) -> Self {
        Self::Sequence(Box::new(item))
    }

    #[inline]
    pub fn tuple(items: impl IntoIterator<Item = TypeDesc>) -> Self {
        Self::Tuple(items.into_iter().collect())
    }

    #[inline]
    pub fn mapping(key: TypeDesc, value: TypeDesc) -> Self {
        Self::Mapping(Box::new(key), Box::new(value))
    }

    /// A non-generic record.
    #[inline]
    pub fn record(info: impl Into<Arc<RecordInfo>>) -> Self {
        Self::Record {
            info: info.into(),
            args: Box::new([]),
        }
    }

    /// A generic record applied to type arguments.
    ///
    /// Arguments are matched to [`RecordInfo::params`] by position.
    #[inline]
    pub fn generic(
        info: impl Into<Arc<RecordInfo>>,
        args: impl IntoIterator<Item = TypeDesc>,
    ) -> Self {
        Self::Record {
            info: info.into(),
            args: args.into_iter().collect(),
        }
    }

    #[inline]
    pub fn union(info: impl Into<Arc<UnionInfo>>) -> Self {
        Self::Union(info.into())
    }

    /// A forward reference, resolved by name through a
    /// [`ResolveContext`](crate::ResolveContext).
    #[inline]
    pub fn reference(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Reference(name.into())
    }

    /// A generic parameter.
    #[inline]
    pub fn param(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Param(name.into())
    }

    /// A named type handled by a custom [`TypeHandler`](crate::TypeHandler).
    #[inline]
    pub fn opaque(name: impl Into<Cow<'static, str>>) -> Self {
        Self::Opaque(name.into())
    }

    /// Replaces every `Param` named in `params` by the argument at the same position.
    ///
    /// Nested record arguments are substituted too, but the fields of nested
    /// records are not: they live in the scope of their own parameters.
    pub fn substitute(&self, params: &[Cow<'static, str>], args: &[TypeDesc]) -> TypeDesc {
        if params.is_empty() {
            return self.clone();
        }

        match self {
            Self::Param(name) => match params.iter().position(|param| param == name) {
                Some(index) if index < args.len() => args[index].clone(),
                _ => self.clone(),
            },
            Self::Optional(inner) => Self::optional(inner.substitute(params, args)),
            Self::Sequence(item) => Self::sequence(item.substitute(params, args)),
            Self::Tuple(items) => {
                Self::Tuple(items.iter().map(|ty| ty.substitute(params, args)).collect())
            }
            Self::Mapping(key, value) => {
                Self::mapping(key.substitute(params, args), value.substitute(params, args))
            }
            Self::Record {
                info,
                args: record_args,
            } => Self::Record {
                info: info.clone(),
                args: record_args
                    .iter()
                    .map(|ty| ty.substitute(params, args))
                    .collect::<Vec<_>>()
                    .into_boxed_slice(),
            },
            Self::Scalar(_)
            | Self::Bytes
            | Self::Uuid
            | Self::DateTime
            | Self::Union(_)
            | Self::Reference(_)
            | Self::Opaque(_) => self.clone(),
        }
    }
}

impl From<ScalarKind> for TypeDesc {
    #[inline]
    fn from(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }
}

// Writes `a, b, c`.
fn write_list(f: &mut fmt::Formatter<'_>, items: &[TypeDesc]) -> fmt::Result {
    let mut iter = items.iter();
    if let Some(first) = iter.next() {
        write!(f, "{first}")?;
    }
    for item in iter {
        write!(f, ", {item}")?;
    }
    Ok(())
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => fmt::Display::fmt(kind, f),
            Self::Bytes => f.write_str("bytes"),
            Self::Uuid => f.write_str("uuid"),
            Self::DateTime => f.write_str("datetime"),
            Self::Optional(inner) => write!(f, "Optional<{inner}>"),
            Self::Sequence(item) => write!(f, "Sequence<{item}>"),
            Self::Tuple(items) => {
                f.write_str("(")?;
                write_list(f, items)?;
                f.write_str(")")
            }
            Self::Mapping(key, value) => write!(f, "Mapping<{key}, {value}>"),
            Self::Record { info, args } => {
                f.write_str(info.path())?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    write_list(f, args)?;
                    f.write_str(">")?;
                }
                Ok(())
            }
            Self::Union(info) => f.write_str(info.path()),
            Self::Reference(name) => write!(f, "@{name}"),
            Self::Param(name) => write!(f, "${name}"),
            Self::Opaque(name) => f.write_str(name),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::TypeDesc;
    use crate::info::{FieldInfo, RecordInfo};

    #[test]
    fn display() {
        let ty = TypeDesc::mapping(TypeDesc::str(), TypeDesc::tuple([TypeDesc::int(), TypeDesc::bytes()]));
        assert_eq!(ty.to_string(), "Mapping<str, (i64, bytes)>");
        assert_eq!(TypeDesc::reference("Node").to_string(), "@Node");
        assert_eq!(TypeDesc::param("T").to_string(), "$T");
        assert_eq!(TypeDesc::sequence(TypeDesc::datetime()).to_string(), "Sequence<datetime>");

        let info = RecordInfo::new("app::Boxed", []).with_params(["T"]);
        assert_eq!(TypeDesc::generic(info, [TypeDesc::uint()]).to_string(), "app::Boxed<u64>");
    }

    #[test]
    fn substitute() {
        let params = ["K".into(), "V".into()];
        let args = [TypeDesc::str(), TypeDesc::float()];

        let ty = TypeDesc::optional(TypeDesc::mapping(TypeDesc::param("K"), TypeDesc::param("V")));
        assert_eq!(
            ty.substitute(&params, &args),
            TypeDesc::optional(TypeDesc::mapping(TypeDesc::str(), TypeDesc::float())),
        );

        // Unknown parameters are left alone.
        let ty = TypeDesc::sequence(TypeDesc::param("X"));
        assert_eq!(ty.substitute(&params, &args), ty);
    }

    #[test]
    fn substitute_nested_record_args() {
        let inner = RecordInfo::new("Wrap", [FieldInfo::new("item", TypeDesc::param("T"))])
            .with_params(["T"]);
        let ty = TypeDesc::generic(inner.clone(), [TypeDesc::param("U")]);

        let resolved = ty.substitute(&["U".into()], &[TypeDesc::bool()]);
        assert_eq!(resolved, TypeDesc::generic(inner, [TypeDesc::bool()]));
    }

    #[test]
    fn generic_identity_includes_args() {
        let info = RecordInfo::new("Boxed", []).with_params(["T"]);
        let a = TypeDesc::generic(info.clone(), [TypeDesc::int()]);
        let b = TypeDesc::generic(info.clone(), [TypeDesc::str()]);
        let c = TypeDesc::generic(info, [TypeDesc::int()]);

        assert_ne!(a, b);
        assert_eq!(a, c);
    }
}
