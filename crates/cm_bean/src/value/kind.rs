use core::fmt;

use crate::Bean;
use crate::value::{Collection, Map, Shared, Value};

// -----------------------------------------------------------------------------
// ValueKind

/// The shape of a [`Value`], without the data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Scalar,
    Optional,
    Collection,
    Map,
    Bean,
    Shared,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scalar => "scalar",
            Self::Optional => "optional",
            Self::Collection => "collection",
            Self::Map => "map",
            Self::Bean => "bean",
            Self::Shared => "shared",
        })
    }
}

// -----------------------------------------------------------------------------
// ValueRef

/// An immutable view of a [`Value`] according to its shape.
#[derive(Clone, Copy)]
pub enum ValueRef<'a> {
    Scalar(&'a dyn Value),
    Optional(Option<&'a dyn Value>),
    Collection(&'a dyn Collection),
    Map(&'a dyn Map),
    Bean(&'a dyn Bean),
    Shared(&'a dyn Shared),
}

impl<'a> ValueRef<'a> {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Optional(_) => ValueKind::Optional,
            Self::Collection(_) => ValueKind::Collection,
            Self::Map(_) => ValueKind::Map,
            Self::Bean(_) => ValueKind::Bean,
            Self::Shared(_) => ValueKind::Shared,
        }
    }

    /// The value this view points at.
    ///
    /// For transparent pointers this is the pointee. Returns `None` for an
    /// empty optional, and the contained value for a present one.
    pub fn payload(&self) -> Option<&'a dyn Value> {
        match *self {
            Self::Scalar(v) => Some(v),
            Self::Optional(v) => v,
            Self::Collection(v) => Some(v),
            Self::Map(v) => Some(v),
            Self::Bean(v) => Some(v),
            Self::Shared(v) => Some(v),
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Optional(None))
    }

    pub fn as_bean(&self) -> Option<&'a dyn Bean> {
        match *self {
            Self::Bean(bean) => Some(bean),
            _ => None,
        }
    }
}

impl fmt::Debug for ValueRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.payload() {
            Some(value) => write!(f, "{}({value:?})", self.kind()),
            None => f.write_str("null"),
        }
    }
}

// -----------------------------------------------------------------------------
// ValueMut

/// A mutable view of a [`Value`] according to its shape.
///
/// Shared values stay behind `&` because they are mutated through their lock.
/// `Immutable` is reported for an `Arc` whose pointee is aliased.
pub enum ValueMut<'a> {
    Scalar(&'a mut dyn Value),
    Optional(Option<&'a mut dyn Value>),
    Collection(&'a mut dyn Collection),
    Map(&'a mut dyn Map),
    Bean(&'a mut dyn Bean),
    Shared(&'a dyn Shared),
    Immutable,
}

impl ValueMut<'_> {
    pub fn kind(&self) -> Option<ValueKind> {
        Some(match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Optional(_) => ValueKind::Optional,
            Self::Collection(_) => ValueKind::Collection,
            Self::Map(_) => ValueKind::Map,
            Self::Bean(_) => ValueKind::Bean,
            Self::Shared(_) => ValueKind::Shared,
            Self::Immutable => return None,
        })
    }
}
