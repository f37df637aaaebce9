use core::any::{Any, TypeId, type_name};
use core::fmt;
use core::marker::PhantomData;
use core::ops::{Deref, DerefMut};

use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, Visitor};
use serde::ser::{self, SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use super::{PolyBase, SubtypeEntry, scope};
use crate::MapperError;

// -----------------------------------------------------------------------------
// Poly

/// A boxed trait object written with its subtype name.
///
/// See the [module documentation](crate::subtype).
pub struct Poly<B: ?Sized + PolyBase>(Box<B>);

impl<B: ?Sized + PolyBase> Poly<B> {
    #[inline]
    pub fn new(value: Box<B>) -> Self {
        Self(value)
    }

    #[inline]
    pub fn into_inner(self) -> Box<B> {
        self.0
    }

    /// The value as `C`, if that is its concrete type.
    pub fn downcast_ref<C: Any>(&self) -> Option<&C> {
        let any: &dyn Any = self.0.as_subtype();
        any.downcast_ref()
    }

    pub(crate) fn concrete(&self) -> TypeId {
        let any: &dyn Any = self.0.as_subtype();
        any.type_id()
    }
}

impl<B: ?Sized + PolyBase> From<Box<B>> for Poly<B> {
    #[inline]
    fn from(value: Box<B>) -> Self {
        Self(value)
    }
}

impl<B: ?Sized + PolyBase> Deref for Poly<B> {
    type Target = B;

    #[inline]
    fn deref(&self) -> &B {
        &self.0
    }
}

impl<B: ?Sized + PolyBase> DerefMut for Poly<B> {
    #[inline]
    fn deref_mut(&mut self) -> &mut B {
        &mut self.0
    }
}

impl<B: ?Sized + PolyBase + fmt::Debug> fmt::Debug for Poly<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

// -----------------------------------------------------------------------------
// Serialize

impl<B: ?Sized + PolyBase> Serialize for Poly<B> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(name) = scope::name_of(TypeId::of::<B>(), self.concrete()) else {
            let subtype: &dyn Any = self.0.as_subtype();
            let error = MapperError::UnregisteredSubtype {
                base: type_name::<B>(),
                type_path: type_name_of(subtype),
            };
            let message = error.to_string();
            scope::fail(error);
            return Err(ser::Error::custom(message));
        };
        let value: &dyn erased_serde::Serialize = self.0.as_subtype();
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(name, value)?;
        map.end()
    }
}

// Submitted entries are the only source of a concrete name here.
fn type_name_of(value: &dyn Any) -> &'static str {
    let concrete = value.type_id();
    SubtypeEntry::submitted()
        .find(|entry| entry.concrete() == concrete)
        .map_or("<unregistered type>", SubtypeEntry::concrete_path)
}

// -----------------------------------------------------------------------------
// Deserialize

impl<'de, B: ?Sized + PolyBase> Deserialize<'de> for Poly<B> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(PolyVisitor::<B>(PhantomData))
    }
}

struct PolyVisitor<B: ?Sized>(PhantomData<fn() -> Box<B>>);

impl<'de, B: ?Sized + PolyBase> Visitor<'de> for PolyVisitor<B> {
    type Value = Poly<B>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a single-entry map naming a subtype of `{}`", type_name::<B>())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let Some(name) = map.next_key::<String>()? else {
            return Err(de::Error::invalid_length(0, &self));
        };
        let Some(entry) = scope::lookup(TypeId::of::<B>(), &name) else {
            let error = MapperError::UnknownSubtype {
                base: type_name::<B>(),
                name,
            };
            let message = error.to_string();
            scope::fail(error);
            return Err(de::Error::custom(message));
        };

        let value = map.next_value_seed(SubtypeSeed::<B> {
            entry,
            marker: PhantomData,
        })?;
        if map.next_key::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(2, &self));
        }
        Ok(Poly(value))
    }
}

struct SubtypeSeed<B: ?Sized> {
    entry: SubtypeEntry,
    marker: PhantomData<fn() -> Box<B>>,
}

impl<'de, B: ?Sized + PolyBase> DeserializeSeed<'de> for SubtypeSeed<B> {
    type Value = Box<B>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Box<B>, D::Error> {
        let mut erased = <dyn erased_serde::Deserializer>::erase(deserializer);
        let value = self.entry.deserialize(&mut erased).map_err(de::Error::custom)?;
        value.downcast::<Box<B>>().map(|boxed| *boxed).map_err(|_| {
            de::Error::custom(format_args!(
                "subtype `{}` is not registered for `{}`",
                self.entry.name(),
                type_name::<B>()
            ))
        })
    }
}
