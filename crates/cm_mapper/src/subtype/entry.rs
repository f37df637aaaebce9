use core::any::{Any, TypeId, type_name};
use core::fmt;

use super::{SubtypeOf, SubtypeRegistry};

pub(crate) type DeserializeFn =
    fn(&mut dyn erased_serde::Deserializer<'_>) -> Result<Box<dyn Any>, erased_serde::Error>;

// -----------------------------------------------------------------------------
// SubtypeEntry

/// A concrete type registered under a name for a base.
#[derive(Clone, Copy)]
pub struct SubtypeEntry {
    base: TypeId,
    base_path: fn() -> &'static str,
    concrete: TypeId,
    concrete_path: fn() -> &'static str,
    name: &'static str,
    deserialize: DeserializeFn,
}

inventory::collect!(SubtypeEntry);

impl SubtypeEntry {
    pub const fn of<B: ?Sized + 'static, C: SubtypeOf<B>>(name: &'static str) -> Self {
        Self {
            base: TypeId::of::<B>(),
            base_path: type_name::<B>,
            concrete: TypeId::of::<C>(),
            concrete_path: type_name::<C>,
            name,
            deserialize: deserialize_as::<B, C>,
        }
    }

    /// Every entry submitted with [`subtype!`](crate::subtype!), in no
    /// particular order.
    pub fn submitted() -> impl Iterator<Item = &'static SubtypeEntry> {
        inventory::iter::<SubtypeEntry>.into_iter()
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn base(&self) -> TypeId {
        self.base
    }

    #[inline]
    pub fn base_path(&self) -> &'static str {
        (self.base_path)()
    }

    #[inline]
    pub fn concrete(&self) -> TypeId {
        self.concrete
    }

    #[inline]
    pub fn concrete_path(&self) -> &'static str {
        (self.concrete_path)()
    }

    /// Whether this entry is of the base `B`.
    #[inline]
    pub fn is_of<B: ?Sized + 'static>(&self) -> bool {
        self.base == TypeId::of::<B>()
    }

    /// Reads the concrete type, returned as a `Box<B>` inside the `Any`.
    pub(crate) fn deserialize(
        &self,
        deserializer: &mut dyn erased_serde::Deserializer<'_>,
    ) -> Result<Box<dyn Any>, erased_serde::Error> {
        (self.deserialize)(deserializer)
    }
}

impl fmt::Debug for SubtypeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubtypeEntry")
            .field("name", &self.name)
            .field("base", &self.base_path())
            .field("concrete", &self.concrete_path())
            .finish()
    }
}

fn deserialize_as<B: ?Sized + 'static, C: SubtypeOf<B>>(
    deserializer: &mut dyn erased_serde::Deserializer<'_>,
) -> Result<Box<dyn Any>, erased_serde::Error> {
    let value: C = erased_serde::deserialize(deserializer)?;
    Ok(Box::new(C::upcast(Box::new(value))))
}

// -----------------------------------------------------------------------------
// SubtypeProvider

/// Registers subtypes by code, such as those of a plugin.
///
/// Submit one with [`subtype_provider!`](crate::subtype_provider!).
pub struct SubtypeProvider {
    name: &'static str,
    provide: fn(&mut SubtypeRegistry),
}

inventory::collect!(SubtypeProvider);

impl SubtypeProvider {
    pub const fn new(name: &'static str, provide: fn(&mut SubtypeRegistry)) -> Self {
        Self { name, provide }
    }

    pub fn submitted() -> impl Iterator<Item = &'static SubtypeProvider> {
        inventory::iter::<SubtypeProvider>.into_iter()
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn provide(&self, registry: &mut SubtypeRegistry) {
        (self.provide)(registry);
    }
}

impl fmt::Debug for SubtypeProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubtypeProvider").field("name", &self.name).finish_non_exhaustive()
    }
}
