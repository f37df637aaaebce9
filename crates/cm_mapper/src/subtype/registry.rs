use alloc::collections::BTreeMap;
use core::any::TypeId;

use cm_utils::TypeIdMap;
use cm_utils::hash::HashMap;
use log::{trace, warn};

use super::{SubtypeEntry, SubtypeOf};

/// Subtype names known to a mapper, per base.
///
/// A name identifies one concrete type within its base, and a concrete type
/// has one name per base. The first registration wins either way.
#[derive(Clone, Debug, Default)]
pub struct SubtypeRegistry {
    by_name: TypeIdMap<BTreeMap<&'static str, SubtypeEntry>>,
    by_type: HashMap<(TypeId, TypeId), &'static str>,
}

impl SubtypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every submitted entry.
    pub fn submitted() -> Self {
        let mut registry = Self::new();
        registry.extend_sorted(SubtypeEntry::submitted().copied());
        registry
    }

    /// Adds `entry`, returns `false` if its name or type was taken.
    pub fn register(&mut self, entry: SubtypeEntry) -> bool {
        let names = self.by_name.get_or_insert(entry.base(), BTreeMap::new);
        if let Some(existing) = names.get(entry.name()) {
            if existing.concrete() != entry.concrete() {
                warn!(
                    "subtype name `{}` of `{}` is taken by `{}`, `{}` is ignored",
                    entry.name(),
                    entry.base_path(),
                    existing.concrete_path(),
                    entry.concrete_path(),
                );
            }
            return false;
        }
        let key = (entry.base(), entry.concrete());
        if let Some(name) = self.by_type.get(&key) {
            warn!(
                "`{}` is already named `{name}` for `{}`, `{}` is ignored",
                entry.concrete_path(),
                entry.base_path(),
                entry.name(),
            );
            return false;
        }
        trace!("subtype `{}` of `{}`: `{}`", entry.name(), entry.base_path(), entry.concrete_path());
        names.insert(entry.name(), entry);
        self.by_type.insert(key, entry.name());
        true
    }

    /// Registers `C` as `name` for the base `B`.
    pub fn register_subtype<B: ?Sized + 'static, C: SubtypeOf<B>>(&mut self, name: &'static str) -> bool {
        self.register(SubtypeEntry::of::<B, C>(name))
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = SubtypeEntry>) {
        for entry in entries {
            self.register(entry);
        }
    }

    /// Registers `entries` ordered by base, name and concrete type path, so
    /// conflicts resolve the same way whatever order they arrive in.
    ///
    /// Submission order differs between builds; submitted entries go through
    /// here.
    pub fn extend_sorted(&mut self, entries: impl IntoIterator<Item = SubtypeEntry>) {
        let mut entries: Vec<SubtypeEntry> = entries.into_iter().collect();
        entries.sort_by_key(|entry| (entry.base_path(), entry.name(), entry.concrete_path()));
        self.extend(entries);
    }

    /// The entry registered as `name` for `base`.
    pub fn get(&self, base: TypeId, name: &str) -> Option<&SubtypeEntry> {
        self.by_name.get(&base)?.get(name)
    }

    /// The name of `concrete` for `base`.
    pub fn name_of(&self, base: TypeId, concrete: TypeId) -> Option<&'static str> {
        self.by_type.get(&(base, concrete)).copied()
    }

    /// The entries of the base `B`, ordered by name.
    pub fn subtypes_of<B: ?Sized + 'static>(&self) -> impl Iterator<Item = &SubtypeEntry> {
        self.by_name.get(&TypeId::of::<B>()).into_iter().flat_map(BTreeMap::values)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::SubtypeRegistry;
    use crate::Subtype;

    trait Pet: Subtype {}
    crate::poly_base!(dyn Pet);

    #[derive(Serialize, Deserialize)]
    struct Cat;
    #[derive(Serialize, Deserialize)]
    struct Dog;

    impl Pet for Cat {}
    impl Pet for Dog {}
    crate::impl_subtype!(dyn Pet => Cat);
    crate::impl_subtype!(dyn Pet => Dog);

    #[test]
    fn first_registration_wins() {
        let mut registry = SubtypeRegistry::new();
        assert!(registry.register_subtype::<dyn Pet, Cat>("cat"));
        assert!(!registry.register_subtype::<dyn Pet, Dog>("cat"));
        assert!(!registry.register_subtype::<dyn Pet, Cat>("kitty"));
        assert!(registry.register_subtype::<dyn Pet, Dog>("dog"));

        let names: Vec<_> = registry.subtypes_of::<dyn Pet>().map(|e| e.name()).collect();
        assert_eq!(names, ["cat", "dog"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn sorted_conflicts_ignore_arrival_order() {
        use crate::SubtypeEntry;

        let cat = SubtypeEntry::of::<dyn Pet, Cat>("pet");
        let dog = SubtypeEntry::of::<dyn Pet, Dog>("pet");

        for entries in [[cat, dog], [dog, cat]] {
            let mut registry = SubtypeRegistry::new();
            registry.extend_sorted(entries);
            let winner = registry.get(core::any::TypeId::of::<dyn Pet>(), "pet").unwrap();
            assert!(winner.concrete_path().ends_with("::Cat"), "{}", winner.concrete_path());
            assert_eq!(registry.len(), 1);
        }
    }

    #[test]
    fn lookups() {
        use core::any::TypeId;

        let mut registry = SubtypeRegistry::new();
        registry.register_subtype::<dyn Pet, Dog>("dog");

        let base = TypeId::of::<dyn Pet>();
        assert_eq!(registry.name_of(base, TypeId::of::<Dog>()), Some("dog"));
        assert_eq!(registry.name_of(base, TypeId::of::<Cat>()), None);
        assert!(registry.get(base, "dog").is_some_and(|e| e.concrete_path().ends_with("Dog")));
        assert!(registry.get(TypeId::of::<Dog>(), "dog").is_none());
        assert_eq!(registry.subtypes_of::<Dog>().count(), 0);
    }
}
