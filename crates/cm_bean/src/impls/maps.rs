use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::fmt;
use core::hash::{BuildHasher, Hash};

use crate::impls::clone_as;
use crate::value::{Map, impl_value_cast_fn};
use crate::{BeanError, Value};

macro_rules! impl_map {
    (impl[$($generics:tt)*] $ty:ty) => {
        impl<$($generics)*> Value for $ty {
            impl_value_cast_fn!(Map);

            fn clone_value(&self) -> Result<Box<dyn Value>, BeanError> {
                let cloned = self
                    .iter()
                    .map(|(k, v)| Ok((clone_as::<K>(k)?, clone_as::<V>(v)?)))
                    .collect::<Result<$ty, BeanError>>()?;
                Ok(Box::new(cloned))
            }

            fn value_eq(&self, other: &dyn Value) -> Option<bool> {
                let Some(other) = other.downcast_ref::<Self>() else {
                    return Some(false);
                };
                if self.len() != other.len() {
                    return Some(false);
                }
                for (key, value) in self.iter() {
                    let Some(other_value) = other.get(key) else {
                        return Some(false);
                    };
                    match value.value_eq(other_value) {
                        Some(true) => {}
                        result => return result,
                    }
                }
                Some(true)
            }

            fn value_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_map()
                    .entries(self.iter().map(|(k, v)| (k as &dyn Value, v as &dyn Value)))
                    .finish()
            }
        }

        impl<$($generics)*> Map for $ty {
            #[inline]
            fn len(&self) -> usize {
                <$ty>::len(self)
            }

            fn iter_entries(&self) -> Box<dyn Iterator<Item = (&dyn Value, &dyn Value)> + '_> {
                Box::new(self.iter().map(|(k, v)| (k as &dyn Value, v as &dyn Value)))
            }
        }
    };
}

impl_map!(impl[K: Value + Ord, V: Value] BTreeMap<K, V>);
impl_map!(
    impl[K: Value + Eq + Hash, V: Value, S: BuildHasher + Default + Send + Sync + 'static]
    std::collections::HashMap<K, V, S>
);
impl_map!(
    impl[K: Value + Eq + Hash, V: Value, S: BuildHasher + Default + Send + Sync + 'static]
    cm_utils::hash::hashbrown::HashMap<K, V, S>
);

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;

    use cm_utils::hash::HashMap;

    use crate::{Value, ValueRef};

    #[test]
    fn entries_and_eq() {
        let mut map = BTreeMap::new();
        map.insert(String::from("a"), 1_i32);
        map.insert(String::from("b"), 2_i32);
        let value: &dyn Value = &map;

        let ValueRef::Map(entries) = value.value_ref() else {
            panic!("expected a map");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(format!("{value:?}"), "{\"a\": 1, \"b\": 2}");

        let mut other = map.clone();
        assert_eq!(value.value_eq(&other), Some(true));
        other.insert(String::from("b"), 3);
        assert_eq!(value.value_eq(&other), Some(false));
    }

    #[test]
    fn hash_map_clone() {
        let mut map: HashMap<u8, Option<String>> = HashMap::default();
        map.insert(1, Some(String::from("x")));
        map.insert(2, None);

        let cloned = (&map as &dyn Value).clone_value().unwrap();
        let cloned = cloned.take::<HashMap<u8, Option<String>>>().unwrap();
        assert_eq!(cloned, map);
    }
}
