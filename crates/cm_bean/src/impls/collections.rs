use alloc::boxed::Box;
use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use core::fmt;
use core::hash::{BuildHasher, Hash};

use crate::impls::clone_as;
use crate::value::{Collection, impl_value_cast_fn};
use crate::{BeanError, Value};

// -----------------------------------------------------------------------------
// Helpers

fn seq_eq<'a, T: Value>(
    mut a: impl Iterator<Item = &'a T>,
    mut b: impl Iterator<Item = &'a T>,
) -> Option<bool> {
    loop {
        match (a.next(), b.next()) {
            (None, None) => return Some(true),
            (Some(x), Some(y)) => match x.value_eq(y) {
                Some(true) => {}
                other => return other,
            },
            _ => return Some(false),
        }
    }
}

fn debug_list<'a, T: Value>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = &'a T>,
) -> fmt::Result {
    f.debug_list()
        .entries(items.map(|v| v as &dyn Value))
        .finish()
}

// -----------------------------------------------------------------------------
// Sequences

macro_rules! impl_sequence {
    ($ty:ident) => {
        impl<T: Value> Value for $ty<T> {
            impl_value_cast_fn!(Collection);

            fn clone_value(&self) -> Result<Box<dyn Value>, BeanError> {
                let cloned = self.iter().map(clone_as::<T>).collect::<Result<$ty<T>, _>>()?;
                Ok(Box::new(cloned))
            }

            fn value_eq(&self, other: &dyn Value) -> Option<bool> {
                match other.downcast_ref::<Self>() {
                    Some(other) => seq_eq(self.iter(), other.iter()),
                    None => Some(false),
                }
            }

            fn value_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                debug_list(f, self.iter())
            }
        }

        impl<T: Value> Collection for $ty<T> {
            #[inline]
            fn len(&self) -> usize {
                <$ty<T>>::len(self)
            }

            fn iter_values(&self) -> Box<dyn Iterator<Item = &dyn Value> + '_> {
                Box::new(self.iter().map(|v| v as &dyn Value))
            }
        }
    };
}

impl_sequence!(Vec);
impl_sequence!(VecDeque);

// -----------------------------------------------------------------------------
// Sets

macro_rules! impl_set {
    (impl[$($generics:tt)*] $ty:ty) => {
        impl<$($generics)*> Value for $ty {
            impl_value_cast_fn!(Collection);

            fn clone_value(&self) -> Result<Box<dyn Value>, BeanError> {
                let cloned = self.iter().map(clone_as::<T>).collect::<Result<$ty, _>>()?;
                Ok(Box::new(cloned))
            }

            fn value_eq(&self, other: &dyn Value) -> Option<bool> {
                Some(other.downcast_ref::<Self>().is_some_and(|other| self == other))
            }

            fn value_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_set()
                    .entries(self.iter().map(|v| v as &dyn Value))
                    .finish()
            }
        }

        impl<$($generics)*> Collection for $ty {
            #[inline]
            fn len(&self) -> usize {
                <$ty>::len(self)
            }

            fn iter_values(&self) -> Box<dyn Iterator<Item = &dyn Value> + '_> {
                Box::new(self.iter().map(|v| v as &dyn Value))
            }
        }
    };
}

impl_set!(impl[T: Value + Ord] BTreeSet<T>);
impl_set!(
    impl[T: Value + Eq + Hash, S: BuildHasher + Default + Send + Sync + 'static]
    std::collections::HashSet<T, S>
);
impl_set!(
    impl[T: Value + Eq + Hash, S: BuildHasher + Default + Send + Sync + 'static]
    cm_utils::hash::hashbrown::HashSet<T, S>
);

#[cfg(test)]
mod tests {
    use alloc::collections::{BTreeSet, VecDeque};
    use alloc::string::String;
    use alloc::vec::Vec;

    use crate::{Value, ValueRef};

    #[test]
    fn list_iteration_and_eq() {
        let list = vec![String::from("a"), String::from("b")];
        let value: &dyn Value = &list;

        let ValueRef::Collection(items) = value.value_ref() else {
            panic!("expected a collection");
        };
        assert_eq!(items.len(), 2);
        let rendered: Vec<String> = items.iter_values().map(|v| format!("{}", v.display())).collect();
        assert_eq!(rendered, ["a", "b"]);

        assert_eq!(value.value_eq(&list.clone()), Some(true));
        assert_eq!(value.value_eq(&vec![String::from("a")]), Some(false));
    }

    #[test]
    fn deep_clone() {
        let deque: VecDeque<Option<u8>> = VecDeque::from([Some(1), None]);
        let cloned = (&deque as &dyn Value).clone_value().unwrap();
        assert_eq!(cloned.take::<VecDeque<Option<u8>>>().unwrap(), deque);
    }

    #[test]
    fn sets_compare_by_content() {
        let a: std::collections::HashSet<u32> = [1, 2, 3].into_iter().collect();
        let b: std::collections::HashSet<u32> = [3, 2, 1].into_iter().collect();
        assert_eq!((&a as &dyn Value).value_eq(&b), Some(true));

        let tree: BTreeSet<u32> = [2, 1].into_iter().collect();
        assert_eq!(format!("{:?}", &tree as &dyn Value), "{1, 2}");
    }
}
