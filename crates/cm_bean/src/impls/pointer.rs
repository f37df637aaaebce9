use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;

use parking_lot::RwLock;

use crate::impls::clone_as;
use crate::value::{Shared, address_of};
use crate::{BeanError, Value, ValueMut, ValueRef};

// -----------------------------------------------------------------------------
// Box

/// Transparent: reports the shape of the pointee.
impl<T: Value> Value for Box<T> {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        (**self).value_ref()
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        (**self).value_mut()
    }

    fn clone_value(&self) -> Result<Box<dyn Value>, BeanError> {
        Ok(Box::new(Box::new(clone_as::<T>(self)?)))
    }

    fn value_eq(&self, other: &dyn Value) -> Option<bool> {
        match other.downcast_ref::<Self>() {
            Some(other) => (**self).value_eq(&**other),
            None => (**self).value_eq(other),
        }
    }

    fn value_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).value_debug(f)
    }

    fn value_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).value_display(f)
    }
}

// -----------------------------------------------------------------------------
// Arc

/// Transparent: reports the shape of the pointee.
///
/// Cloning shares the pointee. Mutation goes through the pointee when the
/// `Arc` is unique, or through the lock when the pointee is [`Shared`].
impl<T: Value> Value for Arc<T> {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        (**self).value_ref()
    }

    fn value_mut(&mut self) -> ValueMut<'_> {
        if Arc::get_mut(self).is_some() {
            return match Arc::get_mut(self) {
                Some(inner) => inner.value_mut(),
                None => ValueMut::Immutable,
            };
        }
        match (**self).value_ref() {
            ValueRef::Shared(shared) => ValueMut::Shared(shared),
            _ => ValueMut::Immutable,
        }
    }

    fn clone_value(&self) -> Result<Box<dyn Value>, BeanError> {
        Ok(Box::new(Arc::clone(self)))
    }

    fn value_eq(&self, other: &dyn Value) -> Option<bool> {
        match other.downcast_ref::<Self>() {
            Some(other) if Arc::ptr_eq(self, other) => Some(true),
            Some(other) => (**self).value_eq(&**other),
            None => (**self).value_eq(other),
        }
    }

    fn value_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).value_debug(f)
    }

    fn value_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).value_display(f)
    }
}

// -----------------------------------------------------------------------------
// RwLock

impl<T: Value> Value for RwLock<T> {
    crate::value::impl_value_cast_fn!(Shared);

    fn clone_value(&self) -> Result<Box<dyn Value>, BeanError> {
        let inner = clone_as::<T>(&*self.read())?;
        Ok(Box::new(RwLock::new(inner)))
    }

    fn value_eq(&self, other: &dyn Value) -> Option<bool> {
        let Some(other) = other.downcast_ref::<Self>() else {
            return Some(false);
        };
        if core::ptr::eq(self, other) {
            return Some(true);
        }
        let (a, b) = (self.read(), other.read());
        a.value_eq(&*b)
    }

    fn value_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.try_read() {
            Some(guard) => guard.value_debug(f),
            None => write!(f, "<locked {}@{:x}>", self.value_type_path(), address_of(self)),
        }
    }
}

impl<T: Value> Shared for RwLock<T> {
    fn read_with(&self, f: &mut dyn FnMut(&dyn Value)) {
        f(&*self.read());
    }

    fn write_with(&self, f: &mut dyn FnMut(&mut dyn Value)) {
        f(&mut *self.write());
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::sync::Arc;

    use parking_lot::RwLock;

    use crate::value::address_of;
    use crate::{Value, ValueKind, ValueMut};

    #[test]
    fn box_is_transparent() {
        let boxed = Box::new(String::from("x"));
        let value: &dyn Value = &boxed;
        let payload = value.value_ref().payload().unwrap();

        assert_eq!(value.kind(), ValueKind::Scalar);
        assert!(payload.is::<String>());
        assert_eq!(address_of(payload), address_of(&*boxed));
    }

    #[test]
    fn arc_clone_shares_pointee() {
        let shared = Arc::new(RwLock::new(3_i32));
        let cloned = (&shared as &dyn Value).clone_value().unwrap();
        let cloned = cloned.take::<Arc<RwLock<i32>>>().unwrap();

        assert!(Arc::ptr_eq(&shared, &cloned));
        assert_eq!((&shared as &dyn Value).kind(), ValueKind::Shared);
    }

    #[test]
    fn aliased_arc_is_immutable_unless_shared() {
        let mut plain = Arc::new(1_u8);
        let _alias = Arc::clone(&plain);
        assert!(matches!((&mut plain as &mut dyn Value).value_mut(), ValueMut::Immutable));

        let mut locked = Arc::new(RwLock::new(1_u8));
        let _alias = Arc::clone(&locked);
        assert!(matches!((&mut locked as &mut dyn Value).value_mut(), ValueMut::Shared(_)));
    }

    #[test]
    fn write_through_lock() {
        let lock = RwLock::new(String::from("a"));
        crate::value::Shared::write_with(&lock, &mut |value| {
            if let Some(s) = value.downcast_mut::<String>() {
                s.push('b');
            }
        });
        assert_eq!(*lock.read(), "ab");
    }
}
