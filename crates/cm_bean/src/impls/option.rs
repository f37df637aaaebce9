use alloc::boxed::Box;
use core::fmt;

use crate::impls::clone_as;
use crate::{BeanError, Value, ValueMut, ValueRef};

/// `None` is the null value of the bean utilities.
impl<T: Value> Value for Option<T> {
    #[inline]
    fn value_ref(&self) -> ValueRef<'_> {
        ValueRef::Optional(self.as_ref().map(|v| v as &dyn Value))
    }

    #[inline]
    fn value_mut(&mut self) -> ValueMut<'_> {
        ValueMut::Optional(self.as_mut().map(|v| v as &mut dyn Value))
    }

    fn clone_value(&self) -> Result<Box<dyn Value>, BeanError> {
        let cloned = match self {
            Some(value) => Some(clone_as::<T>(value)?),
            None => None,
        };
        Ok(Box::new(cloned))
    }

    fn value_eq(&self, other: &dyn Value) -> Option<bool> {
        let Some(other) = other.downcast_ref::<Self>() else {
            return Some(false);
        };
        match (self, other) {
            (None, None) => Some(true),
            (Some(a), Some(b)) => a.value_eq(b),
            _ => Some(false),
        }
    }

    fn value_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(value) => {
                f.write_str("Some(")?;
                value.value_debug(f)?;
                f.write_str(")")
            }
            None => f.write_str("None"),
        }
    }

    fn value_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(value) => value.value_display(f),
            None => f.write_str("null"),
        }
    }
}
