use alloc::boxed::Box;
use core::fmt;
use core::ops::Deref;

use crate::{BeanError, Value};

// -----------------------------------------------------------------------------
// PropertyValue

/// The result of a getter: borrowed from the bean, or computed.
///
/// Computed values have no stable address, so identity-based bookkeeping
/// keeps them alive while it needs them.
pub enum PropertyValue<'a> {
    Borrowed(&'a dyn Value),
    Owned(Box<dyn Value>),
}

impl<'a> PropertyValue<'a> {
    #[inline]
    pub fn borrowed<T: Value>(value: &'a T) -> Self {
        Self::Borrowed(value)
    }

    #[inline]
    pub fn owned<T: Value>(value: T) -> Self {
        Self::Owned(Box::new(value))
    }

    #[inline]
    pub fn is_borrowed(&self) -> bool {
        matches!(self, Self::Borrowed(_))
    }

    /// Turns the value into an owned one, cloning borrowed values.
    pub fn into_owned(self) -> Result<Box<dyn Value>, BeanError> {
        match self {
            Self::Borrowed(value) => value.clone_value(),
            Self::Owned(value) => Ok(value),
        }
    }
}

impl Deref for PropertyValue<'_> {
    type Target = dyn Value;

    #[inline]
    fn deref(&self) -> &Self::Target {
        match self {
            Self::Borrowed(value) => *value,
            Self::Owned(value) => &**value,
        }
    }
}

impl fmt::Debug for PropertyValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (**self).value_debug(f)
    }
}
