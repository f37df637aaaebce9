use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;

use thiserror::Error;

use crate::value::Value;

// -----------------------------------------------------------------------------
// InvokeError

/// Failure of a single accessor call, before it is attributed to a property.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("receiver is `{found}`, expected `{expected}`")]
    Receiver {
        expected: &'static str,
        found: &'static str,
    },
    #[error("argument is `{found}`, expected `{expected}`")]
    Argument {
        expected: &'static str,
        found: &'static str,
    },
    #[error("`{method}` is not an accessor")]
    NotAccessor { method: &'static str },
    #[error("target is aliased and cannot be written")]
    Aliased,
}

impl InvokeError {
    /// Downcasts the receiver of a read accessor.
    #[inline]
    pub fn receiver<T: Value>(this: &dyn Value) -> Result<&T, Self> {
        this.downcast_ref::<T>().ok_or(Self::Receiver {
            expected: core::any::type_name::<T>(),
            found: this.value_type_path(),
        })
    }

    /// Downcasts the receiver of a write accessor.
    #[inline]
    pub fn receiver_mut<T: Value>(this: &mut dyn Value) -> Result<&mut T, Self> {
        let found = this.value_type_path();
        this.downcast_mut::<T>().ok_or(Self::Receiver {
            expected: core::any::type_name::<T>(),
            found,
        })
    }

    /// Unboxes the argument of a write accessor.
    #[inline]
    pub fn argument<T: Value>(value: Box<dyn Value>) -> Result<T, Self> {
        value.take::<T>().map_err(|value| Self::Argument {
            expected: core::any::type_name::<T>(),
            found: value.value_type_path(),
        })
    }
}

// -----------------------------------------------------------------------------
// BeanError

/// Errors raised by bean introspection and the bean utilities.
///
/// A missing property is never an error: lookups return `None` or `false`.
#[derive(Debug, Error)]
pub enum BeanError {
    #[error("cannot invoke `{method}` for property `{property}` of `{type_path}`")]
    Invoke {
        type_path: &'static str,
        property: Cow<'static, str>,
        method: &'static str,
        #[source]
        source: InvokeError,
    },
    #[error("`{type_path}` has no no-arg constructor")]
    Instantiate { type_path: &'static str },
    #[error("`{type_path}` is not a bean")]
    NotABean { type_path: &'static str },
    #[error("value of type `{type_path}` cannot be cloned")]
    NotCloneable { type_path: &'static str },
    #[error("`{type_path}` has no property `{property}`")]
    NoSuchProperty {
        type_path: &'static str,
        property: String,
    },
    #[error("property `{property}` of `{type_path}` is not readable")]
    NotReadable {
        type_path: &'static str,
        property: String,
    },
    #[error("property `{property}` of `{type_path}` is not writable")]
    NotWritable {
        type_path: &'static str,
        property: String,
    },
    #[error("property `{property}` is `{found}`, expected `{expected}`")]
    TypeMismatch {
        property: String,
        expected: &'static str,
        found: &'static str,
    },
}
