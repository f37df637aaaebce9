//! The dynamic value model.
//!
//! Everything reachable through bean properties implements [`Value`]. A value
//! reports its shape through [`Value::value_ref`]:
//!
//! - [`ValueRef::Scalar`]: leaves such as numbers, strings, durations and paths.
//! - [`ValueRef::Optional`]: `Option<T>`, where `None` is the null value.
//! - [`ValueRef::Collection`]: `Vec`, `VecDeque` and sets.
//! - [`ValueRef::Map`]: `BTreeMap` and hash maps.
//! - [`ValueRef::Bean`]: types deriving [`Bean`](crate::Bean).
//! - [`ValueRef::Shared`]: `parking_lot::RwLock<T>`, usually behind an `Arc`,
//!   the only way to build cyclic object graphs.
//!
//! `Box<T>` and `Arc<T>` are transparent: they report the shape of the pointee.

// -----------------------------------------------------------------------------
// Modules

mod kind;
mod ops;

// -----------------------------------------------------------------------------
// Exports

pub use kind::{ValueKind, ValueMut, ValueRef};
pub use ops::{Collection, Map, Shared};

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::BeanError;

// -----------------------------------------------------------------------------
// Value

/// A dynamically inspectable value.
///
/// Implemented for the common scalar, collection and pointer types by this
/// crate, for beans by `#[derive(Bean)]`, and for user scalars through
/// [`impl_scalar!`](crate::impl_scalar).
///
/// `Any::type_id` on a `Box<dyn Value>` returns the id of the box. Use
/// [`Value::ty_id`] instead:
///
/// ```
/// use core::any::{Any, TypeId};
/// use cm_bean::Value;
///
/// let x: Box<dyn Value> = Box::new(7_i32);
/// assert!(x.type_id() != TypeId::of::<i32>());
/// assert!(x.ty_id() == TypeId::of::<i32>());
/// ```
pub trait Value: Any + Send + Sync {
    /// The [`TypeId`] of the concrete type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// The full path of the concrete type, as given by [`core::any::type_name`].
    #[inline]
    fn value_type_path(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    fn value_ref(&self) -> ValueRef<'_>;

    fn value_mut(&mut self) -> ValueMut<'_>;

    /// Returns an independent copy of this value.
    fn clone_value(&self) -> Result<Box<dyn Value>, BeanError>;

    /// Compares with another value. `None` means equality is not defined for
    /// this type.
    #[inline]
    fn value_eq(&self, _other: &dyn Value) -> Option<bool> {
        None
    }

    /// Debug-style rendering, used by `impl Debug for dyn Value`.
    fn value_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value_type_path())
    }

    /// Human-readable rendering, used by textual projections.
    ///
    /// Defaults to [`Value::value_debug`]. Strings render without quotes.
    fn value_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value_debug(f)
    }
}

impl dyn Value {
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn kind(&self) -> ValueKind {
        self.value_ref().kind()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn Value>) -> Result<Box<T>, Box<dyn Value>> {
        if self.is::<T>() {
            let any: Box<dyn Any> = self;
            any.downcast::<T>()
                .map_err(|_| unreachable!("type is already checked"))
        } else {
            Err(self)
        }
    }

    #[inline]
    pub fn take<T: Any>(self: Box<dyn Value>) -> Result<T, Box<dyn Value>> {
        self.downcast::<T>().map(|boxed| *boxed)
    }

    /// Wraps the value in a [`Display`](fmt::Display) adapter that uses
    /// [`Value::value_display`].
    #[inline]
    pub fn display(&self) -> impl fmt::Display + '_ {
        DisplayValue(self)
    }
}

impl fmt::Debug for dyn Value {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value_debug(f)
    }
}

struct DisplayValue<'a>(&'a dyn Value);

impl fmt::Display for DisplayValue<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.value_display(f)
    }
}

/// The address of the value's data, used as its identity.
#[inline]
pub fn address_of(value: &dyn Value) -> usize {
    core::ptr::from_ref(value).cast::<()>() as usize
}

// -----------------------------------------------------------------------------
// Auxiliary macro

macro_rules! impl_value_cast_fn {
    ($kind:ident) => {
        #[inline]
        fn value_ref(&self) -> $crate::value::ValueRef<'_> {
            $crate::value::ValueRef::$kind(self)
        }

        #[inline]
        fn value_mut(&mut self) -> $crate::value::ValueMut<'_> {
            $crate::value::ValueMut::$kind(self)
        }
    };
}

pub(crate) use impl_value_cast_fn;
