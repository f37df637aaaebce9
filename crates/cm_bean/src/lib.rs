#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Compilation config

/// Some macros used for compilation control.
pub mod cfg {
    cm_cfg::define_alias! {
        #[cfg(all(debug_assertions, feature = "debug"))] => debug,
    }
}

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names this crate `cm_bean`, including inside its own tests.
extern crate self as cm_bean;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod bean;
mod error;

pub mod impls;
pub mod info;
pub mod property;
pub mod util;
pub mod value;
pub mod visit;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use bean::{Bean, TypedBean};
pub use cm_bean_derive as derive;
pub use cm_bean_derive::{Bean, bean_methods};
pub use error::{BeanError, InvokeError};
pub use property::{PropertyDescriptor, PropertyValue};
pub use value::{Value, ValueKind, ValueMut, ValueRef};
