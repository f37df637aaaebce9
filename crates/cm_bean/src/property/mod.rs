//! Properties: named values read and written through accessor methods.
//!
//! Accessors are found by naming convention, see [`ReadConvention`] and
//! [`WriteConvention`]. A [`PropertyDescriptor`] resolves its accessors on
//! first use and caches them.

// -----------------------------------------------------------------------------
// Modules

mod convention;
mod descriptor;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use convention::{ReadConvention, WriteConvention, resolve_read, resolve_write};
pub use descriptor::{PropertyDescriptor, properties};
pub use value::PropertyValue;
