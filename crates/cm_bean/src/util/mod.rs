//! Operations on beans through their properties: single property access,
//! copying, cloning, diffing and flat projections.
//!
//! All functions look through `Option`, `Box`, `Arc` and shared locks to
//! reach the bean. A `None` bean is treated as absent, not as an error.

// -----------------------------------------------------------------------------
// Modules

mod access;
mod copy;
mod diff;
mod project;
mod render;

// -----------------------------------------------------------------------------
// Exports

pub use access::{get_property, read_bean, read_property, set_property, write_bean, write_property};
pub use copy::{clone_bean, clone_value, clone_via_properties, copy_properties, copy_properties_over_nulls};
pub use diff::diff;
pub use project::{to_map, to_properties};
pub use render::fmt_bean;
