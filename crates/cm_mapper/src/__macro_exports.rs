//! Paths used by the exported macros.

pub use alloc::boxed::Box;
pub use inventory;
