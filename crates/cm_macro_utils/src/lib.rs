//! Helpers shared by the workspace's proc-macro crates.
//!
//! [`Manifest`] finds the path under which the invoking crate depends on a
//! workspace crate, so generated code can name `cm_bean` even when it is
//! reached through the `cm_core` facade.
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro crate")]

extern crate proc_macro;

// -----------------------------------------------------------------------------
// Modules

mod manifest;

// -----------------------------------------------------------------------------
// Top-level exports

pub use manifest::Manifest;
