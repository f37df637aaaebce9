//! Parsed input of `#[derive(Bean)]` and `#[bean_methods]`.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod bean_methods;
mod bean_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, MethodAttributes, TypeAttributes};
pub(crate) use bean_methods::{BeanMethods, MethodShape, ReturnShape};
pub(crate) use bean_struct::{BeanField, BeanStruct};
