//! Static metadata describing beans: their type, fields and methods.
//!
//! - [`TypeDesc`]: id and path of a type.
//! - [`FieldInfo`]: a named field with its type and visibility.
//! - [`MethodInfo`]: an accessor-shaped method registered by
//!   [`#[bean_methods]`](crate::bean_methods), with an erased invoker.
//! - [`BeanInfo`]: everything above for one bean type, plus the lazily
//!   resolved property table.

// -----------------------------------------------------------------------------
// Modules

mod bean_info;
mod field_info;
mod method_info;
mod method_table;
mod type_desc;

// -----------------------------------------------------------------------------
// Exports

pub use bean_info::BeanInfo;
pub use field_info::FieldInfo;
pub use method_info::{Invoker, MethodInfo, MethodRegistration, ReadFn, Receiver, Returns, WriteFn};
pub use method_table::MethodTable;
pub use type_desc::{TypeDesc, short_type_name};
