//! [`Value`] implementations for standard types, plus the static cells used
//! by generated [`TypedBean`](crate::TypedBean) implementations.

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod collections;
mod maps;
mod option;
mod pointer;
mod scalar;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{BeanInfoCell, GenericBeanInfoCell};

use crate::{BeanError, Value};

/// Clones `value` through [`Value::clone_value`] and unboxes the result.
pub fn clone_as<T: Value>(value: &T) -> Result<T, BeanError> {
    value
        .clone_value()?
        .take::<T>()
        .map_err(|other| BeanError::NotCloneable {
            type_path: other.value_type_path(),
        })
}
