use alloc::boxed::Box;
use alloc::string::String;

use crate::{Bean, BeanError, PropertyValue, Value, ValueMut, ValueRef};

// -----------------------------------------------------------------------------
// Reaching the bean

/// Runs `f` with the bean behind `value`.
///
/// Returns `None` when there is no bean: `value` is `None` or not a bean.
pub fn read_bean<R>(value: &dyn Value, f: impl FnOnce(&dyn Bean) -> R) -> Option<R> {
    match value.value_ref() {
        ValueRef::Bean(bean) => Some(f(bean)),
        ValueRef::Optional(Some(inner)) => read_bean(inner, f),
        ValueRef::Shared(shared) => {
            let mut f = Some(f);
            let mut result = None;
            shared.read_with(&mut |inner: &dyn Value| {
                if let Some(f) = f.take() {
                    result = read_bean(inner, f);
                }
            });
            result
        }
        _ => None,
    }
}

/// Runs `f` with the bean behind `value`, mutably.
///
/// Shared beans are write-locked for the duration of `f`. An `Arc` whose
/// pointee is aliased and not shared through a lock is not writable.
pub fn write_bean<R>(value: &mut dyn Value, f: impl FnOnce(&mut dyn Bean) -> R) -> Option<R> {
    match value.value_mut() {
        ValueMut::Bean(bean) => Some(f(bean)),
        ValueMut::Optional(Some(inner)) => write_bean(inner, f),
        ValueMut::Shared(shared) => {
            let mut f = Some(f);
            let mut result = None;
            shared.write_with(&mut |inner: &mut dyn Value| {
                if let Some(f) = f.take() {
                    result = write_bean(inner, f);
                }
            });
            result
        }
        _ => None,
    }
}

fn is_null(value: &dyn Value) -> bool {
    match value.value_ref() {
        ValueRef::Optional(None) => true,
        ValueRef::Optional(Some(inner)) => is_null(inner),
        _ => false,
    }
}

// -----------------------------------------------------------------------------
// Single property access

/// Reads property `name`.
///
/// `Ok(None)` when the bean is `None` or has no readable property `name`.
/// Values behind a shared lock are returned as owned copies.
pub fn get_property<'a>(value: &'a dyn Value, name: &str) -> Result<Option<PropertyValue<'a>>, BeanError> {
    match value.value_ref() {
        ValueRef::Bean(bean) => {
            let this: &'a dyn Value = bean;
            bean.bean_info().descriptor(name).read(this)
        }
        ValueRef::Optional(None) => Ok(None),
        ValueRef::Optional(Some(inner)) => get_property(inner, name),
        ValueRef::Shared(_) => {
            let copy = read_bean(value, |bean| -> Result<_, BeanError> {
                let this: &dyn Value = bean;
                match bean.bean_info().descriptor(name).read(this)? {
                    Some(found) => found.into_owned().map(Some),
                    None => Ok(None),
                }
            });
            Ok(copy.transpose()?.flatten().map(PropertyValue::Owned))
        }
        _ => Err(BeanError::NotABean {
            type_path: value.value_type_path(),
        }),
    }
}

/// Writes property `name`.
///
/// Returns `false` when the bean is `None` or has no writable property
/// `name`. A value of the wrong type is an error.
pub fn set_property(value: &mut dyn Value, name: &str, new: Box<dyn Value>) -> Result<bool, BeanError> {
    if is_null(value) {
        return Ok(false);
    }
    let type_path = value.value_type_path();
    write_bean(value, |bean| {
        let descriptor = bean.bean_info().descriptor(name);
        descriptor.write(bean, new)
    })
    .unwrap_or(Err(BeanError::NotABean { type_path }))
}

/// Reads property `name` as a `T`.
///
/// Unlike [`get_property`] a missing property is an error.
pub fn read_property<T: Value>(value: &dyn Value, name: &str) -> Result<T, BeanError> {
    let Some(found) = get_property(value, name)? else {
        return Err(missing(value, name, BeanError::NotReadable {
            type_path: value.value_type_path(),
            property: String::from(name),
        }));
    };
    found.into_owned()?.take::<T>().map_err(|other| BeanError::TypeMismatch {
        property: String::from(name),
        expected: core::any::type_name::<T>(),
        found: other.value_type_path(),
    })
}

/// Writes property `name`. Unlike [`set_property`] a missing or read-only
/// property is an error.
pub fn write_property(value: &mut dyn Value, name: &str, new: Box<dyn Value>) -> Result<(), BeanError> {
    if set_property(value, name, new)? {
        return Ok(());
    }
    Err(missing(value, name, BeanError::NotWritable {
        type_path: value.value_type_path(),
        property: String::from(name),
    }))
}

/// `error` when property `name` exists, `NoSuchProperty` otherwise.
fn missing(value: &dyn Value, name: &str, error: BeanError) -> BeanError {
    let lookup = read_bean(value, |bean| {
        let info = bean.bean_info();
        let descriptor = info.descriptor(name);
        let exists = descriptor.field().is_some() || descriptor.is_readable() || descriptor.is_writable();
        (info.type_path(), exists)
    });
    match lookup {
        Some((type_path, true)) => match error {
            BeanError::NotReadable { property, .. } => BeanError::NotReadable { type_path, property },
            BeanError::NotWritable { property, .. } => BeanError::NotWritable { type_path, property },
            other => other,
        },
        Some((type_path, false)) => BeanError::NoSuchProperty {
            type_path,
            property: String::from(name),
        },
        None => BeanError::NotABean {
            type_path: value.value_type_path(),
        },
    }
}
