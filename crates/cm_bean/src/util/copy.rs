use alloc::boxed::Box;
use alloc::vec::Vec;

use log::trace;

use crate::impls::clone_as;
use crate::util::{read_bean, write_bean};
use crate::{Bean, BeanError, Value};

// -----------------------------------------------------------------------------
// Copy

/// Readable properties of the bean behind `source`, copied.
pub(crate) fn snapshot(source: &dyn Value) -> Result<Vec<(&'static str, Box<dyn Value>)>, BeanError> {
    read_bean(source, |bean| -> Result<_, BeanError> {
        let this: &dyn Value = bean;
        let mut values = Vec::new();
        for property in bean.bean_info().properties() {
            if let Some(value) = property.read(this)? {
                values.push((property.name(), value.into_owned()?));
            }
        }
        Ok(values)
    })
    .unwrap_or(Ok(Vec::new()))
}

fn copy(target: &mut dyn Value, source: &dyn Value, over_nulls: bool) -> Result<(), BeanError> {
    // Read everything first: source and target may share a lock.
    let values = snapshot(source)?;
    if values.is_empty() {
        return Ok(());
    }

    write_bean(target, |bean| -> Result<(), BeanError> {
        let info = bean.bean_info();
        for (name, value) in values {
            let descriptor = info.descriptor(name);
            let Some(writer) = descriptor.write_method() else {
                continue;
            };
            if !writer.param_is(value.ty_id()) {
                trace!("`{}.{name}` takes another type, not copied", info.name());
                continue;
            }
            if over_nulls {
                let this: &dyn Value = &*bean;
                match descriptor.read(this)? {
                    Some(current) if current.value_ref().is_null() => {}
                    _ => continue,
                }
            }
            descriptor.write(&mut *bean, value)?;
        }
        Ok(())
    })
    .unwrap_or(Ok(()))
}

/// Copies every readable property of `source` into the same-named writable
/// property of `target`.
///
/// Properties are matched by name and type, so the two beans may be of
/// different types. Nothing happens when either side is `None`.
pub fn copy_properties(target: &mut dyn Value, source: &dyn Value) -> Result<(), BeanError> {
    copy(target, source, false)
}

/// Like [`copy_properties`], but only fills target properties that are
/// currently `None`. Target properties that cannot be read are left alone.
pub fn copy_properties_over_nulls(target: &mut dyn Value, source: &dyn Value) -> Result<(), BeanError> {
    copy(target, source, true)
}

// -----------------------------------------------------------------------------
// Clone

/// An independent copy of `value`.
///
/// Scalars are copied, `Arc`s share their pointee. Beans declaring
/// `#[bean(clone)]` use `Clone`; other beans are built with their no-arg
/// constructor and filled through [`copy_properties`].
#[inline]
pub fn clone_value(value: &dyn Value) -> Result<Box<dyn Value>, BeanError> {
    value.clone_value()
}

/// Typed form of [`clone_value`].
///
/// ```
/// use cm_bean::{Bean, bean_methods, util};
///
/// #[derive(Bean, Default, PartialEq, Debug)]
/// #[bean(default, partial_eq)]
/// struct Tag {
///     label: String,
/// }
///
/// #[bean_methods]
/// impl Tag {
///     fn get_label(&self) -> &str { &self.label }
///     fn set_label(&mut self, label: String) { self.label = label; }
/// }
///
/// let tag = Tag { label: String::from("a") };
/// let copy = util::clone_bean(&tag).unwrap();
/// assert_eq!(copy, tag);
/// assert!(!core::ptr::eq(&copy, &tag));
/// ```
#[inline]
pub fn clone_bean<T: Value>(value: &T) -> Result<T, BeanError> {
    clone_as(value)
}

/// Clones a bean through its no-arg constructor and its properties.
///
/// Used by `#[derive(Bean)]` for beans without `#[bean(clone)]`.
pub fn clone_via_properties(bean: &dyn Bean) -> Result<Box<dyn Value>, BeanError> {
    let mut copy = bean.bean_info().instantiate()?;
    copy_properties(&mut *copy, bean)?;
    Ok(copy)
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::{clone_value, copy_properties};

    #[test]
    fn scalars_clone_to_equal_values() {
        let text = String::from("same");
        let copy = clone_value(&text).unwrap();
        assert_eq!(copy.downcast_ref::<String>(), Some(&text));

        let number = clone_value(&42_u64).unwrap();
        assert_eq!(number.take::<u64>().ok(), Some(42));
    }

    #[test]
    fn copy_between_non_beans_is_noop() {
        let mut target = 1_i32;
        copy_properties(&mut target, &2_i32).unwrap();
        assert_eq!(target, 1);
    }
}
