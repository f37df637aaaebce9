use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::fmt;
use std::sync::OnceLock;

use crate::info::{BeanInfo, FieldInfo, MethodInfo, TypeDesc};
use crate::property::{PropertyValue, resolve_read, resolve_write};
use crate::util::read_bean;
use crate::{BeanError, InvokeError, Value};

// -----------------------------------------------------------------------------
// PropertyDescriptor

/// A property of a bean type, with its accessors resolved on demand.
///
/// Read and write accessors are resolved independently on first use and
/// cached. The write accessor must take the field type when the property is
/// backed by a field.
#[derive(Clone)]
pub struct PropertyDescriptor {
    bean: &'static BeanInfo,
    name: Cow<'static, str>,
    field: Option<&'static FieldInfo>,
    read: OnceLock<Option<MethodInfo>>,
    write: OnceLock<Option<MethodInfo>>,
}

impl PropertyDescriptor {
    pub fn new(bean: &'static BeanInfo, name: impl Into<Cow<'static, str>>) -> Self {
        let name = name.into();
        Self {
            field: bean.field(&name),
            bean,
            name,
            read: OnceLock::new(),
            write: OnceLock::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declaring bean type.
    #[inline]
    pub fn bean_info(&self) -> &'static BeanInfo {
        self.bean
    }

    /// The backing field, if any.
    #[inline]
    pub fn field(&self) -> Option<&'static FieldInfo> {
        self.field
    }

    /// The field type, or else the type taken or returned by an accessor.
    pub fn value_type(&self) -> Option<TypeDesc> {
        if let Some(field) = self.field {
            return Some(*field.ty());
        }
        self.read_method()
            .and_then(MethodInfo::return_type)
            .or_else(|| self.write_method().and_then(MethodInfo::param))
    }

    pub fn read_method(&self) -> Option<&MethodInfo> {
        self.read
            .get_or_init(|| resolve_read(self.bean.methods(), &self.name).copied())
            .as_ref()
    }

    pub fn write_method(&self) -> Option<&MethodInfo> {
        self.write
            .get_or_init(|| {
                let expected = self.field.map(FieldInfo::ty_id);
                resolve_write(self.bean.methods(), &self.name, expected).copied()
            })
            .as_ref()
    }

    #[inline]
    pub fn is_readable(&self) -> bool {
        self.read_method().is_some()
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.write_method().is_some()
    }

    /// Transient properties are skipped by traversals.
    pub fn is_transient(&self) -> bool {
        self.field.is_some_and(FieldInfo::is_transient)
            || self.read_method().is_some_and(MethodInfo::is_transient)
    }

    /// Reads the property from `bean`. `None` when the property has no
    /// read accessor.
    pub fn read<'a>(&self, bean: &'a dyn Value) -> Result<Option<PropertyValue<'a>>, BeanError> {
        let Some(method) = self.read_method() else {
            return Ok(None);
        };
        method
            .read(bean)
            .map(Some)
            .map_err(|source| self.invoke_error(method, source))
    }

    /// Writes `value` into `bean`. Returns `false` when the property has no
    /// write accessor.
    pub fn write(&self, bean: &mut dyn Value, value: Box<dyn Value>) -> Result<bool, BeanError> {
        let Some(method) = self.write_method() else {
            return Ok(false);
        };
        method
            .write(bean, value)
            .map(|()| true)
            .map_err(|source| self.invoke_error(method, source))
    }

    fn invoke_error(&self, method: &MethodInfo, source: InvokeError) -> BeanError {
        BeanError::Invoke {
            type_path: self.bean.type_path(),
            property: self.name.clone(),
            method: method.name(),
            source,
        }
    }
}

impl fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("bean", &self.bean.type_path())
            .field("name", &self.name)
            .field("read", &self.read_method())
            .field("write", &self.write_method())
            .finish()
    }
}

/// The enumerated properties of the bean behind `value`.
///
/// Optional and shared beans are looked through. Values that are not beans
/// have no properties.
pub fn properties(value: &dyn Value) -> &'static [PropertyDescriptor] {
    read_bean(value, |bean| bean.bean_info().properties()).unwrap_or(&[])
}
