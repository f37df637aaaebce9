use crate::Value;
use crate::info::BeanInfo;

// -----------------------------------------------------------------------------
// Bean

/// A value with introspectable properties.
///
/// Implement it with `#[derive(Bean)]`, and register accessors with
/// `#[bean_methods]` on the impl blocks defining them.
pub trait Bean: Value {
    /// Metadata of the concrete type.
    fn bean_info(&self) -> &'static BeanInfo;
}

/// Static access to [`BeanInfo`].
pub trait TypedBean: Bean + Sized {
    fn type_bean_info() -> &'static BeanInfo;
}

impl core::fmt::Debug for dyn Bean {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.value_debug(f)
    }
}
