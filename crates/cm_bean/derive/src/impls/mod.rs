// -----------------------------------------------------------------------------
// Modules

mod bean;
mod methods;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use bean::impl_bean;
pub(crate) use methods::impl_bean_methods;
