//! Locale-aware resource bundles backed by `.properties` text.
//!
//! A bundle named `base` is assembled from several layers, most specific
//! first. For the locale `en_US` the lookup chain is:
//!
//! ```text
//! base-custom_en_US, base-custom_en, base-custom, base_en_US, base_en, base
//! ```
//!
//! Each layer name is resolved against programmatic overrides, then the
//! loader's search directories (`<dir>/<name>.properties`), then the sources
//! compiled into the binary. A key is answered by the first layer defining it.

// -----------------------------------------------------------------------------
// Modules

mod error;
mod loader;
mod locale;
mod properties;

// -----------------------------------------------------------------------------
// Exports

pub use error::BundleError;
pub use loader::{Bundle, BundleLoader};
pub use locale::Locale;
pub use properties::Properties;
