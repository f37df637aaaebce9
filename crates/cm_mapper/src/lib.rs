#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Compilation config

/// Format switches, one per cargo feature.
pub mod cfg {
    cm_cfg::define_alias! {
        #[cfg(feature = "json")] => json,
        #[cfg(feature = "yaml")] => yaml,
        #[cfg(feature = "xml")] => xml,
    }
}

// -----------------------------------------------------------------------------
// Extern Self

// Exported macros name this crate `cm_mapper`, including inside its own tests.
extern crate self as cm_mapper;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod codec;
mod config;
mod configurable;
mod de;
mod error;
mod format;
mod mapper;
mod validate;

pub mod subtype;

// -----------------------------------------------------------------------------
// Top-level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use config::MapperConfig;
pub use configurable::Configurable;
pub use error::{BoxError, MapperError};
pub use format::Format;
pub use mapper::{BeanMapper, MapperBuilder};
pub use subtype::{Poly, PolyBase, Subtype, SubtypeEntry, SubtypeOf, SubtypeProvider, SubtypeRegistry};
pub use validate::{Validate, Violation, nested_violations};
