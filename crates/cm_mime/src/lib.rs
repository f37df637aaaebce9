#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod content_type;
mod registry;

// -----------------------------------------------------------------------------
// Top-level exports

pub use content_type::ContentType;
pub use registry::{CONTENT_TYPE_NAMES_BUNDLE, CONTENT_TYPES_BUNDLE, ContentTypeRegistry};
pub use registry::with_bundled_resources;
