#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

mod error;
mod lock;
mod ops;

// -----------------------------------------------------------------------------
// Top-level exports

pub use error::FsError;
pub use lock::{FileLock, with_file_lock};
pub use ops::{read_to_string_opt, remove_quietly, write_atomic};
