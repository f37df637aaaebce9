use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use std::io;

use thiserror::Error;

use crate::{Format, Violation};

/// A boxed error from a codec or a conversion.
pub type BoxError = Box<dyn core::error::Error + Send + Sync>;

/// Errors of [`BeanMapper`](crate::BeanMapper) operations.
#[derive(Debug, Error)]
pub enum MapperError {
    #[error("cannot read {format}: {source}")]
    Read {
        format: Format,
        #[source]
        source: BoxError,
    },
    #[error("cannot write {format}: {source}")]
    Write {
        format: Format,
        #[source]
        source: BoxError,
    },
    #[error("unknown properties in {format} input: {}", paths.join(", "))]
    UnknownProperties { format: Format, paths: Vec<String> },
    #[error("{} constraint violation(s): {}", violations.len(), Violation::join(violations))]
    Constraint { violations: Vec<Violation> },
    #[error("unknown subtype `{name}` of `{base}`")]
    UnknownSubtype { base: &'static str, name: String },
    #[error("`{type_path}` is not a registered subtype of `{base}`")]
    UnregisteredSubtype {
        base: &'static str,
        type_path: &'static str,
    },
    #[error("cannot build `{type_path}` from its configuration: {source}")]
    Configure {
        type_path: &'static str,
        #[source]
        source: BoxError,
    },
    #[error("{format} support is not enabled")]
    UnsupportedFormat { format: Format },
    #[error(transparent)]
    Io(#[from] io::Error),
}
