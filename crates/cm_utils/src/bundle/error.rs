use std::path::PathBuf;

use thiserror::Error;

/// Failures while parsing or loading resource bundles.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("malformed properties in `{source_name}` at line {line}: {message}")]
    Parse {
        source_name: String,
        line: usize,
        message: String,
    },
    #[error("failed to read bundle file `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no layer of bundle `{base}` exists for locale `{locale}`")]
    Missing { base: String, locale: String },
}
