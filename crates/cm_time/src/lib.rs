#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

mod error;
mod format;
mod parse;
mod units;

// -----------------------------------------------------------------------------
// Top-level exports

pub use error::DurationError;
pub use format::{DurationStyle, format_duration};
pub use parse::{parse_duration, parse_millis};
pub use units::{DURATIONS_BUNDLE, DurationUnit, DurationUnits, with_bundled_resources};
