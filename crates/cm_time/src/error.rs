use thiserror::Error;

/// Errors of duration parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("empty duration text")]
    Empty,
    #[error("invalid duration `{input}` at byte {position}")]
    Invalid { input: String, position: usize },
    #[error("unknown duration unit `{unit}`")]
    UnknownUnit { unit: String },
    #[error("duration `{input}` does not fit in 64-bit milliseconds")]
    Overflow { input: String },
}
