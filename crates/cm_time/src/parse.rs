use std::sync::LazyLock;
use std::time::Duration;

use log::trace;
use regex::Regex;

use crate::{DurationError, DurationUnit, DurationUnits};

// A number directly or loosely followed by a unit name.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(\p{L}+)").expect("literal pattern is valid")
});

// Words between tokens; only conjunctions are allowed there.
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\s,]+").expect("literal pattern is valid"));

impl DurationUnits {
    /// Parses a duration written with these unit names.
    ///
    /// Accepts compact text (`1h30m`, `250ms`, `1.5h`) and long text
    /// (`1 hour, 30 minutes and 5 seconds`). Parts are separated by
    /// whitespace, commas and the conjunction. A bare number is read as
    /// milliseconds.
    pub fn parse(&self, text: &str) -> Result<Duration, DurationError> {
        self.parse_millis(text).map(Duration::from_millis)
    }

    /// Like [`DurationUnits::parse`], in milliseconds.
    pub fn parse_millis(&self, text: &str) -> Result<u64, DurationError> {
        let start = text.len() - text.trim_start().len();
        let body = text.trim();
        if body.is_empty() {
            return Err(DurationError::Empty);
        }

        if body.bytes().all(|b| b.is_ascii_digit()) {
            return body.parse().map_err(|_| overflow(text));
        }

        let mut total: u64 = 0;
        let mut cursor = 0;
        for token in TOKEN.captures_iter(body) {
            let (Some(whole), Some(number), Some(name)) = (token.get(0), token.get(1), token.get(2)) else {
                continue;
            };

            self.check_gap(text, start, &body[cursor..whole.start()], cursor, cursor > 0)?;
            cursor = whole.end();

            let unit = self.unit(name.as_str()).ok_or_else(|| DurationError::UnknownUnit {
                unit: name.as_str().to_owned(),
            })?;
            let millis = scale(number.as_str(), unit).ok_or_else(|| overflow(text))?;
            trace!("duration part `{}`: {millis}ms", whole.as_str());

            total = total.checked_add(millis).ok_or_else(|| overflow(text))?;
        }

        if cursor == 0 {
            return Err(DurationError::Invalid {
                input: text.to_owned(),
                position: start,
            });
        }
        self.check_gap(text, start, &body[cursor..], cursor, false)?;
        Ok(total)
    }

    /// Rejects any word in `gap` that is not an allowed conjunction.
    fn check_gap(
        &self,
        input: &str,
        start: usize,
        gap: &str,
        offset: usize,
        conjunction_allowed: bool,
    ) -> Result<(), DurationError> {
        let mut words = WORD.find_iter(gap);
        let invalid = |at: usize| DurationError::Invalid {
            input: input.to_owned(),
            position: start + offset + at,
        };

        match words.next() {
            None => Ok(()),
            Some(word) if !conjunction_allowed || !self.is_conjunction(word.as_str()) => Err(invalid(word.start())),
            Some(_) => match words.next() {
                Some(word) => Err(invalid(word.start())),
                None => Ok(()),
            },
        }
    }
}

/// `number` units in milliseconds, `None` on overflow.
fn scale(number: &str, unit: DurationUnit) -> Option<u64> {
    if !number.contains('.') {
        return number.parse::<u64>().ok()?.checked_mul(unit.millis());
    }
    let millis = number.parse::<f64>().ok()? * unit.millis() as f64;
    if !millis.is_finite() || millis >= u64::MAX as f64 {
        return None;
    }
    Some(millis.round() as u64)
}

fn overflow(input: &str) -> DurationError {
    DurationError::Overflow {
        input: input.to_owned(),
    }
}

/// Parses English duration text, see [`DurationUnits::parse`].
///
/// # Examples
///
/// ```
/// use cm_time::parse_duration;
/// use std::time::Duration;
///
/// let compact = parse_duration("54d18h1m23s").unwrap();
/// let long = parse_duration("54 days, 18 hours, 1 minute, and 23 seconds").unwrap();
/// assert_eq!(compact, long);
/// assert_eq!(parse_duration("1.5h").unwrap(), Duration::from_secs(5400));
/// ```
pub fn parse_duration(text: &str) -> Result<Duration, DurationError> {
    DurationUnits::english().parse(text)
}

/// Parses English duration text into milliseconds.
pub fn parse_millis(text: &str) -> Result<u64, DurationError> {
    DurationUnits::english().parse_millis(text)
}
