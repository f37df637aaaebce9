use core::fmt::Write;
use std::time::Duration;

use crate::{DurationUnit, DurationUnits};

/// How [`DurationUnits::format`] writes a duration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DurationStyle {
    /// `54d18h1m23s`
    #[default]
    Compact,
    /// `54 days, 18 hours, 1 minute, and 23 seconds`
    Long,
}

// Weeks are accepted when parsing but never written.
const FORMATTED: [DurationUnit; 5] = [
    DurationUnit::Day,
    DurationUnit::Hour,
    DurationUnit::Minute,
    DurationUnit::Second,
    DurationUnit::Millisecond,
];

/// Non-zero `(unit, count)` parts of `duration`, largest unit first.
fn split(duration: Duration) -> Vec<(DurationUnit, u64)> {
    let mut rest = duration.as_millis();
    let mut parts = Vec::new();
    for unit in FORMATTED {
        let size = u128::from(unit.millis());
        let count = rest / size;
        rest %= size;
        if count > 0 {
            parts.push((unit, u64::try_from(count).unwrap_or(u64::MAX)));
        }
    }
    parts
}

impl DurationUnits {
    /// Writes `duration` with these unit names, to millisecond precision.
    ///
    /// Zero renders as `0s` or `0 seconds`.
    pub fn format(&self, duration: Duration, style: DurationStyle) -> String {
        let mut parts = split(duration);
        if parts.is_empty() {
            parts.push((DurationUnit::Second, 0));
        }

        let mut out = String::new();
        match style {
            DurationStyle::Compact => {
                for (unit, count) in parts {
                    let _ = write!(out, "{count}{}", self.short_name(unit));
                }
            }
            DurationStyle::Long => {
                let words: Vec<String> = parts
                    .into_iter()
                    .map(|(unit, count)| format!("{count} {}", self.long_name(unit, count)))
                    .collect();
                match words.as_slice() {
                    [single] => out.push_str(single),
                    [first, second] => {
                        let _ = write!(out, "{first} {} {second}", self.and());
                    }
                    [init @ .., last] => {
                        out.push_str(&init.join(", "));
                        let _ = write!(out, ", {} {last}", self.and());
                    }
                    [] => {}
                }
            }
        }
        out
    }
}

/// Writes `duration` with English unit names.
///
/// # Examples
///
/// ```
/// use cm_time::{DurationStyle, format_duration, parse_duration};
///
/// let d = parse_duration("54d18h1m23s").unwrap();
/// assert_eq!(format_duration(d, DurationStyle::Compact), "54d18h1m23s");
/// assert_eq!(
///     format_duration(d, DurationStyle::Long),
///     "54 days, 18 hours, 1 minute, and 23 seconds"
/// );
/// ```
pub fn format_duration(duration: Duration, style: DurationStyle) -> String {
    DurationUnits::english().format(duration, style)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{DurationStyle, format_duration};

    #[test]
    fn compact() {
        let format = |ms| format_duration(Duration::from_millis(ms), DurationStyle::Compact);
        assert_eq!(format(0), "0s");
        assert_eq!(format(250), "250ms");
        assert_eq!(format(90_000), "1m30s");
        assert_eq!(format(8 * 86_400_000), "8d");
        assert_eq!(format(3_600_001), "1h1ms");
    }

    #[test]
    fn long() {
        let format = |ms| format_duration(Duration::from_millis(ms), DurationStyle::Long);
        assert_eq!(format(0), "0 seconds");
        assert_eq!(format(1_000), "1 second");
        assert_eq!(format(3_660_000), "1 hour and 1 minute");
        assert_eq!(format(2 * 86_400_000 + 2_000 + 5), "2 days, 2 seconds, and 5 milliseconds");
    }

    #[test]
    fn sub_millisecond_precision_is_dropped() {
        let d = Duration::from_micros(1_500);
        assert_eq!(format_duration(d, DurationStyle::Compact), "1ms");
    }
}
