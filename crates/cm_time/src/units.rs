use std::sync::OnceLock;

use cm_utils::bundle::{Bundle, BundleError, BundleLoader, Locale};
use cm_utils::hash::HashMap;
use log::{debug, warn};

// -----------------------------------------------------------------------------
// DurationUnit

/// A unit a duration can be written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DurationUnit {
    Millisecond,
    Second,
    Minute,
    Hour,
    Day,
    Week,
}

impl DurationUnit {
    /// All units, smallest first.
    pub const ALL: [Self; 6] = [
        Self::Millisecond,
        Self::Second,
        Self::Minute,
        Self::Hour,
        Self::Day,
        Self::Week,
    ];

    /// Length of one unit in milliseconds.
    pub const fn millis(self) -> u64 {
        match self {
            Self::Millisecond => 1,
            Self::Second => 1_000,
            Self::Minute => 60_000,
            Self::Hour => 3_600_000,
            Self::Day => 86_400_000,
            Self::Week => 604_800_000,
        }
    }

    /// Key prefix in the `durations` bundle.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Millisecond => "millisecond",
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }

    // short, one, other, aliases
    const fn english(self) -> [&'static str; 4] {
        match self {
            Self::Millisecond => ["ms", "millisecond", "milliseconds", "milli,millis,msec,msecs"],
            Self::Second => ["s", "second", "seconds", "sec,secs"],
            Self::Minute => ["m", "minute", "minutes", "min,mins"],
            Self::Hour => ["h", "hour", "hours", "hr,hrs"],
            Self::Day => ["d", "day", "days", ""],
            Self::Week => ["w", "week", "weeks", "wk,wks"],
        }
    }
}

// -----------------------------------------------------------------------------
// Bundled resources

/// Base name of the unit bundle.
pub const DURATIONS_BUNDLE: &str = "durations";

/// Adds the unit bundles shipped with this crate to `loader`.
///
/// Layers registered on `loader` before or after, and files in its search
/// directories, still take precedence over the shipped text of the same
/// layer name.
pub fn with_bundled_resources(loader: BundleLoader) -> BundleLoader {
    loader
        .with_bundled("durations", include_str!("../resources/durations.properties"))
        .with_bundled("durations_de", include_str!("../resources/durations_de.properties"))
}

// -----------------------------------------------------------------------------
// DurationUnits

#[derive(Clone, Debug)]
struct UnitNames {
    short: String,
    one: String,
    other: String,
}

/// Localized unit names, used both to parse and to format durations.
///
/// # Examples
///
/// ```
/// use cm_time::{DurationStyle, DurationUnits, with_bundled_resources};
/// use cm_utils::bundle::{BundleLoader, Locale};
/// use std::time::Duration;
///
/// let loader = with_bundled_resources(BundleLoader::new());
/// let units = DurationUnits::load(&loader, &Locale::parse("de_DE")).unwrap();
///
/// let d = units.parse("2 Stunden und 1 Minute").unwrap();
/// assert_eq!(d, Duration::from_secs(7260));
/// assert_eq!(units.format(d, DurationStyle::Long), "2 Stunden und 1 Minute");
/// ```
#[derive(Clone, Debug)]
pub struct DurationUnits {
    locale: Locale,
    names: [UnitNames; 6],
    and: String,
    lookup: HashMap<String, DurationUnit>,
}

impl DurationUnits {
    /// English names, without consulting any bundle.
    pub fn english() -> &'static Self {
        static ENGLISH: OnceLock<DurationUnits> = OnceLock::new();
        ENGLISH.get_or_init(|| Self::build(Locale::english(), None))
    }

    /// Loads unit names for `locale` from the `durations` bundle of `loader`.
    ///
    /// Keys missing from every layer fall back to English. A loader without
    /// any `durations` layer yields the English names.
    pub fn load(loader: &BundleLoader, locale: &Locale) -> Result<Self, BundleError> {
        match loader.load(DURATIONS_BUNDLE, locale) {
            Ok(bundle) => Ok(Self::build(locale.clone(), Some(&bundle))),
            Err(BundleError::Missing { .. }) => {
                warn!("no `{DURATIONS_BUNDLE}` bundle for `{locale}`, using English unit names");
                Ok(Self::build(locale.clone(), None))
            }
            Err(err) => Err(err),
        }
    }

    fn build(locale: Locale, bundle: Option<&Bundle>) -> Self {
        let get = |key: String, default: &'static str| -> String {
            bundle
                .and_then(|bundle| bundle.get(&key))
                .unwrap_or(default)
                .trim()
                .to_owned()
        };

        let mut lookup = HashMap::default();
        let names = DurationUnit::ALL.map(|unit| {
            let [short, one, other, aliases] = unit.english();
            let names = UnitNames {
                short: get(format!("{}.short", unit.key()), short),
                one: get(format!("{}.one", unit.key()), one),
                other: get(format!("{}.other", unit.key()), other),
            };

            let aliases = get(format!("{}.aliases", unit.key()), aliases);
            // English names stay accepted in every locale.
            let accepted = [short, one, other, names.short.as_str(), names.one.as_str(), names.other.as_str()]
                .into_iter()
                .chain(aliases.split(','));
            for name in accepted.map(str::trim).filter(|name| !name.is_empty()) {
                if let Some(previous) = lookup.insert(name.to_lowercase(), unit)
                    && previous != unit
                {
                    warn!("duration unit name `{name}` is ambiguous, `{previous:?}` replaced by `{unit:?}`");
                }
            }
            names
        });

        let and = get(String::from("conjunction.and"), "and");
        debug!("duration units for `{locale}`: {} names", lookup.len());

        Self {
            locale,
            names,
            and,
            lookup,
        }
    }

    #[inline]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The unit called `name`, ignoring case.
    pub fn unit(&self, name: &str) -> Option<DurationUnit> {
        self.lookup.get(&name.to_lowercase()).copied()
    }

    /// The compact suffix of `unit`, such as `h`.
    pub fn short_name(&self, unit: DurationUnit) -> &str {
        &self.names[unit.index()].short
    }

    /// The long name of `unit` for `count` units.
    pub fn long_name(&self, unit: DurationUnit, count: u64) -> &str {
        let names = &self.names[unit.index()];
        if count == 1 { &names.one } else { &names.other }
    }

    /// The localized conjunction, `and` in English.
    #[inline]
    pub fn and(&self) -> &str {
        &self.and
    }

    pub(crate) fn is_conjunction(&self, word: &str) -> bool {
        word.eq_ignore_ascii_case("and") || word.to_lowercase() == self.and.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use cm_utils::bundle::{BundleLoader, Locale, Properties};

    use super::{DurationUnit, DurationUnits, with_bundled_resources};

    #[test]
    fn english_names() {
        let units = DurationUnits::english();
        assert_eq!(units.unit("Hours"), Some(DurationUnit::Hour));
        assert_eq!(units.unit("ms"), Some(DurationUnit::Millisecond));
        assert_eq!(units.unit("m"), Some(DurationUnit::Minute));
        assert_eq!(units.unit("fortnight"), None);
        assert_eq!(units.long_name(DurationUnit::Day, 1), "day");
        assert_eq!(units.long_name(DurationUnit::Day, 0), "days");
    }

    #[test]
    fn german_layer_keeps_english_names() {
        let loader = with_bundled_resources(BundleLoader::new());
        let units = DurationUnits::load(&loader, &Locale::parse("de")).unwrap();

        assert_eq!(units.unit("tage"), Some(DurationUnit::Day));
        assert_eq!(units.unit("days"), Some(DurationUnit::Day));
        assert_eq!(units.short_name(DurationUnit::Hour), "h");
        assert_eq!(units.and(), "und");
        assert!(units.is_conjunction("UND") && units.is_conjunction("and"));
    }

    #[test]
    fn custom_layer_overrides() {
        let loader = with_bundled_resources(BundleLoader::new())
            .with_custom("durations-custom", Properties::from_iter([("week.short", "wk")]));
        let units = DurationUnits::load(&loader, &Locale::english()).unwrap();
        assert_eq!(units.short_name(DurationUnit::Week), "wk");
    }

    #[test]
    fn missing_bundle_is_english() {
        let units = DurationUnits::load(&BundleLoader::new(), &Locale::parse("fr")).unwrap();
        assert_eq!(units.long_name(DurationUnit::Second, 2), "seconds");
        assert_eq!(units.locale().language(), "fr");
    }
}
