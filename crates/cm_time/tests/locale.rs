use std::time::Duration;

use cm_time::{DurationError, DurationStyle, DurationUnits, parse_duration, with_bundled_resources};
use cm_utils::bundle::{BundleLoader, Locale, Properties};

fn german() -> DurationUnits {
    let loader = with_bundled_resources(BundleLoader::new());
    DurationUnits::load(&loader, &Locale::parse("de_CH")).unwrap()
}

#[test]
fn german_round_trip() {
    let units = german();
    let text = "3 Tage, 1 Stunde, und 5 Sekunden";
    let d = units.parse(text).unwrap();

    assert_eq!(d, Duration::from_secs(3 * 86_400 + 3_600 + 5));
    assert_eq!(units.format(d, DurationStyle::Long), text);
}

#[test]
fn english_names_parse_in_every_locale() {
    let units = german();
    assert_eq!(units.parse("2 hours und 3 Minuten").unwrap(), Duration::from_secs(7_380));
    assert_eq!(units.parse("2h3m").unwrap(), parse_duration("2 hours and 3 minutes").unwrap());
}

#[test]
fn conjunction_of_another_locale_is_rejected() {
    let err = DurationUnits::english().parse("2 hours und 3 minutes").unwrap_err();
    assert!(matches!(err, DurationError::Invalid { position: 8, .. }));
}

#[test]
fn custom_bundle_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("durations-custom_en.properties"),
        "day.other=jours\nday.aliases=jour,j\n",
    )
    .unwrap();

    let loader = with_bundled_resources(BundleLoader::new()).with_search_dir(dir.path());
    let units = DurationUnits::load(&loader, &Locale::english()).unwrap();

    assert_eq!(units.parse("2j").unwrap(), Duration::from_secs(2 * 86_400));
    assert_eq!(units.format(Duration::from_secs(2 * 86_400), DurationStyle::Long), "2 jours");
    // Keys the custom layer leaves out come from the shipped layer.
    assert_eq!(units.format(Duration::from_secs(86_400), DurationStyle::Long), "1 day");
}

#[test]
fn programmatic_override() {
    let loader = with_bundled_resources(BundleLoader::new())
        .with_custom("durations-custom", Properties::from_iter([("conjunction.and", "&")]));
    let units = DurationUnits::load(&loader, &Locale::root()).unwrap();

    assert_eq!(units.format(Duration::from_secs(61), DurationStyle::Long), "1 minute & 1 second");
}
