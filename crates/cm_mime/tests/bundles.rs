use std::path::Path;

use cm_mime::{ContentType, ContentTypeRegistry, with_bundled_resources};
use cm_utils::bundle::{BundleLoader, Locale, Properties};

#[test]
fn localized_names_fall_back_to_english() {
    let loader = with_bundled_resources(BundleLoader::new());
    let registry = ContentTypeRegistry::load(&loader, &Locale::parse("de")).unwrap();

    assert_eq!(registry.by_mime("image/png").unwrap().display_name(), "PNG-Bild");
    assert_eq!(registry.by_mime("font/woff2").unwrap().display_name(), "WOFF2 Font");
}

#[test]
fn custom_layer_adds_and_overrides() {
    let custom = Properties::from_iter([
        ("application/x-custom", "cst"),
        ("text/plain", "txt,conf"),
    ]);
    let loader = with_bundled_resources(BundleLoader::new()).with_custom("content-types-custom", custom);
    let registry = ContentTypeRegistry::load(&loader, &Locale::english()).unwrap();

    let custom = registry.by_extension("cst").unwrap();
    assert_eq!(custom.mime(), "application/x-custom");
    assert_eq!(custom.display_name(), "application/x-custom");

    assert_eq!(registry.by_extension("conf").map(ContentType::mime), Some("text/plain"));
    // The custom definition replaces the shipped extension list.
    assert!(registry.by_extension("log").is_none());
}

#[test]
fn search_directory_names() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("content-type-names-custom_en.properties"),
        "text/csv=Comma Separated Values\n",
    )
    .unwrap();

    let loader = with_bundled_resources(BundleLoader::new()).with_search_dir(dir.path());
    let registry = ContentTypeRegistry::load(&loader, &Locale::parse("en_GB")).unwrap();

    let csv = registry.for_path(Path::new("report.CSV")).unwrap();
    assert_eq!(csv.display_name(), "Comma Separated Values");
}

#[test]
fn names_bundle_is_optional() {
    let loader = BundleLoader::new().with_bundled("content-types", "text/plain=txt");
    let registry = ContentTypeRegistry::load(&loader, &Locale::root()).unwrap();
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.default_extension("text/plain"), Some("txt"));
}

#[test]
fn types_bundle_is_required() {
    assert!(ContentTypeRegistry::load(&BundleLoader::new(), &Locale::root()).is_err());
}
