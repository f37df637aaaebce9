use alloc::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, trace};

use crate::hash::HashMap;

use super::{BundleError, Locale, Properties};

// -----------------------------------------------------------------------------
// Bundle

/// A resolved bundle: property layers ordered from most to least specific.
#[derive(Clone, Debug)]
pub struct Bundle {
    base: String,
    layers: Vec<(String, Properties)>,
}

impl Bundle {
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Looks `key` up in the first layer that defines it.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.layers.iter().find_map(|(_, props)| props.get(key))
    }

    /// Like [`Bundle::get`] but falls back to `default`.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Union of all keys across layers, sorted.
    pub fn keys(&self) -> BTreeSet<&str> {
        self.layers
            .iter()
            .flat_map(|(_, props)| props.iter().map(|(k, _)| k))
            .collect()
    }

    /// Names of the layers that were found, most specific first.
    pub fn layer_names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|(name, _)| name.as_str())
    }
}

// -----------------------------------------------------------------------------
// BundleLoader

/// Resolves bundle layers from overrides, directories and compiled-in text.
///
/// # Examples
///
/// ```
/// use cm_utils::bundle::{BundleLoader, Locale, Properties};
///
/// let loader = BundleLoader::new()
///     .with_bundled("greetings", "hello=Hello\nbye=Bye")
///     .with_bundled("greetings_de", "hello=Hallo")
///     .with_custom("greetings-custom", Properties::from_iter([("bye", "Ciao")]));
///
/// let bundle = loader.load("greetings", &Locale::parse("de_AT")).unwrap();
/// assert_eq!(bundle.get("hello"), Some("Hallo"));
/// assert_eq!(bundle.get("bye"), Some("Ciao"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct BundleLoader {
    bundled: HashMap<String, &'static str>,
    custom: HashMap<String, Properties>,
    search_dirs: Vec<PathBuf>,
}

impl BundleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers compiled-in `.properties` text for the layer `name`.
    pub fn with_bundled(mut self, name: impl Into<String>, text: &'static str) -> Self {
        self.bundled.insert(name.into(), text);
        self
    }

    /// Registers an override layer. Overrides shadow files and bundled text
    /// of the same layer name.
    pub fn with_custom(mut self, name: impl Into<String>, props: Properties) -> Self {
        self.custom.insert(name.into(), props);
        self
    }

    /// Adds a directory searched for `<layer>.properties` files.
    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dirs.push(dir.into());
        self
    }

    /// Layer names tried for `base` under `locale`, most specific first.
    pub fn candidates(base: &str, locale: &Locale) -> Vec<String> {
        let suffixes = locale.suffixes();
        let custom = suffixes.iter().map(|s| format!("{base}-custom{s}"));
        let plain = suffixes.iter().map(|s| format!("{base}{s}"));
        custom.chain(plain).collect()
    }

    /// Loads every existing layer of `base` for `locale`.
    ///
    /// Fails with [`BundleError::Missing`] when no layer exists at all.
    pub fn load(&self, base: &str, locale: &Locale) -> Result<Bundle, BundleError> {
        let mut layers = Vec::new();

        for name in Self::candidates(base, locale) {
            match self.find_layer(&name)? {
                Some(props) => {
                    debug!("bundle `{base}`: loaded layer `{name}` ({} keys)", props.len());
                    layers.push((name, props));
                }
                None => trace!("bundle `{base}`: no layer `{name}`"),
            }
        }

        if layers.is_empty() {
            return Err(BundleError::Missing {
                base: base.to_owned(),
                locale: locale.to_string(),
            });
        }

        Ok(Bundle {
            base: base.to_owned(),
            layers,
        })
    }

    fn find_layer(&self, name: &str) -> Result<Option<Properties>, BundleError> {
        if let Some(props) = self.custom.get(name) {
            return Ok(Some(props.clone()));
        }

        for dir in &self.search_dirs {
            if let Some(props) = read_layer_file(&dir.join(format!("{name}.properties")))? {
                return Ok(Some(props));
            }
        }

        match self.bundled.get(name) {
            Some(text) => Properties::parse_named(text, name).map(Some),
            None => Ok(None),
        }
    }
}

fn read_layer_file(path: &Path) -> Result<Option<Properties>, BundleError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Properties::parse_named(&text, &path.display().to_string()).map(Some),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(BundleError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
