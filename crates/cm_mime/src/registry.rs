use alloc::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use cm_utils::bundle::{Bundle, BundleError, BundleLoader, Locale};
use cm_utils::hash::HashMap;
use log::{debug, trace, warn};

use crate::ContentType;
use crate::content_type::{normalize_extension, normalize_mime};

// -----------------------------------------------------------------------------
// Bundled resources

/// Base name of the bundle mapping MIME types to extensions.
pub const CONTENT_TYPES_BUNDLE: &str = "content-types";

/// Base name of the bundle mapping MIME types to display names.
pub const CONTENT_TYPE_NAMES_BUNDLE: &str = "content-type-names";

/// Adds the content type bundles shipped with this crate to `loader`.
pub fn with_bundled_resources(loader: BundleLoader) -> BundleLoader {
    loader
        .with_bundled(CONTENT_TYPES_BUNDLE, include_str!("../resources/content-types.properties"))
        .with_bundled(
            CONTENT_TYPE_NAMES_BUNDLE,
            include_str!("../resources/content-type-names.properties"),
        )
        .with_bundled(
            "content-type-names_de",
            include_str!("../resources/content-type-names_de.properties"),
        )
}

// -----------------------------------------------------------------------------
// ContentTypeRegistry

/// Content types looked up by MIME type, extension or path.
///
/// # Examples
///
/// ```
/// use cm_mime::ContentTypeRegistry;
/// use std::path::Path;
///
/// let registry = ContentTypeRegistry::builtin();
/// assert_eq!(registry.by_extension(".PNG").map(|t| t.mime()), Some("image/png"));
/// assert_eq!(registry.default_extension("text/html; charset=utf-8"), Some("html"));
///
/// let ty = registry.for_path(Path::new("backup.tar.gz")).unwrap();
/// assert_eq!(ty.display_name(), "Gzip Archive");
/// ```
#[derive(Clone, Debug, Default)]
pub struct ContentTypeRegistry {
    types: BTreeMap<String, ContentType>,
    extensions: HashMap<String, String>,
}

impl ContentTypeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The shipped types with English display names.
    ///
    /// Falls back to an empty registry if the shipped text cannot be read.
    pub fn builtin() -> &'static Self {
        static BUILTIN: OnceLock<ContentTypeRegistry> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let loader = with_bundled_resources(BundleLoader::new());
            Self::load(&loader, &Locale::english()).unwrap_or_else(|err| {
                warn!("shipped content types failed to load: {err}");
                Self::new()
            })
        })
    }

    /// Reads `content-types` and, if present, `content-type-names` from
    /// `loader` for `locale`.
    pub fn load(loader: &BundleLoader, locale: &Locale) -> Result<Self, BundleError> {
        let types = loader.load(CONTENT_TYPES_BUNDLE, locale)?;
        let names = match loader.load(CONTENT_TYPE_NAMES_BUNDLE, locale) {
            Ok(names) => Some(names),
            Err(BundleError::Missing { .. }) => None,
            Err(err) => return Err(err),
        };

        let registry = Self::from_bundles(&types, names.as_ref());
        debug!(
            "content types for `{locale}`: {} types, {} extensions",
            registry.types.len(),
            registry.extensions.len()
        );
        Ok(registry)
    }

    fn from_bundles(types: &Bundle, names: Option<&Bundle>) -> Self {
        let mut registry = Self::new();
        // Sorted keys: on a shared extension the first MIME type wins.
        for mime in types.keys() {
            let extensions = types.get(mime).unwrap_or_default().split(',');
            let mut ty = ContentType::new(mime, extensions);
            if let Some(name) = names.and_then(|names| names.get(mime)) {
                ty = ty.with_display_name(name.trim());
            }
            registry.insert(ty, false);
        }
        registry
    }

    /// Adds or replaces a type. Its extensions now resolve to it.
    pub fn register(&mut self, ty: ContentType) {
        self.insert(ty, true);
    }

    fn insert(&mut self, ty: ContentType, take_extensions: bool) {
        for ext in ty.extensions() {
            match self.extensions.get(ext) {
                Some(owner) if owner != ty.mime() && !take_extensions => {
                    trace!("extension `{ext}` stays with `{owner}`, not `{}`", ty.mime());
                }
                _ => {
                    self.extensions.insert(ext.clone(), ty.mime().to_owned());
                }
            }
        }
        if let Some(previous) = self.types.insert(ty.mime().to_owned(), ty) {
            // Extensions the new definition dropped no longer resolve to it.
            for ext in previous.extensions() {
                let dropped = self
                    .types
                    .get(previous.mime())
                    .is_some_and(|current| !current.extensions().contains(ext));
                if dropped && self.extensions.get(ext).is_some_and(|owner| owner == previous.mime()) {
                    self.extensions.remove(ext);
                }
            }
        }
    }

    /// Looks a type up by MIME type. Case and parameters are ignored.
    pub fn by_mime(&self, mime: &str) -> Option<&ContentType> {
        self.types.get(&normalize_mime(mime))
    }

    /// Looks a type up by extension. Case and a leading dot are ignored.
    pub fn by_extension(&self, ext: &str) -> Option<&ContentType> {
        let mime = self.extensions.get(&normalize_extension(ext))?;
        self.types.get(mime)
    }

    /// The type of a file, from its longest known extension.
    ///
    /// `a.tar.gz` is looked up as `tar.gz`, then `gz`.
    pub fn for_path(&self, path: &Path) -> Option<&ContentType> {
        let name = path.file_name()?.to_str()?;
        let name = name.trim_start_matches('.');
        name.match_indices('.')
            .find_map(|(at, _)| self.by_extension(&name[at + 1..]))
    }

    /// The default extension of a MIME type.
    pub fn default_extension(&self, mime: &str) -> Option<&str> {
        self.by_mime(mime)?.default_extension()
    }

    /// All types, ordered by MIME type.
    pub fn iter(&self) -> impl Iterator<Item = &ContentType> {
        self.types.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::ContentTypeRegistry;
    use crate::ContentType;

    #[test]
    fn builtin_lookups() {
        let registry = ContentTypeRegistry::builtin();
        assert!(registry.len() > 40);
        assert_eq!(registry.by_mime("IMAGE/JPEG").and_then(|t| t.default_extension()), Some("jpg"));
        assert_eq!(registry.by_extension("jpeg").map(ContentType::mime), Some("image/jpeg"));
        assert_eq!(registry.by_extension("xml").map(ContentType::mime), Some("application/xml"));
        assert!(registry.by_extension("nope").is_none());
    }

    #[test]
    fn paths() {
        let registry = ContentTypeRegistry::builtin();
        let mime = |path: &str| registry.for_path(Path::new(path)).map(ContentType::mime);
        assert_eq!(mime("/srv/www/index.HTML"), Some("text/html"));
        assert_eq!(mime("notes.v2.md"), Some("text/markdown"));
        assert_eq!(mime(".hidden.json"), Some("application/json"));
        assert_eq!(mime("Makefile"), None);
        assert_eq!(mime("archive.unknown"), None);
    }

    #[test]
    fn register_takes_extensions() {
        let mut registry = ContentTypeRegistry::new();
        registry.register(ContentType::new("text/plain", ["txt", "log"]));
        registry.register(ContentType::new("text/x-log", ["log"]).with_display_name("Log File"));

        assert_eq!(registry.by_extension("log").map(ContentType::mime), Some("text/x-log"));
        assert_eq!(registry.by_extension("txt").map(ContentType::mime), Some("text/plain"));

        registry.register(ContentType::new("text/plain", ["text"]));
        assert!(registry.by_extension("txt").is_none());
        assert_eq!(registry.by_extension("log").map(ContentType::mime), Some("text/x-log"));
        assert_eq!(registry.iter().map(ContentType::mime).collect::<Vec<_>>(), ["text/plain", "text/x-log"]);
    }
}
