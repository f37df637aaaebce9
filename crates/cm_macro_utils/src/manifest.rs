use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// The caller's `Cargo.toml`, used to find how generated code should name
/// the `cm_*` crates.
///
/// # Example
///
/// ```rust
/// # use cm_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("cm_bean"));
/// ```
///
/// # Resolution rules
///
/// 1. A crate listed in `dependencies` resolves to `::crate_name`.
/// 2. A `cm_`-prefixed crate reached through the umbrella crate `cm_core`
///    resolves to `::cm_core::short_name` (`cm_bean` -> `::cm_core::bean`).
/// 3. The same through a dependency renamed to `cm` gives `::cm::short_name`.
/// 4. Steps 1-3 are repeated for `dev-dependencies`.
/// 5. Otherwise the path falls back to `::crate_name`.
///
/// A crate naming itself from its own tests resolves through rule 5, which is
/// why `cm_bean` declares `extern crate self as cm_bean;`.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const UMBRELLA_NAME: &str = "cm_core";
const SHORT_NAME: &str = "cm";
const CRATE_PREFIX: &str = "cm_";

impl Manifest {
    #[inline(never)]
    fn manifest_path() -> PathBuf {
        let dir = env::var_os("CARGO_MANIFEST_DIR")
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.");
        let path = PathBuf::from(dir).join("Cargo.toml");
        assert!(
            path.exists(),
            "Cargo manifest does not exist at path {}",
            path.display(),
        );
        path
    }

    #[inline(never)]
    fn read_manifest(path: &Path) -> Document<Box<str>> {
        let text = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(text)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    fn absolute(segments: &[&str]) -> syn::Path {
        syn::parse_str(&format!("::{}", segments.join("::")))
            .expect("crate names are valid path segments")
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::absolute(&[name]));
        }

        let module = name.strip_prefix(CRATE_PREFIX)?;
        [UMBRELLA_NAME, SHORT_NAME]
            .into_iter()
            .find(|umbrella| deps.contains_key(umbrella))
            .map(|umbrella| Self::absolute(&[umbrella, module]))
    }

    /// Return a [`syn::Path`] for the package named `name` as seen from the
    /// caller's Cargo.toml. See the type documentation for the rules.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        ["dependencies", "dev-dependencies"]
            .into_iter()
            .filter_map(|section| match self.manifest.get(section) {
                Some(Item::Table(deps)) => Self::find_in_deps(deps, name),
                _ => None,
            })
            .next()
            .unwrap_or_else(|| Self::absolute(&[name]))
    }

    /// Run `func` against the caller's parsed manifest.
    ///
    /// Manifests are cached per path and re-read when the file's modification
    /// time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = Self::manifest_path();
        let modified_time = std::fs::metadata(&path)
            .and_then(|metadata| metadata.modified())
            .expect("The Cargo.toml should have a modified time.");

        {
            let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = manifests.get(&path)
                && manifest.modified_time == modified_time
            {
                return func(manifest);
            }
        }

        let manifest = Manifest {
            manifest: Self::read_manifest(&path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use toml_edit::Document;

    use super::Manifest;

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(text.to_owned().into_boxed_str()).unwrap(),
            modified_time: SystemTime::UNIX_EPOCH,
        }
    }

    fn render(path: syn::Path) -> String {
        path.segments
            .iter()
            .map(|s| s.ident.to_string())
            .collect::<Vec<_>>()
            .join("::")
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[dependencies]\ncm_bean = \"0.0.1\"\n");
        assert_eq!(render(m.get_crate_path("cm_bean")), "cm_bean");
    }

    #[test]
    fn through_umbrella() {
        let m = manifest("[dependencies]\ncm_core = \"0.0.1\"\n");
        assert_eq!(render(m.get_crate_path("cm_bean")), "cm_core::bean");

        let m = manifest("[dev-dependencies]\ncm = { package = \"cm_core\" }\n");
        assert_eq!(render(m.get_crate_path("cm_mapper")), "cm::mapper");
    }

    #[test]
    fn fallback() {
        let m = manifest("[package]\nname = \"cm_bean\"\n");
        assert_eq!(render(m.get_crate_path("cm_bean")), "cm_bean");
    }
}
