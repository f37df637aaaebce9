use core::fmt;
use std::path::Path;

use cm_mime::ContentTypeRegistry;

/// A document format of the [`BeanMapper`](crate::BeanMapper).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Format {
    Json,
    Yaml,
    Xml,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Json, Format::Yaml, Format::Xml];

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Lower-case name, such as `json`.
    pub const fn name(self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Xml => "xml",
        }
    }

    /// The canonical MIME type.
    pub const fn mime(self) -> &'static str {
        match self {
            Format::Json => "application/json",
            Format::Yaml => "application/x-yaml",
            Format::Xml => "application/xml",
        }
    }

    /// Whether the cargo feature of this format is on.
    pub const fn is_enabled(self) -> bool {
        match self {
            Format::Json => crate::cfg::json!(),
            Format::Yaml => crate::cfg::yaml!(),
            Format::Xml => crate::cfg::xml!(),
        }
    }

    /// The format of a MIME type. Case and parameters are ignored.
    ///
    /// ```
    /// use cm_mapper::Format;
    ///
    /// assert_eq!(Format::from_mime("application/json; charset=utf-8"), Some(Format::Json));
    /// assert_eq!(Format::from_mime("text/yaml"), Some(Format::Yaml));
    /// assert_eq!(Format::from_mime("image/svg+xml"), Some(Format::Xml));
    /// assert_eq!(Format::from_mime("text/plain"), None);
    /// ```
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
        let (top, sub) = mime.split_once('/')?;
        match sub {
            "json" => Some(Format::Json),
            "yaml" | "x-yaml" => Some(Format::Yaml),
            "xml" if matches!(top, "application" | "text") => Some(Format::Xml),
            _ if sub.ends_with("+json") => Some(Format::Json),
            _ if sub.ends_with("+xml") => Some(Format::Xml),
            _ => None,
        }
    }

    /// The format of a file, from its content type.
    ///
    /// ```
    /// use cm_mapper::Format;
    /// use std::path::Path;
    ///
    /// assert_eq!(Format::for_path(Path::new("conf/app.YML")), Some(Format::Yaml));
    /// assert_eq!(Format::for_path(Path::new("pom.xml")), Some(Format::Xml));
    /// assert_eq!(Format::for_path(Path::new("README.md")), None);
    /// ```
    pub fn for_path(path: &Path) -> Option<Self> {
        let ty = ContentTypeRegistry::builtin().for_path(path)?;
        Self::from_mime(ty.mime())
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
