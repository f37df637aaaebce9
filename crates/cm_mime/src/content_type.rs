use core::fmt;

// -----------------------------------------------------------------------------
// ContentType

/// A MIME type with its file extensions and a display name.
///
/// The MIME type is stored lower-cased without parameters. Extensions are
/// lower-cased without leading dot; the first one is the default.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentType {
    mime: String,
    extensions: Vec<String>,
    display_name: Option<String>,
}

impl ContentType {
    /// # Examples
    ///
    /// ```
    /// use cm_mime::ContentType;
    ///
    /// let ty = ContentType::new("Text/HTML; charset=utf-8", [".HTML", "htm"]);
    /// assert_eq!(ty.mime(), "text/html");
    /// assert_eq!(ty.extensions(), ["html", "htm"]);
    /// assert_eq!(ty.subtype(), "html");
    /// assert_eq!(ty.display_name(), "text/html");
    /// ```
    pub fn new<I, S>(mime: &str, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for ext in extensions {
            let ext = normalize_extension(ext.as_ref());
            if !ext.is_empty() && !normalized.contains(&ext) {
                normalized.push(ext);
            }
        }
        Self {
            mime: normalize_mime(mime),
            extensions: normalized,
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    #[inline]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// The part before `/`, such as `image`.
    pub fn top_level(&self) -> &str {
        self.mime.split_once('/').map_or(self.mime.as_str(), |(top, _)| top)
    }

    /// The part after `/`, such as `svg+xml`.
    pub fn subtype(&self) -> &str {
        self.mime.split_once('/').map_or("", |(_, sub)| sub)
    }

    #[inline]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    #[inline]
    pub fn default_extension(&self) -> Option<&str> {
        self.extensions.first().map(String::as_str)
    }

    /// The display name, or the MIME type when there is none.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.mime)
    }

    /// `text/*` and textual structured formats such as JSON and XML.
    pub fn is_text(&self) -> bool {
        let sub = self.subtype();
        self.top_level() == "text"
            || matches!(sub, "json" | "xml" | "javascript" | "x-yaml" | "toml" | "sql")
            || sub.ends_with("+xml")
            || sub.ends_with("+json")
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mime)
    }
}

/// Lower-cases `mime` and drops parameters.
pub(crate) fn normalize_mime(mime: &str) -> String {
    mime.split(';').next().unwrap_or_default().trim().to_ascii_lowercase()
}

/// Lower-cases `ext` and drops leading dots.
pub(crate) fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}
