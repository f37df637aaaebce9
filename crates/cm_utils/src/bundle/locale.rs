use core::fmt;

// -----------------------------------------------------------------------------
// Locale

/// A language with an optional country, such as `en` or `de_CH`.
///
/// The root locale has an empty language and only matches the base layer of
/// a bundle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Locale {
    language: String,
    country: Option<String>,
}

impl Locale {
    pub fn new(language: &str, country: Option<&str>) -> Self {
        Self {
            language: language.to_ascii_lowercase(),
            country: country
                .filter(|c| !c.is_empty())
                .map(str::to_ascii_uppercase),
        }
    }

    /// The locale with no language, matching base layers only.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn english() -> Self {
        Self::new("en", None)
    }

    /// Parses tags such as `en`, `en_US`, `en-us` or `de_CH.UTF-8`.
    ///
    /// Encoding and modifier suffixes are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use cm_utils::bundle::Locale;
    ///
    /// let locale = Locale::parse("pt-br.UTF-8");
    /// assert_eq!(locale.language(), "pt");
    /// assert_eq!(locale.country(), Some("BR"));
    /// assert_eq!(locale.to_string(), "pt_BR");
    /// ```
    pub fn parse(tag: &str) -> Self {
        let tag = tag.split(['.', '@']).next().unwrap_or_default().trim();
        if tag.is_empty() || tag == "C" || tag == "POSIX" {
            return Self::root();
        }
        let mut parts = tag.split(['_', '-']);
        let language = parts.next().unwrap_or_default();
        Self::new(language, parts.next())
    }

    /// Reads `LC_ALL`, `LC_MESSAGES` or `LANG`, in that order.
    pub fn from_env() -> Self {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .into_iter()
            .filter_map(|name| std::env::var(name).ok())
            .find(|value| !value.is_empty())
            .map(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.language.is_empty()
    }

    /// Name suffixes from most to least specific, ending with `""`.
    pub(crate) fn suffixes(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(3);
        if !self.is_root() {
            if let Some(country) = &self.country {
                out.push(format!("_{}_{}", self.language, country));
            }
            out.push(format!("_{}", self.language));
        }
        out.push(String::new());
        out
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.country {
            Some(country) => write!(f, "{}_{}", self.language, country),
            None => f.write_str(&self.language),
        }
    }
}
