use crate::hash::HashMap;

use super::BundleError;

// -----------------------------------------------------------------------------
// Properties

/// Key/value pairs in the `.properties` text format.
///
/// Supported syntax:
/// - `#` and `!` start comment lines, blank lines are ignored;
/// - keys end at the first unescaped `=`, `:` or whitespace;
/// - a line ending in an odd number of `\` continues on the next line;
/// - `\t`, `\n`, `\r`, `\f`, `\uXXXX` and `\<any>` escapes.
///
/// # Examples
///
/// ```
/// use cm_utils::bundle::Properties;
///
/// let props = Properties::parse("greeting = hello \\\n    world\n# note\nsep\\=key:1").unwrap();
/// assert_eq!(props.get("greeting"), Some("hello world"));
/// assert_eq!(props.get("sep=key"), Some("1"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Properties {
    entries: HashMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `.properties` text.
    pub fn parse(text: &str) -> Result<Self, BundleError> {
        Self::parse_named(text, "<inline>")
    }

    /// Parses `.properties` text, naming `source_name` in errors.
    pub fn parse_named(text: &str, source_name: &str) -> Result<Self, BundleError> {
        let mut props = Self::new();
        let mut lines = text.lines().enumerate();

        while let Some((index, line)) = lines.next() {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
                continue;
            }

            let mut logical = String::from(trimmed);
            while ends_with_continuation(&logical) {
                logical.pop();
                match lines.next() {
                    Some((_, next)) => logical.push_str(next.trim_start()),
                    None => break,
                }
            }

            let (key, value) = split_entry(&logical);
            let line_no = index + 1;
            let key = unescape(key).map_err(|message| BundleError::Parse {
                source_name: source_name.to_owned(),
                line: line_no,
                message,
            })?;
            let value = unescape(value).map_err(|message| BundleError::Parse {
                source_name: source_name.to_owned(),
                line: line_no,
                message,
            })?;
            props.entries.insert(key, value);
        }

        Ok(props)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Self::new();
        for (k, v) in iter {
            props.insert(k, v);
        }
        props
    }
}

// -----------------------------------------------------------------------------
// Parsing helpers

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (index, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = index;
                break;
            }
            c if c.is_whitespace() => {
                key_end = index;
                break;
            }
            _ => {}
        }
    }

    let rest = line[key_end..].trim_start();
    let rest = rest.strip_prefix(['=', ':']).unwrap_or(rest).trim_start();
    (&line[..key_end], rest)
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let code = (hex.len() == 4)
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32)
                    .ok_or_else(|| format!("invalid unicode escape `\\u{hex}`"))?;
                out.push(code);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::Properties;
    use crate::bundle::BundleError;

    #[test]
    fn separators_and_whitespace() {
        let props = Properties::parse(
            "a=1\nb : 2\nc 3\n   d=   padded  \n\n! bang comment\n# hash comment\ne\n",
        )
        .unwrap();

        assert_eq!(props.get("a"), Some("1"));
        assert_eq!(props.get("b"), Some("2"));
        assert_eq!(props.get("c"), Some("3"));
        assert_eq!(props.get("d"), Some("padded  "));
        assert_eq!(props.get("e"), Some(""));
        assert_eq!(props.len(), 5);
    }

    #[test]
    fn continuation_lines() {
        let props = Properties::parse("list = one, \\\n       two, \\\n       three\nnext=x").unwrap();
        assert_eq!(props.get("list"), Some("one, two, three"));
        assert_eq!(props.get("next"), Some("x"));
    }

    #[test]
    fn escaped_backslash_does_not_continue() {
        let props = Properties::parse("path=C:\\\\dir\\\\\nother=1").unwrap();
        assert_eq!(props.get("path"), Some("C:\\dir\\"));
        assert_eq!(props.get("other"), Some("1"));
    }

    #[test]
    fn escapes() {
        let props = Properties::parse("tab=a\\tb\nuni=\\u00e9t\\u00E9\nkey\\ with\\ space=v").unwrap();
        assert_eq!(props.get("tab"), Some("a\tb"));
        assert_eq!(props.get("uni"), Some("été"));
        assert_eq!(props.get("key with space"), Some("v"));
    }

    #[test]
    fn bad_unicode_escape_reports_line() {
        let err = Properties::parse_named("ok=1\nbad=\\u12", "sample").unwrap_err();
        match err {
            BundleError::Parse { source_name, line, .. } => {
                assert_eq!(source_name, "sample");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn later_duplicates_win() {
        let props = Properties::parse("k=1\nk=2").unwrap();
        assert_eq!(props.get("k"), Some("2"));
    }
}
