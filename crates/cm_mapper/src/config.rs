/// Settings of a [`BeanMapper`](crate::BeanMapper).
///
/// | setting | default |
/// |---|---|
/// | `indent` | `2` |
/// | `fail_on_unknown_properties` | `true` |
/// | `empty_string_as_null` | `false` |
/// | `xml_root` | the type name |
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapperConfig {
    indent: usize,
    fail_on_unknown_properties: bool,
    empty_string_as_null: bool,
    xml_root: Option<String>,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            fail_on_unknown_properties: true,
            empty_string_as_null: false,
            xml_root: None,
        }
    }
}

impl MapperConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spaces per nesting level of JSON and XML output. `0` writes
    /// everything on one line. YAML always indents by two.
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Whether input keys the target type has no field or alias for are an
    /// error.
    pub fn with_fail_on_unknown_properties(mut self, fail: bool) -> Self {
        self.fail_on_unknown_properties = fail;
        self
    }

    /// Whether `""` is read as `None` where an `Option` is expected. Empty
    /// XML elements (`<a/>`, `<a></a>`) count as `""`.
    pub fn with_empty_string_as_null(mut self, enabled: bool) -> Self {
        self.empty_string_as_null = enabled;
        self
    }

    /// Root element name of written XML.
    pub fn with_xml_root(mut self, root: impl Into<String>) -> Self {
        self.xml_root = Some(root.into());
        self
    }

    #[inline]
    pub fn indent(&self) -> usize {
        self.indent
    }

    #[inline]
    pub fn fail_on_unknown_properties(&self) -> bool {
        self.fail_on_unknown_properties
    }

    #[inline]
    pub fn empty_string_as_null(&self) -> bool {
        self.empty_string_as_null
    }

    #[inline]
    pub fn xml_root(&self) -> Option<&str> {
        self.xml_root.as_deref()
    }
}
