use alloc::sync::Arc;
use core::any::type_name;
use std::io::{Read, Write};
use std::sync::OnceLock;

use log::{debug, trace};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::codec::{self, Codec};
use crate::de::{Reader, Tracker};
use crate::subtype::scope;
use crate::{Configurable, Format, MapperConfig, MapperError, SubtypeEntry, SubtypeOf, SubtypeProvider};
use crate::{SubtypeRegistry, Validate};

type Predicate = Box<dyn Fn(&SubtypeEntry) -> bool + Send + Sync>;

// -----------------------------------------------------------------------------
// MapperBuilder

/// Configures a [`BeanMapper`].
///
/// Subtypes come from three sources, added in this order:
///
/// 1. [`subtype`](Self::subtype) registrations,
/// 2. submitted entries accepted by a [`scan`](Self::scan) predicate,
/// 3. submitted [`SubtypeProvider`]s, if [`providers`](Self::providers) is on.
///
/// The first registration of a name wins.
pub struct MapperBuilder {
    config: MapperConfig,
    explicit: Vec<SubtypeEntry>,
    scans: Vec<Predicate>,
    providers: bool,
}

impl MapperBuilder {
    fn new() -> Self {
        Self {
            config: MapperConfig::default(),
            explicit: Vec::new(),
            scans: Vec::new(),
            providers: false,
        }
    }

    pub fn config(mut self, config: MapperConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers `C` as `name` for the base `B`.
    pub fn subtype<B: ?Sized + 'static, C: SubtypeOf<B>>(mut self, name: &'static str) -> Self {
        self.explicit.push(SubtypeEntry::of::<B, C>(name));
        self
    }

    /// Adds the submitted entries accepted by `predicate`.
    ///
    /// ```
    /// use cm_mapper::BeanMapper;
    ///
    /// // Only subtypes declared in this crate.
    /// let mapper = BeanMapper::builder()
    ///     .scan(|entry| entry.concrete_path().starts_with("my_app::"))
    ///     .build();
    /// # let _ = mapper;
    /// ```
    pub fn scan(mut self, predicate: impl Fn(&SubtypeEntry) -> bool + Send + Sync + 'static) -> Self {
        self.scans.push(Box::new(predicate));
        self
    }

    /// Adds every submitted entry.
    pub fn scan_all(self) -> Self {
        self.scan(|_| true)
    }

    /// Whether submitted [`SubtypeProvider`]s run.
    pub fn providers(mut self, enabled: bool) -> Self {
        self.providers = enabled;
        self
    }

    pub fn build(self) -> BeanMapper {
        BeanMapper {
            config: self.config,
            sources: SubtypeSources {
                explicit: self.explicit,
                scans: self.scans,
                providers: self.providers,
            },
            registry: OnceLock::new(),
            codecs: Default::default(),
        }
    }
}

struct SubtypeSources {
    explicit: Vec<SubtypeEntry>,
    scans: Vec<Predicate>,
    providers: bool,
}

impl SubtypeSources {
    fn resolve(&self) -> SubtypeRegistry {
        let mut registry = SubtypeRegistry::new();
        registry.extend(self.explicit.iter().copied());

        if !self.scans.is_empty() {
            registry.extend_sorted(
                SubtypeEntry::submitted()
                    .filter(|entry| self.scans.iter().any(|accept| accept(entry)))
                    .copied(),
            );
        }

        if self.providers {
            for provider in SubtypeProvider::submitted() {
                trace!("running subtype provider `{}`", provider.name());
                provider.provide(&mut registry);
            }
        }
        debug!("resolved {} subtypes", registry.len());
        registry
    }
}

// -----------------------------------------------------------------------------
// BeanMapper

/// Reads and writes serde types as JSON, YAML and XML.
///
/// A mapper is cheap to share: codecs and subtypes are resolved once, on
/// first use.
///
/// # Examples
///
/// ```
/// use cm_mapper::{BeanMapper, Format, MapperConfig, MapperError};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize, Debug, PartialEq)]
/// struct Server {
///     host: String,
///     port: u16,
/// }
///
/// let mapper = BeanMapper::new();
/// let server = Server { host: "localhost".into(), port: 8080 };
///
/// let yaml = mapper.write(&server, Format::Yaml).unwrap();
/// assert_eq!(yaml, "host: localhost\nport: 8080\n");
/// assert_eq!(mapper.read::<Server>(&yaml, Format::Yaml).unwrap(), server);
///
/// let err = mapper.read::<Server>(r#"{"host":"a","port":1,"tls":true}"#, Format::Json);
/// assert!(matches!(err, Err(MapperError::UnknownProperties { .. })));
///
/// let lenient = BeanMapper::with_config(MapperConfig::new().with_fail_on_unknown_properties(false));
/// assert!(lenient.read::<Server>(r#"{"host":"a","port":1,"tls":true}"#, Format::Json).is_ok());
/// ```
pub struct BeanMapper {
    config: MapperConfig,
    sources: SubtypeSources,
    registry: OnceLock<Arc<SubtypeRegistry>>,
    codecs: [OnceLock<Option<Box<dyn Codec>>>; 3],
}

impl Default for BeanMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl BeanMapper {
    /// Default settings, all submitted subtypes and providers.
    pub fn new() -> Self {
        Self::with_config(MapperConfig::default())
    }

    /// `config`, all submitted subtypes and providers.
    pub fn with_config(config: MapperConfig) -> Self {
        Self::builder().config(config).scan_all().providers(true).build()
    }

    /// A mapper with no subtypes until some are added.
    pub fn builder() -> MapperBuilder {
        MapperBuilder::new()
    }

    #[inline]
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// The subtypes this mapper reads and writes.
    pub fn subtypes(&self) -> &SubtypeRegistry {
        self.registry()
    }

    fn registry(&self) -> &Arc<SubtypeRegistry> {
        self.registry.get_or_init(|| Arc::new(self.sources.resolve()))
    }

    fn codec(&self, format: Format) -> Result<&dyn Codec, MapperError> {
        self.codecs[format.index()]
            .get_or_init(|| codec::create(format, &self.config))
            .as_deref()
            .ok_or(MapperError::UnsupportedFormat { format })
    }

    // -------------------------------------------------------------------------
    // Write

    /// Writes `value` as `format` text.
    pub fn write<T: Serialize + ?Sized>(&self, value: &T, format: Format) -> Result<String, MapperError> {
        let codec = self.codec(format)?;
        let scope = scope::enter(Arc::clone(self.registry()));
        let result = codec.write(&value);
        let failure = scope.finish();

        match (result, failure) {
            (Ok(text), _) => {
                trace!("wrote `{}` as {format}: {} bytes", type_name::<T>(), text.len());
                Ok(text)
            }
            (Err(_), Some(failure)) => Err(failure),
            (Err(source), None) => Err(MapperError::Write { format, source }),
        }
    }

    /// Writes `value` as `format` text into `writer`.
    pub fn write_to<W: Write, T: Serialize + ?Sized>(
        &self,
        mut writer: W,
        value: &T,
        format: Format,
    ) -> Result<(), MapperError> {
        let text = self.write(value, format)?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Writes the configuration form of `value`.
    pub fn write_configurable<T: Configurable>(&self, value: &T, format: Format) -> Result<String, MapperError> {
        self.write(&value.to_config(), format)
    }

    // -------------------------------------------------------------------------
    // Read

    /// Reads a `T` from `format` text.
    ///
    /// Properties `T` has no field for fail the read with
    /// [`MapperError::UnknownProperties`] unless
    /// [`fail_on_unknown_properties`](MapperConfig::fail_on_unknown_properties)
    /// is off.
    pub fn read<T: DeserializeOwned>(&self, text: &str, format: Format) -> Result<T, MapperError> {
        let codec = self.codec(format)?;
        let scope = scope::enter(Arc::clone(self.registry()));
        let result = self.read_in(codec, text);
        let failure = scope.finish();

        match (result, failure) {
            (Ok(value), _) => Ok(value),
            (Err(_), Some(failure)) => Err(failure),
            (Err(err), None) => Err(err),
        }
    }

    /// Reads a `T` from `format` text in `reader`.
    pub fn read_from<R: Read, T: DeserializeOwned>(
        &self,
        mut reader: R,
        format: Format,
    ) -> Result<T, MapperError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.read(&text, format)
    }

    /// Reads a `T` and checks its [`Validate`] constraints.
    pub fn read_validated<T>(&self, text: &str, format: Format) -> Result<T, MapperError>
    where
        T: DeserializeOwned + Validate,
    {
        let value: T = self.read(text, format)?;
        let violations = value.validate();
        if violations.is_empty() {
            Ok(value)
        } else {
            debug!("`{}` read as {format} has {} violations", type_name::<T>(), violations.len());
            Err(MapperError::Constraint { violations })
        }
    }

    /// Reads the configuration form of `T` and builds it.
    pub fn read_configurable<T: Configurable>(&self, text: &str, format: Format) -> Result<T, MapperError> {
        let config: T::Config = self.read(text, format)?;
        T::from_config(config).map_err(|source| MapperError::Configure {
            type_path: type_name::<T>(),
            source,
        })
    }

    fn read_in<T: DeserializeOwned>(&self, codec: &dyn Codec, text: &str) -> Result<T, MapperError> {
        let format = codec.format();
        let read_error = |source| MapperError::Read { format, source };
        let tracker = Tracker::new(self.config.empty_string_as_null(), codec.text_scalars());

        let mut out = None;
        codec
            .read(text, &mut |de: &mut dyn erased_serde::Deserializer<'_>| -> Result<(), erased_serde::Error> {
                out = Some(T::deserialize(Reader::new(de, &tracker))?);
                Ok(())
            })
            .map_err(read_error)?;
        let value = out.ok_or_else(|| read_error("document is empty".into()))?;

        let paths = tracker.into_skipped();
        if !paths.is_empty() {
            if self.config.fail_on_unknown_properties() {
                return Err(MapperError::UnknownProperties { format, paths });
            }
            debug!("skipped unknown properties of `{}` in {format}: {paths:?}", type_name::<T>());
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::BeanMapper;
    use crate::{Format, MapperConfig, MapperError};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Contact {
        name: String,
        email: Option<String>,
    }

    #[test]
    fn empty_strings_as_null() {
        let text = r#"{"name":"ann","email":""}"#;

        let plain = BeanMapper::new();
        let contact: Contact = plain.read(text, Format::Json).unwrap();
        assert_eq!(contact.email.as_deref(), Some(""));

        let mapper = BeanMapper::with_config(MapperConfig::new().with_empty_string_as_null(true));
        let contact: Contact = mapper.read(text, Format::Json).unwrap();
        assert_eq!(contact.email, None);

        let contact: Contact = mapper.read("name: ann\nemail: ''\n", Format::Yaml).unwrap();
        assert_eq!(contact.email, None);

        // Only optional values become `None`.
        let contact: Contact = mapper.read(r#"{"name":"","email":"e@x"}"#, Format::Json).unwrap();
        assert_eq!(contact.name, "");
        assert_eq!(contact.email.as_deref(), Some("e@x"));
    }

    #[test]
    fn empty_xml_elements_as_null() {
        let xml = "<Contact><name>a</name><email></email></Contact>";

        let plain = BeanMapper::new();
        let contact: Contact = plain.read(xml, Format::Xml).unwrap();
        assert_eq!(contact.email.as_deref(), Some(""));

        let mapper = BeanMapper::with_config(MapperConfig::new().with_empty_string_as_null(true));
        let contact: Contact = mapper.read(xml, Format::Xml).unwrap();
        assert_eq!(contact, Contact { name: String::from("a"), email: None });

        let contact: Contact = mapper.read("<Contact><name>b</name><email/></Contact>", Format::Xml).unwrap();
        assert_eq!(contact.email, None);

        let contact: Contact = mapper
            .read("<Contact><name>c</name><email>c@example.com</email></Contact>", Format::Xml)
            .unwrap();
        assert_eq!(contact.email.as_deref(), Some("c@example.com"));

        #[derive(Deserialize, Debug, PartialEq)]
        struct Limits {
            max: Option<u32>,
            min: Option<u32>,
        }
        let limits: Limits = mapper.read("<Limits><max>5</max><min></min></Limits>", Format::Xml).unwrap();
        assert_eq!(limits, Limits { max: Some(5), min: None });
    }

    #[test]
    fn compact_output() {
        let mapper = BeanMapper::with_config(MapperConfig::new().with_indent(0));
        let contact = Contact {
            name: String::from("bo"),
            email: None,
        };
        assert_eq!(mapper.write(&contact, Format::Json).unwrap(), r#"{"name":"bo","email":null}"#);
        let xml = mapper.write(&contact, Format::Xml).unwrap();
        assert!(xml.starts_with("<Contact><name>bo</name>"), "{xml}");
        assert!(!xml.contains('\n'));
    }

    #[test]
    fn io_round_trip() {
        let mapper = BeanMapper::new();
        let contact = Contact {
            name: String::from("cy"),
            email: Some(String::from("cy@example.com")),
        };

        let mut buf = Vec::new();
        mapper.write_to(&mut buf, &contact, Format::Yaml).unwrap();
        let back: Contact = mapper.read_from(buf.as_slice(), Format::Yaml).unwrap();
        assert_eq!(back, contact);
    }

    #[test]
    fn malformed_input() {
        let mapper = BeanMapper::new();
        let err = mapper.read::<Contact>("{\"name\":", Format::Json).unwrap_err();
        assert!(matches!(err, MapperError::Read { format: Format::Json, .. }));
        assert!(err.to_string().starts_with("cannot read json: "));
    }
}
