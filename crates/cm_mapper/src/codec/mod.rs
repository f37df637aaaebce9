//! One codec per format, behind its cargo feature.

use crate::{BoxError, Format, MapperConfig};

crate::cfg::json! {
    mod json;
}

crate::cfg::yaml! {
    mod yaml;
}

crate::cfg::xml! {
    mod xml;
}

/// Receives the deserializer of a document.
pub(crate) type Sink<'s> =
    dyn for<'de> FnMut(&mut dyn erased_serde::Deserializer<'de>) -> Result<(), erased_serde::Error> + 's;

/// Text conversion of one format.
pub(crate) trait Codec: Send + Sync {
    fn format(&self) -> Format;

    fn write(&self, value: &dyn erased_serde::Serialize) -> Result<String, BoxError>;

    /// Hands the document's deserializer to `sink`.
    fn read(&self, text: &str, sink: &mut Sink<'_>) -> Result<(), BoxError>;

    /// Whether every scalar is text, to be parsed as the target asks.
    fn text_scalars(&self) -> bool {
        false
    }
}

/// The codec of `format`, `None` if its feature is off.
pub(crate) fn create(format: Format, config: &MapperConfig) -> Option<Box<dyn Codec>> {
    log::debug!("creating {format} codec");
    match format {
        Format::Json => crate::cfg::json! {
            if { Some(Box::new(json::JsonCodec::new(config))) } else { None }
        },
        Format::Yaml => crate::cfg::yaml! {
            if { Some(Box::new(yaml::YamlCodec)) } else { None }
        },
        Format::Xml => crate::cfg::xml! {
            if { Some(Box::new(xml::XmlCodec::new(config))) } else { None }
        },
    }
}
