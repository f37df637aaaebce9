use quick_xml::de::Deserializer;
use quick_xml::se::Serializer;
use serde::Serialize;

use super::{Codec, Sink};
use crate::{BoxError, Format, MapperConfig};

pub(crate) struct XmlCodec {
    root: Option<String>,
    indent: usize,
}

impl XmlCodec {
    pub(crate) fn new(config: &MapperConfig) -> Self {
        Self {
            root: config.xml_root().map(str::to_owned),
            indent: config.indent(),
        }
    }
}

impl Codec for XmlCodec {
    fn format(&self) -> Format {
        Format::Xml
    }

    fn write(&self, value: &dyn erased_serde::Serialize) -> Result<String, BoxError> {
        let mut out = String::new();
        let mut ser = match &self.root {
            Some(root) => Serializer::with_root(&mut out, Some(root.as_str()))?,
            // Named after the written type.
            None => Serializer::new(&mut out),
        };
        if self.indent > 0 {
            ser.indent(' ', self.indent);
        }
        value.serialize(ser)?;
        Ok(out)
    }

    fn read(&self, text: &str, sink: &mut Sink<'_>) -> Result<(), BoxError> {
        let mut de = Deserializer::from_str(text);
        sink(&mut <dyn erased_serde::Deserializer>::erase(&mut de))?;
        Ok(())
    }

    fn text_scalars(&self) -> bool {
        true
    }
}
