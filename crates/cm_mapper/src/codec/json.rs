use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::{Codec, Sink};
use crate::{BoxError, Format, MapperConfig};

pub(crate) struct JsonCodec {
    indent: Option<Vec<u8>>,
}

impl JsonCodec {
    pub(crate) fn new(config: &MapperConfig) -> Self {
        let indent = (config.indent() > 0).then(|| vec![b' '; config.indent()]);
        Self { indent }
    }
}

impl Codec for JsonCodec {
    fn format(&self) -> Format {
        Format::Json
    }

    fn write(&self, value: &dyn erased_serde::Serialize) -> Result<String, BoxError> {
        let Some(indent) = &self.indent else {
            return Ok(serde_json::to_string(value)?);
        };
        let mut out = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent));
        value.serialize(&mut ser)?;
        Ok(String::from_utf8(out)?)
    }

    fn read(&self, text: &str, sink: &mut Sink<'_>) -> Result<(), BoxError> {
        let mut de = serde_json::Deserializer::from_str(text);
        sink(&mut <dyn erased_serde::Deserializer>::erase(&mut de))?;
        de.end()?;
        Ok(())
    }
}
