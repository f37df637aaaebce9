use super::{Codec, Sink};
use crate::{BoxError, Format};

pub(crate) struct YamlCodec;

impl Codec for YamlCodec {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn write(&self, value: &dyn erased_serde::Serialize) -> Result<String, BoxError> {
        Ok(serde_yaml::to_string(value)?)
    }

    fn read(&self, text: &str, sink: &mut Sink<'_>) -> Result<(), BoxError> {
        let de = serde_yaml::Deserializer::from_str(text);
        sink(&mut <dyn erased_serde::Deserializer>::erase(de))?;
        Ok(())
    }
}
