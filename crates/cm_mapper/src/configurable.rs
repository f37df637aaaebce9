use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::BoxError;

/// A type written through a separate configuration form.
///
/// [`BeanMapper::write_configurable`](crate::BeanMapper::write_configurable)
/// writes [`Configurable::to_config`], and
/// [`BeanMapper::read_configurable`](crate::BeanMapper::read_configurable)
/// rebuilds the value with [`Configurable::from_config`].
///
/// # Examples
///
/// ```
/// use cm_mapper::{BeanMapper, BoxError, Configurable, Format};
/// use std::time::Duration;
///
/// struct Timeout(Duration);
///
/// impl Configurable for Timeout {
///     type Config = u64;
///
///     fn to_config(&self) -> u64 {
///         self.0.as_secs()
///     }
///
///     fn from_config(secs: u64) -> Result<Self, BoxError> {
///         if secs == 0 {
///             return Err("timeout must be positive".into());
///         }
///         Ok(Timeout(Duration::from_secs(secs)))
///     }
/// }
///
/// let mapper = BeanMapper::new();
/// let text = mapper.write_configurable(&Timeout(Duration::from_secs(30)), Format::Json).unwrap();
/// assert_eq!(text, "30");
///
/// let back: Timeout = mapper.read_configurable("30", Format::Json).unwrap();
/// assert_eq!(back.0.as_secs(), 30);
/// assert!(mapper.read_configurable::<Timeout>("0", Format::Json).is_err());
/// ```
pub trait Configurable: Sized {
    type Config: Serialize + DeserializeOwned;

    fn to_config(&self) -> Self::Config;

    fn from_config(config: Self::Config) -> Result<Self, BoxError>;
}
