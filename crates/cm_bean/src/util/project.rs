use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

use crate::util::copy::snapshot;
use crate::util::render::is_leaf;
use crate::{BeanError, Value, ValueRef};

/// Copies of the readable properties, by name.
pub fn to_map(value: &dyn Value) -> Result<BTreeMap<&'static str, Box<dyn Value>>, BeanError> {
    Ok(snapshot(value)?.into_iter().collect())
}

/// Readable scalar properties rendered as text. `None` values are left out.
///
/// Strings render without quotes.
pub fn to_properties(value: &dyn Value) -> Result<BTreeMap<String, String>, BeanError> {
    Ok(snapshot(value)?
        .into_iter()
        .filter(|(_, value)| is_leaf(&**value))
        .filter_map(|(name, value)| text(&*value).map(|text| (String::from(name), text)))
        .collect())
}

fn text(value: &dyn Value) -> Option<String> {
    match value.value_ref() {
        ValueRef::Optional(None) => None,
        ValueRef::Optional(Some(inner)) => text(inner),
        _ => Some(value.display().to_string()),
    }
}
