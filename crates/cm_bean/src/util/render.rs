use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::info::short_type_name;
use crate::value::address_of;
use crate::{Bean, Value, ValueRef};

/// One-line rendering of a property value.
///
/// `None` renders as `null`, scalars with their debug form. Collections and
/// maps of scalars render their elements, map entries sorted. Anything else
/// renders by identity as `Type@address`.
pub(crate) fn render(value: &dyn Value) -> String {
    match value.value_ref() {
        ValueRef::Optional(None) => String::from("null"),
        ValueRef::Optional(Some(inner)) => render(inner),
        ValueRef::Scalar(scalar) => format!("{scalar:?}"),
        ValueRef::Collection(collection) if collection.iter_values().all(is_leaf) => {
            let items: Vec<String> = collection.iter_values().map(render).collect();
            format!("[{}]", items.join(", "))
        }
        ValueRef::Map(map) if map.iter_entries().all(|(k, v)| is_leaf(k) && is_leaf(v)) => {
            let mut entries: Vec<String> = map
                .iter_entries()
                .map(|(k, v)| format!("{}: {}", render(k), render(v)))
                .collect();
            entries.sort_unstable();
            format!("{{{}}}", entries.join(", "))
        }
        view => match view.payload() {
            Some(payload) => identity(payload),
            None => String::from("null"),
        },
    }
}

pub(crate) fn identity(value: &dyn Value) -> String {
    format!("{}@{:x}", short_type_name(value.value_type_path()), address_of(value))
}

/// Scalars and optional scalars.
pub(crate) fn is_leaf(value: &dyn Value) -> bool {
    match value.value_ref() {
        ValueRef::Scalar(_) | ValueRef::Optional(None) => true,
        ValueRef::Optional(Some(inner)) => is_leaf(inner),
        _ => false,
    }
}

struct Rendered(String);

impl fmt::Debug for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shallow debug rendering of a bean from its readable properties.
///
/// Nested beans render by identity, so cyclic graphs format fine.
pub fn fmt_bean(bean: &dyn Bean, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let info = bean.bean_info();
    let this: &dyn Value = bean;
    let mut out = f.debug_struct(info.name());
    for property in info.properties() {
        if let Ok(Some(value)) = property.read(this) {
            out.field(property.name(), &Rendered(render(&*value)));
        }
    }
    out.finish()
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;

    use super::{is_leaf, render};

    #[test]
    fn renders_leaves() {
        assert_eq!(render(&Some(3_u8)), "3");
        assert_eq!(render(&Option::<u8>::None), "null");
        assert_eq!(render(&String::from("a")), "\"a\"");
        assert_eq!(render(&vec![1, 2]), "[1, 2]");

        let mut map = BTreeMap::new();
        map.insert(2_u8, true);
        map.insert(1_u8, false);
        assert_eq!(render(&map), "{1: false, 2: true}");
    }

    #[test]
    fn nested_collections_render_by_identity() {
        let nested = vec![vec![1_u8]];
        assert!(!is_leaf(&nested));
        assert!(render(&nested).starts_with("Vec<Vec<u8>>@"));
    }
}
