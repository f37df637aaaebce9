use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::Value;
use crate::util::render::render;
use crate::visit::visit_properties;

/// `Type.property = value` lines of every traversed property.
fn property_lines(root: &dyn Value) -> Vec<(String, String)> {
    let mut lines = Vec::new();
    visit_properties(root, |bean, property, value| {
        let key = format!("{}.{}", bean.bean_info().name(), property.name());
        lines.push((key, render(value)));
        true
    });
    lines
}

/// Describes how two object graphs differ.
///
/// Both graphs are flattened into `Type.property = value` lines. Lines only
/// found in `a` are prefixed with `<`, lines only found in `b` with `>`.
/// Output is sorted by property, then side, then value. Equal graphs give an
/// empty string.
///
/// Nested beans, and collections holding them, are compared by identity:
/// their own properties are listed separately.
///
/// ```
/// use cm_bean::{Bean, bean_methods, util};
///
/// #[derive(Bean, Default)]
/// #[bean(default)]
/// struct Item {
///     count: u32,
/// }
///
/// #[bean_methods]
/// impl Item {
///     fn get_count(&self) -> u32 { self.count }
///     fn set_count(&mut self, count: u32) { self.count = count; }
/// }
///
/// let diff = util::diff(&Item { count: 1 }, &Item { count: 2 });
/// assert_eq!(diff, "< Item.count = 1\n> Item.count = 2");
/// assert_eq!(util::diff(&Item { count: 1 }, &Item { count: 1 }), "");
/// ```
pub fn diff(a: &dyn Value, b: &dyn Value) -> String {
    let mut balance: BTreeMap<(String, String), isize> = BTreeMap::new();
    for line in property_lines(a) {
        *balance.entry(line).or_default() += 1;
    }
    for line in property_lines(b) {
        *balance.entry(line).or_default() -= 1;
    }

    let mut out: Vec<(String, char, String)> = Vec::new();
    for ((key, value), count) in balance {
        let side = if count > 0 { '<' } else { '>' };
        for _ in 0..count.unsigned_abs() {
            out.push((key.clone(), side, value.clone()));
        }
    }
    out.sort();

    out.into_iter()
        .map(|(key, side, value)| format!("{side} {key} = {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::diff;

    #[test]
    fn non_beans_have_no_properties() {
        assert_eq!(diff(&1_u8, &2_u8), "");
    }
}
