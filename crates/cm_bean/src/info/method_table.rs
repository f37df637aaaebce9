use alloc::vec::Vec;
use core::any::TypeId;

use cm_utils::hash::HashMap;
use log::trace;

use crate::info::{MethodInfo, MethodRegistration};

// -----------------------------------------------------------------------------
// MethodTable

/// All registered methods of one type, indexed by name.
///
/// Declaration order is kept within an impl block. The order between several
/// `#[bean_methods]` blocks of the same type is unspecified.
#[derive(Debug, Default)]
pub struct MethodTable {
    methods: Vec<MethodInfo>,
    by_name: HashMap<&'static str, Vec<usize>>,
}

impl MethodTable {
    /// Gathers every [`MethodRegistration`] submitted for `owner`.
    pub fn collect(owner: TypeId) -> Self {
        let table: Self = inventory::iter::<MethodRegistration>
            .into_iter()
            .filter(|registration| registration.owner() == owner)
            .flat_map(|registration| registration.methods().iter().copied())
            .collect();
        trace!("collected {} bean methods", table.len());
        table
    }

    /// Methods called `name`, in registration order.
    pub fn named<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a MethodInfo> + use<'a> {
        self.by_name
            .get(name)
            .into_iter()
            .flatten()
            .map(|&index| &self.methods[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &MethodInfo> {
        self.methods.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl FromIterator<MethodInfo> for MethodTable {
    fn from_iter<I: IntoIterator<Item = MethodInfo>>(iter: I) -> Self {
        let mut table = Self::default();
        for method in iter {
            table
                .by_name
                .entry(method.name())
                .or_default()
                .push(table.methods.len());
            table.methods.push(method);
        }
        table
    }
}
