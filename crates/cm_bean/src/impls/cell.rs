//! Static storage of [`BeanInfo`], used by generated `TypedBean` impls.
//!
//! A `static` inside a generic function is shared by every instantiation,
//! so generic beans key their metadata by [`TypeId`].

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::OnceLock;

use cm_utils::TypeIdMap;
use parking_lot::RwLock;

use crate::info::BeanInfo;

// -----------------------------------------------------------------------------
// BeanInfoCell

/// Metadata cell for non-generic beans.
///
/// ```ignore
/// impl TypedBean for Foo {
///     fn type_bean_info() -> &'static BeanInfo {
///         static CELL: BeanInfoCell = BeanInfoCell::new();
///         CELL.get_or_init(|| BeanInfo::new::<Self>(vec![/* .. */]))
///     }
/// }
/// ```
pub struct BeanInfoCell(OnceLock<BeanInfo>);

impl BeanInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> BeanInfo) -> &BeanInfo {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericBeanInfoCell

/// Metadata cell for generic beans, one leaked [`BeanInfo`] per instantiation.
pub struct GenericBeanInfoCell(RwLock<TypeIdMap<&'static BeanInfo>>);

impl GenericBeanInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> BeanInfo) -> &'static BeanInfo {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> BeanInfo,
    ) -> &'static BeanInfo {
        if let Some(info) = self.0.read().get(&type_id).copied() {
            return info;
        }
        // Built outside the lock: building may consult other generic beans.
        let info = f();
        *self
            .0
            .write()
            .get_or_insert(type_id, || Box::leak(Box::new(info)))
    }
}
