use core::any::TypeId;

use crate::info::TypeDesc;

// -----------------------------------------------------------------------------
// FieldInfo

/// A named field of a bean.
///
/// Only private, non-skipped fields become property candidates.
#[derive(Clone, Debug)]
pub struct FieldInfo {
    name: &'static str,
    ty: TypeDesc,
    private: bool,
    transient: bool,
    skip: bool,
}

impl FieldInfo {
    /// A private, non-transient field of type `T`.
    #[inline]
    pub fn new<T: ?Sized + 'static>(name: &'static str) -> Self {
        Self {
            name,
            ty: TypeDesc::of::<T>(),
            private: true,
            transient: false,
            skip: false,
        }
    }

    #[inline]
    pub fn with_private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    /// Transient properties are left out of traversals and diffs.
    #[inline]
    pub fn with_transient(mut self, transient: bool) -> Self {
        self.transient = transient;
        self
    }

    /// Skipped fields never become properties.
    #[inline]
    pub fn with_skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn ty(&self) -> &TypeDesc {
        &self.ty
    }

    #[inline]
    pub fn ty_id(&self) -> TypeId {
        self.ty.id()
    }

    #[inline]
    pub const fn is_private(&self) -> bool {
        self.private
    }

    #[inline]
    pub const fn is_transient(&self) -> bool {
        self.transient
    }

    #[inline]
    pub const fn is_skipped(&self) -> bool {
        self.skip
    }
}
