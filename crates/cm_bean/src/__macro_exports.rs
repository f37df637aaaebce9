//! Paths used by code generated from `cm_bean_derive`.

pub use inventory;

pub mod macro_utils {
    pub use alloc::boxed::Box;
    pub use alloc::vec::Vec;
    pub use core::any::TypeId;
    pub use core::clone::Clone;
    pub use core::cmp::PartialEq;
    pub use core::default::Default;
    pub use core::fmt::{Debug, Formatter, Result as FmtResult};
    pub use core::option::Option::{self, None, Some};
    pub use core::result::Result::{self, Ok};
    pub use alloc::string::String;
}
