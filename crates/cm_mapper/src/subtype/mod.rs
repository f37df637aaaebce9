//! Polymorphic values written with a subtype name.
//!
//! A base is a trait object type such as `dyn Shape`, where `Shape` extends
//! [`Subtype`]. Each concrete type is registered under a name with
//! [`subtype!`](crate::subtype!). A [`Poly<dyn Shape>`](Poly) field is then
//! written as a single-entry map from that name to the value:
//!
//! ```json
//! { "circle": { "radius": 1.5 } }
//! ```
//!
//! Which names a [`BeanMapper`](crate::BeanMapper) knows is decided when it
//! is built, see [`MapperBuilder`](crate::MapperBuilder).
//!
//! # Examples
//!
//! ```
//! use cm_mapper::{BeanMapper, Format, Poly, Subtype};
//! use serde::{Deserialize, Serialize};
//!
//! trait Shape: Subtype {
//!     fn area(&self) -> f64;
//! }
//! cm_mapper::poly_base!(dyn Shape);
//!
//! #[derive(Serialize, Deserialize)]
//! struct Square { side: f64 }
//!
//! impl Shape for Square {
//!     fn area(&self) -> f64 { self.side * self.side }
//! }
//! cm_mapper::impl_subtype!(dyn Shape => Square);
//!
//! let mapper = BeanMapper::builder()
//!     .subtype::<dyn Shape, Square>("square")
//!     .build();
//! let shape: Poly<dyn Shape> = Poly::new(Box::new(Square { side: 2.0 }));
//! let text = mapper.write(&shape, Format::Json).unwrap();
//! assert_eq!(text, "{\n  \"square\": {\n    \"side\": 2.0\n  }\n}");
//!
//! let back: Poly<dyn Shape> = mapper.read(&text, Format::Json).unwrap();
//! assert_eq!(back.area(), 4.0);
//! ```

use core::any::Any;

use serde::de::DeserializeOwned;

mod entry;
mod poly;
mod registry;
pub(crate) mod scope;

pub use entry::{SubtypeEntry, SubtypeProvider};
pub use poly::Poly;
pub use registry::SubtypeRegistry;

// -----------------------------------------------------------------------------
// Traits

/// Supertrait of polymorphic base traits.
///
/// Implemented for every serializable `'static` type.
pub trait Subtype: erased_serde::Serialize + Any {}

impl<T: erased_serde::Serialize + Any> Subtype for T {}

/// A trait object type usable in [`Poly`].
///
/// Implement it with [`poly_base!`](crate::poly_base!).
pub trait PolyBase: Any {
    fn as_subtype(&self) -> &dyn Subtype;
}

/// A concrete type readable as the base `B`.
///
/// Implement it with [`impl_subtype!`](crate::impl_subtype!) or
/// [`subtype!`](crate::subtype!).
pub trait SubtypeOf<B: ?Sized>: Subtype + DeserializeOwned {
    fn upcast(self: Box<Self>) -> Box<B>;
}

// -----------------------------------------------------------------------------
// Macros

/// Implements [`PolyBase`] for a trait object type.
///
/// ```
/// trait Animal: cm_mapper::Subtype {}
/// cm_mapper::poly_base!(dyn Animal);
/// ```
#[macro_export]
macro_rules! poly_base {
    ($base:ty) => {
        impl $crate::PolyBase for $base {
            #[inline]
            fn as_subtype(&self) -> &dyn $crate::Subtype {
                self
            }
        }
    };
}

/// Implements [`SubtypeOf`] without registering a name.
///
/// The name is then given to
/// [`MapperBuilder::subtype`](crate::MapperBuilder::subtype) or in a
/// [`SubtypeProvider`].
#[macro_export]
macro_rules! impl_subtype {
    ($base:ty => $concrete:ty) => {
        impl $crate::SubtypeOf<$base> for $concrete {
            #[inline]
            fn upcast(self: $crate::__macro_exports::Box<Self>) -> $crate::__macro_exports::Box<$base> {
                self
            }
        }
    };
}

/// Implements [`SubtypeOf`] and submits a [`SubtypeEntry`] with `name`.
///
/// Submitted entries are found by
/// [`MapperBuilder::scan`](crate::MapperBuilder::scan).
#[macro_export]
macro_rules! subtype {
    ($base:ty => $concrete:ty as $name:literal) => {
        $crate::impl_subtype!($base => $concrete);

        $crate::__macro_exports::inventory::submit! {
            $crate::SubtypeEntry::of::<$base, $concrete>($name)
        }
    };
}

/// Submits a [`SubtypeProvider`] run by
/// [`MapperBuilder::providers`](crate::MapperBuilder::providers).
///
/// `$provide` is a `fn(&mut SubtypeRegistry)`.
#[macro_export]
macro_rules! subtype_provider {
    ($name:literal, $provide:path) => {
        $crate::__macro_exports::inventory::submit! {
            $crate::SubtypeProvider::new($name, $provide)
        }
    };
}
