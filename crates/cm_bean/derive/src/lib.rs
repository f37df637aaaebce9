//! See following macros:
//!
//! - [`Bean`]
//! - [`bean_methods`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemImpl, parse_macro_input};

static BEAN_ATTRIBUTE_NAME: &str = "bean";
static TRANSIENT_ATTRIBUTE_NAME: &str = "transient";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Bean Derivation
///
/// `#[derive(Bean)]` implements `Value`, `Bean` and `TypedBean` for a struct
/// with named fields (or a unit struct).
///
/// Fields without `pub` are property candidates. A candidate becomes a
/// property once an accessor registered with [`bean_methods`] resolves
/// for it.
///
/// ## Type attributes
///
/// The macro cannot see which standard traits a type implements. Declare
/// them so the generated code can use them:
///
/// - `default`: `Default`, used as the no-arg constructor. Types without it
///   have no enumerable properties and cannot be cloned through them.
/// - `clone`: `Clone`, used by `clone_value` instead of copying properties.
/// - `partial_eq`: `PartialEq`, used by `value_eq`.
/// - `debug`: `Debug`, used by `value_debug` instead of the property listing.
///
/// ```rust, ignore
/// #[derive(Bean, Default, Clone)]
/// #[bean(default, clone)]
/// struct Account {
///     owner: String,
///     #[bean(transient)]
///     cached_total: Option<u64>,
///     #[bean(skip)]
///     scratch: Vec<u8>,
/// }
/// ```
///
/// ## Field attributes
///
/// - `skip`: never a property.
/// - `transient`: a property left out of traversals and diffs.
///
/// Generic parameters get a `Value` bound.
#[proc_macro_derive(Bean, attributes(bean))]
pub fn derive_bean(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::BeanStruct::from_derive_input(&ast) {
        Ok(bean) => impls::impl_bean(&bean).into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// # Method Registration
///
/// Publishes the methods of an impl block to the bean method table, where
/// property accessors are looked up by name.
///
/// A method is registered when it takes `&self` or `&mut self` and at most
/// one more parameter, and is neither `async`, `unsafe` nor generic.
/// Methods mentioning references or `impl Trait` in their signature are
/// left out, except getters returning `&T`, `&str` or `&mut Self`.
///
/// ```rust, ignore
/// #[bean_methods]
/// impl Account {
///     fn get_owner(&self) -> &str { &self.owner }
///     fn set_owner(&mut self, owner: String) -> &mut Self {
///         self.owner = owner;
///         self
///     }
///
///     #[transient]
///     fn total(&self) -> u64 { /* .. */ }
///
///     #[bean(skip)]
///     fn reset(&mut self) { /* .. */ }
/// }
/// ```
///
/// `#[transient]` (or `#[bean(transient)]`) on a getter marks its property
/// transient. `#[bean(skip)]` keeps a method out of the table. Both are
/// removed from the emitted impl.
///
/// Returned and accepted types of registered methods must implement `Value`.
/// Mark other methods with `#[bean(skip)]`.
///
/// Trait impls are accepted; generic impls are not.
#[proc_macro_attribute]
pub fn bean_methods(_args: TokenStream, input: TokenStream) -> TokenStream {
    let item = parse_macro_input!(input as ItemImpl);

    match derive_data::BeanMethods::from_item_impl(item) {
        Ok(methods) => impls::impl_bean_methods(&methods).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
