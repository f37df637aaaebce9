//! Paths into `cm_bean` used by generated code.
//!
//! Kept in one place so that moving items in `cm_bean` only touches this
//! module.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the correct access path to the `cm_bean` crate.
///
/// Crates may depend on `cm_bean` directly or through the `cm_core`
/// umbrella, so the caller's Cargo.toml is scanned. The lookup reads a file
/// and takes a lock; call it once per macro invocation and pass the path on.
pub(crate) fn cm_bean() -> syn::Path {
    cm_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("cm_bean"))
}

#[inline(always)]
pub(crate) fn macro_utils_(cm_bean_path: &syn::Path) -> TokenStream {
    quote! {
        #cm_bean_path::__macro_exports::macro_utils
    }
}

#[inline(always)]
pub(crate) fn inventory_(cm_bean_path: &syn::Path) -> TokenStream {
    quote! {
        #cm_bean_path::__macro_exports::inventory
    }
}

#[inline(always)]
pub(crate) fn info_(cm_bean_path: &syn::Path) -> TokenStream {
    quote! {
        #cm_bean_path::info
    }
}

#[inline(always)]
pub(crate) fn bean_info_cell_(cm_bean_path: &syn::Path, generic: bool) -> TokenStream {
    if generic {
        quote! { #cm_bean_path::impls::GenericBeanInfoCell }
    } else {
        quote! { #cm_bean_path::impls::BeanInfoCell }
    }
}
