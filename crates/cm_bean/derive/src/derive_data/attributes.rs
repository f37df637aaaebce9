use proc_macro2::Span;
use syn::Attribute;
use syn::spanned::Spanned;

use crate::{BEAN_ATTRIBUTE_NAME, TRANSIENT_ATTRIBUTE_NAME};

// -----------------------------------------------------------------------------
// TypeAttributes

/// Standard traits declared available with `#[bean(..)]` on the type.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    pub default: Option<Span>,
    pub clone: Option<Span>,
    pub partial_eq: Option<Span>,
    pub debug: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident(BEAN_ATTRIBUTE_NAME)) {
            attr.parse_nested_meta(|meta| {
                let span = meta.path.span();
                let slot = if meta.path.is_ident("default") {
                    &mut this.default
                } else if meta.path.is_ident("clone") {
                    &mut this.clone
                } else if meta.path.is_ident("partial_eq") {
                    &mut this.partial_eq
                } else if meta.path.is_ident("debug") {
                    &mut this.debug
                } else {
                    return Err(meta.error(
                        "unknown type attribute, expected `default`, `clone`, `partial_eq` or `debug`",
                    ));
                };
                *slot = Some(span);
                Ok(())
            })?;
        }
        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub skip: bool,
    pub transient: bool,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident(BEAN_ATTRIBUTE_NAME)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    this.skip = true;
                } else if meta.path.is_ident("transient") {
                    this.transient = true;
                } else {
                    return Err(meta.error("unknown field attribute, expected `skip` or `transient`"));
                }
                Ok(())
            })?;
        }
        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// MethodAttributes

/// Helper attributes on methods of a `#[bean_methods]` block.
#[derive(Default, Debug)]
pub(crate) struct MethodAttributes {
    pub skip: bool,
    pub transient: bool,
}

impl MethodAttributes {
    /// Parses and removes the helper attributes, which rustc would reject.
    pub fn take_attrs(attrs: &mut Vec<Attribute>) -> syn::Result<Self> {
        let mut this = Self::default();
        let mut error: Option<syn::Error> = None;

        attrs.retain(|attr| {
            if attr.path().is_ident(TRANSIENT_ATTRIBUTE_NAME) {
                this.transient = true;
                return false;
            }
            if !attr.path().is_ident(BEAN_ATTRIBUTE_NAME) {
                return true;
            }
            let parsed = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    this.skip = true;
                } else if meta.path.is_ident("transient") {
                    this.transient = true;
                } else {
                    return Err(meta.error("unknown method attribute, expected `skip` or `transient`"));
                }
                Ok(())
            });
            if let Err(err) = parsed {
                match &mut error {
                    Some(error) => error.combine(err),
                    None => error = Some(err),
                }
            }
            false
        });

        match error {
            Some(err) => Err(err),
            None => Ok(this),
        }
    }
}
