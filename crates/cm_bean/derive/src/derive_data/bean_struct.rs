use syn::{Data, DeriveInput, Fields, Generics, Ident, Type, Visibility};

use crate::derive_data::{FieldAttributes, TypeAttributes};

/// A named field of the derived struct.
pub(crate) struct BeanField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub private: bool,
    pub attrs: FieldAttributes,
}

/// The parsed input of `#[derive(Bean)]`.
pub(crate) struct BeanStruct<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub attrs: TypeAttributes,
    pub fields: Vec<BeanField<'a>>,
    pub cm_bean_path: syn::Path,
}

impl<'a> BeanStruct<'a> {
    pub fn from_derive_input(ast: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;

        let data = match &ast.data {
            Data::Struct(data) => data,
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span,
                    "`Bean` can only be derived for structs",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span,
                    "`Bean` can only be derived for structs",
                ));
            }
        };

        let fields = match &data.fields {
            Fields::Named(named) => named
                .named
                .iter()
                .map(|field| {
                    Ok(BeanField {
                        // Named fields always have an ident.
                        ident: field.ident.as_ref().ok_or_else(|| {
                            syn::Error::new_spanned(field, "expected a named field")
                        })?,
                        ty: &field.ty,
                        private: matches!(field.vis, Visibility::Inherited),
                        attrs: FieldAttributes::parse_attrs(&field.attrs)?,
                    })
                })
                .collect::<syn::Result<Vec<_>>>()?,
            Fields::Unit => Vec::new(),
            Fields::Unnamed(unnamed) => {
                return Err(syn::Error::new_spanned(
                    unnamed,
                    "`Bean` needs named fields, properties are looked up by field name",
                ));
            }
        };

        Ok(Self {
            ident: &ast.ident,
            generics: &ast.generics,
            attrs,
            fields,
            cm_bean_path: crate::path::cm_bean(),
        })
    }

    #[inline]
    pub fn is_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }
}
