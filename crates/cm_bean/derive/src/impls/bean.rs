use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{GenericParam, parse_quote};

use crate::derive_data::{BeanField, BeanStruct};
use crate::path;

/// Generate `Value`, `Bean` and `TypedBean` implementations.
pub(crate) fn impl_bean(bean: &BeanStruct) -> TokenStream {
    let cm_bean_path = &bean.cm_bean_path;

    if let Some(lifetime) = bean.generics.lifetimes().next() {
        return syn::Error::new_spanned(lifetime, "beans cannot borrow, lifetime parameters are not supported")
            .into_compile_error();
    }

    let ident = bean.ident;
    let macro_utils_ = path::macro_utils_(cm_bean_path);

    let mut generics = bean.generics.clone();
    for param in generics.params.iter_mut() {
        if let GenericParam::Type(param) = param {
            param.bounds.push(parse_quote!(#cm_bean_path::Value));
        }
    }
    if bean.is_generic() {
        // Derived std traits only hold under bounds on the parameters.
        let (_, ty_generics, _) = bean.generics.split_for_impl();
        let declared = [
            (bean.attrs.default.is_some(), quote!(#macro_utils_::Default)),
            (bean.attrs.clone.is_some(), quote!(#macro_utils_::Clone)),
            (bean.attrs.partial_eq.is_some(), quote!(#macro_utils_::PartialEq)),
            (bean.attrs.debug.is_some(), quote!(#macro_utils_::Debug)),
        ];
        let where_clause = generics.make_where_clause();
        for (_, bound) in declared.into_iter().filter(|(on, _)| *on) {
            where_clause.predicates.push(parse_quote!(#ident #ty_generics: #bound));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let value_impl = impl_value(bean);
    let type_bean_info = impl_type_bean_info(bean);

    quote! {
        const _: () = {
            impl #impl_generics #cm_bean_path::Value for #ident #ty_generics #where_clause {
                #value_impl
            }

            impl #impl_generics #cm_bean_path::Bean for #ident #ty_generics #where_clause {
                #[inline]
                fn bean_info(&self) -> &'static #cm_bean_path::info::BeanInfo {
                    <Self as #cm_bean_path::TypedBean>::type_bean_info()
                }
            }

            impl #impl_generics #cm_bean_path::TypedBean for #ident #ty_generics #where_clause {
                #type_bean_info
            }
        };
    }
}

fn impl_value(bean: &BeanStruct) -> TokenStream {
    let cm_bean_path = &bean.cm_bean_path;
    let macro_utils_ = path::macro_utils_(cm_bean_path);

    let clone_value = match bean.attrs.clone {
        Some(span) => quote_spanned! { span =>
            #macro_utils_::Ok(#macro_utils_::Box::new(<Self as #macro_utils_::Clone>::clone(self)))
        },
        None => quote! {
            #cm_bean_path::util::clone_via_properties(self)
        },
    };

    let value_eq = bean.attrs.partial_eq.map(|span| {
        quote_spanned! { span =>
            fn value_eq(&self, other: &dyn #cm_bean_path::Value) -> #macro_utils_::Option<bool> {
                other
                    .downcast_ref::<Self>()
                    .map(|other| <Self as #macro_utils_::PartialEq>::eq(self, other))
            }
        }
    });

    let value_debug = match bean.attrs.debug {
        Some(span) => quote_spanned! { span =>
            <Self as #macro_utils_::Debug>::fmt(self, f)
        },
        None => quote! {
            #cm_bean_path::util::fmt_bean(self, f)
        },
    };

    quote! {
        #[inline]
        fn value_ref(&self) -> #cm_bean_path::ValueRef<'_> {
            #cm_bean_path::ValueRef::Bean(self)
        }

        #[inline]
        fn value_mut(&mut self) -> #cm_bean_path::ValueMut<'_> {
            #cm_bean_path::ValueMut::Bean(self)
        }

        fn clone_value(&self) -> #macro_utils_::Result<#macro_utils_::Box<dyn #cm_bean_path::Value>, #cm_bean_path::BeanError> {
            #clone_value
        }

        #value_eq

        fn value_debug(&self, f: &mut #macro_utils_::Formatter<'_>) -> #macro_utils_::FmtResult {
            #value_debug
        }
    }
}

fn field_info(bean: &BeanStruct, field: &BeanField) -> TokenStream {
    let info_ = path::info_(&bean.cm_bean_path);
    let name = field.ident.to_string();
    let ty = field.ty;

    let mut tokens = quote! {
        #info_::FieldInfo::new::<#ty>(#name)
    };
    if !field.private {
        tokens.extend(quote! { .with_private(false) });
    }
    if field.attrs.transient {
        tokens.extend(quote! { .with_transient(true) });
    }
    if field.attrs.skip {
        tokens.extend(quote! { .with_skip(true) });
    }
    tokens
}

fn impl_type_bean_info(bean: &BeanStruct) -> TokenStream {
    let cm_bean_path = &bean.cm_bean_path;
    let macro_utils_ = path::macro_utils_(cm_bean_path);
    let info_ = path::info_(cm_bean_path);
    let generic = bean.is_generic();
    let cell_ = path::bean_info_cell_(cm_bean_path, generic);

    let fields = bean.fields.iter().map(|field| field_info(bean, field));

    let constructor = bean.attrs.default.map(|span| {
        quote_spanned! { span =>
            .with_constructor(|| -> #macro_utils_::Box<dyn #cm_bean_path::Value> {
                #macro_utils_::Box::new(<Self as #macro_utils_::Default>::default())
            })
        }
    });

    let build = quote! {
        #info_::BeanInfo::new::<Self>(#macro_utils_::Vec::from([#(#fields),*]))
            #constructor
    };

    let get = if generic {
        quote! { CELL.get_or_insert::<Self>(|| #build) }
    } else {
        quote! { CELL.get_or_init(|| #build) }
    };

    quote! {
        fn type_bean_info() -> &'static #info_::BeanInfo {
            static CELL: #cell_ = #cell_::new();
            #get
        }
    }
}
