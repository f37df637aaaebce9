use proc_macro2::{Ident, Span, TokenStream};
use quote::{ToTokens, format_ident, quote};

use crate::derive_data::{BeanMethods, MethodShape, ReturnShape};
use crate::path;

/// Generate the impl block itself and the method registration.
pub(crate) fn impl_bean_methods(methods: &BeanMethods) -> TokenStream {
    let item = &methods.item;
    if methods.methods.is_empty() {
        return item.to_token_stream();
    }

    let cm_bean_path = &methods.cm_bean_path;
    let macro_utils_ = path::macro_utils_(cm_bean_path);
    let inventory_ = path::inventory_(cm_bean_path);
    let info_ = path::info_(cm_bean_path);
    let self_ty = methods.self_ty();

    let mut invokers = Vec::new();
    let mut infos = Vec::new();
    for (index, method) in methods.methods.iter().enumerate() {
        let (invoker_fn, invoker) = invoker(methods, method, index);
        invokers.push(invoker_fn);
        infos.push(method_info(methods, method, invoker));
    }
    let len = infos.len();

    quote! {
        #item

        const _: () = {
            #(#invokers)*

            static METHODS: [#info_::MethodInfo; #len] = [#(#infos),*];

            #inventory_::submit! {
                #info_::MethodRegistration::new(#macro_utils_::TypeId::of::<#self_ty>(), &METHODS)
            }
        };
    }
}

/// The call path of a method, `<T>::f` or `<T as Trait>::f`.
fn call_path(methods: &BeanMethods, ident: &Ident) -> TokenStream {
    let self_ty = methods.self_ty();
    match methods.trait_path() {
        Some(trait_path) => quote! { <#self_ty as #trait_path>::#ident },
        None => quote! { <#self_ty>::#ident },
    }
}

/// Returns the erased invoker function and the `Invoker` expression naming it.
fn invoker(methods: &BeanMethods, method: &MethodShape, index: usize) -> (TokenStream, TokenStream) {
    let cm_bean_path = &methods.cm_bean_path;
    let macro_utils_ = path::macro_utils_(cm_bean_path);
    let info_ = path::info_(cm_bean_path);
    let self_ty = methods.self_ty();
    let call = call_path(methods, &method.ident);

    if method.is_reader() {
        let fn_ident = format_ident!("__cm_bean_read_{}", index, span = Span::call_site());
        let wrap = match &method.returns {
            ReturnShape::Borrowed(_) => quote! { #cm_bean_path::PropertyValue::borrowed(#call(this)) },
            ReturnShape::Str => quote! {
                #cm_bean_path::PropertyValue::owned(#macro_utils_::String::from(#call(this)))
            },
            _ => quote! { #cm_bean_path::PropertyValue::owned(#call(this)) },
        };
        let invoker_fn = quote! {
            fn #fn_ident<'a>(
                this: &'a dyn #cm_bean_path::Value,
            ) -> #macro_utils_::Result<#cm_bean_path::PropertyValue<'a>, #cm_bean_path::InvokeError> {
                let this = #cm_bean_path::InvokeError::receiver::<#self_ty>(this)?;
                #macro_utils_::Ok(#wrap)
            }
        };
        return (invoker_fn, quote! { #info_::Invoker::Read(#fn_ident) });
    }

    if method.is_writer() {
        let fn_ident = format_ident!("__cm_bean_write_{}", index, span = Span::call_site());
        let param = &method.param;
        let call_stmt = match method.returns {
            ReturnShape::SelfRef => quote! { let _ = #call(this, value); },
            _ => quote! { #call(this, value); },
        };
        let invoker_fn = quote! {
            fn #fn_ident(
                this: &mut dyn #cm_bean_path::Value,
                value: #macro_utils_::Box<dyn #cm_bean_path::Value>,
            ) -> #macro_utils_::Result<(), #cm_bean_path::InvokeError> {
                let this = #cm_bean_path::InvokeError::receiver_mut::<#self_ty>(this)?;
                let value = #cm_bean_path::InvokeError::argument::<#param>(value)?;
                #call_stmt
                #macro_utils_::Ok(())
            }
        };
        return (invoker_fn, quote! { #info_::Invoker::Write(#fn_ident) });
    }

    (crate::utils::empty(), quote! { #info_::Invoker::None })
}

fn method_info(methods: &BeanMethods, method: &MethodShape, invoker: TokenStream) -> TokenStream {
    let cm_bean_path = &methods.cm_bean_path;
    let macro_utils_ = path::macro_utils_(cm_bean_path);
    let info_ = path::info_(cm_bean_path);

    let name = method.ident.to_string();
    let receiver = if method.receiver_mut {
        quote! { #info_::Receiver::Mut }
    } else {
        quote! { #info_::Receiver::Ref }
    };

    let type_desc = |ty: &TokenStream| {
        quote! { #info_::TypeDesc::of::<#ty> as fn() -> #info_::TypeDesc }
    };

    let param = match &method.param {
        Some(ty) => {
            let desc = type_desc(ty);
            quote! { #macro_utils_::Some(#desc) }
        }
        None => quote! { #macro_utils_::None },
    };

    let returns = match &method.returns {
        ReturnShape::Unit => quote! { #info_::Returns::Unit },
        ReturnShape::SelfRef => quote! { #info_::Returns::SelfRef },
        ReturnShape::Owned(ty) | ReturnShape::Borrowed(ty) => {
            let desc = type_desc(ty);
            quote! { #info_::Returns::Value(#desc) }
        }
        ReturnShape::Str => {
            let desc = type_desc(&quote! { #macro_utils_::String });
            quote! { #info_::Returns::Value(#desc) }
        }
    };

    let transient = method.transient;
    quote! {
        #info_::MethodInfo::new(#name, #receiver, #param, #returns, #invoker).with_transient(#transient)
    }
}
