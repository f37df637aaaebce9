use proc_macro2::{Ident, TokenStream};
use quote::ToTokens;
use syn::spanned::Spanned;
use syn::{FnArg, ImplItem, ItemImpl, ReturnType, Signature, Type};

use crate::derive_data::MethodAttributes;
use crate::utils::{contains_borrow, is_self, replace_self};

/// What a registered method returns, from the point of view of a getter.
pub(crate) enum ReturnShape {
    Unit,
    /// `&mut Self`
    SelfRef,
    /// `T`
    Owned(TokenStream),
    /// `&T`, read as a borrowed `T`.
    Borrowed(TokenStream),
    /// `&str`, read as an owned `String`.
    Str,
}

/// The registered shape of one method.
pub(crate) struct MethodShape {
    pub ident: Ident,
    pub receiver_mut: bool,
    pub param: Option<TokenStream>,
    pub returns: ReturnShape,
    pub transient: bool,
}

impl MethodShape {
    /// `&self`, no parameter, returns a value.
    pub fn is_reader(&self) -> bool {
        !self.receiver_mut
            && self.param.is_none()
            && matches!(
                self.returns,
                ReturnShape::Owned(_) | ReturnShape::Borrowed(_) | ReturnShape::Str
            )
    }

    /// `&mut self`, one parameter, returns `()` or `&mut Self`.
    pub fn is_writer(&self) -> bool {
        self.receiver_mut
            && self.param.is_some()
            && matches!(self.returns, ReturnShape::Unit | ReturnShape::SelfRef)
    }

    /// `None` when the method cannot be registered.
    fn parse(sig: &Signature, self_ty: &Type) -> Option<Self> {
        if sig.asyncness.is_some()
            || sig.unsafety.is_some()
            || sig.variadic.is_some()
            || !sig.generics.params.is_empty()
        {
            return None;
        }

        let mut inputs = sig.inputs.iter();
        let receiver_mut = match inputs.next()? {
            FnArg::Receiver(receiver) if receiver.reference.is_some() => receiver.mutability.is_some(),
            _ => return None,
        };

        let param = match (inputs.next(), inputs.next()) {
            (None, _) => None,
            (Some(FnArg::Typed(arg)), None) => {
                let tokens = arg.ty.to_token_stream();
                if contains_borrow(&tokens) {
                    return None;
                }
                Some(replace_self(tokens, self_ty))
            }
            _ => return None,
        };

        let returns = match &sig.output {
            ReturnType::Default => ReturnShape::Unit,
            ReturnType::Type(_, ty) => Self::parse_return(ty, self_ty)?,
        };

        Some(Self {
            ident: sig.ident.clone(),
            receiver_mut,
            param,
            returns,
            transient: false,
        })
    }

    fn parse_return(ty: &Type, self_ty: &Type) -> Option<ReturnShape> {
        match ty {
            Type::Tuple(tuple) if tuple.elems.is_empty() => Some(ReturnShape::Unit),
            Type::Paren(paren) => Self::parse_return(&paren.elem, self_ty),
            Type::Reference(reference) if reference.mutability.is_some() => {
                (is_self(&reference.elem) || *reference.elem == *self_ty).then_some(ReturnShape::SelfRef)
            }
            Type::Reference(reference) => {
                if let Type::Path(path) = &*reference.elem
                    && path.qself.is_none()
                    && path.path.is_ident("str")
                {
                    return Some(ReturnShape::Str);
                }
                let tokens = reference.elem.to_token_stream();
                (!contains_borrow(&tokens)).then(|| ReturnShape::Borrowed(replace_self(tokens, self_ty)))
            }
            other => {
                let tokens = other.to_token_stream();
                (!contains_borrow(&tokens)).then(|| ReturnShape::Owned(replace_self(tokens, self_ty)))
            }
        }
    }
}

/// The parsed input of `#[bean_methods]`.
pub(crate) struct BeanMethods {
    pub item: ItemImpl,
    pub methods: Vec<MethodShape>,
    pub cm_bean_path: syn::Path,
}

impl BeanMethods {
    pub fn from_item_impl(mut item: ItemImpl) -> syn::Result<Self> {
        if !item.generics.params.is_empty() {
            return Err(syn::Error::new(
                item.generics.span(),
                "`#[bean_methods]` cannot be used on generic impl blocks",
            ));
        }

        let self_ty = (*item.self_ty).clone();
        let mut methods = Vec::new();

        for impl_item in &mut item.items {
            let ImplItem::Fn(method) = impl_item else {
                continue;
            };
            let attrs = MethodAttributes::take_attrs(&mut method.attrs)?;
            if attrs.skip {
                continue;
            }
            if let Some(mut shape) = MethodShape::parse(&method.sig, &self_ty) {
                shape.transient = attrs.transient;
                methods.push(shape);
            }
        }

        Ok(Self {
            item,
            methods,
            cm_bean_path: crate::path::cm_bean(),
        })
    }

    #[inline]
    pub fn self_ty(&self) -> &Type {
        &self.item.self_ty
    }

    /// The trait of a trait impl.
    #[inline]
    pub fn trait_path(&self) -> Option<&syn::Path> {
        self.item.trait_.as_ref().map(|(_, path, _)| path)
    }
}
