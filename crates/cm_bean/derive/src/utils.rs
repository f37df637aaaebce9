use proc_macro2::{Group, TokenStream, TokenTree};
use quote::ToTokens;
use syn::Type;

#[inline(always)]
pub(crate) fn empty() -> TokenStream {
    TokenStream::new()
}

/// Whether a type mentions a reference, a lifetime or `impl Trait`.
pub(crate) fn contains_borrow(tokens: &TokenStream) -> bool {
    tokens.clone().into_iter().any(|tree| match tree {
        TokenTree::Punct(punct) => matches!(punct.as_char(), '&' | '\''),
        TokenTree::Ident(ident) => ident == "impl",
        TokenTree::Group(group) => contains_borrow(&group.stream()),
        TokenTree::Literal(_) => false,
    })
}

/// Whether `ty` is the plain `Self` type.
pub(crate) fn is_self(ty: &Type) -> bool {
    matches!(ty, Type::Path(path) if path.qself.is_none() && path.path.is_ident("Self"))
}

/// Replaces `Self` with the implementing type, for code emitted outside the
/// impl block.
pub(crate) fn replace_self(tokens: TokenStream, self_ty: &Type) -> TokenStream {
    tokens
        .into_iter()
        .flat_map(|tree| -> TokenStream {
            match tree {
                TokenTree::Ident(ident) if ident == "Self" => self_ty.to_token_stream(),
                TokenTree::Group(group) => {
                    let mut replaced =
                        Group::new(group.delimiter(), replace_self(group.stream(), self_ty));
                    replaced.set_span(group.span());
                    TokenTree::Group(replaced).into()
                }
                other => other.into(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use quote::quote;

    use super::{contains_borrow, replace_self};

    #[test]
    fn borrows() {
        assert!(contains_borrow(&quote!(&str)));
        assert!(contains_borrow(&quote!(Vec<&'static str>)));
        assert!(contains_borrow(&quote!(Box<impl Fn()>)));
        assert!(!contains_borrow(&quote!(Vec<Option<String>>)));
    }

    #[test]
    fn replaces_nested_self() {
        let self_ty: syn::Type = syn::parse_quote!(Point);
        let replaced = replace_self(quote!(Vec<Option<Self>>), &self_ty);
        assert_eq!(replaced.to_string(), quote!(Vec<Option<Point>>).to_string());
    }
}
