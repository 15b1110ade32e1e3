use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    parse_quote, Attribute, FnArg, GenericParam, Ident, ItemTrait, LitStr, Receiver,
    TraitBoundModifier, TraitItem, TraitItemFn, Type, TypeParamBound,
};

/// Bounds that do not name a concept; they are forwarded untouched.
pub(crate) const MARKERS: &[&str] = &["Send", "Sync", "Unpin"];

pub fn expand(attr: TokenStream, mut concept: ItemTrait) -> syn::Result<TokenStream> {
    if !attr.is_empty() {
        return Err(syn::Error::new_spanned(attr, "`#[spec]` takes no arguments"));
    }
    check_trait_shape(&concept, "spec")?;
    check_supertraits(&concept)?;

    let operations = concept
        .items
        .iter()
        .map(operation)
        .collect::<syn::Result<Vec<_>>>()?;

    let ident = concept.ident.clone();
    let op_names: Vec<_> = operations
        .iter()
        .map(|op| op.sig.ident.to_string())
        .collect();
    let facade_fns: Vec<_> = operations
        .iter()
        .map(|op| facade_fn(&ident, op))
        .collect();
    let adapt = adapt_impl(&ident);

    if let Some(attr) = diagnostic_attr(&concept.attrs, &ident) {
        concept.attrs.push(attr);
    }

    Ok(quote! {
        #concept

        impl ::rubber_types::Spec for dyn #ident {
            const DESCRIPTION: ::rubber_types::Description =
                ::rubber_types::Description::leaf(&::rubber_types::SpecInfo {
                    name: ::core::concat!(
                        ::core::module_path!(),
                        "::",
                        ::core::stringify!(#ident)
                    ),
                    operations: &[#(#op_names),*],
                });
        }

        #adapt

        impl<__C> #ident for ::rubber_types::TypeErasure<__C>
        where
            __C: ?Sized + ::rubber_types::Spec + #ident,
        {
            #(#facade_fns)*
        }
    })
}

/// Rejects trait shapes that cannot be keyed by a single `dyn Trait`.
pub(crate) fn check_trait_shape(concept: &ItemTrait, macro_name: &str) -> syn::Result<()> {
    if let Some(unsafety) = &concept.unsafety {
        return Err(syn::Error::new_spanned(
            unsafety,
            format!("`#[{}]` concepts cannot be `unsafe`", macro_name),
        ));
    }
    if let Some(auto_token) = &concept.auto_token {
        return Err(syn::Error::new_spanned(
            auto_token,
            format!("`#[{}]` concepts cannot be auto traits", macro_name),
        ));
    }
    if !concept.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &concept.generics,
            format!("`#[{}]` concepts cannot be generic", macro_name),
        ));
    }
    if let Some(where_clause) = &concept.generics.where_clause {
        return Err(syn::Error::new_spanned(
            where_clause,
            format!("`#[{}]` concepts cannot have a `where` clause", macro_name),
        ));
    }
    Ok(())
}

/// Only marker supertraits: operations inherited from another concept would
/// be missing from the description, and escape the collision check of merges.
fn check_supertraits(concept: &ItemTrait) -> syn::Result<()> {
    for bound in &concept.supertraits {
        let is_marker = match bound {
            TypeParamBound::Lifetime(_) => true,
            TypeParamBound::Trait(trait_bound) => {
                matches!(trait_bound.modifier, TraitBoundModifier::None)
                    && trait_bound.lifetimes.is_none()
                    && trait_bound.path.segments.last().is_some_and(|last| {
                        last.arguments.is_empty()
                            && MARKERS.iter().any(|marker| last.ident == marker)
                    })
            }
            _ => false,
        };
        if !is_marker {
            return Err(syn::Error::new_spanned(
                bound,
                "`#[spec]` concepts can only have `Send`, `Sync` or `Unpin` supertraits; combine concepts with `#[merge]`",
            ));
        }
    }
    Ok(())
}

/// Adds an `on_unimplemented` note pointing at the adapter, unless the trait
/// already carries one.
pub(crate) fn diagnostic_attr(attrs: &[Attribute], ident: &Ident) -> Option<Attribute> {
    let already_set = attrs.iter().any(|attr| {
        let segments: Vec<_> = attr
            .path()
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        segments == ["diagnostic", "on_unimplemented"]
    });
    if already_set {
        return None;
    }

    let message = LitStr::new(
        &format!("the payload does not satisfy the `{}` concept", ident),
        ident.span(),
    );
    let label = LitStr::new(
        &format!("no `{}` adapter for this payload", ident),
        ident.span(),
    );
    let note = LitStr::new(
        &format!(
            "implement `{}` for `rubber_types::Model<T>`, where `T` is the payload type, forwarding each operation to `rubber_types::model_get(self)`",
            ident
        ),
        ident.span(),
    );
    Some(parse_quote! {
        #[diagnostic::on_unimplemented(message = #message, label = #label, note = #note)]
    })
}

/// `dyn Concept` accepts `Model<T>` for every `T` the adapter is written for.
pub(crate) fn adapt_impl(ident: &Ident) -> TokenStream {
    quote! {
        impl<__T: 'static> ::rubber_types::Adapt<__T> for dyn #ident
        where
            ::rubber_types::Model<__T>: #ident,
        {
            fn erase(
                model: ::std::sync::Arc<::rubber_types::Model<__T>>,
            ) -> ::std::sync::Arc<Self> {
                model
            }
        }
    }
}

fn operation(item: &TraitItem) -> syn::Result<&TraitItemFn> {
    let op = match item {
        TraitItem::Fn(op) => op,
        other => {
            return Err(syn::Error::new_spanned(
                other,
                "a `#[spec]` concept may only declare operations (`fn` items)",
            ))
        }
    };

    if let Some(default) = &op.default {
        return Err(syn::Error::new_spanned(
            default,
            "concept operations cannot have a default implementation",
        ));
    }

    let sig = &op.sig;
    if let Some(constness) = &sig.constness {
        return Err(syn::Error::new_spanned(
            constness,
            "concept operations cannot be `const`",
        ));
    }
    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "concept operations cannot be `async`",
        ));
    }
    for param in &sig.generics.params {
        if !matches!(param, GenericParam::Lifetime(_)) {
            return Err(syn::Error::new_spanned(
                param,
                "concept operations can only be generic over lifetimes",
            ));
        }
    }
    if let Some(where_clause) = &sig.generics.where_clause {
        return Err(syn::Error::new_spanned(
            where_clause,
            "concept operations cannot have a `where` clause",
        ));
    }

    match sig.receiver() {
        Some(receiver) if is_shared_self(receiver) => Ok(op),
        Some(receiver) => Err(syn::Error::new_spanned(
            receiver,
            "concept operations must take `&self`: the payload is shared by every alias",
        )),
        None => Err(syn::Error::new_spanned(
            &sig.ident,
            "concept operations must take `&self`: the payload is shared by every alias",
        )),
    }
}

fn is_shared_self(receiver: &Receiver) -> bool {
    match &*receiver.ty {
        Type::Reference(reference) => {
            reference.mutability.is_none()
                && matches!(&*reference.elem, Type::Path(path) if path.qself.is_none() && path.path.is_ident("Self"))
        }
        _ => false,
    }
}

/// One facade operation: forwards to the concept object held by the handle.
fn facade_fn(concept: &Ident, op: &TraitItemFn) -> TokenStream {
    let mut sig = op.sig.clone();

    // Declaration patterns may be `_`; rename everything so it can be forwarded.
    let mut args = Vec::new();
    for (i, input) in sig.inputs.iter_mut().enumerate() {
        if let FnArg::Typed(arg) = input {
            let name = format_ident!("__arg{}", i);
            arg.pat = Box::new(parse_quote!(#name));
            args.push(name);
        }
    }

    let name = &sig.ident;
    let call = quote! {
        <__C as #concept>::#name(::rubber_types::interface_get(self), #(#args),*)
    };
    let body = if sig.unsafety.is_some() {
        quote! { unsafe { #call } }
    } else {
        call
    };
    let attrs = op
        .attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc") || attr.path().is_ident("cfg"));

    quote! {
        #(#attrs)*
        #[inline]
        #sig {
            #body
        }
    }
}
