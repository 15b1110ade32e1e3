use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{
    Attribute, GenericArgument, Ident, ItemTrait, Path, PathArguments, Token, TraitBoundModifier,
    Type, TypeParamBound, Visibility,
};

use crate::spec::{adapt_impl, check_trait_shape, diagnostic_attr, MARKERS};

pub fn expand_attribute(attr: TokenStream, concept: ItemTrait) -> syn::Result<TokenStream> {
    if !attr.is_empty() {
        return Err(syn::Error::new_spanned(attr, "`#[merge]` takes no arguments"));
    }
    check_trait_shape(&concept, "merge")?;
    if let Some(item) = concept.items.first() {
        return Err(syn::Error::new_spanned(
            item,
            "a merged concept cannot declare operations of its own; declare them in a `#[spec]` concept and merge it",
        ));
    }

    let mut sources = Vec::new();
    let mut markers = Vec::new();
    for bound in &concept.supertraits {
        match bound {
            TypeParamBound::Lifetime(_) => markers.push(bound.clone()),
            TypeParamBound::Trait(trait_bound) => {
                if let TraitBoundModifier::Maybe(_) = trait_bound.modifier {
                    return Err(syn::Error::new_spanned(
                        bound,
                        "`?` bounds are not allowed on a merged concept",
                    ));
                }
                if let Some(lifetimes) = &trait_bound.lifetimes {
                    return Err(syn::Error::new_spanned(
                        lifetimes,
                        "higher-ranked bounds are not allowed on a merged concept",
                    ));
                }
                let Some(last) = trait_bound.path.segments.last() else {
                    return Err(syn::Error::new_spanned(bound, "expected a concept path"));
                };
                if !last.arguments.is_empty() {
                    return Err(syn::Error::new_spanned(
                        &last.arguments,
                        "concepts take no generic arguments",
                    ));
                }
                if MARKERS.iter().any(|marker| last.ident == marker) {
                    markers.push(bound.clone());
                } else {
                    sources.push(trait_bound.path.clone());
                }
            }
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "unsupported bound on a merged concept",
                ))
            }
        }
    }

    if sources.is_empty() {
        return Err(syn::Error::new_spanned(
            &concept.ident,
            "a merged concept needs at least one source concept",
        ));
    }

    Ok(merged_concept(
        concept.attrs,
        &concept.vis,
        &concept.ident,
        &sources,
        &markers,
    ))
}

/// `attrs vis Name = TypeErasure<dyn A> + TypeErasure<dyn B> ...`
pub struct MergeErasuresInput {
    attrs: Vec<Attribute>,
    vis: Visibility,
    ident: Ident,
    erasures: Vec<Type>,
    concepts: Vec<Path>,
}

impl Parse for MergeErasuresInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let vis: Visibility = input.parse()?;
        let ident: Ident = input.parse()?;
        input.parse::<Token![=]>()?;

        let mut erasures = Vec::new();
        let mut concepts = Vec::new();
        loop {
            let erasure = input.call(Type::without_plus)?;
            concepts.push(concept_of(&erasure)?);
            erasures.push(erasure);

            if !input.peek(Token![+]) {
                break;
            }
            input.parse::<Token![+]>()?;
        }

        if input.peek(Token![;]) {
            input.parse::<Token![;]>()?;
        }
        if !input.is_empty() {
            return Err(input.error("unexpected tokens after the merged erasure types"));
        }

        Ok(MergeErasuresInput {
            attrs,
            vis,
            ident,
            erasures,
            concepts,
        })
    }
}

pub fn expand_erasures(input: MergeErasuresInput) -> syn::Result<TokenStream> {
    let MergeErasuresInput {
        attrs,
        vis,
        ident,
        erasures,
        concepts,
    } = input;

    let merged = merged_concept(attrs, &vis, &ident, &concepts, &[]);

    Ok(quote! {
        #merged

        const _: fn() = || {
            fn __assert_erasure<__E, __C>()
            where
                __E: ?Sized + ::rubber_types::Erased<Concept = __C>,
                __C: ?Sized,
            {
            }
            #( __assert_erasure::<#erasures, dyn #concepts>(); )*
        };
    })
}

/// Recovers `Concept` from `SomeErasure<dyn Concept>`.
fn concept_of(erasure: &Type) -> syn::Result<Path> {
    let found = match erasure {
        Type::Group(group) => return concept_of(&group.elem),
        Type::Paren(paren) => return concept_of(&paren.elem),
        Type::Path(type_path) if type_path.qself.is_none() => type_path
            .path
            .segments
            .last()
            .and_then(|segment| match &segment.arguments {
                PathArguments::AngleBracketed(args) if args.args.len() == 1 => {
                    match &args.args[0] {
                        GenericArgument::Type(inner) => dyn_concept(inner),
                        _ => None,
                    }
                }
                _ => None,
            }),
        _ => None,
    };

    found.ok_or_else(|| {
        syn::Error::new_spanned(
            erasure,
            "expected an erasure type of the form `TypeErasure<dyn Concept>`",
        )
    })
}

fn dyn_concept(ty: &Type) -> Option<Path> {
    match ty {
        Type::Group(group) => dyn_concept(&group.elem),
        Type::Paren(paren) => dyn_concept(&paren.elem),
        Type::TraitObject(object) if object.bounds.len() == 1 => match &object.bounds[0] {
            TypeParamBound::Trait(bound)
                if bound.lifetimes.is_none()
                    && matches!(bound.modifier, TraitBoundModifier::None) =>
            {
                Some(bound.path.clone())
            }
            _ => None,
        },
        _ => None,
    }
}

// ============================================================================
// Shared codegen
// ============================================================================

fn merged_concept(
    mut attrs: Vec<Attribute>,
    vis: &Visibility,
    ident: &Ident,
    sources: &[Path],
    markers: &[TypeParamBound],
) -> TokenStream {
    if let Some(attr) = diagnostic_attr(&attrs, ident) {
        attrs.push(attr);
    }

    let bounds: Vec<TokenStream> = sources
        .iter()
        .map(|source| quote!(#source))
        .chain(markers.iter().map(|marker| quote!(#marker)))
        .collect();
    let adapt = adapt_impl(ident);

    quote! {
        #(#attrs)*
        #vis trait #ident: #(#bounds)+* {}

        impl<__X: ?Sized + #(#bounds)+*> #ident for __X {}

        impl ::rubber_types::Spec for dyn #ident {
            const DESCRIPTION: ::rubber_types::Description = {
                const SOURCES: &[::rubber_types::Description] = &[
                    #(<dyn #sources as ::rubber_types::Spec>::DESCRIPTION),*
                ];
                const TOTAL: usize = ::rubber_types::merge::total_leaves(SOURCES);
                const FLAT: [::rubber_types::SpecInfo; TOTAL] =
                    ::rubber_types::merge::flatten::<TOTAL>(SOURCES);
                const UNIQUE: usize = ::rubber_types::merge::count_unique(&FLAT);
                const LEAVES: [::rubber_types::SpecInfo; UNIQUE] =
                    ::rubber_types::merge::dedup::<UNIQUE>(&FLAT);

                ::rubber_types::Description::merged(
                    ::core::concat!(
                        ::core::module_path!(),
                        "::",
                        ::core::stringify!(#ident)
                    ),
                    &LEAVES,
                )
            };
        }

        #adapt

        // Evaluated eagerly so that operation collisions fail the build even
        // if the description is never read.
        const _: ::rubber_types::Description =
            <dyn #ident as ::rubber_types::Spec>::DESCRIPTION;
    }
}
