mod merge;
mod spec;

use proc_macro::TokenStream;
use syn::parse_macro_input;

// ============================================================================
// #[spec] attribute macro
// ============================================================================

/// Turns an object-safe trait into a concept usable with `TypeErasure`.
///
/// # Usage
///
/// ```ignore
/// #[spec]
/// pub trait Drawable {
///     fn draw_at(&self, out: &mut dyn fmt::Write, pos: usize) -> fmt::Result;
/// }
///
/// // Adapter, written by hand: forwards to the payload's own operation.
/// impl<T: Draw> Drawable for Model<T> {
///     fn draw_at(&self, out: &mut dyn fmt::Write, pos: usize) -> fmt::Result {
///         model_get(self).draw(out, pos)
///     }
/// }
///
/// let item = TypeErasure::<dyn Drawable>::new(42);
/// item.draw_at(&mut out, 0)?;
/// ```
///
/// Alongside the trait, this generates:
/// - `impl Spec for dyn Drawable`, describing the concept and its operations
/// - `impl<T> Adapt<T> for dyn Drawable` whenever `Model<T>: Drawable`
/// - the facade: `impl Drawable for TypeErasure<C>` for every concept `C`
///   exposing `Drawable`, forwarding each operation to the shared model
///
/// The trait must not be generic, and every operation must take `&self` and
/// have no default body. Only `Send`, `Sync`, `Unpin` and lifetimes are
/// accepted as supertraits; `Send + Sync` make the erasure shareable across
/// threads. Use `#[merge]` to build on other concepts.
#[proc_macro_attribute]
pub fn spec(attr: TokenStream, item: TokenStream) -> TokenStream {
    let concept = parse_macro_input!(item as syn::ItemTrait);

    spec::expand(attr.into(), concept)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

// ============================================================================
// #[merge] attribute macro
// ============================================================================

/// Merges concepts into one.
///
/// # Usage
///
/// ```ignore
/// #[merge]
/// pub trait GeomWidget: Geometry + Widget {}
///
/// let shape = TypeErasure::<dyn GeomWidget>::new(UserWidget);
/// shape.size();
/// shape.render();
/// ```
///
/// Every bound is a source concept, except `Send`, `Sync`, `Unpin` and
/// lifetimes, which are carried through as plain bounds. The trait body must
/// be empty.
///
/// Any type satisfying all sources satisfies the merged concept. A concept
/// reached through several sources (e.g. merging two merged concepts that
/// share a source) is included once. Two distinct sources declaring the same
/// operation name fail the build.
#[proc_macro_attribute]
pub fn merge(attr: TokenStream, item: TokenStream) -> TokenStream {
    let concept = parse_macro_input!(item as syn::ItemTrait);

    merge::expand_attribute(attr.into(), concept)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

// ============================================================================
// merge_erasures! proc-macro
// ============================================================================

/// Merges already-built erasure types into a new concept.
///
/// # Usage
///
/// ```ignore
/// rubber_types::merge_erasures!(
///     /// Anything with a size that can be rendered.
///     pub GeomWidget = TypeErasure<dyn Geometry> + TypeErasure<dyn Widget>
/// );
///
/// let shape = TypeErasure::<dyn GeomWidget>::new(UserWidget);
/// ```
///
/// The concept of every input is recovered from its type, and each input is
/// checked to be an erasure type. The result is the same as `#[merge]` over
/// the recovered concepts.
#[proc_macro]
pub fn merge_erasures(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as merge::MergeErasuresInput);

    merge::expand_erasures(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
