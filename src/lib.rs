//! Type erasure with merged concepts.
//!
//! Wrap any value whose type provides a set of operations into a uniform,
//! cheaply clonable handle, without the value's type declaring or even knowing
//! about the interface. Independently written interfaces ("concepts") can be
//! merged into larger ones, and already-built erasure types can be merged
//! again.
//!
//! # Layers
//!
//! ```text
//! TypeErasure<dyn C>      public facade, the type callers hold
//!   └─ Container<dyn C>   Arc-shared, type-erased handle
//!        └─ Model<T>      implements C by forwarding to the payload
//!             └─ Holder<T> owns the payload
//! ```
//!
//! # Usage
//!
//! ```
//! use rubber_types::{merge, model_get, spec, Model, TypeErasure};
//!
//! // The concept: a plain object-safe trait.
//! #[spec]
//! pub trait Widget {
//!     fn render(&self) -> String;
//! }
//!
//! #[spec]
//! pub trait Geometry {
//!     fn size(&self) -> usize;
//! }
//!
//! // Any type providing the operations, without naming the concepts.
//! struct Button {
//!     label: &'static str,
//! }
//!
//! impl Button {
//!     fn render(&self) -> String {
//!         format!("[{}]", self.label)
//!     }
//!
//!     fn size(&self) -> usize {
//!         self.label.len() + 2
//!     }
//! }
//!
//! // The adapters: forward each operation to the payload.
//! impl Widget for Model<Button> {
//!     fn render(&self) -> String {
//!         model_get(self).render()
//!     }
//! }
//!
//! impl Geometry for Model<Button> {
//!     fn size(&self) -> usize {
//!         model_get(self).size()
//!     }
//! }
//!
//! #[merge]
//! pub trait GeomWidget: Geometry + Widget {}
//!
//! let widget = TypeErasure::<dyn GeomWidget>::new(Button { label: "ok" });
//! let alias = widget.clone();
//!
//! assert_eq!(widget.render(), "[ok]");
//! assert_eq!(alias.size(), 4);
//! assert!(TypeErasure::ptr_eq(&widget, &alias));
//! ```
//!
//! # Build-time checks
//!
//! A payload that does not satisfy the concept is rejected by the compiler:
//!
//! ```compile_fail
//! use rubber_types::{spec, TypeErasure};
//!
//! #[spec]
//! pub trait Widget {
//!     fn render(&self) -> String;
//! }
//!
//! struct NotAWidget;
//!
//! fn main() {
//!     let _ = TypeErasure::<dyn Widget>::new(NotAWidget);
//! }
//! ```
//!
//! So is a merge of concepts declaring the same operation name:
//!
//! ```compile_fail
//! use rubber_types::{merge, spec};
//!
//! #[spec]
//! pub trait Geometry {
//!     fn size(&self) -> usize;
//! }
//!
//! #[spec]
//! pub trait Window {
//!     fn size(&self) -> usize;
//! }
//!
//! #[merge]
//! pub trait Sized2d: Geometry + Window {}
//!
//! fn main() {}
//! ```
//!
//! Operations must take `&self`, since the payload is shared by every alias:
//!
//! ```compile_fail
//! use rubber_types::spec;
//!
//! #[spec]
//! pub trait Counter {
//!     fn increment(&mut self);
//! }
//!
//! fn main() {}
//! ```
//!
//! Operations have no default body:
//!
//! ```compile_fail
//! use rubber_types::spec;
//!
//! #[spec]
//! pub trait Widget {
//!     fn render(&self) -> String {
//!         String::new()
//!     }
//! }
//!
//! fn main() {}
//! ```
//!
//! Concepts are not generic:
//!
//! ```compile_fail
//! use rubber_types::spec;
//!
//! #[spec]
//! pub trait Source<T> {
//!     fn next(&self) -> Option<T>;
//! }
//!
//! fn main() {}
//! ```
//!
//! Only `Send`, `Sync` and `Unpin` are accepted as supertraits of a concept;
//! concepts are combined with `#[merge]` instead:
//!
//! ```compile_fail
//! use rubber_types::spec;
//!
//! #[spec]
//! pub trait Geometry {
//!     fn size(&self) -> usize;
//! }
//!
//! #[spec]
//! pub trait Area: Geometry {
//!     fn area(&self) -> usize;
//! }
//!
//! fn main() {}
//! ```
//!
//! A merged concept declares no operations of its own:
//!
//! ```compile_fail
//! use rubber_types::{merge, spec};
//!
//! #[spec]
//! pub trait Widget {
//!     fn render(&self) -> String;
//! }
//!
//! #[merge]
//! pub trait LabelledWidget: Widget {
//!     fn label(&self) -> String;
//! }
//!
//! fn main() {}
//! ```
//!
//! and merges at least one concept:
//!
//! ```compile_fail
//! use rubber_types::merge;
//!
//! #[merge]
//! pub trait Nothing: Send + Sync {}
//!
//! fn main() {}
//! ```
//!
//! `merge_erasures!` only takes erasure types:
//!
//! ```compile_fail
//! use rubber_types::{merge_erasures, spec};
//!
//! #[spec]
//! pub trait Widget {
//!     fn render(&self) -> String;
//! }
//!
//! merge_erasures!(pub SharedWidget = std::sync::Arc<dyn Widget>);
//!
//! fn main() {}
//! ```
//!
//! # Describing a concept by hand
//!
//! The macros only generate glue. A concept can be described manually by
//! implementing [`Spec`] and [`Adapt`] for its trait object, and the concept
//! itself for [`TypeErasure`] (the facade), forwarding to [`interface_get`].

mod container;
mod erasure;
mod holder;
mod model;
mod spec;

#[doc(hidden)]
pub mod merge;

pub use container::Container;
pub use erasure::{interface_get, Erased, TypeErasure};
pub use holder::Holder;
pub use model::{model_get, Adapt, Model};
pub use spec::{Description, Spec, SpecInfo};

pub use rubber_types_macros::{merge, merge_erasures, spec};
