//! The operation adapter.
//!
//! A concept is adapted to a payload type `T` by implementing the concept
//! trait for [`Model<T>`], forwarding every operation to the payload obtained
//! with [`model_get`]:
//!
//! ```ignore
//! impl<T: Draw> Drawable for Model<T> {
//!     fn draw_at(&self, out: &mut dyn fmt::Write, pos: usize) -> fmt::Result {
//!         model_get(self).draw(out, pos)
//!     }
//! }
//! ```
//!
//! The adapter may be generic over a trait the payload already implements, or
//! written for one concrete type and call its inherent methods. Either way the
//! payload type never names the concept.

use std::fmt;
use std::sync::Arc;

use crate::holder::Holder;
use crate::spec::Spec;

/// Adapts a payload of type `T` to the concepts implemented for `Model<T>`.
pub struct Model<T> {
    holder: Holder<T>,
}

impl<T> Model<T> {
    pub fn new(value: T) -> Self {
        Model {
            holder: Holder::new(value),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Model<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Model").field(self.holder.get()).finish()
    }
}

/// Returns the payload owned by a model. Use it inside adapter bodies.
pub fn model_get<T>(model: &Model<T>) -> &T {
    model.holder.get()
}

/// Erases `Model<T>` into the concept `Self`.
///
/// Implemented by the macros for `dyn Concept` whenever `Model<T>` implements
/// `Concept`. An unsatisfied concept is reported on that `Model<T>: Concept`
/// bound, with the message attached to the concept trait.
pub trait Adapt<T>: Spec {
    fn erase(model: Arc<Model<T>>) -> Arc<Self>;
}
