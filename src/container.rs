use std::fmt;
use std::sync::Arc;

use crate::model::{Adapt, Model};
use crate::spec::Spec;

/// Reference-counted, type-erased owner of one [`Model`].
///
/// Cloning aliases the same model. The model, and with it the payload, is
/// released when the last clone is dropped. The pointee is never replaced.
pub struct Container<C: ?Sized> {
    inner: Arc<C>,
}

impl<C: ?Sized + Spec> Container<C> {
    pub fn new<T>(value: T) -> Self
    where
        C: Adapt<T>,
    {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            concept = C::DESCRIPTION.name(),
            payload = std::any::type_name::<T>(),
            "erasing payload"
        );

        Container {
            inner: C::erase(Arc::new(Model::new(value))),
        }
    }
}

impl<C: ?Sized> Container<C> {
    pub fn get(&self) -> &C {
        &self.inner
    }

    /// Whether both containers alias the same model.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.inner, &other.inner)
    }

    pub fn strong_count(this: &Self) -> usize {
        Arc::strong_count(&this.inner)
    }
}

impl<C: ?Sized> Clone for Container<C> {
    fn clone(&self) -> Self {
        Container {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: ?Sized + Spec> fmt::Debug for Container<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("concept", &C::DESCRIPTION.name())
            .field("strong_count", &Arc::strong_count(&self.inner))
            .finish()
    }
}
