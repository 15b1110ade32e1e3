use std::fmt;

use crate::container::Container;
use crate::model::Adapt;
use crate::spec::{Description, Spec};

/// The public facade: a handle to any payload satisfying the concept `C`.
///
/// `C` is the trait object type of a concept, e.g. `TypeErasure<dyn Widget>`.
/// The concept's operations are callable on the handle itself, since
/// `#[spec]` implements every concept for the erasures exposing it. Cloning
/// shares the payload.
///
/// Helpers are associated functions (`TypeErasure::ptr_eq(&a, &b)`) so they
/// never shadow an operation of the concept.
pub struct TypeErasure<C: ?Sized + Spec> {
    container: Container<C>,
}

impl<C: ?Sized + Spec> TypeErasure<C> {
    /// The description of `C`, attached to the erasure type.
    pub const DESCRIPTION: Description = C::DESCRIPTION;

    /// Erases `value`. Fails to build unless `T` satisfies `C`.
    pub fn new<T>(value: T) -> Self
    where
        C: Adapt<T>,
    {
        TypeErasure {
            container: Container::new(value),
        }
    }

    /// The shared handle behind the facade.
    pub fn container(this: &Self) -> &Container<C> {
        &this.container
    }

    /// Same as [`Self::DESCRIPTION`], reachable from a value.
    pub fn description(_this: &Self) -> Description {
        C::DESCRIPTION
    }

    /// Whether both handles alias the same payload.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Container::ptr_eq(&this.container, &other.container)
    }

    pub fn strong_count(this: &Self) -> usize {
        Container::strong_count(&this.container)
    }
}

impl<C: ?Sized + Spec> Clone for TypeErasure<C> {
    fn clone(&self) -> Self {
        TypeErasure {
            container: self.container.clone(),
        }
    }
}

impl<C: ?Sized + Spec> fmt::Debug for TypeErasure<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeErasure")
            .field("concept", &C::DESCRIPTION.name())
            .field("strong_count", &Container::strong_count(&self.container))
            .finish()
    }
}

/// Returns the concept object behind a facade. Use it inside facade bodies.
pub fn interface_get<C: ?Sized + Spec>(erasure: &TypeErasure<C>) -> &C {
    erasure.container.get()
}

/// Implemented by every erasure type; recovers the concept it was built from.
///
/// `merge_erasures!` relies on it to check its inputs.
pub trait Erased {
    type Concept: ?Sized + Spec;

    const DESCRIPTION: Description;
}

impl<C: ?Sized + Spec> Erased for TypeErasure<C> {
    type Concept = C;

    const DESCRIPTION: Description = C::DESCRIPTION;
}
