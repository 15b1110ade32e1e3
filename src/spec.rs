//! Interface descriptions.
//!
//! Every concept usable with [`TypeErasure`](crate::TypeErasure) is keyed by its
//! trait object type (`dyn Concept`), which implements [`Spec`]. The attached
//! [`Description`] lists the leaf concepts the type is made of, so merged
//! concepts can be inspected, compared, and merged again.

use std::fmt;

use serde::Serialize;

use crate::merge;

/// Metadata of one leaf concept: a trait annotated with `#[spec]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SpecInfo {
    /// Module path and trait name, e.g. `my_crate::shapes::Widget`.
    pub name: &'static str,
    /// Operation names, in declaration order.
    pub operations: &'static [&'static str],
}

impl SpecInfo {
    pub(crate) const PLACEHOLDER: SpecInfo = SpecInfo {
        name: "",
        operations: &[],
    };

    /// Trait name without its module path.
    pub fn short_name(&self) -> &'static str {
        short_name(self.name)
    }
}

/// The description attached to a concept: its own name and the ordered,
/// deduplicated list of leaf concepts it is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Description {
    name: &'static str,
    leaves: &'static [SpecInfo],
}

impl Description {
    /// Description of a single `#[spec]` concept.
    pub const fn leaf(info: &'static SpecInfo) -> Self {
        Description {
            name: info.name,
            leaves: std::slice::from_ref(info),
        }
    }

    /// Description of a merged concept.
    ///
    /// `leaves` must already be deduplicated. Panics (a build error when
    /// evaluated in `const` context) if two leaves declare the same operation.
    pub const fn merged(name: &'static str, leaves: &'static [SpecInfo]) -> Self {
        if leaves.is_empty() {
            panic!("rubber_types: a merged concept needs at least one source concept");
        }
        merge::assert_disjoint(leaves);
        Description { name, leaves }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub fn short_name(&self) -> &'static str {
        short_name(self.name)
    }

    pub const fn leaves(&self) -> &'static [SpecInfo] {
        self.leaves
    }

    /// All operations of all leaves, in leaf order.
    pub fn operations(&self) -> impl Iterator<Item = &'static str> {
        self.leaves
            .iter()
            .flat_map(|leaf| leaf.operations.iter().copied())
    }

    pub fn has_operation(&self, operation: &str) -> bool {
        self.operations().any(|op| op == operation)
    }

    /// Whether the leaf concept with the given full name is part of this one.
    pub fn includes(&self, leaf_name: &str) -> bool {
        self.leaves.iter().any(|leaf| leaf.name == leaf_name)
    }

    /// Whether every leaf of `other` is part of this description.
    pub fn extends(&self, other: &Description) -> bool {
        other.leaves.iter().all(|leaf| self.includes(leaf.name))
    }

    /// Whether both descriptions are made of the same leaves, in any order.
    pub fn same_leaves(&self, other: &Description) -> bool {
        self.leaves.len() == other.leaves.len() && self.extends(other)
    }

    /// `false` for a plain `#[spec]` concept.
    pub fn is_merged(&self) -> bool {
        !(self.leaves.len() == 1 && self.leaves[0].name == self.name)
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())?;
        if !self.is_merged() {
            return write!(f, "({})", self.leaves[0].operations.join(", "));
        }
        write!(f, " = ")?;
        for (i, leaf) in self.leaves.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}({})", leaf.short_name(), leaf.operations.join(", "))?;
        }
        Ok(())
    }
}

fn short_name(name: &'static str) -> &'static str {
    name.rsplit("::").next().unwrap_or(name)
}

/// A concept usable as the `C` of [`TypeErasure<C>`](crate::TypeErasure).
///
/// Implemented for `dyn Concept` by `#[spec]`, `#[merge]` and
/// `merge_erasures!`. Implementing it by hand is possible too; see the crate
/// documentation.
pub trait Spec: 'static {
    const DESCRIPTION: Description;
}
