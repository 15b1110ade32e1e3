//! Description-level merging, evaluated in `const` context.
//!
//! `#[merge]` and `merge_erasures!` expand to a chain of constants built from
//! these functions:
//!
//! ```text
//! SOURCES  = [<dyn A as Spec>::DESCRIPTION, <dyn B as Spec>::DESCRIPTION, ...]
//! TOTAL    = total_leaves(SOURCES)
//! FLAT     = flatten::<TOTAL>(SOURCES)          // leaves in source order
//! UNIQUE   = count_unique(&FLAT)
//! LEAVES   = dedup::<UNIQUE>(&FLAT)             // first occurrence wins
//! DESCRIPTION = Description::merged(name, &LEAVES)  // rejects collisions
//! ```
//!
//! Leaves are identified by their full name (module path and trait name), so
//! a concept reached through several merge paths is kept once.

use crate::spec::{Description, SpecInfo};

/// Number of leaves across all sources, duplicates included.
pub const fn total_leaves(sources: &[Description]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < sources.len() {
        total += sources[i].leaves().len();
        i += 1;
    }
    total
}

/// Concatenates the leaves of all sources, in source order.
pub const fn flatten<const N: usize>(sources: &[Description]) -> [SpecInfo; N] {
    let mut out = [SpecInfo::PLACEHOLDER; N];
    let mut n = 0;
    let mut i = 0;
    while i < sources.len() {
        let leaves = sources[i].leaves();
        let mut j = 0;
        while j < leaves.len() {
            out[n] = leaves[j];
            n += 1;
            j += 1;
        }
        i += 1;
    }
    if n != N {
        panic!("rubber_types: leaf count does not match the merged sources");
    }
    out
}

/// Number of distinct leaves.
pub const fn count_unique(leaves: &[SpecInfo]) -> usize {
    let mut unique = 0;
    let mut i = 0;
    while i < leaves.len() {
        if first_occurrence(leaves, i) {
            unique += 1;
        }
        i += 1;
    }
    unique
}

/// Keeps the first occurrence of every leaf.
pub const fn dedup<const N: usize>(leaves: &[SpecInfo]) -> [SpecInfo; N] {
    let mut out = [SpecInfo::PLACEHOLDER; N];
    let mut n = 0;
    let mut i = 0;
    while i < leaves.len() {
        if first_occurrence(leaves, i) {
            out[n] = leaves[i];
            n += 1;
        }
        i += 1;
    }
    if n != N {
        panic!("rubber_types: unique leaf count does not match the merged sources");
    }
    out
}

/// Panics if two distinct leaves declare an operation with the same name.
///
/// Merged operations are dispatched by name through the facade, so a shared
/// name would be ambiguous. Nothing is disambiguated automatically.
pub const fn assert_disjoint(leaves: &[SpecInfo]) {
    let mut i = 0;
    while i < leaves.len() {
        let mut j = i + 1;
        while j < leaves.len() {
            if !str_eq(leaves[i].name, leaves[j].name)
                && share_operation(leaves[i].operations, leaves[j].operations)
            {
                panic!("rubber_types: merged concepts declare an operation with the same name");
            }
            j += 1;
        }
        i += 1;
    }
}

const fn first_occurrence(leaves: &[SpecInfo], index: usize) -> bool {
    let mut k = 0;
    while k < index {
        if str_eq(leaves[k].name, leaves[index].name) {
            return false;
        }
        k += 1;
    }
    true
}

const fn share_operation(a: &[&str], b: &[&str]) -> bool {
    let mut i = 0;
    while i < a.len() {
        let mut j = 0;
        while j < b.len() {
            if str_eq(a[i], b[j]) {
                return true;
            }
            j += 1;
        }
        i += 1;
    }
    false
}

const fn str_eq(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}
