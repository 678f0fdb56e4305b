//! GO terms, term ids and sorted groups of term ids

mod goterm;
mod group;
pub(crate) mod internal;
mod termid;

pub use goterm::{GoTerm, GoTerms};
pub use group::{GoGroup, GoTermIds};
pub use termid::GoTermId;

/// Sorted ids of the direct or transitive parents of a term
pub type GoParents = GoGroup;
/// Sorted ids of the direct or transitive children of a term
pub type GoChildren = GoGroup;
