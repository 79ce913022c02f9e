//! Stochastic samplers shared by every kind of generated content.

/// Parent/child decisions for tree-shaped content.
pub mod hierarchy;

/// Uniform dates within an inclusive day range.
pub mod range;

pub use hierarchy::{Decision, EntityId, HierarchySampler, HierarchyState, ROOT};
pub use range::{DateRange, RangeError, random_date};
