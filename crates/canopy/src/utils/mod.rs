//! Utility types for the crate.

mod bounded_heap;
mod distance_value;

pub use bounded_heap::{BoundedHeap, Candidate};
pub use distance_value::DistanceValue;
