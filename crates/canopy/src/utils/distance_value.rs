//! A trait for types that can be used as distance values.

use core::fmt::{Debug, Display};

/// A trait for types that can be used as distance values in the traversal kernels.
///
/// The nearest kernel starts its pruning radius at infinity, so distance values are
/// floating-point. We provide a blanket implementation for all types that satisfy the trait
/// bounds; this includes `f32` and `f64`.
#[must_use]
pub trait DistanceValue: PartialOrd + Copy + Default + Display + Debug + num_traits::Float {}

/// Blanket implementation of `DistanceValue` for all types that satisfy the trait bounds.
impl<T> DistanceValue for T where T: PartialOrd + Copy + Default + Display + Debug + num_traits::Float {}
