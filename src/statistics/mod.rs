//! Numeric primitives for online interval estimation.

mod bisect;

pub use bisect::largest_feasible_weight;
