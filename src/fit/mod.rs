//! Weighted polynomial fitting and zero-variance extrapolation.

pub mod extrapolate;
pub mod poly;

pub use extrapolate::*;
pub use poly::*;
