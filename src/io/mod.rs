//! Input/output helpers.
//!
//! - result store JSON read/write (`store`)

pub mod store;

pub use store::*;
