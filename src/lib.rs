//! `qmc-extrap` library crate.
//!
//! The binary (`extrap`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., driving the extrapolation from a larger
//!   post-processing workflow)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod extract;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
