//! Diagnostic plotting.
//!
//! - `ascii`: deterministic terminal plot for `--show_figure`
//! - `figure`: SVG figure for `--save_figure`

pub mod ascii;
pub mod figure;

pub use ascii::*;
pub use figure::*;
