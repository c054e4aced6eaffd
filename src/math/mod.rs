//! Mathematical utilities: weighted least squares and Student-t critical values.

pub mod student;
pub mod wls;

pub use student::*;
pub use wls::*;
