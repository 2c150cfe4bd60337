//! Basic linear algebra data types and operations used by the solver.
//!
//! All solver arithmetic goes through the [`FloatT`] scalar trait, the
//! [`VectorMath`] slice operations, and the sparse [`CscMatrix`] type.

mod error_types;
pub use error_types::*;
mod floats;
pub use floats::*;
mod math_traits;
pub use math_traits::*;
mod scalarmath;
pub use scalarmath::*;
mod vecmath;
pub use vecmath::*;

mod csc;
pub use csc::*;

#[cfg(test)]
mod tests;
