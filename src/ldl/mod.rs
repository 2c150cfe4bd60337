//! Sparse $LDL^T$ factorization of symmetric quasidefinite matrices.
//!
//! Used by the direct linear solver to factor the quasidefinite
//! system matrix once per problem, with AMD fill reducing ordering
//! and optional dynamic regularization of the diagonal.

mod ldl;
pub use ldl::*;
