#![allow(non_snake_case)]
use crate::algebra::*;
use crate::solver::core::SolverError;

mod direct;
mod indirect;

pub use direct::*;
pub use indirect::*;

/// Backend interface for the fixed linear system solved once per
/// iteration.  Implementations solve
///
/// ```text
///     [ ρI   Aᵀ ] [x]   [b₁]
///     [ A   -I  ] [y] = [b₂]
/// ```
///
/// in place, overwriting `b = [b₁; b₂]` with `[x; y]`.
pub trait LinSysSolver<T: FloatT> {
    /// Solve in place.  `warm` optionally seeds iterative methods
    /// from the current iterate, and `iter` is the outer iteration
    /// count used to tighten their termination tolerances.  `None`
    /// marks the initialization solve, which wants full accuracy.
    fn solve(&mut self, b: &mut [T], warm: Option<&[T]>, iter: Option<u32>);

    /// short name reported in the solver configuration block
    fn method_name(&self) -> &'static str;

    /// one line cumulative statistics report
    fn summary(&self) -> String;
}

pub type BoxedLinSysSolver<T> = Box<dyn LinSysSolver<T>>;

// creates a LinSysSolver from the method name in the settings
pub(crate) fn linsys_backend<T: FloatT>(
    method: &str,
    A: &CscMatrix<T>,
    rho_x: T,
    cg_rate: T,
) -> Result<BoxedLinSysSolver<T>, SolverError> {
    match method {
        "sparse-direct" => {
            let solver = DirectLDLSolver::new(A, rho_x)?;
            Ok(Box::new(solver))
        }
        "sparse-indirect" => {
            let solver = IndirectCGSolver::new(A, rho_x, cg_rate);
            Ok(Box::new(solver))
        }
        _ => Err(SolverError::BadLinSysMethod(method.to_string())),
    }
}
