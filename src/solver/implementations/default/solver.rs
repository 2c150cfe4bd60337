#![allow(non_snake_case)]
use super::*;
use crate::solver::core::{
    cones::{CompositeCone, SupportedConeAsTag, SupportedConeT, SupportedConeTag},
    Solver, SolverError,
};

use crate::algebra::*;
use crate::timers::*;

/// Solver for problems in standard conic program form

pub type DefaultSolver<T = f64> = Solver<
    DefaultProblemData<T>,
    DefaultVariables<T>,
    DefaultResiduals<T>,
    DefaultLinSys<T>,
    CompositeCone<T>,
    DefaultInfo<T>,
    DefaultSolution<T>,
    DefaultSettings<T>,
>;

impl<T> DefaultSolver<T>
where
    T: FloatT,
{
    /// Assemble a solver for the problem
    ///
    /// ```text
    /// minimize    c'x
    /// subject to  Ax + s = b,  s ∈ K
    /// ```
    ///
    /// with the cone `K` described by `cone_types`.   All data is
    /// checked and copied here, so the returned solver owns its own
    /// (equilibrated) problem data and the caller's arrays are left
    /// untouched by `solve`.
    pub fn new(
        A: &CscMatrix<T>,
        b: &[T],
        c: &[T],
        cone_types: &[SupportedConeT],
        settings: DefaultSettings<T>,
    ) -> Result<Self, SolverError> {
        settings.validate()?;
        _check_problem_data(A, b, c, cone_types)?;

        let mut timers = Timers::default();
        let mut output;

        timeit! {timers => "setup"; {

        let info = DefaultInfo::<T>::new();
        let cones = CompositeCone::<T>::new(cone_types);

        // data makes private copies and equilibrates them
        // immediately, so the subsystem backend factors the
        // scaled matrix
        let data = DefaultProblemData::<T>::new(A, b, c, cone_types, &settings);
        let variables = DefaultVariables::<T>::new(data.n, data.m);
        let residuals = DefaultResiduals::<T>::new(data.n, data.m);

        let linsys;
        timeit!{timers => "linsys setup"; {
            linsys = DefaultLinSys::<T>::new(&data, &settings)?;
        }}

        // user facing results go here
        let solution = DefaultSolution::<T>::new(data.n, data.m);

        output = Self {
            data,
            variables,
            residuals,
            linsys,
            cones,
            info,
            solution,
            settings,
            timers: None,
        };

        }} //end "setup" timer

        //now that the timer is finished we can swap our
        //timer object into the solver structure
        output.timers.replace(timers);

        Ok(output)
    }
}

fn _check_problem_data<T: FloatT>(
    A: &CscMatrix<T>,
    b: &[T],
    c: &[T],
    cone_types: &[SupportedConeT],
) -> Result<(), SolverError> {
    let (m, n) = A.size();

    if m == 0 || n == 0 {
        return Err(SolverError::BadProblemDimension(
            "m and n must both be positive",
        ));
    }
    if m < n {
        return Err(SolverError::BadProblemDimension("m must be at least n"));
    }
    if b.len() != m {
        return Err(SolverError::IncompatibleDimension("b"));
    }
    if c.len() != n {
        return Err(SolverError::IncompatibleDimension("c"));
    }

    A.check_format()?;

    // the embedding requires strictly increasing column pointers,
    // i.e. no structurally empty columns
    if A.colptr.windows(2).any(|w| w[0] == w[1]) {
        return Err(SolverError::BadMatrix(SparseFormatError::EmptyColumn));
    }

    let mut total_dim = 0;
    for cone in cone_types {
        match cone {
            SupportedConeT::SemidefiniteConeT(_) => {
                return Err(SolverError::UnsupportedCone(
                    SupportedConeTag::SemidefiniteCone.as_str(),
                ));
            }
            SupportedConeT::ZeroConeT(dim)
            | SupportedConeT::NonnegativeConeT(dim)
            | SupportedConeT::SecondOrderConeT(dim) => {
                if *dim == 0 {
                    return Err(SolverError::BadConeDimension(cone.as_tag().as_str()));
                }
            }
            SupportedConeT::ExponentialConeT() | SupportedConeT::DualExponentialConeT() => {}
        }
        total_dim += cone.nvars();
    }
    if total_dim != m {
        return Err(SolverError::IncompatibleConeDimension);
    }

    Ok(())
}

// ---------------
// tests
// ---------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::core::cones::SupportedConeT::*;

    fn test_inputs() -> (CscMatrix<f64>, Vec<f64>, Vec<f64>, Vec<SupportedConeT>) {
        let A = CscMatrix::new(2, 1, vec![0, 2], vec![0, 1], vec![-1., 1.]);
        let b = vec![0., 1.];
        let c = vec![1.];
        let cones = vec![NonnegativeConeT(2)];
        (A, b, c, cones)
    }

    #[test]
    fn test_new_accepts_well_formed_data() {
        let (A, b, c, cones) = test_inputs();
        let solver = DefaultSolver::new(&A, &b, &c, &cones, DefaultSettings::default());
        assert!(solver.is_ok());
    }

    #[test]
    fn test_new_rejects_wide_matrix() {
        // m < n
        let A = CscMatrix::new(1, 2, vec![0, 1, 2], vec![0, 0], vec![1., 1.]);
        let result = DefaultSolver::new(
            &A,
            &[1.],
            &[1., 1.],
            &[NonnegativeConeT(1)],
            DefaultSettings::default(),
        );
        assert!(matches!(result, Err(SolverError::BadProblemDimension(_))));
    }

    #[test]
    fn test_new_rejects_empty_column() {
        let A = CscMatrix::new(2, 2, vec![0, 2, 2], vec![0, 1], vec![1., 1.]);
        let (_, b, _, cones) = test_inputs();
        let result = DefaultSolver::new(&A, &b, &[1., 1.], &cones, DefaultSettings::default());
        assert!(matches!(
            result,
            Err(SolverError::BadMatrix(SparseFormatError::EmptyColumn))
        ));
    }

    #[test]
    fn test_new_rejects_cone_mismatch() {
        let (A, b, c, _) = test_inputs();
        let result = DefaultSolver::new(
            &A,
            &b,
            &c,
            &[NonnegativeConeT(3)],
            DefaultSettings::default(),
        );
        assert!(matches!(result, Err(SolverError::IncompatibleConeDimension)));
    }

    #[test]
    fn test_new_rejects_semidefinite_block() {
        let A = CscMatrix::new(4, 1, vec![0, 4], vec![0, 1, 2, 3], vec![1.; 4]);
        let result = DefaultSolver::new(
            &A,
            &[0.; 4],
            &[1.],
            &[SemidefiniteConeT(2)],
            DefaultSettings::default(),
        );
        assert!(matches!(result, Err(SolverError::UnsupportedCone(_))));
    }

    #[test]
    fn test_new_rejects_bad_settings() {
        let (A, b, c, cones) = test_inputs();
        let settings = DefaultSettings {
            alpha: 2.5,
            ..DefaultSettings::default()
        };
        let result = DefaultSolver::new(&A, &b, &c, &cones, settings);
        assert!(matches!(result, Err(SolverError::BadSettings(_))));
    }
}
