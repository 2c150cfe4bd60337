#![allow(non_snake_case)]

use splitcone::{algebra::*, solver::*};

#[allow(clippy::type_complexity)]
fn badly_scaled_data() -> (CscMatrix<f64>, Vec<f64>, Vec<f64>, Vec<SupportedConeT>) {
    // min x1 + x2 subject to ||x|| <= 1, with the rows and columns
    // scaled several orders of magnitude apart
    let A = CscMatrix::new(3, 2, vec![0, 1, 2], vec![1, 2], vec![-1e2, -1e-1]);
    let b = vec![10., 0., 0.];
    let c = vec![1e2, 1e-1];
    let cones = vec![SecondOrderConeT(3)];

    (A, b, c, cones)
}

fn settings(normalize: bool) -> DefaultSettings<f64> {
    DefaultSettingsBuilder::default()
        .verbose(false)
        .eps(1e-8)
        .max_iter(100000)
        .normalize(normalize)
        .build()
        .unwrap()
}

#[test]
fn test_scaled_and_unscaled_solves_agree() {
    let (A, b, c, cones) = badly_scaled_data();

    let mut scaled = DefaultSolver::new(&A, &b, &c, &cones, settings(true)).unwrap();
    scaled.solve();

    let mut unscaled = DefaultSolver::new(&A, &b, &c, &cones, settings(false)).unwrap();
    unscaled.solve();

    assert_eq!(scaled.solution.status, SolverStatus::Solved);
    assert_eq!(unscaled.solution.status, SolverStatus::Solved);

    for i in 0..2 {
        let (xs, xu) = (scaled.solution.x[i], unscaled.solution.x[i]);
        assert!((xs - xu).abs() <= 1e-4 * (1. + xu.abs()));
    }
    let (os, ou) = (scaled.solution.obj_val, unscaled.solution.obj_val);
    assert!((os - ou).abs() <= 1e-4 * (1. + ou.abs()));
}

#[test]
fn test_caller_data_is_not_mutated() {
    let (A, b, c, cones) = badly_scaled_data();
    let (A0, b0, c0) = (A.clone(), b.clone(), c.clone());

    let mut solver = DefaultSolver::new(&A, &b, &c, &cones, settings(true)).unwrap();
    solver.solve();

    // the solver equilibrates private copies only
    assert_eq!(A.nzval, A0.nzval);
    assert_eq!(b, b0);
    assert_eq!(c, c0);
}

#[test]
fn test_solution_reported_in_user_scale() {
    let (A, b, c, cones) = badly_scaled_data();

    let mut solver = DefaultSolver::new(&A, &b, &c, &cones, settings(true)).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);

    // residuals of the returned (x, y, s) against the original data
    let mut pr = vec![0.; 3];
    A.gemv(&mut pr, &solver.solution.x, 1., 0.);
    pr.axpby(1., &solver.solution.s, 1.);
    pr.axpby(-1., &b, 1.);
    assert!(pr.norm() / (1. + b.norm()) <= 1e-6);

    let mut dr = c.clone();
    A.gemv_t(&mut dr, &solver.solution.y, 1., 1.);
    assert!(dr.norm() / (1. + c.norm()) <= 1e-6);
}

#[test]
fn test_repeated_solves_are_stable() {
    let (A, b, c, cones) = badly_scaled_data();

    let mut solver = DefaultSolver::new(&A, &b, &c, &cones, settings(true)).unwrap();
    solver.solve();
    let first = solver.solution.x.clone();

    // a second call re-runs from the stored scalings and lands on
    // the same point
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);
    for i in 0..2 {
        assert!((solver.solution.x[i] - first[i]).abs() <= 1e-5 * (1. + first[i].abs()));
    }
}
