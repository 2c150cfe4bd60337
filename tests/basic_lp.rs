#![allow(non_snake_case)]

use splitcone::{algebra::*, solver::*};

#[allow(clippy::type_complexity)]
fn basic_lp_data() -> (CscMatrix<f64>, Vec<f64>, Vec<f64>, Vec<SupportedConeT>) {
    // min x subject to 0 <= x <= 1, written as
    //   -x + s1 = 0,  x + s2 = 1,  s >= 0
    let A = CscMatrix::new(2, 1, vec![0, 2], vec![0, 1], vec![-1., 1.]);
    let b = vec![0., 1.];
    let c = vec![1.];
    let cones = vec![NonnegativeConeT(2)];

    (A, b, c, cones)
}

fn test_settings(method: &str) -> DefaultSettings<f64> {
    DefaultSettingsBuilder::default()
        .verbose(false)
        .eps(1e-6)
        .max_iter(10000)
        .linsys_method(method.to_string())
        .build()
        .unwrap()
}

fn solve_lp(method: &str) {
    let (A, b, c, cones) = basic_lp_data();

    let mut solver = DefaultSolver::new(&A, &b, &c, &cones, test_settings(method)).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);
    assert!(solver.solution.x[0].abs() <= 1e-3);
    assert!(solver.solution.obj_val.abs() <= 1e-3);
    assert!(solver.solution.r_prim <= 1e-6);
    assert!(solver.solution.r_dual <= 1e-6);
    assert!(solver.solution.iterations < solver.settings.max_iter);
}

#[test]
fn test_lp_feasible_direct() {
    solve_lp("sparse-direct");
}

#[test]
fn test_lp_feasible_indirect() {
    solve_lp("sparse-indirect");
}

#[test]
fn test_lp_with_equality() {
    // min x1 + x2 subject to x1 + x2 = 1, x >= 0.  The optimal
    // objective is 1 at any feasible point
    let A = CscMatrix::new(
        3,
        2,
        vec![0, 2, 4],
        vec![0, 1, 0, 2],
        vec![1., -1., 1., -1.],
    );
    let b = vec![1., 0., 0.];
    let c = vec![1., 1.];
    let cones = vec![ZeroConeT(1), NonnegativeConeT(2)];

    let mut solver =
        DefaultSolver::new(&A, &b, &c, &cones, test_settings("sparse-direct")).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);
    assert!((solver.solution.obj_val - 1.).abs() <= 1e-3);
    let sum = solver.solution.x[0] + solver.solution.x[1];
    assert!((sum - 1.).abs() <= 1e-3);
}

#[test]
fn test_lp_homogeneity_at_zero_optimum() {
    // scaling b and c together leaves the x* = 0 solution in place
    let (A, mut b, mut c, cones) = basic_lp_data();
    b.scale(7.);
    c.scale(7.);

    let mut solver =
        DefaultSolver::new(&A, &b, &c, &cones, test_settings("sparse-direct")).unwrap();
    solver.solve();

    assert_eq!(solver.solution.status, SolverStatus::Solved);
    assert!(solver.solution.x[0].abs() <= 1e-3);
    assert!(solver.solution.obj_val.abs() <= 1e-2);
}

#[test]
fn test_lp_homogeneity_objective_scaling() {
    // min x subject to x >= 1 has x* = 1.  Scaling (b,c) by γ
    // scales the solution by γ and the objective by γ²
    let A = CscMatrix::new(1, 1, vec![0, 1], vec![0], vec![-1.]);
    let b = [-1.];
    let c = [1.];
    let cones = [NonnegativeConeT(1)];
    let gamma = 10.;

    let mut ref_solver =
        DefaultSolver::new(&A, &b, &c, &cones, test_settings("sparse-direct")).unwrap();
    ref_solver.solve();

    let bs = [b[0] * gamma];
    let cs = [c[0] * gamma];
    let mut solver =
        DefaultSolver::new(&A, &bs, &cs, &cones, test_settings("sparse-direct")).unwrap();
    solver.solve();

    assert_eq!(ref_solver.solution.status, SolverStatus::Solved);
    assert_eq!(solver.solution.status, SolverStatus::Solved);
    assert!((ref_solver.solution.obj_val - 1.).abs() <= 1e-3);
    assert!((solver.solution.x[0] - gamma * ref_solver.solution.x[0]).abs() <= 1e-2);
    assert!(
        (solver.solution.obj_val - gamma * gamma * ref_solver.solution.obj_val).abs() <= 1e-1
    );
}

#[test]
fn test_lp_iteration_cap_falls_through() {
    // an absurdly small cap still finalizes with a best-effort
    // classification rather than an error
    let (A, b, c, cones) = basic_lp_data();
    let settings = DefaultSettingsBuilder::default()
        .verbose(false)
        .max_iter(3)
        .build()
        .unwrap();

    let mut solver = DefaultSolver::new(&A, &b, &c, &cones, settings).unwrap();
    solver.solve();

    assert_eq!(solver.solution.iterations, 3);
}
