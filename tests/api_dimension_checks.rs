#![allow(non_snake_case)]

use splitcone::{algebra::*, solver::*};

#[allow(clippy::type_complexity)]
fn well_formed_data() -> (CscMatrix<f64>, Vec<f64>, Vec<f64>, Vec<SupportedConeT>) {
    let A = CscMatrix::new(2, 1, vec![0, 2], vec![0, 1], vec![-1., 1.]);
    let b = vec![0., 1.];
    let c = vec![1.];
    let cones = vec![NonnegativeConeT(2)];

    (A, b, c, cones)
}

fn try_new(
    A: &CscMatrix<f64>,
    b: &[f64],
    c: &[f64],
    cones: &[SupportedConeT],
) -> Result<DefaultSolver<f64>, SolverError> {
    DefaultSolver::new(A, b, c, cones, DefaultSettings::default())
}

#[test]
fn test_well_formed_data_accepted() {
    let (A, b, c, cones) = well_formed_data();
    assert!(try_new(&A, &b, &c, &cones).is_ok());
}

#[test]
fn test_zero_dimensions_rejected() {
    let (_, b, _, cones) = well_formed_data();

    let empty = CscMatrix::<f64>::new(0, 0, vec![0], vec![], vec![]);
    assert!(matches!(
        try_new(&empty, &[], &[], &[]),
        Err(SolverError::BadProblemDimension(_))
    ));

    // wide systems are inadmissible in standard form
    let wide = CscMatrix::new(1, 2, vec![0, 1, 2], vec![0, 0], vec![1., 1.]);
    assert!(matches!(
        try_new(&wide, &b[0..1], &[1., 1.], &cones),
        Err(SolverError::BadProblemDimension(_))
    ));
}

#[test]
fn test_vector_length_mismatch_rejected() {
    let (A, b, c, cones) = well_formed_data();

    assert!(matches!(
        try_new(&A, &b[0..1], &c, &cones),
        Err(SolverError::IncompatibleDimension("b"))
    ));
    assert!(matches!(
        try_new(&A, &b, &[], &cones),
        Err(SolverError::IncompatibleDimension("c"))
    ));
}

#[test]
fn test_malformed_matrix_rejected() {
    let (_, b, c, cones) = well_formed_data();

    // decreasing column pointers
    let mut A = CscMatrix::new(2, 1, vec![0, 2], vec![0, 1], vec![-1., 1.]);
    A.colptr[0] = 3;
    assert!(matches!(
        try_new(&A, &b, &c, &cones),
        Err(SolverError::BadMatrix(SparseFormatError::BadColptr))
    ));

    // row index out of range
    let mut A = CscMatrix::new(2, 1, vec![0, 2], vec![0, 1], vec![-1., 1.]);
    A.rowval[1] = 2;
    assert!(matches!(
        try_new(&A, &b, &c, &cones),
        Err(SolverError::BadMatrix(SparseFormatError::BadRowval))
    ));

    // unsorted rows within a column
    let A = CscMatrix::new(2, 1, vec![0, 2], vec![1, 0], vec![1., -1.]);
    assert!(matches!(
        try_new(&A, &b, &c, &cones),
        Err(SolverError::BadMatrix(SparseFormatError::BadRowOrdering))
    ));
}

#[test]
fn test_empty_column_rejected() {
    let (_, b, _, cones) = well_formed_data();

    // second variable never appears in a constraint
    let A = CscMatrix::new(2, 2, vec![0, 2, 2], vec![0, 1], vec![-1., 1.]);
    assert!(matches!(
        try_new(&A, &b, &[1., 1.], &cones),
        Err(SolverError::BadMatrix(SparseFormatError::EmptyColumn))
    ));
}

#[test]
fn test_cone_dimension_mismatch_rejected() {
    let (A, b, c, _) = well_formed_data();

    assert!(matches!(
        try_new(&A, &b, &c, &[NonnegativeConeT(3)]),
        Err(SolverError::IncompatibleConeDimension)
    ));
    assert!(matches!(
        try_new(&A, &b, &c, &[NonnegativeConeT(1)]),
        Err(SolverError::IncompatibleConeDimension)
    ));
}

#[test]
fn test_zero_dimension_cone_rejected() {
    let (A, b, c, _) = well_formed_data();

    assert!(matches!(
        try_new(&A, &b, &c, &[ZeroConeT(0), NonnegativeConeT(2)]),
        Err(SolverError::BadConeDimension(_))
    ));
}

#[test]
fn test_unsupported_cone_rejected() {
    let (A, b, c, _) = well_formed_data();

    assert!(matches!(
        try_new(&A, &b, &c, &[SemidefiniteConeT(2)]),
        Err(SolverError::UnsupportedCone(_))
    ));
}

#[test]
fn test_bad_settings_rejected() {
    let (A, b, c, cones) = well_formed_data();

    // values smuggled in through direct field construction bypass
    // the builder and are caught again at setup
    let settings = DefaultSettings::<f64> {
        eps: -1.,
        ..DefaultSettings::default()
    };
    assert!(matches!(
        DefaultSolver::new(&A, &b, &c, &cones, settings),
        Err(SolverError::BadSettings(_))
    ));

    let settings = DefaultSettings::<f64> {
        linsys_method: "dense-cholesky".to_string(),
        ..DefaultSettings::default()
    };
    assert!(matches!(
        DefaultSolver::new(&A, &b, &c, &cones, settings),
        Err(SolverError::BadSettings(_))
    ));

    let settings = DefaultSettings::<f64> {
        alpha: 2.5,
        ..DefaultSettings::default()
    };
    assert!(matches!(
        DefaultSolver::new(&A, &b, &c, &cones, settings),
        Err(SolverError::BadSettings(_))
    ));
}
