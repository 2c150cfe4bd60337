#![allow(non_snake_case)]
use crate::algebra::*;

fn test_matrix_4x4_triu() -> CscMatrix<f64> {
    // A =
    //[ 4.0  -3.0   7.0    ⋅ ]
    //[  ⋅    8.0  -1.0    ⋅ ]
    //[  ⋅     ⋅    2.0  -3.0]
    //[  ⋅     ⋅     ⋅    1.0]
    let Ap = vec![0, 1, 3, 6, 8];
    let Ai = vec![0, 0, 1, 0, 1, 2, 2, 3];
    let Ax = vec![4., -3., 8., 7., -1., 2., -3., 1.];
    CscMatrix::new(4, 4, Ap, Ai, Ax)
}

fn test_matrix_3x4() -> CscMatrix<f64> {
    // A =
    //[-1.0  -17.0  6.0  10.0]
    //[ 3.0     ⋅   7.0    ⋅ ]
    //[  ⋅    -4.0   ⋅   -5.0]
    let Ap = vec![0, 2, 4, 6, 8];
    let Ai = vec![0, 1, 0, 2, 0, 1, 0, 2];
    let Ax = vec![-1., 3., -17., -4., 6., 7., 10., -5.];
    CscMatrix::new(3, 4, Ap, Ai, Ax)
}

#[test]
fn test_nrows_ncols_nnz_is_square() {
    let A = test_matrix_3x4();
    let B = test_matrix_4x4_triu();
    assert_eq!(A.nrows(), 3);
    assert_eq!(A.ncols(), 4);
    assert_eq!(A.size(), (3, 4));
    assert_eq!(B.nrows(), 4);
    assert_eq!(B.ncols(), 4);
    assert!(!A.is_square());
    assert!(B.is_square());
    assert_eq!(A.nnz(), 8);
    assert_eq!(B.nnz(), 8);
}

#[test]
fn test_is_triu() {
    assert!(test_matrix_4x4_triu().is_triu());
    assert!(!test_matrix_3x4().is_triu());
}

#[test]
fn test_check_format() {
    assert!(test_matrix_3x4().check_format().is_ok());

    //row index out of bounds
    let mut A = test_matrix_3x4();
    A.rowval[0] = 3;
    assert!(matches!(
        A.check_format(),
        Err(SparseFormatError::BadRowval)
    ));

    //rows not sorted within a column
    let mut A = test_matrix_3x4();
    A.rowval.swap(0, 1);
    assert!(matches!(
        A.check_format(),
        Err(SparseFormatError::BadRowOrdering)
    ));

    //colptr not monotone
    let mut A = test_matrix_3x4();
    A.colptr[1] = 3;
    A.colptr[2] = 2;
    assert!(matches!(
        A.check_format(),
        Err(SparseFormatError::BadColptr)
    ));

    //colptr length inconsistent with dimension
    let mut A = test_matrix_3x4();
    A.colptr.pop();
    assert!(matches!(
        A.check_format(),
        Err(SparseFormatError::IncompatibleDimension)
    ));
}

#[test]
fn test_col_norms() {
    let A = test_matrix_3x4();
    let mut v = vec![0.; 4];
    A.col_norms(&mut v);
    let expected = [10f64.sqrt(), 305f64.sqrt(), 85f64.sqrt(), 125f64.sqrt()];
    assert!(v.norm_inf_diff(&expected) < 1e-14);
}

#[test]
fn test_row_norms_sq() {
    let A = test_matrix_3x4();
    let mut v = vec![0.; 3];
    A.row_norms_sq(&mut v);
    assert_eq!(v, vec![426., 58., 41.]);

    //accumulates without reset
    A.row_norms_sq(&mut v);
    assert_eq!(v, vec![852., 116., 82.]);
}

#[test]
fn test_gemv() {
    let A = test_matrix_3x4();
    let x = vec![1., 2., 3., 4.];

    let mut y = vec![0.; 3];
    A.gemv(&mut y, &x, 1., 0.);
    assert_eq!(y, vec![23., 24., -28.]);

    //accumulating version
    let mut y = vec![1., 1., 1.];
    A.gemv(&mut y, &x, 2., -1.);
    assert_eq!(y, vec![45., 47., -57.]);
}

#[test]
fn test_gemv_t() {
    let A = test_matrix_3x4();
    let x = vec![1., 2., 3.];

    let mut y = vec![0.; 4];
    A.gemv_t(&mut y, &x, 1., 0.);
    assert_eq!(y, vec![5., -29., 20., -5.]);

    //accumulating version
    let mut y = vec![1., 0., 2., 1.];
    A.gemv_t(&mut y, &x, -1., 2.);
    assert_eq!(y, vec![-3., 29., -16., 7.]);
}

#[test]
fn test_lscale() {
    let mut A = test_matrix_3x4();
    A.lscale(&[2., 3., 4.]);
    assert_eq!(A.get_entry((0, 0)).unwrap(), -2.);
    assert_eq!(A.get_entry((1, 0)).unwrap(), 9.);
    assert_eq!(A.get_entry((2, 1)).unwrap(), -16.);
    assert_eq!(A.get_entry((1, 2)).unwrap(), 21.);
    assert_eq!(A.get_entry((2, 3)).unwrap(), -20.);
}

#[test]
fn test_rscale() {
    let mut A = test_matrix_3x4();
    A.rscale(&[2., -1., 3., 0.5]);
    assert_eq!(A.get_entry((0, 0)).unwrap(), -2.);
    assert_eq!(A.get_entry((0, 1)).unwrap(), 17.);
    assert_eq!(A.get_entry((1, 2)).unwrap(), 21.);
    assert_eq!(A.get_entry((2, 3)).unwrap(), -2.5);
}

#[test]
fn test_scale() {
    let mut A = test_matrix_3x4();
    A.scale(2.);
    assert_eq!(A.get_entry((0, 1)).unwrap(), -34.);
    assert_eq!(A.get_entry((1, 0)).unwrap(), 6.);
}
