use crate::algebra::*;
use std::iter::zip;

impl<T: FloatT> MatrixVectorMath for CscMatrix<T> {
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        _csc_axpby_N(self, y, x, a, b);
    }

    fn gemv_t(&self, y: &mut [T], x: &[T], a: T, b: T) {
        _csc_axpby_T(self, y, x, a, b);
    }
}

impl<T: FloatT> MatrixMath for CscMatrix<T> {
    type T = T;

    fn scale(&mut self, c: T) {
        self.nzval.scale(c);
    }

    fn col_norms(&self, norms: &mut [T]) {
        assert_eq!(norms.len(), self.n);

        for (col, v) in norms.iter_mut().enumerate() {
            let ss = self
                .nzval
                .iter()
                .take(self.colptr[col + 1])
                .skip(self.colptr[col])
                .fold(T::zero(), |acc, &x| acc + x * x);
            *v = T::sqrt(ss);
        }
    }

    fn row_norms_sq(&self, norms_sq: &mut [T]) {
        // accumulates into norms_sq without resetting, so a
        // caller can fold several matrices into one set of norms
        for (&row, &x) in zip(&self.rowval, &self.nzval) {
            norms_sq[row] += x * x;
        }
    }

    fn lscale(&mut self, l: &[T]) {
        assert_eq!(l.len(), self.m);

        for (&row, v) in zip(&self.rowval, &mut self.nzval) {
            *v *= l[row];
        }
    }

    fn rscale(&mut self, r: &[T]) {
        assert_eq!(r.len(), self.n);

        for (col, &rc) in r.iter().enumerate() {
            let rng = self.colptr[col]..self.colptr[col + 1];
            self.nzval[rng].scale(rc);
        }
    }
}

// sparse matrix-vector multiply, no transpose
#[allow(non_snake_case)]
fn _csc_axpby_N<T: FloatT>(A: &CscMatrix<T>, y: &mut [T], x: &[T], a: T, b: T) {
    //first do the b*y part
    if b == T::zero() {
        y.fill(T::zero());
    } else if b == T::one() {
    } else if b == -T::one() {
        y.negate();
    } else {
        y.scale(b);
    }

    // if a is zero, we're done
    if a == T::zero() {
        return;
    }

    assert_eq!(A.nzval.len(), A.rowval.len());
    assert_eq!(x.len(), A.n);

    //y += A*x
    if a == T::one() {
        for (col, &xcol) in x.iter().enumerate() {
            for j in A.colptr[col]..A.colptr[col + 1] {
                y[A.rowval[j]] += A.nzval[j] * xcol;
            }
        }
    } else if a == -T::one() {
        for (col, &xcol) in x.iter().enumerate() {
            for j in A.colptr[col]..A.colptr[col + 1] {
                y[A.rowval[j]] -= A.nzval[j] * xcol;
            }
        }
    } else {
        for (col, &xcol) in x.iter().enumerate() {
            let acol = a * xcol;
            for j in A.colptr[col]..A.colptr[col + 1] {
                y[A.rowval[j]] += A.nzval[j] * acol;
            }
        }
    }
}

// sparse matrix-vector multiply, transposed
#[allow(non_snake_case)]
fn _csc_axpby_T<T: FloatT>(A: &CscMatrix<T>, y: &mut [T], x: &[T], a: T, b: T) {
    //first do the b*y part
    if b == T::zero() {
        y.fill(T::zero());
    } else if b == T::one() {
    } else if b == -T::one() {
        y.negate();
    } else {
        y.scale(b);
    }

    // if a is zero, we're done
    if a == T::zero() {
        return;
    }

    assert_eq!(x.len(), A.m);
    assert_eq!(y.len(), A.n);

    //y += a*A'*x
    for (col, ycol) in y.iter_mut().enumerate() {
        let mut s = T::zero();
        for j in A.colptr[col]..A.colptr[col + 1] {
            s += A.nzval[j] * x[A.rowval[j]];
        }
        if a == T::one() {
            *ycol += s;
        } else if a == -T::one() {
            *ycol -= s;
        } else {
            *ycol += a * s;
        }
    }
}
