#![allow(non_snake_case)]
use crate::algebra::*;
use core::cmp::{max, min};
use derive_builder::Builder;
use std::iter::zip;
use thiserror::Error;

/// Error codes returnable from [`LdlFactorisation`](LdlFactorisation) operations

#[derive(Error, Debug)]
pub enum LdlError {
    #[error("Matrix is not square")]
    NotSquare,
    #[error("Matrix is not upper triangular")]
    NotUpperTriangular,
    #[error("Matrix has an empty column")]
    EmptyColumn,
    #[error("Factorization produced a zero pivot")]
    ZeroPivot,
    #[error("Invalid permutation vector")]
    BadPermutation,
}

/// Options for [`LdlFactorisation`](LdlFactorisation)

#[derive(Builder, Debug, Clone)]
pub struct LdlSettings<T: FloatT> {
    #[builder(default = "1.0")]
    amd_dense_scale: f64,
    #[builder(default = "None", setter(strip_option))]
    perm: Option<Vec<usize>>,
    #[builder(default = "None", setter(strip_option))]
    dsigns: Option<Vec<i8>>,
    #[builder(default = "true")]
    regularize_enable: bool,
    #[builder(default = "(1e-12).as_T()")]
    regularize_eps: T,
    #[builder(default = "(1e-7).as_T()")]
    regularize_delta: T,
}

impl<T> Default for LdlSettings<T>
where
    T: FloatT,
{
    fn default() -> LdlSettings<T> {
        LdlSettingsBuilder::<T>::default().build().unwrap()
    }
}

/// $LDL^T$ factorization of a symmetric quasidefinite matrix,
/// taking the upper triangular part in CSC format.  The matrix is
/// factored once at construction and then supports repeated solves.

#[derive(Debug)]
pub struct LdlFactorisation<T = f64> {
    // fill reducing permutation
    pub perm: Vec<usize>,
    // lower triangular factor of the permuted matrix
    pub L: CscMatrix<T>,
    // diagonal of the factorization and its inverse
    pub D: Vec<T>,
    pub Dinv: Vec<T>,
    // scratch for the permuted right-hand side
    work: Vec<T>,
    // factorization statistics
    positive_inertia: usize,
    regularize_count: usize,
}

impl<T> LdlFactorisation<T>
where
    T: FloatT,
{
    pub fn new(
        Kin: &CscMatrix<T>,
        opts: Option<LdlSettings<T>>,
    ) -> Result<LdlFactorisation<T>, LdlError> {
        check_structure(Kin)?;

        let n = Kin.nrows();
        let opts = opts.unwrap_or_default();

        // AMD ordering unless the caller supplied one.  For no
        // reordering at all, pass (0..n).collect() explicitly
        let (perm, iperm);
        if let Some(p) = opts.perm {
            iperm = invperm(&p)?;
            perm = p;
        } else {
            (perm, iperm) = amd_ordering(Kin, opts.amd_dense_scale);
        }

        // permute to the (again upper triangular) matrix actually factored
        let K = permute_symmetric(Kin, &iperm);

        // diagonal signs for regularization, permuted to match.
        // All positive if unspecified
        let Dsigns = match opts.dsigns {
            Some(ds) => {
                let mut s = vec![1_i8; n];
                permute(&mut s, &ds, &perm);
                s
            }
            None => vec![1_i8; n],
        };

        // symbolic analysis gives the column counts of L
        let (etree, Lnz) = elimination_tree(&K);
        let sumLnz = Lnz.iter().sum();

        let mut L = CscMatrix::spalloc((n, n), sumLnz);
        let mut D = vec![T::zero(); n];
        let mut Dinv = vec![T::zero(); n];

        let reg = Regularization {
            enable: opts.regularize_enable,
            eps: opts.regularize_eps,
            delta: opts.regularize_delta,
        };
        let stats = factor(&K, &mut L, &mut D, &mut Dinv, &Lnz, &etree, &Dsigns, &reg)?;

        Ok(LdlFactorisation {
            perm,
            L,
            D,
            Dinv,
            work: vec![T::zero(); n],
            positive_inertia: stats.positive_inertia,
            regularize_count: stats.regularize_count,
        })
    }

    /// number of positive entries in D
    pub fn positive_inertia(&self) -> usize {
        self.positive_inertia
    }

    /// number of diagonal entries modified by dynamic regularization
    pub fn regularize_count(&self) -> usize {
        self.regularize_count
    }

    /// Solves Kx = b using the LDL factors of K, in place (x replaces b)
    pub fn solve(&mut self, b: &mut [T]) {
        assert_eq!(b.len(), self.D.len());

        // permute b into the workspace
        let tmp = &mut self.work;
        permute(tmp, b, &self.perm);

        // solve in place with tmp as the permuted RHS
        _solve(
            &self.L.colptr,
            &self.L.rowval,
            &self.L.nzval,
            &self.Dinv,
            tmp,
        );

        // inverse permutation puts the unpermuted solution in b
        ipermute(b, tmp, &self.perm);
    }
}

fn check_structure<T: FloatT>(K: &CscMatrix<T>) -> Result<(), LdlError> {
    if !K.is_square() {
        return Err(LdlError::NotSquare);
    }

    if !K.is_triu() {
        return Err(LdlError::NotUpperTriangular);
    }

    // every column must have at least one entry, in particular
    // the one holding the diagonal
    if !K.colptr.windows(2).all(|c| c[0] < c[1]) {
        return Err(LdlError::EmptyColumn);
    }

    Ok(())
}

// marks an index as unassigned in the elimination tree
const NONE: usize = usize::MAX;

struct Regularization<T> {
    enable: bool,
    eps: T,
    delta: T,
}

struct FactorStats {
    positive_inertia: usize,
    regularize_count: usize,
}

// Elimination tree of a quasidefinite matrix in upper triangular CSC
// form, together with the nonzero count of each column of L.

fn elimination_tree<T: FloatT>(A: &CscMatrix<T>) -> (Vec<usize>, Vec<usize>) {
    let n = A.ncols();
    let mut etree = vec![NONE; n];
    let mut Lnz = vec![0; n];
    let mut tag = vec![0; n];

    for j in 0..n {
        tag[j] = j;
        for &row in &A.rowval[A.colptr[j]..A.colptr[j + 1]] {
            let mut i = row;
            while tag[i] != j {
                if etree[i] == NONE {
                    etree[i] = j;
                }
                Lnz[i] += 1;
                tag[i] = j;
                i = etree[i];
            }
        }
    }
    (etree, Lnz)
}

fn apply_regularization<T: FloatT>(d: &mut T, sign: i8, reg: &Regularization<T>, count: &mut usize) {
    if !reg.enable {
        return;
    }
    let sign = T::from_i8(sign).unwrap();
    if *d * sign < reg.eps {
        *d = reg.delta * sign;
        *count += 1;
    }
}

// Numeric factorization A = LDL^T of a permuted upper triangular
// matrix with a precomputed elimination tree and column counts.
//
// The row patterns and values of L are built a row at a time: for
// each k, y = L[0:k,0:k] \ A[0:k,k] is the kth row of L with an
// implied unit diagonal.

#[allow(clippy::too_many_arguments)]
fn factor<T: FloatT>(
    A: &CscMatrix<T>,
    L: &mut CscMatrix<T>,
    D: &mut [T],
    Dinv: &mut [T],
    Lnz: &[usize],
    etree: &[usize],
    Dsigns: &[i8],
    reg: &Regularization<T>,
) -> Result<FactorStats, LdlError> {
    let n = A.ncols();
    let (Ap, Ai, Ax) = (&A.colptr, &A.rowval, &A.nzval);
    let (Lp, Li, Lx) = (&mut L.colptr, &mut L.rowval, &mut L.nzval);

    let mut y = vec![T::zero(); n];
    let mut visited = vec![false; n];
    let mut pattern = vec![0_usize; n];
    let mut elim_path = vec![0_usize; n];

    let mut stats = FactorStats {
        positive_inertia: 0,
        regularize_count: 0,
    };

    // Lp is the cumulative sum of the column counts, starting at zero
    Lp[0] = 0;
    let mut acc = 0;
    for (Lp, Lnz) in zip(&mut Lp[1..], Lnz) {
        *Lp = acc + Lnz;
        acc = *Lp;
    }

    // next free slot in each column of L
    let mut next_colspace = Lp[0..n].to_vec();

    D.fill(T::zero());

    // first pivot.  Column 0 of an upper triangular matrix with no
    // empty columns holds exactly the (0,0) entry
    D[0] = Ax[0];
    apply_regularization(&mut D[0], Dsigns[0], reg, &mut stats.regularize_count);
    if D[0] == T::zero() {
        return Err(LdlError::ZeroPivot);
    }
    if D[0] > T::zero() {
        stats.positive_inertia += 1;
    }
    Dinv[0] = T::recip(D[0]);

    for k in 1..n {
        // number of nonzeros in this row of L
        let mut nnz_y = 0;

        // First pass finds the nonzero pattern of row k without
        // computing values, by walking the elimination tree from
        // each entry of column k of A
        for i in Ap[k]..Ap[k + 1] {
            let bidx = Ai[i];

            // the diagonal entry seeds D[k] and takes no part in
            // the elimination
            if bidx == k {
                D[k] = Ax[i];
                continue;
            }

            y[bidx] = Ax[i];

            if !visited[bidx] {
                visited[bidx] = true;
                elim_path[0] = bidx;
                let mut len = 1;

                let mut next = etree[bidx];
                while next != NONE && next < k {
                    if visited[next] {
                        break;
                    }
                    visited[next] = true;
                    elim_path[len] = next;
                    next = etree[next];
                    len += 1;
                }

                // unload the path in reverse so the pattern comes
                // out in elimination order
                while len != 0 {
                    len -= 1;
                    pattern[nnz_y] = elim_path[len];
                    nnz_y += 1;
                }
            }
        }

        // Second pass eliminates along the pattern, computing the
        // values of row k and updating D[k]
        for i in (0..nnz_y).rev() {
            let cidx = pattern[i];
            let tmp_idx = next_colspace[cidx];

            let y_cidx = y[cidx];
            let (f, l) = (Lp[cidx], tmp_idx);
            unsafe {
                // Safety: the row indices written into Li below are
                // always bounded by the matrix dimension
                for j in f..l {
                    let Lxj = *Lx.get_unchecked(j);
                    let Lij = *Li.get_unchecked(j);
                    *y.get_unchecked_mut(Lij) -= Lxj * y_cidx;
                }
            }

            // y[cidx] now holds the cidx entry of L^{-1} b, which
            // fixes the corresponding entry in this row of L
            Lx[tmp_idx] = y_cidx * Dinv[cidx];
            D[k] -= y_cidx * Lx[tmp_idx];

            Li[tmp_idx] = k;
            next_colspace[cidx] += 1;

            // reset scratch before moving on
            y[cidx] = T::zero();
            visited[cidx] = false;
        }

        apply_regularization(&mut D[k], Dsigns[k], reg, &mut stats.regularize_count);
        if D[k] == T::zero() {
            return Err(LdlError::ZeroPivot);
        }
        if D[k] > T::zero() {
            stats.positive_inertia += 1;
        }

        Dinv[k] = T::recip(D[k]);
    }

    Ok(stats)
}

// Solves (L+I)x = b, with x replacing b (with standard bounds checks)
fn _lsolve_safe<T: FloatT>(Lp: &[usize], Li: &[usize], Lx: &[T], x: &mut [T]) {
    for i in 0..x.len() {
        let xi = x[i];
        let (f, l) = (Lp[i], Lp[i + 1]);
        for (&Lij, &Lxj) in zip(&Li[f..l], &Lx[f..l]) {
            x[Lij] -= Lxj * xi;
        }
    }
}

// Solves (L+I)'x = b, with x replacing b (with standard bounds checks)
fn _ltsolve_safe<T: FloatT>(Lp: &[usize], Li: &[usize], Lx: &[T], x: &mut [T]) {
    for i in (0..x.len()).rev() {
        let mut s = T::zero();
        let (f, l) = (Lp[i], Lp[i + 1]);
        for (&Lij, &Lxj) in zip(&Li[f..l], &Lx[f..l]) {
            s += Lxj * x[Lij];
        }
        x[i] -= s;
    }
}

// -------------------------------------
// Versions of L\x and L'\x with unchecked indexing.
//
// Safety: the colptr entries in Lp must be bounded by the lengths
// of Li and Lx, and the row indices in Li by the length of x.
// Both hold by construction for factors produced above.
// -------------------------------------

// Solves (L+I)x = b, with x replacing b.  Unchecked version
fn _lsolve_unsafe<T: FloatT>(Lp: &[usize], Li: &[usize], Lx: &[T], x: &mut [T]) {
    unsafe {
        for i in 0..x.len() {
            let xi = *x.get_unchecked(i);
            let f = *Lp.get_unchecked(i);
            let l = *Lp.get_unchecked(i + 1);
            for j in f..l {
                let Lxj = *Lx.get_unchecked(j);
                let Lij = *Li.get_unchecked(j);
                *(x.get_unchecked_mut(Lij)) -= Lxj * xi;
            }
        }
    }
}

// Solves (L+I)'x = b, with x replacing b.  Unchecked version
fn _ltsolve_unsafe<T: FloatT>(Lp: &[usize], Li: &[usize], Lx: &[T], x: &mut [T]) {
    unsafe {
        for i in (0..x.len()).rev() {
            let mut s = T::zero();
            let f = *Lp.get_unchecked(i);
            let l = *Lp.get_unchecked(i + 1);
            for j in f..l {
                let Lxj = *Lx.get_unchecked(j);
                let Lij = *Li.get_unchecked(j);
                s += Lxj * (*x.get_unchecked(Lij));
            }
            *x.get_unchecked_mut(i) -= s;
        }
    }
}

// Solves Kx = b given LDL factors of K, with x replacing b
fn _solve<T: FloatT>(Lp: &[usize], Li: &[usize], Lx: &[T], Dinv: &[T], b: &mut [T]) {
    // The factor data is well posed by construction, so forward and
    // backward substitution use the unchecked versions.  The checked
    // ones above are kept for debugging
    _lsolve_unsafe(Lp, Li, Lx, b);
    for (b, &d) in zip(&mut *b, Dinv) {
        *b *= d;
    }
    _ltsolve_unsafe(Lp, Li, Lx, b);
}

// Construct an inverse permutation from a permutation
fn invperm(p: &[usize]) -> Result<Vec<usize>, LdlError> {
    let mut b = vec![NONE; p.len()];

    for (i, &j) in p.iter().enumerate() {
        if j < p.len() && b[j] == NONE {
            b[j] = i;
        } else {
            return Err(LdlError::BadPermutation);
        }
    }
    Ok(b)
}

// permutation and inverse permutation applied out of place,
// with no allocation

fn permute<T: Copy>(x: &mut [T], b: &[T], p: &[usize]) {
    zip(p, x).for_each(|(p, x)| *x = b[*p]);
}

fn ipermute<T: Copy>(x: &mut [T], b: &[T], p: &[usize]) {
    zip(p, b).for_each(|(p, b)| x[*p] = *b);
}

// Symmetric permutation of an upper triangular matrix, returning the
// upper triangular part of PKP' given the inverse permutation.
// Follows Davis: Direct Methods for Sparse Linear Systems.  Row
// indices within each column of the result are not sorted.

fn permute_symmetric<T: FloatT>(A: &CscMatrix<T>, iperm: &[usize]) -> CscMatrix<T> {
    let n = A.ncols();
    let mut P = CscMatrix::<T>::spalloc((n, n), A.nnz());

    // count the entries each column of P will receive
    let mut counts = vec![0; n];
    for colA in 0..n {
        let colP = iperm[colA];
        for &rowA in &A.rowval[A.colptr[colA]..A.colptr[colA + 1]] {
            if rowA <= colA {
                let rowP = iperm[rowA];
                counts[max(rowP, colP)] += 1;
            }
        }
    }

    // colptr of P is the cumulative sum of the counts
    P.colptr[0] = 0;
    let mut acc = 0;
    for (Pc, c) in zip(&mut P.colptr[1..], &counts) {
        *Pc = acc + c;
        acc = *Pc;
    }

    // reuse the counts as write cursors into each column of P
    counts.copy_from_slice(&P.colptr[0..n]);
    let mut cursor = counts;

    for colA in 0..n {
        let colP = iperm[colA];
        for idx in A.colptr[colA]..A.colptr[colA + 1] {
            let rowA = A.rowval[idx];
            if rowA <= colA {
                let rowP = iperm[rowA];
                let col = max(colP, rowP);
                let dst = cursor[col];

                P.rowval[dst] = min(colP, rowP);
                P.nzval[dst] = A.nzval[idx];
                cursor[col] += 1;
            }
        }
    }
    P
}

fn amd_ordering<T: FloatT>(A: &CscMatrix<T>, amd_dense_scale: f64) -> (Vec<usize>, Vec<usize>) {
    // AMD with default parameters apart from the dense row cutoff,
    // which the caller may rescale
    let mut control = amd::Control::default();
    control.dense *= amd_dense_scale;
    let (perm, iperm, _info) = amd::order(A.nrows(), &A.colptr, &A.rowval, &control).unwrap();
    (perm, iperm)
}

//configure tests of internals
#[path = "test.rs"]
#[cfg(test)]
mod test;
