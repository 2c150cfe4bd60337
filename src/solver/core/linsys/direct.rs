#![allow(non_snake_case)]
use super::LinSysSolver;
use crate::algebra::*;
use crate::ldl::{LdlFactorisation, LdlSettingsBuilder};
use crate::solver::core::SolverError;
use crate::timers::{Duration, Instant};

// -------------------------------------
// direct backend, factoring the quasidefinite system once
// -------------------------------------

pub struct DirectLDLSolver<T: FloatT = f64> {
    factor: LdlFactorisation<T>,
    // system dimension n + m
    dim: usize,
    // cumulative statistics over all solves
    nsolves: usize,
    solve_time: Duration,
}

impl<T> DirectLDLSolver<T>
where
    T: FloatT,
{
    pub fn new(A: &CscMatrix<T>, rho_x: T) -> Result<Self, SolverError> {
        let K = _assemble_system(A, rho_x);

        // the (1,1) block is positive definite and the (2,2)
        // block negative definite, which fixes the signs used
        // for dynamic regularization of the factors
        let mut signs = vec![1_i8; A.n + A.m];
        signs[A.n..].iter_mut().for_each(|s| *s = -1);

        let opts = LdlSettingsBuilder::default().dsigns(signs).build().unwrap();
        let factor = LdlFactorisation::new(&K, Some(opts))?;

        Ok(Self {
            factor,
            dim: A.n + A.m,
            nsolves: 0,
            solve_time: Duration::ZERO,
        })
    }
}

// upper triangle of the quasidefinite matrix
//     [ ρI   Aᵀ ]
//     [ A   -I  ]
// assembled in CSC format.  The Aᵀ block means column n + i of the
// output holds row i of A, so the fill runs through A column by
// column scattering entries to their transposed positions.
fn _assemble_system<T: FloatT>(A: &CscMatrix<T>, rho_x: T) -> CscMatrix<T> {
    let (m, n) = A.size();
    let dim = n + m;
    let nnz = n + A.nnz() + m;

    let mut K = CscMatrix::<T>::spalloc((dim, dim), nnz);

    // column pointers: a single ρ entry in each of the first n
    // columns, then row counts of A plus a diagonal entry
    let mut rowcount = vec![0usize; m];
    for &i in A.rowval.iter() {
        rowcount[i] += 1;
    }
    for j in 0..n {
        K.colptr[j + 1] = K.colptr[j] + 1;
    }
    for i in 0..m {
        K.colptr[n + i + 1] = K.colptr[n + i] + rowcount[i] + 1;
    }

    // ρI block
    for j in 0..n {
        K.rowval[j] = j;
        K.nzval[j] = rho_x;
    }

    // Aᵀ block.  Columns of A are consumed in order, so the row
    // indices within each output column arrive already sorted
    let mut next: Vec<usize> = (0..m).map(|i| K.colptr[n + i]).collect();
    for j in 0..n {
        for p in A.colptr[j]..A.colptr[j + 1] {
            let i = A.rowval[p];
            K.rowval[next[i]] = j;
            K.nzval[next[i]] = A.nzval[p];
            next[i] += 1;
        }
    }

    // -I block on the diagonal, below all Aᵀ entries
    for i in 0..m {
        let p = K.colptr[n + i + 1] - 1;
        K.rowval[p] = n + i;
        K.nzval[p] = -T::one();
    }

    K
}

impl<T> LinSysSolver<T> for DirectLDLSolver<T>
where
    T: FloatT,
{
    fn solve(&mut self, b: &mut [T], _warm: Option<&[T]>, _iter: Option<u32>) {
        let start = Instant::now();

        self.factor.solve(&mut b[0..self.dim]);

        self.solve_time += start.elapsed();
        self.nsolves += 1;
    }

    fn method_name(&self) -> &'static str {
        "sparse-direct"
    }

    fn summary(&self) -> String {
        let nnzL = self.factor.L.nnz() + self.dim;
        let avg = self.solve_time.as_secs_f64() / (self.nsolves.max(1) as f64);
        format!("Lin-sys: nnz in L factor: {nnzL}, avg solve time: {avg:.2e}s\n")
    }
}

// -------------------------------------
// unit tests
// -------------------------------------
