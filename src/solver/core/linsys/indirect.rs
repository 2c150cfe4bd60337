#![allow(non_snake_case)]
use super::LinSysSolver;
use crate::algebra::*;
use crate::timers::{Duration, Instant};

// -------------------------------------
// indirect backend, running preconditioned conjugate gradients
// on the reduced positive definite system
// -------------------------------------

// absolute floor for the cg tolerance
const CG_BEST_TOL: f64 = 1e-9;
// relative tolerance at the first outer iteration, tightening
// as (iter + 1)^cg_rate thereafter
const CG_MIN_TOL: f64 = 1e-1;

// Eliminating the y block from the quasidefinite system leaves
//     (ρI + AᵀA)x = b₁ + Aᵀb₂,    y = Ax - b₂
// with a positive definite left hand side well suited to cg.  The
// preconditioner is the inverse diagonal of the reduced matrix.

pub struct IndirectCGSolver<T: FloatT = f64> {
    A: CscMatrix<T>,
    rho_x: T,
    cg_rate: T,

    // inverse diagonal preconditioner of ρI + AᵀA
    M: Vec<T>,

    // cg workspace: search direction, its product with the
    // reduced matrix, residual and preconditioned residual
    p: Vec<T>,
    Gp: Vec<T>,
    r: Vec<T>,
    z: Vec<T>,
    // scratch for products with A
    tmp: Vec<T>,

    // cumulative statistics over all solves
    nsolves: usize,
    cg_calls: usize,
    cg_its: usize,
    solve_time: Duration,
}

impl<T> IndirectCGSolver<T>
where
    T: FloatT,
{
    pub fn new(A: &CscMatrix<T>, rho_x: T, cg_rate: T) -> Self {
        let (m, n) = A.size();

        let mut M = vec![T::zero(); n];
        A.col_norms(&mut M);
        for v in M.iter_mut() {
            *v = T::recip(rho_x + (*v) * (*v));
        }

        Self {
            A: A.clone(),
            rho_x,
            cg_rate,
            M,
            p: vec![T::zero(); n],
            Gp: vec![T::zero(); n],
            r: vec![T::zero(); n],
            z: vec![T::zero(); n],
            tmp: vec![T::zero(); m],
            nsolves: 0,
            cg_calls: 0,
            cg_its: 0,
            solve_time: Duration::ZERO,
        }
    }

    // cg on the reduced system, overwriting x with the solution.
    // The iteration cap is the system dimension, at which point
    // cg is exact up to roundoff anyway
    fn _pcg(&mut self, x: &mut [T], warm: Option<&[T]>, tol: T) -> usize {
        let n = x.len();

        match warm {
            Some(s) => {
                _mat_vec(&self.A, self.rho_x, s, &mut self.r, &mut self.tmp);
                self.r.axpby(T::one(), x, -T::one());
                x.copy_from(s);
            }
            None => {
                self.r.copy_from(x);
                x.set(T::zero());
            }
        }

        if self.r.norm() < tol {
            return 0;
        }

        self.z.copy_from(&self.r).hadamard(&self.M);
        let mut ipzr = self.r.dot(&self.z);
        self.p.copy_from(&self.z);

        for i in 0..n {
            _mat_vec(&self.A, self.rho_x, &self.p, &mut self.Gp, &mut self.tmp);

            let alpha = ipzr / self.p.dot(&self.Gp);
            x.axpby(alpha, &self.p, T::one());
            self.r.axpby(-alpha, &self.Gp, T::one());

            if self.r.norm() < tol {
                return i + 1;
            }

            let ipzr_old = ipzr;
            self.z.copy_from(&self.r).hadamard(&self.M);
            ipzr = self.r.dot(&self.z);

            self.p.scale(ipzr / ipzr_old);
            self.p.axpby(T::one(), &self.z, T::one());
        }
        n
    }
}

// y = (ρI + AᵀA)x, using work for the intermediate product Ax
fn _mat_vec<T: FloatT>(A: &CscMatrix<T>, rho_x: T, x: &[T], y: &mut [T], work: &mut [T]) {
    A.gemv(work, x, T::one(), T::zero());
    y.copy_from(x).scale(rho_x);
    A.gemv_t(y, work, T::one(), T::one());
}

impl<T> LinSysSolver<T> for IndirectCGSolver<T>
where
    T: FloatT,
{
    fn solve(&mut self, b: &mut [T], warm: Option<&[T]>, iter: Option<u32>) {
        let start = Instant::now();
        let n = self.A.n;

        // termination tolerance, relative to the incoming right
        // hand side and tightening with the outer iteration count.
        // The initialization solve goes straight to the floor
        let reltol = match iter {
            Some(iter) => <f64 as AsFloatT<T>>::as_T(&CG_MIN_TOL) / T::powf((iter + 1).as_T(), self.cg_rate),
            None => CG_BEST_TOL.as_T(),
        };
        let tol = T::max(b[0..n].norm() * reltol, CG_BEST_TOL.as_T());

        // fold the y block into the reduced right hand side
        let (bx, by) = b.split_at_mut(n);
        self.A.gemv_t(bx, by, T::one(), T::one());

        let its = self._pcg(bx, warm, tol);

        // back substitution for y
        by.negate();
        self.A.gemv(by, bx, T::one(), T::one());

        if iter.is_some() {
            self.cg_calls += 1;
            self.cg_its += its;
        }
        self.nsolves += 1;
        self.solve_time += start.elapsed();
    }

    fn method_name(&self) -> &'static str {
        "sparse-indirect"
    }

    fn summary(&self) -> String {
        let avg_its = (self.cg_its as f64) / (self.cg_calls.max(1) as f64);
        let avg = self.solve_time.as_secs_f64() / (self.nsolves.max(1) as f64);
        format!("Lin-sys: avg # CG iterations: {avg_its:.2}, avg solve time: {avg:.2e}s\n")
    }
}

// -------------------------------------
// unit tests
// -------------------------------------
