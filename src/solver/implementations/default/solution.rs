use super::*;
use crate::{
    algebra::*,
    solver::core::{
        traits::{Info, ProblemData, Solution},
        SolverStatus,
    },
};

/// Standard-form solver type implementing the [`Solution`](crate::solver::core::traits::Solution) trait
#[derive(Debug)]
pub struct DefaultSolution<T> {
    /// primal solution
    pub x: Vec<T>,
    /// dual solution (in the dual cone)
    pub y: Vec<T>,
    /// vector of slacks (in the primal cone)
    pub s: Vec<T>,
    /// final solver status
    pub status: SolverStatus,
    /// primal objective value c'x
    pub obj_val: T,
    /// dual objective value -b'y
    pub obj_val_dual: T,
    /// solve time in seconds
    pub solve_time: f64,
    /// number of iterations
    pub iterations: u32,
    /// primal residual of the returned solution
    pub r_prim: T,
    /// dual residual of the returned solution
    pub r_dual: T,
}

impl<T> DefaultSolution<T>
where
    T: FloatT,
{
    /// Create a new `DefaultSolution` object
    pub fn new(n: usize, m: usize) -> Self {
        let x = vec![T::zero(); n];
        let y = vec![T::zero(); m];
        let s = vec![T::zero(); m];

        Self {
            x,
            y,
            s,
            status: SolverStatus::Unsolved,
            obj_val: T::nan(),
            obj_val_dual: T::nan(),
            solve_time: 0f64,
            iterations: 0,
            r_prim: T::nan(),
            r_dual: T::nan(),
        }
    }
}

impl<T> Solution<T> for DefaultSolution<T>
where
    T: FloatT,
{
    type D = DefaultProblemData<T>;
    type V = DefaultVariables<T>;
    type I = DefaultInfo<T>;
    type SE = DefaultSettings<T>;

    fn post_process(
        &mut self,
        data: &mut DefaultProblemData<T>,
        variables: &DefaultVariables<T>,
        info: &mut DefaultInfo<T>,
        settings: &DefaultSettings<T>,
    ) {
        let (n, m) = (data.n, data.m);
        let l = n + m + 1;

        self.x.copy_from(variables.x());
        self.y.copy_from(variables.y());
        self.s.copy_from(variables.s());

        // classify the embedding endpoint, still in the scaled
        // variables.  An iterate that never triggered a certificate
        // is judged by the final balance of τ against κ
        let status = match info.get_status() {
            SolverStatus::Unsolved | SolverStatus::Solved => {
                let tau = variables.tau();
                let kap = T::abs(variables.kappa());
                if tau > settings.undet_tol && tau > kap {
                    let tinv = T::recip(tau);
                    self.x.scale(tinv);
                    self.y.scale(tinv);
                    self.s.scale(tinv);
                    SolverStatus::Solved
                } else if variables.u.norm() < settings.undet_tol * T::sqrt(l.as_T()) {
                    self.x.fill(T::nan());
                    self.y.fill(T::nan());
                    self.s.fill(T::nan());
                    SolverStatus::Indeterminate
                } else if data.b.dot(&self.y) < data.c.dot(&self.x) {
                    self.x.fill(T::nan());
                    self.s.fill(T::nan());
                    SolverStatus::Infeasible
                } else {
                    self.y.fill(T::nan());
                    SolverStatus::Unbounded
                }
            }
            SolverStatus::Infeasible => {
                self.x.fill(T::nan());
                self.s.fill(T::nan());
                SolverStatus::Infeasible
            }
            _ => {
                // only Unbounded reaches here mid-solve
                self.y.fill(T::nan());
                SolverStatus::Unbounded
            }
        };
        self.status = status;
        info.set_status(status);

        // back out the equilibration, then restore the user data
        if settings.normalize {
            let equil = &data.equilibration;
            self.x.hadamard(&equil.einv).scale(T::recip(equil.sc_b));
            self.y.hadamard(&equil.dinv).scale(T::recip(equil.sc_c));
            self.s
                .hadamard(&equil.d)
                .scale(T::recip(equil.sc_b * data.scale));
        }
        data.unequilibrate();

        // quality metrics of the returned solution, in user scale
        let mut pr = vec![T::zero(); m];
        let mut dr = vec![T::zero(); n];
        data.A.gemv(&mut pr, &self.x, T::one(), T::zero());
        pr.axpby(T::one(), &self.s, T::one()); // pr = Ax + s
        data.A.gemv_t(&mut dr, &self.y, T::one(), T::zero()); // dr = A'y

        let ctx = self.x.dot(&data.c);
        let bty = self.y.dot(&data.b);

        info.pobj = ctx;
        info.dobj = -bty;

        match status {
            SolverStatus::Solved => {
                pr.axpby(-T::one(), &data.b, T::one()); // pr = Ax + s - b
                dr.axpby(T::one(), &data.c, T::one()); // dr = A'y + c
                info.rel_gap = T::abs(ctx + bty) / (T::one() + T::abs(ctx) + T::abs(bty));
                info.res_pri = pr.norm() / (T::one() + data.normb);
                info.res_dual = dr.norm() / (T::one() + data.normc);
            }
            SolverStatus::Unbounded => {
                // rescale so that c'x = -1 along the certified ray
                info.dobj = T::nan();
                info.rel_gap = T::nan();
                info.res_pri = data.normc * pr.norm() / -ctx;
                info.res_dual = T::nan();
                self.x.scale(-T::recip(ctx));
                self.s.scale(-T::recip(ctx));
                info.pobj = -T::one();
            }
            SolverStatus::Infeasible => {
                // rescale so that b'y = -1 for the certificate
                info.pobj = T::nan();
                info.rel_gap = T::nan();
                info.res_pri = T::nan();
                info.res_dual = data.normb * dr.norm() / -bty;
                self.y.scale(-T::recip(bty));
                info.dobj = -T::one();
            }
            _ => {
                info.pobj = T::nan();
                info.dobj = T::nan();
                info.rel_gap = T::nan();
                info.res_pri = T::nan();
                info.res_dual = T::nan();
            }
        }

        self.obj_val = info.pobj;
        self.obj_val_dual = info.dobj;
        self.iterations = info.iterations;
        self.r_prim = info.res_pri;
        self.r_dual = info.res_dual;
    }

    fn finalize(&mut self, info: &DefaultInfo<T>) {
        self.solve_time = info.solve_time;
    }
}

// ---------------
// tests
// ---------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::core::cones::SupportedConeT::*;

    fn unscaled_settings() -> DefaultSettings<f64> {
        DefaultSettingsBuilder::default()
            .normalize(false)
            .build()
            .unwrap()
    }

    #[test]
    fn test_post_process_solved() {
        // min x s.t. x >= 1, endpoint with τ = 2 so the solution
        // needs dividing through
        let A = CscMatrix::new(1, 1, vec![0, 1], vec![0], vec![-1.]);
        let b = [-1.];
        let c = [1.];
        let settings = unscaled_settings();
        let mut data = DefaultProblemData::new(&A, &b, &c, &[NonnegativeConeT(1)], &settings);

        let mut vars = DefaultVariables::<f64>::new(1, 1);
        vars.u = vec![2., 2., 2.];
        vars.v = vec![0., 0., 0.];

        let mut info = DefaultInfo::<f64>::new();
        let mut solution = DefaultSolution::new(1, 1);
        solution.post_process(&mut data, &vars, &mut info, &settings);

        assert_eq!(solution.status, SolverStatus::Solved);
        assert_eq!(solution.x, vec![1.]);
        assert_eq!(solution.y, vec![1.]);
        assert_eq!(solution.s, vec![0.]);
        assert_eq!(solution.obj_val, 1.);
        assert_eq!(solution.obj_val_dual, 1.);
        assert_eq!(info.res_pri, 0.);
        assert_eq!(info.res_dual, 0.);
        assert_eq!(info.rel_gap, 0.);
    }

    #[test]
    fn test_post_process_indeterminate() {
        let A = CscMatrix::new(1, 1, vec![0, 1], vec![0], vec![-1.]);
        let b = [-1.];
        let c = [1.];
        let settings = unscaled_settings();
        let mut data = DefaultProblemData::new(&A, &b, &c, &[NonnegativeConeT(1)], &settings);

        // iterate collapsed to (nearly) zero
        let mut vars = DefaultVariables::<f64>::new(1, 1);
        vars.u = vec![1e-12, 1e-12, 1e-12];
        vars.v = vec![0., 0., 0.];

        let mut info = DefaultInfo::<f64>::new();
        let mut solution = DefaultSolution::new(1, 1);
        solution.post_process(&mut data, &vars, &mut info, &settings);

        assert_eq!(solution.status, SolverStatus::Indeterminate);
        assert!(solution.x[0].is_nan());
        assert!(solution.y[0].is_nan());
        assert!(solution.s[0].is_nan());
        assert!(info.pobj.is_nan());
        assert!(info.dobj.is_nan());
    }

    #[test]
    fn test_post_process_infeasibility_certificate() {
        // x <= -1 and x >= 1.  The dual certificate is rescaled so
        // that b'y = -1
        let A = CscMatrix::new(2, 1, vec![0, 2], vec![0, 1], vec![1., -1.]);
        let b = [-1., -1.];
        let c = [1.];
        let settings = unscaled_settings();
        let mut data = DefaultProblemData::new(&A, &b, &c, &[NonnegativeConeT(2)], &settings);

        let mut vars = DefaultVariables::<f64>::new(1, 2);
        vars.u = vec![0., 1., 1., 0.]; // y = (1,1), τ = 0
        vars.v = vec![0., 0., 0., 1.];

        let mut info = DefaultInfo::<f64>::new();
        info.set_status(SolverStatus::Infeasible);

        let mut solution = DefaultSolution::new(1, 2);
        solution.post_process(&mut data, &vars, &mut info, &settings);

        assert_eq!(solution.status, SolverStatus::Infeasible);
        assert!(solution.x[0].is_nan());
        assert!(solution.s[0].is_nan());
        assert_eq!(solution.y, vec![0.5, 0.5]);
        assert_eq!(solution.obj_val_dual, -1.);
        assert!(solution.obj_val.is_nan());
        assert_eq!(info.res_dual, 0.);
    }

    #[test]
    fn test_post_process_unbounded_from_endpoint() {
        // min -x s.t. x >= 0, iterate carries the ray x = 1, s = 1
        // with τ = 0 and no certificate status set
        let A = CscMatrix::new(1, 1, vec![0, 1], vec![0], vec![-1.]);
        let b = [0.];
        let c = [-1.];
        let settings = unscaled_settings();
        let mut data = DefaultProblemData::new(&A, &b, &c, &[NonnegativeConeT(1)], &settings);

        let mut vars = DefaultVariables::<f64>::new(1, 1);
        vars.u = vec![1., 0., 0.];
        vars.v = vec![0., 1., 1.];

        let mut info = DefaultInfo::<f64>::new();
        let mut solution = DefaultSolution::new(1, 1);
        solution.post_process(&mut data, &vars, &mut info, &settings);

        assert_eq!(solution.status, SolverStatus::Unbounded);
        assert_eq!(solution.x, vec![1.]);
        assert_eq!(solution.s, vec![1.]);
        assert!(solution.y[0].is_nan());
        assert_eq!(solution.obj_val, -1.);
        assert!(solution.obj_val_dual.is_nan());
        assert_eq!(info.res_pri, 0.);
    }
}
