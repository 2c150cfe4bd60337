#![allow(non_snake_case)]
use super::*;
use crate::algebra::*;
use crate::solver::core::{traits::Residuals, SolverStatus};
use itertools::izip;

// ---------------
// Residuals type for default problem format
// ---------------

/// Standard-form solver type implementing the [`Residuals`](crate::solver::core::traits::Residuals) trait

pub struct DefaultResiduals<T> {
    // relative residuals of the self-dual embedding, reported
    // once the iterate favors τ over κ
    pub res_pri: T,
    pub res_dual: T,
    pub rel_gap: T,

    // objective values at the current iterate, already divided
    // by τ.  While τ ≤ κ these hold NaN and res_pri / res_dual
    // carry the certificate residuals instead
    pub cTx: T,
    pub bTy: T,

    // homogeneous embedding scalars, κ in user scale
    pub tau: T,
    pub kap: T,

    // work vectors for the residual products
    pr: Vec<T>,
    dr: Vec<T>,
    Axs: Vec<T>,
    ATy: Vec<T>,
}

impl<T> DefaultResiduals<T>
where
    T: FloatT,
{
    pub fn new(n: usize, m: usize) -> Self {
        let sentinel = -T::one();

        Self {
            res_pri: sentinel,
            res_dual: sentinel,
            rel_gap: sentinel,
            cTx: sentinel,
            bTy: sentinel,
            tau: sentinel,
            kap: sentinel,
            pr: vec![T::zero(); m],
            dr: vec![T::zero(); n],
            Axs: vec![T::zero(); m],
            ATy: vec![T::zero(); n],
        }
    }
}

impl<T> Residuals<T> for DefaultResiduals<T>
where
    T: FloatT,
{
    type D = DefaultProblemData<T>;
    type V = DefaultVariables<T>;
    type SE = DefaultSettings<T>;

    fn update(
        &mut self,
        variables: &DefaultVariables<T>,
        data: &DefaultProblemData<T>,
        settings: &DefaultSettings<T>,
    ) -> SolverStatus {
        let (n, m) = (data.n, data.m);
        let l = n + m + 1;
        let alpha = settings.alpha;
        let eps = settings.eps;

        let equil = &data.equilibration;
        let obj_scale = data.scale * equil.sc_c * equil.sc_b;

        let tau = T::abs(variables.tau());
        let mut kap = T::abs(variables.kappa());

        // Ax + s - b*τ falls out of the saved iterates without a
        // multiply by A
        let tau_t = variables.u_t[l - 1];
        for (pr, Axs, &uy, &upy, &uty, &bi) in izip!(
            &mut self.pr,
            &mut self.Axs,
            variables.y(),
            &variables.u_prev[n..n + m],
            &variables.u_t[n..n + m],
            &data.b
        ) {
            let ri = uy
                + (alpha - (2.0).as_T()) * upy
                + (T::one() - alpha) * uty
                + bi * (tau_t - tau);
            *pr = ri;
            *Axs = ri + bi * tau;
        }

        let mut cTx = variables.x().dot(&data.c);

        if settings.normalize {
            kap /= obj_scale;
            let dscale = T::recip(equil.sc_b * data.scale);
            for (pr, Axs, &di) in izip!(&mut self.pr, &mut self.Axs, &equil.d) {
                *pr *= di * dscale;
                *Axs *= di * dscale;
            }
            cTx /= obj_scale;
        }

        self.tau = tau;
        self.kap = kap;

        // c'x < 0 with Ax + s small certifies dual infeasibility,
        // i.e. an unbounded primal objective.  The remaining fields
        // keep their previous values on this exit
        self.res_pri = if cTx < T::zero() {
            data.normc * self.Axs.norm() / -cTx
        } else {
            T::nan()
        };
        if self.res_pri < eps {
            return SolverStatus::Unbounded;
        }

        data.A.gemv_t(&mut self.ATy, variables.y(), T::one(), T::zero());
        self.dr.copy_from(&self.ATy);
        self.dr.axpby(tau, &data.c, T::one());

        let mut bTy = variables.y().dot(&data.b);

        if settings.normalize {
            let escale = T::recip(equil.sc_c * data.scale);
            for (dr, ATy, &ei) in izip!(&mut self.dr, &mut self.ATy, &equil.e) {
                *dr *= ei * escale;
                *ATy *= ei * escale;
            }
            bTy /= obj_scale;
        }

        // b'y < 0 with A'y small certifies primal infeasibility
        self.res_dual = if bTy < T::zero() {
            data.normb * self.ATy.norm() / -bTy
        } else {
            T::nan()
        };
        if self.res_dual < eps {
            return SolverStatus::Infeasible;
        }
        self.rel_gap = T::nan();

        let mut status = SolverStatus::Unsolved;
        if tau > kap {
            let rpri = self.pr.norm() / (T::one() + data.normb) / tau;
            let rdua = self.dr.norm() / (T::one() + data.normc) / tau;
            let gap = T::abs(cTx + bTy) / (tau + T::abs(cTx) + T::abs(bTy));

            self.res_pri = rpri;
            self.res_dual = rdua;
            self.rel_gap = gap;
            self.cTx = cTx / tau;
            self.bTy = bTy / tau;

            if T::max(T::max(rpri, rdua), gap) < eps {
                status = SolverStatus::Solved;
            }
        } else {
            self.cTx = T::nan();
            self.bTy = T::nan();
        }
        status
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
    fn test_residuals_solved_fixed_point() {
        // min x  s.t. x >= 1, written as -x + s = -1, s >= 0.
        // Optimum x = 1, y = 1, with zero gap
        let A = CscMatrix::new(1, 1, vec![0, 1], vec![0], vec![-1.]);
        let b = [-1.];
        let c = [1.];
        let settings = unscaled_settings();
        let data = DefaultProblemData::new(&A, &b, &c, &[NonnegativeConeT(1)], &settings);

        // fixed point of the splitting iteration at the optimum
        let mut vars = DefaultVariables::<f64>::new(1, 1);
        vars.u = vec![1., 1., 1.];
        vars.u_t = vars.u.clone();
        vars.u_prev = vars.u.clone();
        vars.v = vec![0., 0., 0.];

        let mut res = DefaultResiduals::new(1, 1);
        let status = res.update(&vars, &data, &settings);

        assert_eq!(status, SolverStatus::Solved);
        assert!(res.res_pri.abs() < 1e-12);
        assert!(res.res_dual.abs() < 1e-12);
        assert!(res.rel_gap.abs() < 1e-12);
        assert_eq!(res.cTx, 1.);
        assert_eq!(res.bTy, -1.);
        assert_eq!(res.tau, 1.);
        assert_eq!(res.kap, 0.);
    }

    #[test]
    fn test_residuals_infeasibility_certificate() {
        // x <= -1 and x >= 1 cannot both hold.  y = (1,1) gives
        // A'y = 0 with b'y < 0
        let A = CscMatrix::new(2, 1, vec![0, 2], vec![0, 1], vec![1., -1.]);
        let b = [-1., -1.];
        let c = [1.];
        let settings = unscaled_settings();
        let data = DefaultProblemData::new(&A, &b, &c, &[NonnegativeConeT(2)], &settings);

        let mut vars = DefaultVariables::<f64>::new(1, 2);
        vars.u = vec![0., 1., 1., 0.]; // τ = 0
        vars.u_t = vars.u.clone();
        vars.u_prev = vars.u.clone();
        vars.v = vec![0., 0., 0., 1.]; // κ = 1

        let mut res = DefaultResiduals::new(1, 2);
        let status = res.update(&vars, &data, &settings);

        assert_eq!(status, SolverStatus::Infeasible);
        assert_eq!(res.res_dual, 0.);
        assert!(res.res_pri.is_nan()); // c'x = 0, no unboundedness cert
        assert_eq!(res.tau, 0.);
        assert_eq!(res.kap, 1.);

        // fields after the early return keep their initial values
        assert_eq!(res.rel_gap, -1.);
        assert_eq!(res.cTx, -1.);
        assert_eq!(res.bTy, -1.);
    }

    #[test]
    fn test_residuals_unboundedness_certificate() {
        // min -x  s.t. x >= 0.  The ray x = 1, s = 1 has Ax + s = 0
        // with c'x < 0
        let A = CscMatrix::new(1, 1, vec![0, 1], vec![0], vec![-1.]);
        let b = [0.];
        let c = [-1.];
        let settings = unscaled_settings();
        let data = DefaultProblemData::new(&A, &b, &c, &[NonnegativeConeT(1)], &settings);

        let mut vars = DefaultVariables::<f64>::new(1, 1);
        vars.u = vec![1., 0., 0.]; // τ = 0
        vars.u_t = vars.u.clone();
        vars.u_prev = vars.u.clone();
        vars.v = vec![0., 0., 1.]; // κ = 1

        let mut res = DefaultResiduals::new(1, 1);
        let status = res.update(&vars, &data, &settings);

        assert_eq!(status, SolverStatus::Unbounded);
        assert_eq!(res.res_pri, 0.);
        assert_eq!(res.res_dual, -1.); // dual side never evaluated
        assert_eq!(res.tau, 0.);
        assert_eq!(res.kap, 1.);
    }
}
