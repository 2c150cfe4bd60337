#![allow(non_snake_case)]
use super::*;
use crate::algebra::*;
use crate::solver::core::{
    linsys::{linsys_backend, BoxedLinSysSolver},
    traits::LinSys,
    SolverError,
};

// ---------------
// linear subsystem for default problem format
// ---------------

/// Standard-form solver type implementing the [`LinSys`](crate::solver::core::traits::LinSys) trait
///
/// Holds the fixed data of the affine projection and a backend for
/// the linear solves it requires.  The projection works on the
/// embedding vector `h = [c; b]` and the auxiliary vector `g`, which
/// is `h` pushed once through the subsystem solve at setup.  With
/// those in hand, projecting onto the affine subspace of the
/// embedding costs one backend solve plus a rank-one correction.
pub struct DefaultLinSys<T: FloatT = f64> {
    // backend for the quasidefinite subsystem, chosen by the
    // `linsys_method` setting
    solver: BoxedLinSysSolver<T>,

    // fixed projection data
    pub(crate) h: Vec<T>,
    pub(crate) g: Vec<T>,
    pub(crate) gTh: T,

    n: usize,
    m: usize,
}

impl<T> DefaultLinSys<T>
where
    T: FloatT,
{
    pub fn new(
        data: &DefaultProblemData<T>,
        settings: &DefaultSettings<T>,
    ) -> Result<Self, SolverError> {
        let (n, m) = (data.n, data.m);

        let mut solver = linsys_backend(
            &settings.linsys_method,
            &data.A,
            settings.rho_x,
            settings.cg_rate,
        )?;

        // h = [c; b] in the scaled data
        let mut h = vec![T::zero(); n + m];
        h[0..n].copy_from(&data.c);
        h[n..].copy_from(&data.b);

        // g solves the subsystem against h, with its lower block
        // negated to account for the -I sign of the embedding.
        // This solve wants full accuracy, so the iteration index
        // is withheld from the backend's tolerance schedule
        let mut g = h.clone();
        solver.solve(&mut g, None, None);
        g[n..].negate();

        let gTh = g.dot(&h);

        Ok(Self {
            solver,
            h,
            g,
            gTh,
            n,
            m,
        })
    }
}

impl<T> LinSys<T> for DefaultLinSys<T>
where
    T: FloatT,
{
    type V = DefaultVariables<T>;
    type SE = DefaultSettings<T>;

    fn project_affine(
        &mut self,
        variables: &mut DefaultVariables<T>,
        settings: &DefaultSettings<T>,
        iter: Option<u32>,
    ) {
        let (n, m) = (self.n, self.m);
        let l = n + m + 1;

        let u = &variables.u;
        let u_t = &mut variables.u_t;

        // candidate point u + v, with the x block weighted by ρ
        u_t.waxpby(T::one(), u, T::one(), &variables.v);
        u_t[0..n].scale(settings.rho_x);

        // eliminate the homogenizing coordinate, fold in the
        // rank-one correction from g, and flip the y block to the
        // sign convention of the subsystem
        let tau_t = u_t[l - 1];
        u_t[0..l - 1].axpby(-tau_t, &self.h, T::one());
        let rho1 = u_t[0..l - 1].dot(&self.g) / (self.gTh + T::one());
        u_t[0..l - 1].axpby(-rho1, &self.h, T::one());
        u_t[n..l - 1].negate();

        // iterative backends warm start from the x block of the
        // current iterate
        self.solver.solve(&mut u_t[0..l - 1], Some(&u[0..n]), iter);

        // recover the homogenizing coordinate of the projection
        let uTh = u_t[0..l - 1].dot(&self.h);
        u_t[l - 1] += uTh;
    }

    fn method_name(&self) -> &'static str {
        self.solver.method_name()
    }

    fn summary(&self) -> String {
        self.solver.summary()
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
            .rho_x(1.0)
            .build()
            .unwrap()
    }

    fn test_data(settings: &DefaultSettings<f64>) -> DefaultProblemData<f64> {
        // A = [-1]
        //     [ 1]
        let A = CscMatrix::new(2, 1, vec![0, 2], vec![0, 1], vec![-1., 1.]);
        let b = [0., 1.];
        let c = [1.];
        DefaultProblemData::new(&A, &b, &c, &[NonnegativeConeT(2)], settings)
    }

    #[test]
    fn test_setup_g_vector() {
        let settings = unscaled_settings();
        let data = test_data(&settings);
        let linsys = DefaultLinSys::new(&data, &settings).unwrap();

        assert_eq!(linsys.h, vec![1., 0., 1.]);

        // g must satisfy the subsystem relation
        //     [ρI  A'][ gx]   [c]
        //     [A  -I ][-gy] = [b]
        let (gx, gy) = (linsys.g[0], &linsys.g[1..3]);
        assert!((gx + gy[0] - gy[1] - 1.0).abs() < 1e-8);
        assert!((-gx + gy[0]).abs() < 1e-8);
        assert!((gx + gy[1] - 1.0).abs() < 1e-8);

        let gth: f64 = linsys.g.dot(&linsys.h);
        assert!((linsys.gTh - gth).abs() < 1e-14);
    }

    #[test]
    fn test_projection_solves_embedding() {
        let settings = unscaled_settings();
        let data = test_data(&settings);
        let mut linsys = DefaultLinSys::new(&data, &settings).unwrap();

        let mut vars = DefaultVariables::<f64>::new(1, 2);
        vars.u.copy_from(&[0.3, -0.7, 0.2, 1.1]);
        vars.v.copy_from(&[0.0, 0.1, -0.4, 0.2]);

        linsys.project_affine(&mut vars, &settings, Some(0));

        // the result must satisfy (D + Q) u_t = D w for w = u + v,
        // where D = diag(ρI, I, 1) and Q is the skew embedding
        // operator built from A, b, c
        let w = [0.3, -0.6, -0.2, 1.3];
        let (x, y, tau) = (vars.u_t[0], &vars.u_t[1..3], vars.u_t[3]);

        // ρx + A'y + cτ = ρ wx
        let r1 = x + (-y[0] + y[1]) + tau - w[0];
        // -Ax + y + bτ = wy
        let r2 = [x + y[0] - w[1], -x + y[1] + tau - w[2]];
        // -c'x - b'y + τ = wτ
        let r3 = -x - y[1] + tau - w[3];

        assert!(r1.abs() < 1e-9);
        assert!(r2[0].abs() < 1e-9);
        assert!(r2[1].abs() < 1e-9);
        assert!(r3.abs() < 1e-9);
    }
}
