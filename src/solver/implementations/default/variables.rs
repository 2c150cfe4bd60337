use super::*;
use crate::algebra::*;
use crate::solver::core::{
    cones::{CompositeCone, Cone},
    traits::Variables,
};
use itertools::izip;

// ---------------
// Variables type for default problem format
// ---------------

/// Standard-form solver type implementing the [`Variables`](crate::solver::core::traits::Variables) trait
///
/// The iterate lives in the homogeneous embedding.  `u` holds the
/// blocks `[x; y; τ]` and `v` holds `[0; s; κ]`, so the primal
/// solution, the dual solution and the slack are all read out of a
/// single fixed-point pair at termination.
pub struct DefaultVariables<T> {
    /// splitting iterate
    pub u: Vec<T>,
    /// dual of the splitting iterate
    pub v: Vec<T>,
    /// result of the most recent affine projection
    pub u_t: Vec<T>,
    /// iterate from the previous round
    pub u_prev: Vec<T>,

    pub(crate) n: usize,
    pub(crate) m: usize,
}

impl<T: std::fmt::Debug> std::fmt::Debug for DefaultVariables<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "u: {:?}\nv: {:?}\nu_t: {:?}\nu_prev: {:?}\n",
            self.u, self.v, self.u_t, self.u_prev
        )
    }
}

impl<T> DefaultVariables<T>
where
    T: FloatT,
{
    /// Create a new `DefaultVariables` object
    pub fn new(n: usize, m: usize) -> Self {
        let l = n + m + 1;
        let mut variables = Self {
            u: vec![T::zero(); l],
            v: vec![T::zero(); l],
            u_t: vec![T::zero(); l],
            u_prev: vec![T::zero(); l],
            n,
            m,
        };
        variables.initialize();
        variables
    }

    /// signed value of the homogenizing variable τ
    pub fn tau(&self) -> T {
        self.u[self.n + self.m]
    }

    /// signed value of the homogenizing variable κ
    pub fn kappa(&self) -> T {
        self.v[self.n + self.m]
    }

    // block accessors into the embedding
    pub(crate) fn x(&self) -> &[T] {
        &self.u[0..self.n]
    }
    pub(crate) fn y(&self) -> &[T] {
        &self.u[self.n..self.n + self.m]
    }
    pub(crate) fn s(&self) -> &[T] {
        &self.v[self.n..self.n + self.m]
    }
}

impl<T> Variables<T> for DefaultVariables<T>
where
    T: FloatT,
{
    type C = CompositeCone<T>;
    type SE = DefaultSettings<T>;

    fn initialize(&mut self) {
        // cold start at the interior of the embedding: everything
        // zero except the homogenizing slots, seeded so that the
        // iterate pair has norm √l
        self.u.set(T::zero());
        self.v.set(T::zero());
        self.u_t.set(T::zero());
        self.u_prev.set(T::zero());

        let l = self.u.len();
        let seed = T::sqrt((l).as_T());
        self.u[l - 1] = seed;
        self.v[l - 1] = seed;
    }

    fn save_prev(&mut self) {
        self.u_prev.copy_from(&self.u);
    }

    fn relax_then_project(&mut self, cones: &CompositeCone<T>, settings: &DefaultSettings<T>) {
        let n = self.n;
        let m = self.m;
        let l = self.u.len();
        let alpha = settings.alpha;

        // the x block takes the affine result directly
        for (u, &ut, &v) in izip!(&mut self.u[0..n], &self.u_t[0..n], &self.v[0..n]) {
            *u = ut - v;
        }

        // the remaining blocks, τ included, are overrelaxed towards
        // the affine result before projection
        let one_m_alpha = T::one() - alpha;
        for (u, &ut, &up, &v) in izip!(
            &mut self.u[n..l],
            &self.u_t[n..l],
            &self.u_prev[n..l],
            &self.v[n..l]
        ) {
            *u = alpha * ut + one_m_alpha * up - v;
        }

        // y lives in the dual of the problem cone
        cones.project_dual(&mut self.u[n..n + m]);

        if self.u[l - 1] < T::zero() {
            self.u[l - 1] = T::zero();
        }
    }

    fn update_dual(&mut self, settings: &DefaultSettings<T>) {
        let n = self.n;
        let l = self.u.len();
        let alpha = settings.alpha;

        // the x block of v never moves, its correction is
        // identically zero
        if T::abs(alpha - T::one()) < (1e-9).as_T() {
            for (v, &u, &ut) in izip!(&mut self.v[n..l], &self.u[n..l], &self.u_t[n..l]) {
                *v += u - ut;
            }
        } else {
            let one_m_alpha = T::one() - alpha;
            for (v, &u, &ut, &up) in izip!(
                &mut self.v[n..l],
                &self.u[n..l],
                &self.u_t[n..l],
                &self.u_prev[n..l]
            ) {
                *v += u - alpha * ut - one_m_alpha * up;
            }
        }
    }
}
