#![allow(non_snake_case)]
use super::*;
use crate::algebra::*;
use crate::solver::core::{cones::SupportedConeT, traits::ProblemData};

// ---------------
// Data type for default problem format
// ---------------

/// Standard-form solver type implementing the [`ProblemData`](crate::solver::core::traits::ProblemData) trait

pub struct DefaultProblemData<T> {
    /// The constraint matrix, in the scaling of the current solver state
    pub A: CscMatrix<T>,
    /// Constraint vector, in the scaling of the current solver state
    pub b: Vec<T>,
    /// Objective vector, in the scaling of the current solver state
    pub c: Vec<T>,
    /// number of variables
    pub n: usize,
    /// number of constraint rows
    pub m: usize,
    /// the scaling applied to the data
    pub equilibration: DefaultEquilibrationData<T>,

    /// norm of b in the user scaling, recorded at construction
    pub normb: T,
    /// norm of c in the user scaling, recorded at construction
    pub normc: T,

    // global scale factor captured at construction, so that later
    // changes to the settings cannot desynchronize the scaling state
    pub(crate) scale: T,

    // cone block structure of the constraint rows
    pub(crate) cone_dims: Vec<SupportedConeT>,

    is_equilibrated: bool,
}

impl<T> DefaultProblemData<T>
where
    T: FloatT,
{
    pub fn new(
        A: &CscMatrix<T>,
        b: &[T],
        c: &[T],
        cone_dims: &[SupportedConeT],
        settings: &DefaultSettings<T>,
    ) -> Self {
        // dimension and format checks will have already been
        // performed during problem setup, so skip here

        let A = A.clone();
        let b = b.to_vec();
        let c = c.to_vec();

        let (m, n) = A.size();

        // norms of b and c before any equilibration, so that
        // residuals can be reported relative to the user's data
        let normb = b.norm();
        let normc = c.norm();

        let equilibration = DefaultEquilibrationData::<T>::new(n, m);

        let mut data = Self {
            A,
            b,
            c,
            n,
            m,
            equilibration,
            normb,
            normc,
            scale: settings.scale,
            cone_dims: cone_dims.to_vec(),
            is_equilibrated: false,
        };

        if settings.normalize {
            data.equilibration.compute_and_apply(
                &mut data.A,
                &mut data.b,
                &mut data.c,
                &data.cone_dims,
                data.scale,
            );
            data.is_equilibrated = true;
        }

        data
    }

    // clones of the problem data restored to the user's scaling,
    // used by file export
    #[cfg(feature = "serde")]
    pub(crate) fn user_data(&self) -> (CscMatrix<T>, Vec<T>, Vec<T>) {
        let mut A = self.A.clone();
        let mut b = self.b.clone();
        let mut c = self.c.clone();
        if self.is_equilibrated {
            self.equilibration.unapply(&mut A, &mut b, &mut c, self.scale);
        }
        (A, b, c)
    }
}

impl<T> ProblemData<T> for DefaultProblemData<T>
where
    T: FloatT,
{
    type V = DefaultVariables<T>;
    type SE = DefaultSettings<T>;

    fn equilibrate(&mut self, settings: &DefaultSettings<T>) {
        // nothing to do if equilibration is disabled.  Note that
        // the default equilibration structure initializes with
        // identity scaling already.
        if self.is_equilibrated || !settings.normalize {
            return;
        }

        // re-solves arrive here after unequilibrate has restored
        // the user data, so the stored scalings go back on verbatim
        // rather than being recomputed from the restored values
        self.equilibration
            .apply(&mut self.A, &mut self.b, &mut self.c, self.scale);
        self.is_equilibrated = true;
    }

    fn unequilibrate(&mut self) {
        if !self.is_equilibrated {
            return;
        }
        self.equilibration
            .unapply(&mut self.A, &mut self.b, &mut self.c, self.scale);
        self.is_equilibrated = false;
    }
}
