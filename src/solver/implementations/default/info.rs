use super::*;
use crate::algebra::*;
use crate::io::PrintTarget;
use crate::solver::core::{traits::Info, SolverStatus};
use crate::timers::*;

/// Standard-form solver type implementing the [`Info`](crate::solver::core::traits::Info) and [`InfoPrint`](crate::solver::core::traits::InfoPrint) traits

#[derive(Default, Debug)]
pub struct DefaultInfo<T> {
    // progress at the most recent convergence check.  pobj and dobj
    // report c'x and -b'y at the τ-scaled iterate, or NaN while the
    // iterate still favors κ.  After termination these fields are
    // overwritten with the diagnostics of the returned solution
    pub res_pri: T,
    pub res_dual: T,
    pub rel_gap: T,
    pub pobj: T,
    pub dobj: T,
    pub tau: T,
    pub kap: T,

    pub iterations: u32,
    pub setup_time: f64,
    pub solve_time: f64,
    pub status: SolverStatus,

    // print stream shared by the InfoPrint implementation
    pub(crate) stream: PrintTarget,
}

impl<T> DefaultInfo<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> Info<T> for DefaultInfo<T>
where
    T: FloatT,
{
    type R = DefaultResiduals<T>;

    fn reset(&mut self, timers: &mut Timers) {
        self.status = SolverStatus::Unsolved;
        self.iterations = 0;
        self.solve_time = 0f64;

        timers.reset_timer("solve");
    }

    fn update(&mut self, residuals: &DefaultResiduals<T>) {
        self.res_pri = residuals.res_pri;
        self.res_dual = residuals.res_dual;
        self.rel_gap = residuals.rel_gap;
        self.pobj = residuals.cTx;
        self.dobj = -residuals.bTy;
        self.tau = residuals.tau;
        self.kap = residuals.kap;
    }

    fn save_scalars(&mut self, iter: u32, timers: &Timers) {
        self.iterations = iter;
        self.solve_time = timers.total_time().as_secs_f64();
    }

    fn check_termination(&mut self, proposal: SolverStatus) -> bool {
        if proposal != SolverStatus::Unsolved {
            self.status = proposal;
        }

        // TRUE means we have settled on a final status
        self.status != SolverStatus::Unsolved
    }

    fn finalize(&mut self, timers: &mut Timers) {
        self.solve_time = timers.total_time().as_secs_f64();
    }

    fn get_status(&self) -> SolverStatus {
        self.status
    }

    fn set_status(&mut self, status: SolverStatus) {
        self.status = status;
    }
}
