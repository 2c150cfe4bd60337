//! Required traits for types providing a solver implementation.
//!
//! This module defines the core traits that must be implemented by a collection
//! of mutually associated data types to make a solver for a particular problem
//! format.
//!
//! In nearly all cases there is no need for a user to implement these traits.
//! Instead, users should use the collection of types that are provided
//! in the [Default solver implementation](crate::solver::implementations::default),
//! which collectively implement support for the problem format described in the top
//! level crate documentation.

use super::cones::Cone;
use super::{CoreSettings, SolverStatus};
use crate::algebra::*;
use crate::timers::*;

/// Data for a conic optimization problem.

pub trait ProblemData<T: FloatT> {
    type V: Variables<T>;
    type SE: Settings<T>;

    /// Equilibrate internal data before the solver starts.  Calling
    /// this on data that is already equilibrated is a no-op, so the
    /// solver can re-solve without rescaling twice.
    fn equilibrate(&mut self, settings: &Self::SE);

    /// Undo equilibration, restoring the problem data as supplied
    /// by the user.
    fn unequilibrate(&mut self);
}

/// Variables for a conic optimization problem.
///
/// The variables hold the full splitting iterate for the homogeneous
/// embedding, i.e. the fixed-point pair (u,v) together with the result
/// of the affine projection and the previous iterate.

pub trait Variables<T: FloatT> {
    type C: Cone<T>;
    type SE: Settings<T>;

    /// Start the iteration from the interior point of the embedding,
    /// with all variables zero except the homogenizing components.
    fn initialize(&mut self);

    /// Record the current iterate before it is overwritten by
    /// the next round of projections.
    fn save_prev(&mut self);

    /// Overrelax the affine projection result, then project the
    /// candidate onto the cone constraints of the embedding.
    fn relax_then_project(&mut self, cones: &Self::C, settings: &Self::SE);

    /// Update the dual variable to close out one fixed-point round.
    fn update_dual(&mut self, settings: &Self::SE);
}

/// Residuals for a conic optimization problem.

pub trait Residuals<T: FloatT> {
    type D: ProblemData<T>;
    type V: Variables<T>;
    type SE: Settings<T>;

    /// Compute unscaled residuals for the given variables and report
    /// the termination status they support, or
    /// [`Unsolved`](SolverStatus::Unsolved) if the iteration
    /// should continue.
    fn update(&mut self, variables: &Self::V, data: &Self::D, settings: &Self::SE) -> SolverStatus;
}

/// Linear subsystem solver for the affine projection step.

pub trait LinSys<T: FloatT> {
    type V: Variables<T>;
    type SE: Settings<T>;

    /// Project the current iterate onto the affine subspace of the
    /// embedding.  `iter` is the outer iteration count, or `None`
    /// during setup, and steers the tolerance of iterative backends.
    fn project_affine(&mut self, variables: &mut Self::V, settings: &Self::SE, iter: Option<u32>);

    /// A short name for the backend, reported in the solver banner.
    fn method_name(&self) -> &'static str;

    /// A one line account of the work done by the backend, reported
    /// in the solver footer.
    fn summary(&self) -> String;
}

/// Printing functions for the solver's Info

pub trait InfoPrint<T>
where
    T: FloatT,
{
    type D: ProblemData<T>;
    type C: Cone<T>;
    type SE: Settings<T>;

    /// Print the solver configuration, e.g. settings etc.
    /// This function is called once at the start of the solve.
    fn print_configuration(
        &mut self,
        settings: &Self::SE,
        data: &Self::D,
        cones: &Self::C,
        method: &str,
    ) -> std::io::Result<()>;

    /// Print a header to appear at the top of progress information.
    fn print_status_header(&mut self, settings: &Self::SE) -> std::io::Result<()>;

    /// Print solver progress information.
    fn print_status(&mut self, settings: &Self::SE) -> std::io::Result<()>;

    /// Print solver final status and other exit information.   Called at
    /// solver termination.
    fn print_footer(&mut self, settings: &Self::SE, summary: &str) -> std::io::Result<()>;
}

/// Internal information for the solver to monitor progress and check for termination.

pub trait Info<T>: InfoPrint<T>
where
    T: FloatT,
{
    type R: Residuals<T>;

    /// Reset internal data, particularly solve timers.
    fn reset(&mut self, timers: &mut Timers);

    /// Update termination diagnostics from freshly computed residuals.
    fn update(&mut self, residuals: &Self::R);

    /// Record the iteration count and elapsed time.   Called once
    /// per iteration, whether or not residuals were recomputed.
    fn save_scalars(&mut self, iter: u32, timers: &Timers);

    /// Accept or reject a termination status proposed by the
    /// residuals check.  Returns `true` if the solver should stop.
    fn check_termination(&mut self, proposal: SolverStatus) -> bool;

    /// Compute final values before solver termination
    fn finalize(&mut self, timers: &mut Timers);

    /// Report or update termination status
    fn get_status(&self) -> SolverStatus;
    fn set_status(&mut self, status: SolverStatus);
}

/// Solution for a conic optimization problem.

pub trait Solution<T: FloatT> {
    type D: ProblemData<T>;
    type V: Variables<T>;
    type I: Info<T>;
    type SE: Settings<T>;

    /// Classify the terminal iterate, extract the solution or an
    /// infeasibility certificate from it, and restore user scaling.
    /// The problem data is mutable so that its equilibration can be
    /// reverted along the way.
    fn post_process(
        &mut self,
        data: &mut Self::D,
        variables: &Self::V,
        info: &mut Self::I,
        settings: &Self::SE,
    );

    /// Compute final values before solver termination
    fn finalize(&mut self, info: &Self::I);
}

/// Settings for a conic optimization problem.
///
/// Implementors of this trait can define any internal or problem
/// specific settings they wish.   They must, however, also maintain
/// a settings object of type [`CoreSettings`](crate::solver::core::CoreSettings)
/// and return this to the solver internally.

pub trait Settings<T: FloatT> {
    /// Return the core settings.
    fn core(&self) -> &CoreSettings<T>;

    /// Return the core settings (mutably).
    fn core_mut(&mut self) -> &mut CoreSettings<T>;
}
