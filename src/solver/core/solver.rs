use super::cones::Cone;
use super::traits::*;
use super::SettingsError;
use crate::algebra::*;
use crate::io::ConfigurablePrintTarget;
use crate::ldl::LdlError;
use crate::timers::*;
use thiserror::Error;

// ---------------------------------
// Solver status type
// ---------------------------------

/// Status of solver at termination

#[repr(u32)]
#[derive(PartialEq, Eq, Clone, Debug, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverStatus {
    /// Problem is not solved (solver hasn't run).
    Unsolved,
    /// Solver terminated with a solution.
    Solved,
    /// Problem is primal infeasible.  Solution returned is a certificate of infeasibility.
    Infeasible,
    /// Problem is dual infeasible (primal unbounded).  Solution returned is a certificate of unboundedness.
    Unbounded,
    /// The terminal iterate supported no verdict, e.g. because the
    /// iteration limit was reached while still far from convergence.
    Indeterminate,
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Default for SolverStatus {
    fn default() -> Self {
        SolverStatus::Unsolved
    }
}

// ---------------------------------
// Solver error type
// ---------------------------------

/// Error type returned by problem assembly and setup operations

#[derive(Error, Debug)]
pub enum SolverError {
    /// Problem dimensions are unworkable, e.g. no constraint rows
    /// or more variables than constraints
    #[error("Bad problem dimensions ({0})")]
    BadProblemDimension(&'static str),
    /// Input argument lengths disagree with each other
    #[error("Dimension mismatch in {0}")]
    IncompatibleDimension(&'static str),
    /// Constraint matrix fails CSC format checks
    #[error("Bad constraint matrix ({0})")]
    BadMatrix(#[from] SparseFormatError),
    /// A cone block with an inadmissible dimension
    #[error("Bad cone dimension ({0})")]
    BadConeDimension(&'static str),
    /// Cone list covers a different number of rows than the constraint matrix
    #[error("Cone dimensions do not match the number of constraint rows")]
    IncompatibleConeDimension,
    /// A cone type with no shipped projection
    #[error("Unsupported cone type \"{0}\"")]
    UnsupportedCone(&'static str),
    /// Settings validation failed
    #[error(transparent)]
    BadSettings(#[from] SettingsError),
    /// The direct backend could not factor the subsystem matrix
    #[error(transparent)]
    Factorization(#[from] LdlError),
    /// Unrecognized linear system method name
    #[error("Unrecognized linear system method \"{0}\"")]
    BadLinSysMethod(String),
}

// ---------------------------------
// top level solver container type
// ---------------------------------

// The top-level solver.

// This struct is defined over a collection of mutually interacting types.
// See the [`DefaultSolver`](crate::solver::implementations::default) for an example.

pub struct Solver<D, V, R, L, C, I, SO, SE> {
    pub data: D,
    pub variables: V,
    pub residuals: R,
    pub linsys: L,
    pub cones: C,
    pub info: I,
    pub solution: SO,
    pub settings: SE,
    pub timers: Option<Timers>,
}

// ---------------------------------
// FirstOrderSolver trait and its standard implementation.
// ---------------------------------

/// An operator-splitting solver on the homogeneous self-dual embedding.

// Only the main solver function lives in FirstOrderSolver, since this is
// the only publicly facing trait we want to give the solver.   Each pass
// of the iteration alternates a projection onto the affine subspace of
// the embedding (one linear solve) with an overrelaxed projection onto
// its cone constraints, then takes a dual ascent step.

pub trait FirstOrderSolver<T, D, V, R, L, C, I, SO, SE> {
    /// Run the solver
    fn solve(&mut self);
}

impl<T, D, V, R, L, C, I, SO, SE> FirstOrderSolver<T, D, V, R, L, C, I, SO, SE>
    for Solver<D, V, R, L, C, I, SO, SE>
where
    T: FloatT,
    D: ProblemData<T, V = V, SE = SE>,
    V: Variables<T, C = C, SE = SE>,
    R: Residuals<T, D = D, V = V, SE = SE>,
    L: LinSys<T, V = V, SE = SE>,
    C: Cone<T>,
    I: Info<T, D = D, R = R, C = C, SE = SE>,
    SO: Solution<T, D = D, V = V, I = I, SE = SE>,
    SE: Settings<T>,
{
    fn solve(&mut self) {
        let mut iter: u32 = 0;

        //timers is stored as an option so that
        //we can swap it out here and avoid
        //borrow conflicts with other fields.
        let mut timers = self.timers.take().unwrap();

        // solver release info, solver config,
        // problem dimensions, cone types etc
        notimeit! {timers; {
            self.info
                .print_configuration(&self.settings, &self.data, &self.cones, self.linsys.method_name())
                .ok();
            self.info.print_status_header(&self.settings).ok();
        }}

        self.info.reset(&mut timers);

        timeit! {timers => "solve"; {

        // a no-op on a fresh solve, but re-solves arrive here with the
        // data restored to the user's scaling and must be rescaled
        timeit!{timers => "equilibration"; {
            self.data.equilibrate(&self.settings);
        }}

        // start every solve from the interior of the embedding rather
        // than warm-starting, so repeated solves are reproducible
        self.variables.initialize();

        timeit!{timers => "splitting iteration"; {

        // ----------
        // main loop
        // ----------

        while iter < self.settings.core().max_iter {

            self.variables.save_prev();

            // project onto the affine subspace of the embedding
            // --------------
            timeit!{timers => "linsys solve"; {
                self.linsys
                    .project_affine(&mut self.variables, &self.settings, Some(iter));
            }}

            // overrelax, then project onto the cone constraints
            // --------------
            timeit!{timers => "cone projection"; {
                self.variables.relax_then_project(&self.cones, &self.settings);
            }}

            // dual ascent step
            // --------------
            self.variables.update_dual(&self.settings);

            self.info.save_scalars(iter, &timers);

            // convergence check and printing
            // --------------
            if iter % self.settings.core().check_interval == 0 {
                let proposal = self
                    .residuals
                    .update(&self.variables, &self.data, &self.settings);
                self.info.update(&self.residuals);

                if self.info.check_termination(proposal) {
                    break;
                }
            }

            if iter % self.settings.core().print_interval == 0 {
                notimeit!{timers; {
                    self.info.print_status(&self.settings).ok();
                }}
            }

            iter += 1;

        } //end loop
        // ----------
        // ----------

        }} //end "splitting iteration" timer

        // the loop breaks before printing a row for the terminal
        // iterate, so recapture the scalars and print one last line
        self.info.save_scalars(iter, &timers);
        notimeit! {timers; {
            self.info.print_status(&self.settings).ok();
        }}

        }} // end "solve" timer

        // classify the terminal iterate and store the final solution,
        // undoing equilibration along the way
        self.solution
            .post_process(&mut self.data, &self.variables, &mut self.info, &self.settings);

        self.info.finalize(&mut timers);
        self.solution.finalize(&self.info);

        notimeit! {timers; {
            self.info
                .print_footer(&self.settings, &self.linsys.summary())
                .ok();
        }}

        //stow the timers back into Option in the solver struct
        self.timers.replace(timers);
    }
}

// ---------------------------------
// print target configuration
// ---------------------------------

// The solver's print stream lives on its Info object, so stream
// configuration calls made on the solver just pass straight through.

impl<D, V, R, L, C, I, SO, SE> ConfigurablePrintTarget for Solver<D, V, R, L, C, I, SO, SE>
where
    I: ConfigurablePrintTarget,
{
    fn print_to_stdout(&mut self) {
        self.info.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.info.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn std::io::Write + Send + Sync>) {
        self.info.print_to_stream(stream)
    }
    fn print_to_buffer(&mut self) {
        self.info.print_to_buffer()
    }
    fn print_to_sink(&mut self) {
        self.info.print_to_sink()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.info.get_print_buffer()
    }
}
