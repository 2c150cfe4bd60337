use crate::solver::implementations::default::DefaultSettings;
use thiserror::Error;

/// Solver general core settings are the same as in the default solver.
///
/// Go [here](crate::solver::implementations::default::DefaultSettings)
/// to view the complete list.
///
pub type CoreSettings<T> = DefaultSettings<T>;

#[derive(Error, Debug)]
/// Error type returned by settings validation
pub enum SettingsError {
    /// A field holds a value outside its admissible range
    #[error("Bad value for field \"{0}\"")]
    BadFieldValue(&'static str),
}
