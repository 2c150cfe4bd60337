// package together all of the following and re-export
// in a partially flattened structure :
// : core component traits
// : cone traits and standard cone implementations
// : linear subsystem solver engines
// : user settings
// : main solver implementation

pub mod cones;
pub mod linsys;
pub mod traits;

//partially flatten top level pieces

mod settings;
mod solver;
pub use settings::*;
pub use solver::*;

/// Trait for solvers that can serialize their problem data to a
/// JSON file and be rebuilt from one.
#[cfg(feature = "serde")]
pub trait SolverJSONReadWrite: Sized {
    /// write internal problem data to a JSON file, in the scaling
    /// originally supplied by the user
    fn write_to_file(&self, file: &mut std::fs::File) -> Result<(), std::io::Error>;
    /// create a new solver from a problem data file
    fn read_from_file(file: &mut std::fs::File) -> Result<Self, std::io::Error>;
}
