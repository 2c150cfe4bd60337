use crate::algebra::FloatT;
use enum_dispatch::*;

//primitive cone types
mod expcone;
mod nonnegativecone;
mod socone;
mod zerocone;

//the supported cone wrapper type for primitives
//and the composite cone
mod compositecone;
mod supportedcone;

//flatten all cone implementations to appear in this module
pub use compositecone::*;
pub use expcone::*;
pub use nonnegativecone::*;
pub use socone::*;
pub use supportedcone::*;
pub use zerocone::*;

#[enum_dispatch]
pub trait Cone<T>
where
    T: FloatT,
{
    // number of problem rows occupied by the cone
    fn numel(&self) -> usize;

    // Project z in place onto the dual of the cone.  The dual block
    // of the splitting iterate lives in K*, so each primitive
    // implements the projection for its dual rather than for itself.
    fn project_dual(&self, z: &mut [T]);
}
