use super::Cone;
use crate::algebra::*;
use core::marker::PhantomData;

// -------------------------------------
// Nonnegative Cone
// -------------------------------------

pub struct NonnegativeCone<T: FloatT = f64> {
    dim: usize,
    phantom: PhantomData<T>,
}

impl<T> NonnegativeCone<T>
where
    T: FloatT,
{
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            phantom: PhantomData,
        }
    }
}

impl<T> Cone<T> for NonnegativeCone<T>
where
    T: FloatT,
{
    fn numel(&self) -> usize {
        self.dim
    }

    fn project_dual(&self, z: &mut [T]) {
        //the nonnegative orthant is self dual
        for z in z.iter_mut() {
            *z = T::max(*z, T::zero());
        }
    }
}
