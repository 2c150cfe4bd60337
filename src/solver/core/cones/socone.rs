use super::Cone;
use crate::algebra::*;
use core::marker::PhantomData;

// -------------------------------------
// Second order Cone
// -------------------------------------

pub struct SecondOrderCone<T: FloatT = f64> {
    dim: usize,
    phantom: PhantomData<T>,
}

impl<T> SecondOrderCone<T>
where
    T: FloatT,
{
    pub fn new(dim: usize) -> Self {
        assert!(dim >= 1);
        Self {
            dim,
            phantom: PhantomData,
        }
    }
}

impl<T> Cone<T> for SecondOrderCone<T>
where
    T: FloatT,
{
    fn numel(&self) -> usize {
        self.dim
    }

    fn project_dual(&self, z: &mut [T]) {
        //the second order cone is self dual.  A one
        //dimensional cone degenerates to the nonnegative reals
        if self.dim == 1 {
            z[0] = T::max(z[0], T::zero());
            return;
        }

        let (z0, z1) = z.split_at_mut(1);
        let z0 = &mut z0[0];
        let nrm = z1.norm();

        if nrm <= *z0 {
            //interior or boundary, nothing to do
        } else if nrm <= -*z0 {
            //in the polar cone, projects to the origin
            *z0 = T::zero();
            z1.set(T::zero());
        } else {
            let c = (nrm + *z0) / (2.).as_T();
            *z0 = c;
            z1.scale(c / nrm);
        }
    }
}
