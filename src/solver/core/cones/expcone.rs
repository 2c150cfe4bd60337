use super::Cone;
use crate::algebra::*;
use core::marker::PhantomData;

// -------------------------------------
// Exponential Cone
// -------------------------------------

// tolerances and iteration caps for the projection search
const CONE_TOL: f64 = 1e-8;
const CONE_THRESH: f64 = 1e-6;
const EXP_CONE_MAX_ITERS: usize = 100;

/// The exponential cone K_exp = cl{x : x₂ > 0, x₂e^(x₁/x₂) ≤ x₃}.

pub struct ExponentialCone<T: FloatT = f64> {
    phantom: PhantomData<T>,
}

impl<T> ExponentialCone<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self {
            phantom: PhantomData,
        }
    }
}

impl<T> Default for ExponentialCone<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Cone<T> for ExponentialCone<T>
where
    T: FloatT,
{
    fn numel(&self) -> usize {
        3
    }

    fn project_dual(&self, z: &mut [T]) {
        //K_exp is not self dual.  Project onto its dual via
        //the Moreau decomposition Π_K*(z) = z + Π_K(-z)
        let (r, s, t) = (z[0], z[1], z[2]);

        z[0] = -r;
        z[1] = -s;
        z[2] = -t;

        _project_exp_cone(z);

        z[0] += r;
        z[1] += s;
        z[2] += t;
    }
}

// -------------------------------------
// Dual Exponential Cone
// -------------------------------------

/// The dual of [`ExponentialCone`](crate::solver::core::cones::ExponentialCone),
/// i.e. K*_exp = cl{x : x₁ < 0, -x₁e^(x₂/x₁) ≤ ex₃}.

pub struct DualExponentialCone<T: FloatT = f64> {
    phantom: PhantomData<T>,
}

impl<T> DualExponentialCone<T>
where
    T: FloatT,
{
    pub fn new() -> Self {
        Self {
            phantom: PhantomData,
        }
    }
}

impl<T> Default for DualExponentialCone<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Cone<T> for DualExponentialCone<T>
where
    T: FloatT,
{
    fn numel(&self) -> usize {
        3
    }

    fn project_dual(&self, z: &mut [T]) {
        //the dual of K*_exp is K_exp itself
        _project_exp_cone(z);
    }
}

// -------------------------------------
// projection onto the primal exponential cone
// -------------------------------------

// Projects v onto K_exp in place.  Membership, polar membership and
// the degenerate quadrant are dispatched analytically.  The remaining
// cases bisect on the dual multiplier ρ of the projection problem,
// with an inner 1d Newton solve recovering the projected point for
// each trial ρ.

fn _project_exp_cone<T>(v: &mut [T])
where
    T: FloatT,
{
    let (r, s, t) = (v[0], v[1], v[2]);

    // v already lies in the closure of the cone
    if (s > T::zero() && s * T::exp(r / s) - t <= CONE_THRESH.as_T())
        || (r <= T::zero() && T::abs(s) <= CONE_THRESH.as_T() && t >= T::zero())
    {
        return;
    }

    // -v lies in the dual cone, so v is in the polar
    // cone and projects onto the origin
    if (r > T::zero() && r * T::exp(s / r) + T::exp(T::one()) * t <= CONE_THRESH.as_T())
        || (T::abs(r) <= CONE_THRESH.as_T() && s <= T::zero() && t <= T::zero())
    {
        v.set(T::zero());
        return;
    }

    // quadrant with an analytical solution
    if r < T::zero() && s < T::zero() {
        v[1] = T::zero();
        v[2] = T::max(t, T::zero());
        return;
    }

    let mut x = [T::zero(); 3];
    let (mut lb, mut ub) = _bracket_rho(v, &mut x);

    for _ in 0..EXP_CONE_MAX_ITERS {
        let rho = (lb + ub) / (2.).as_T();
        let g = _grad_rho(v, &mut x, rho);
        if g > T::zero() {
            lb = rho;
        } else {
            ub = rho;
        }
        if ub - lb < CONE_TOL.as_T() {
            break;
        }
    }
    v.copy_from(&x);
}

// initial bracket for the multiplier, doubling until the
// gradient changes sign
fn _bracket_rho<T>(v: &[T], x: &mut [T; 3]) -> (T, T)
where
    T: FloatT,
{
    let mut lb = T::zero();
    let mut ub = (0.125).as_T();

    while _grad_rho(v, x, ub) > T::zero() {
        lb = ub;
        ub *= (2.).as_T();
    }
    (lb, ub)
}

// gradient of the projection dual function at the point
// recovered for this ρ
fn _grad_rho<T>(v: &[T], x: &mut [T; 3], rho: T) -> T
where
    T: FloatT,
{
    _solve_for_x(v, x, rho);
    if x[1] <= (1e-12).as_T() {
        x[0]
    } else {
        x[0] + x[1] * T::ln(x[1] / x[2])
    }
}

// projected point for a fixed multiplier ρ
fn _solve_for_x<T>(v: &[T], x: &mut [T; 3], rho: T)
where
    T: FloatT,
{
    x[2] = _newton_exp(rho, v[1], v[2]);
    x[1] = (x[2] - v[2]) * x[2] / rho;
    x[0] = v[0] - rho;
}

// 1d Newton iteration for the third component of the
// projected point
fn _newton_exp<T>(rho: T, y_hat: T, z_hat: T) -> T
where
    T: FloatT,
{
    let mut t = T::max(-z_hat, (1e-6).as_T());

    for _ in 0..EXP_CONE_MAX_ITERS {
        let f = t * (t + z_hat) / (rho * rho) - y_hat / rho + T::ln(t / rho) + T::one();
        let fp = (<f64 as AsFloatT<T>>::as_T(&2.) * t + z_hat) / (rho * rho) + t.recip();

        t -= f / fp;

        if t <= -z_hat {
            return T::zero();
        } else if t <= T::zero() {
            return z_hat;
        } else if T::abs(f) < CONE_TOL.as_T() {
            break;
        }
    }
    t + z_hat
}

// -------------------------------------
// unit tests
// -------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn exp_membership(x: &[f64]) -> bool {
        (x[1] > 0. && x[1] * f64::exp(x[0] / x[1]) <= x[2] + 1e-7)
            || (x[0] <= 1e-9 && x[1].abs() <= 1e-7 && x[2] >= -1e-9)
    }

    #[test]
    fn test_exp_project_member() {
        // (1, 1, e) is on the boundary, (0, 1, 2) is interior
        let mut v = [1.0, 1.0, std::f64::consts::E];
        _project_exp_cone(&mut v);
        assert_eq!(v, [1.0, 1.0, std::f64::consts::E]);

        let mut v = [0.0, 1.0, 2.0];
        _project_exp_cone(&mut v);
        assert_eq!(v, [0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_exp_project_polar() {
        // -v in K*, so the projection is the origin
        let mut v = [1.0, 0.0, -1.0];
        _project_exp_cone(&mut v);
        assert_eq!(v, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_exp_project_analytic_quadrant() {
        let mut v = [-1.0, -1.0, 2.0];
        _project_exp_cone(&mut v);
        assert_eq!(v, [-1.0, 0.0, 2.0]);

        let mut v = [-1.0, -1.0, -2.0];
        _project_exp_cone(&mut v);
        assert_eq!(v, [-1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_exp_project_general() {
        // projection of a generic exterior point must land in the
        // cone, and moving towards the original point must exit it
        let v0 = [1.0, 0.5, 0.25];
        let mut v = v0;
        _project_exp_cone(&mut v);
        assert!(exp_membership(&v));

        let d: Vec<f64> = (0..3).map(|i| v0[i] - v[i]).collect();
        let nrmd = d.iter().map(|di| di * di).sum::<f64>().sqrt();
        assert!(nrmd > 1e-3);

        let vout: Vec<f64> = (0..3).map(|i| v[i] + 1e-2 * d[i]).collect();
        assert!(!exp_membership(&vout));
    }

    #[test]
    fn test_exp_dual_projection_moreau() {
        // for any v, v = Π_K(v) - Π_K*(-v) and the two pieces
        // are orthogonal
        let v = [0.7, -0.3, -1.2];

        let mut vp = v;
        _project_exp_cone(&mut vp);

        let cone = ExponentialCone::<f64>::new();
        let mut vd = [-v[0], -v[1], -v[2]];
        cone.project_dual(&mut vd);

        let mut dot = 0.0;
        for i in 0..3 {
            assert!((v[i] - (vp[i] - vd[i])).abs() <= 1e-7);
            dot += vp[i] * vd[i];
        }
        assert!(dot.abs() <= 1e-7);
    }
}
