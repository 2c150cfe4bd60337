#![allow(non_snake_case)]
use crate::algebra::*;
use crate::solver::core::cones::SupportedConeT;

// ---------------
// equilibration data
// ---------------

// row or column norms outside this range are clamped before the
// data is scaled.  Norms below the minimum are replaced by one,
// so near-empty rows are left alone rather than blown up.
const MIN_SCALE: f64 = 1e-2;
const MAX_SCALE: f64 = 1e3;

/// Data from the diagonal equilibration procedure
pub struct DefaultEquilibrationData<T> {
    // scaling vectors for problem data equilibration.
    // fields d,e are vectors of scaling values to be
    // treated as diagonal scaling data
    /// Vector of constraint side (row) scaling terms
    pub d: Vec<T>,
    /// Vector of inverse constraint side (row) scaling terms
    pub dinv: Vec<T>,
    /// Vector of variable side (column) scaling terms
    pub e: Vec<T>,
    /// Vector of inverse variable side (column) scaling terms
    pub einv: Vec<T>,
    /// additional scalar scaling applied to b
    pub sc_b: T,
    /// additional scalar scaling applied to c
    pub sc_c: T,
    /// mean row norm of the row and column scaled constraint matrix
    pub mean_row_norm: T,
}

impl<T> DefaultEquilibrationData<T>
where
    T: FloatT,
{
    /// creates a new equilibration object
    pub fn new(n: usize, m: usize) -> Self {
        // Left/Right diagonal scaling for problem data
        let d = vec![T::one(); m];
        let dinv = vec![T::one(); m];
        let e = vec![T::one(); n];
        let einv = vec![T::one(); n];

        Self {
            d,
            dinv,
            e,
            einv,
            sc_b: T::one(),
            sc_c: T::one(),
            mean_row_norm: T::one(),
        }
    }

    // Compute fresh scalings from the problem data and apply them
    // in place.  Rows are normalized first, in blocks matching the
    // cone structure, then columns of the row scaled matrix.  The
    // vectors b and c additionally pick up scalars that bring them
    // to the mean row norm of the scaled matrix.
    pub(crate) fn compute_and_apply(
        &mut self,
        A: &mut CscMatrix<T>,
        b: &mut [T],
        c: &mut [T],
        cones: &[SupportedConeT],
        scale: T,
    ) {
        let (m, _n) = A.size();

        // row norms, grouped so that rows belonging to one cone
        // block share a single scaling
        self.d.set(T::zero());
        A.row_norms_sq(&mut self.d);
        for v in self.d.iter_mut() {
            *v = T::sqrt(*v);
        }
        _group_rows_by_cone(&mut self.d, cones);
        _clamp_scaling(&mut self.d);

        self.dinv.copy_from(&self.d).recip();
        A.lscale(&self.dinv);

        // column norms of the row scaled matrix
        A.col_norms(&mut self.e);
        _clamp_scaling(&mut self.e);

        self.einv.copy_from(&self.e).recip();
        A.rscale(&self.einv);

        // mean row norm of the scaled matrix, taken before the
        // global scale factor goes on
        let mut row_norms_sq = vec![T::zero(); m];
        A.row_norms_sq(&mut row_norms_sq);
        let sum = row_norms_sq
            .iter()
            .fold(T::zero(), |acc, &x| acc + T::sqrt(x));
        self.mean_row_norm = sum / (m).as_T();

        if scale != T::one() {
            A.scale(scale);
        }

        b.hadamard(&self.dinv);
        self.sc_b = self.mean_row_norm / T::max(b.norm(), MIN_SCALE.as_T());
        b.scale(self.sc_b * scale);

        c.hadamard(&self.einv);
        self.sc_c = self.mean_row_norm / T::max(c.norm(), MIN_SCALE.as_T());
        c.scale(self.sc_c * scale);
    }

    // Re-apply previously computed scalings in place.  Used on
    // re-solves, where recomputing from the restored data would
    // give slightly different scalings.
    pub(crate) fn apply(&self, A: &mut CscMatrix<T>, b: &mut [T], c: &mut [T], scale: T) {
        A.lscale(&self.dinv);
        A.rscale(&self.einv);
        if scale != T::one() {
            A.scale(scale);
        }
        b.hadamard(&self.dinv).scale(self.sc_b * scale);
        c.hadamard(&self.einv).scale(self.sc_c * scale);
    }

    // Undo the scalings in place, restoring the data as supplied
    // by the user.
    pub(crate) fn unapply(&self, A: &mut CscMatrix<T>, b: &mut [T], c: &mut [T], scale: T) {
        A.lscale(&self.d);
        A.rscale(&self.e);
        if scale != T::one() {
            A.scale(scale.recip());
        }
        b.hadamard(&self.d).scale((self.sc_b * scale).recip());
        c.hadamard(&self.e).scale((self.sc_c * scale).recip());
    }
}

// replace the row norms over each cone block with a single shared
// value, so that the projection cone geometry is preserved
fn _group_rows_by_cone<T: FloatT>(d: &mut [T], cones: &[SupportedConeT]) {
    let mut idx = 0;
    for cone in cones {
        let dim = cone.nvars();
        let block = &mut d[idx..idx + dim];
        match cone {
            // these cones are separable across rows
            SupportedConeT::ZeroConeT(_) | SupportedConeT::NonnegativeConeT(_) => {}
            SupportedConeT::SecondOrderConeT(_)
            | SupportedConeT::ExponentialConeT()
            | SupportedConeT::DualExponentialConeT() => {
                let mean = block.mean();
                block.set(mean);
            }
            SupportedConeT::SemidefiniteConeT(side) => {
                let nrm = block.norm() / (*side).as_T();
                block.set(nrm);
            }
        }
        idx += dim;
    }
}

fn _clamp_scaling<T: FloatT>(v: &mut [T]) {
    for x in v.iter_mut() {
        if *x < MIN_SCALE.as_T() {
            *x = T::one();
        } else if *x > MAX_SCALE.as_T() {
            *x = MAX_SCALE.as_T();
        }
    }
}

// ---------------
// unit tests
// ---------------
