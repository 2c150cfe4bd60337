use super::*;
use std::collections::HashMap;
use std::iter::zip;
use std::ops::Range;

// -------------------------------------
// default composite cone type
// -------------------------------------

pub struct CompositeCone<T: FloatT = f64> {
    cones: Vec<SupportedCone<T>>,

    //Type count for each cone type
    pub(crate) type_counts: HashMap<SupportedConeTag, usize>,

    //overall size of the composite cone
    pub(crate) numel: usize,

    //ranges for the indices of the constituent cones
    pub(crate) rng_cones: Vec<Range<usize>>,
}

impl<T> CompositeCone<T>
where
    T: FloatT,
{
    /// Assembles the projection machinery for an ordered list of cone
    /// blocks.  Panics on a cone type with no shipped projection, so
    /// the caller is expected to have screened the list first.
    pub fn new(types: &[SupportedConeT]) -> Self {
        let ncones = types.len();
        let mut cones: Vec<SupportedCone<T>> = Vec::with_capacity(ncones);

        // Count for the number of each cone type, indexed by SupportedConeTag
        // NB: ideally we could fix max capacity here,  but Enum::variant_count is not
        // yet a stable feature.  Capacity should be number of SupportedCone variants.
        // See: https://github.com/rust-lang/rust/issues/73662
        let mut type_counts = HashMap::new();

        // create cones with the given dims
        for t in types.iter() {
            //make a new cone
            let cone = match make_cone(*t) {
                Some(cone) => cone,
                None => panic!("no projection available for {}", t.as_tag().as_str()),
            };

            //increment type counts
            *type_counts.entry(cone.as_tag()).or_insert(0) += 1;

            cones.push(cone);
        }

        // count up elements
        let numel = cones.iter().map(|c| c.numel()).sum();

        // ranges for the subvectors associated with each cone
        let rng_cones = _make_rng_cones(&cones);

        Self {
            cones,
            type_counts,
            numel,
            rng_cones,
        }
    }
}

fn _make_rng_cones<T>(cones: &[SupportedCone<T>]) -> Vec<Range<usize>>
where
    T: FloatT,
{
    let mut rngs = Vec::with_capacity(cones.len());

    if !cones.is_empty() {
        let mut start = 0;
        for cone in cones {
            let stop = start + cone.numel();
            rngs.push(start..stop);
            start = stop;
        }
    }
    rngs
}

impl<T> CompositeCone<T>
where
    T: FloatT,
{
    pub fn len(&self) -> usize {
        self.cones.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cones.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, SupportedCone<T>> {
        self.cones.iter()
    }
    pub(crate) fn get_type_count(&self, tag: SupportedConeTag) -> usize {
        if self.type_counts.contains_key(&tag) {
            self.type_counts[&tag]
        } else {
            0
        }
    }
}

impl<T> Cone<T> for CompositeCone<T>
where
    T: FloatT,
{
    fn numel(&self) -> usize {
        self.numel
    }

    fn project_dual(&self, z: &mut [T]) {
        for (cone, rng) in zip(&self.cones, &self.rng_cones) {
            cone.project_dual(&mut z[rng.clone()]);
        }
    }
}

// -------------------------------------
// unit tests
// -------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_cone_ranges() {
        let types = [
            SupportedConeT::ZeroConeT(2),
            SupportedConeT::NonnegativeConeT(3),
            SupportedConeT::SecondOrderConeT(4),
            SupportedConeT::ExponentialConeT(),
        ];
        let cone = CompositeCone::<f64>::new(&types);

        assert_eq!(cone.len(), 4);
        assert_eq!(cone.numel(), 12);
        assert_eq!(cone.rng_cones, vec![0..2, 2..5, 5..9, 9..12]);
        assert_eq!(cone.get_type_count(SupportedConeTag::ZeroCone), 1);
        assert_eq!(cone.get_type_count(SupportedConeTag::SemidefiniteCone), 0);
    }

    #[test]
    fn test_composite_cone_projection() {
        let types = [
            SupportedConeT::ZeroConeT(1),
            SupportedConeT::NonnegativeConeT(2),
            SupportedConeT::SecondOrderConeT(2),
        ];
        let cone = CompositeCone::<f64>::new(&types);

        let mut z = [-1.0, -2.0, 3.0, 0.0, 1.0];
        cone.project_dual(&mut z);

        // free block unchanged, orthant clamped, soc projected
        assert_eq!(z[0], -1.0);
        assert_eq!(z[1], 0.0);
        assert_eq!(z[2], 3.0);
        assert_eq!(z[3], 0.5);
        assert_eq!(z[4], 0.5);
    }

    #[test]
    #[should_panic]
    fn test_composite_cone_rejects_unprojectable() {
        let types = [SupportedConeT::SemidefiniteConeT(2)];
        let _cone = CompositeCone::<f64>::new(&types);
    }
}
