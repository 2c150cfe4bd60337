use super::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ---------------------------------------------------
// We define some machinery here for enumerating the
// different cone types that can live in the composite cone
// ---------------------------------------------------

/// API type describing the type of a conic constraint.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SupportedConeT {
    /// The zero cone (used for equality constraints).
    ///
    /// The parameter indicates the cone's dimension.
    ZeroConeT(usize),
    /// The nonnegative orthant.
    ///
    /// The parameter indicates the cone's dimension.
    NonnegativeConeT(usize),
    /// The second order cone.
    ///
    /// The parameter indicates the cone's dimension.
    SecondOrderConeT(usize),
    /// The exponential cone in R³.
    ///
    /// This cone takes no parameters.
    ExponentialConeT(),
    /// The dual exponential cone in R³.
    ///
    /// This cone takes no parameters.
    DualExponentialConeT(),
    /// The positive semidefinite cone in full matrix storage,
    /// i.e. a cone of matrix order n occupying n² rows.
    ///
    /// Understood by problem validation and scaling, but no
    /// projection operator ships for it.
    SemidefiniteConeT(usize),
}

impl SupportedConeT {
    /// number of rows of problem data occupied by the cone
    pub fn nvars(&self) -> usize {
        match self {
            SupportedConeT::ZeroConeT(dim) => *dim,
            SupportedConeT::NonnegativeConeT(dim) => *dim,
            SupportedConeT::SecondOrderConeT(dim) => *dim,
            SupportedConeT::ExponentialConeT() => 3,
            SupportedConeT::DualExponentialConeT() => 3,
            SupportedConeT::SemidefiniteConeT(n) => n * n,
        }
    }
}

// -------------------------------------
// Here we make a corresponding internal SupportedCone type that
// uses enum_dispatch to allow for static dispatch against all of
// our internal cone types
// -------------------------------------

pub(crate) fn make_cone<T: FloatT>(cone: SupportedConeT) -> Option<SupportedCone<T>> {
    match cone {
        SupportedConeT::ZeroConeT(dim) => Some(ZeroCone::<T>::new(dim).into()),
        SupportedConeT::NonnegativeConeT(dim) => Some(NonnegativeCone::<T>::new(dim).into()),
        SupportedConeT::SecondOrderConeT(dim) => Some(SecondOrderCone::<T>::new(dim).into()),
        SupportedConeT::ExponentialConeT() => Some(ExponentialCone::<T>::new().into()),
        SupportedConeT::DualExponentialConeT() => Some(DualExponentialCone::<T>::new().into()),
        SupportedConeT::SemidefiniteConeT(_) => None,
    }
}

#[enum_dispatch(Cone<T>)]
pub enum SupportedCone<T>
where
    T: FloatT,
{
    ZeroCone(ZeroCone<T>),
    NonnegativeCone(NonnegativeCone<T>),
    SecondOrderCone(SecondOrderCone<T>),
    ExponentialCone(ExponentialCone<T>),
    DualExponentialCone(DualExponentialCone<T>),
}

// -------------------------------------
// Finally, we need a tagging enum with no data fields to act
// as a bridge between the SupportedConeT API types and the
// internal SupportedCone enum_dispatch wrapper.
// -------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub(crate) enum SupportedConeTag {
    ZeroCone,
    NonnegativeCone,
    SecondOrderCone,
    ExponentialCone,
    DualExponentialCone,
    SemidefiniteCone,
}

pub(crate) trait SupportedConeAsTag {
    fn as_tag(&self) -> SupportedConeTag;
}

impl SupportedConeAsTag for SupportedConeT {
    // user cone type to tag
    fn as_tag(&self) -> SupportedConeTag {
        match self {
            SupportedConeT::ZeroConeT(_) => SupportedConeTag::ZeroCone,
            SupportedConeT::NonnegativeConeT(_) => SupportedConeTag::NonnegativeCone,
            SupportedConeT::SecondOrderConeT(_) => SupportedConeTag::SecondOrderCone,
            SupportedConeT::ExponentialConeT() => SupportedConeTag::ExponentialCone,
            SupportedConeT::DualExponentialConeT() => SupportedConeTag::DualExponentialCone,
            SupportedConeT::SemidefiniteConeT(_) => SupportedConeTag::SemidefiniteCone,
        }
    }
}

impl<T: FloatT> SupportedConeAsTag for SupportedCone<T> {
    // internal cone type to tag
    fn as_tag(&self) -> SupportedConeTag {
        match self {
            SupportedCone::ZeroCone(_) => SupportedConeTag::ZeroCone,
            SupportedCone::NonnegativeCone(_) => SupportedConeTag::NonnegativeCone,
            SupportedCone::SecondOrderCone(_) => SupportedConeTag::SecondOrderCone,
            SupportedCone::ExponentialCone(_) => SupportedConeTag::ExponentialCone,
            SupportedCone::DualExponentialCone(_) => SupportedConeTag::DualExponentialCone,
        }
    }
}

impl SupportedConeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SupportedConeTag::ZeroCone => "ZeroCone",
            SupportedConeTag::NonnegativeCone => "NonnegativeCone",
            SupportedConeTag::SecondOrderCone => "SecondOrderCone",
            SupportedConeTag::ExponentialCone => "ExponentialCone",
            SupportedConeTag::DualExponentialCone => "DualExponentialCone",
            SupportedConeTag::SemidefiniteCone => "SemidefiniteCone",
        }
    }
}
