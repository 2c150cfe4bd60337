use crate::algebra::*;
use crate::solver::core::traits::Settings;
use crate::solver::core::SettingsError;
use derive_builder::Builder;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Standard-form solver type implementing the [`Settings`](crate::solver::core::traits::Settings) trait

#[derive(Builder, Debug, Clone)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DefaultSettings<T: FloatT> {
    ///maximum number of iterations
    #[builder(default = "2500")]
    pub max_iter: u32,

    ///convergence tolerance on residuals and duality gap
    #[builder(default = "(1e-3).as_T()")]
    pub eps: T,

    ///overrelaxation parameter, in (0,2).  Values above 1 typically
    ///speed convergence
    #[builder(default = "(1.8).as_T()")]
    pub alpha: T,

    ///regularization of the primal block of the linear subsystem
    #[builder(default = "(1e-3).as_T()")]
    pub rho_x: T,

    ///additional global factor applied to the data during
    ///equilibration (active only when `normalize` is enabled)
    #[builder(default = "(5.0).as_T()")]
    pub scale: T,

    ///enable data equilibration pre-scaling
    #[builder(default = "true")]
    pub normalize: bool,

    ///verbose printing
    #[builder(default = "true")]
    pub verbose: bool,

    ///threshold below which the homogenizing variables are treated
    ///as zero when the terminal iterate is classified
    #[builder(default = "(1e-9).as_T()")]
    pub undet_tol: T,

    ///iterations between convergence checks
    #[builder(default = "20")]
    pub check_interval: u32,

    ///iterations between progress prints
    #[builder(default = "100")]
    pub print_interval: u32,

    ///linear subsystem backend ("sparse-direct" or "sparse-indirect")
    #[builder(default = r#""sparse-direct".to_string()"#)]
    pub linsys_method: String,

    ///rate at which the indirect backend tightens its cg tolerance
    ///over the outer iterations
    #[builder(default = "(2.0).as_T()")]
    pub cg_rate: T,
}

impl<T> Default for DefaultSettings<T>
where
    T: FloatT,
{
    fn default() -> DefaultSettings<T> {
        DefaultSettingsBuilder::<T>::default().build().unwrap()
    }
}

impl<T> Settings<T> for DefaultSettings<T>
where
    T: FloatT,
{
    //NB: CoreSettings is typedef'd to DefaultSettings
    fn core(&self) -> &DefaultSettings<T> {
        self
    }
    fn core_mut(&mut self) -> &mut DefaultSettings<T> {
        self
    }
}

impl<T> DefaultSettings<T>
where
    T: FloatT,
{
    /// Checks that all settings hold admissible values.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.eps < T::zero() {
            return Err(SettingsError::BadFieldValue("eps"));
        }
        if self.alpha <= T::zero() || self.alpha >= (2.0).as_T() {
            return Err(SettingsError::BadFieldValue("alpha"));
        }
        if self.rho_x < T::zero() {
            return Err(SettingsError::BadFieldValue("rho_x"));
        }
        if self.scale <= T::zero() {
            return Err(SettingsError::BadFieldValue("scale"));
        }
        if self.undet_tol < T::zero() {
            return Err(SettingsError::BadFieldValue("undet_tol"));
        }
        if self.check_interval == 0 {
            return Err(SettingsError::BadFieldValue("check_interval"));
        }
        if self.print_interval == 0 {
            return Err(SettingsError::BadFieldValue("print_interval"));
        }
        if self.cg_rate <= T::one() {
            return Err(SettingsError::BadFieldValue("cg_rate"));
        }
        validate_linsys_method(&self.linsys_method)?;

        Ok(())
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<SettingsError> for DefaultSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        DefaultSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl<T> DefaultSettingsBuilder<T>
where
    T: FloatT,
{
    /// check that the specified linear system method is valid
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(ref linsys_method) = self.linsys_method {
            validate_linsys_method(linsys_method)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------
// individual validation functions go here
// ---------------------------------------------------------

fn validate_linsys_method(linsys_method: &str) -> Result<(), SettingsError> {
    match linsys_method {
        "sparse-direct" => Ok(()),
        "sparse-indirect" => Ok(()),
        _ => Err(SettingsError::BadFieldValue("linsys_method")),
    }
}

#[test]
fn test_settings_validate() {
    // all standard settings
    DefaultSettingsBuilder::<f64>::default().build().unwrap();

    // fail on unknown linear system method
    assert!(DefaultSettingsBuilder::<f64>::default()
        .linsys_method("foo".to_string())
        .build()
        .is_err());

    // directly construct bad DefaultSettings and manually check
    let settings = DefaultSettings::<f64> {
        alpha: 2.5,
        ..DefaultSettings::default()
    };
    assert!(settings.validate().is_err());

    let settings = DefaultSettings::<f64> {
        check_interval: 0,
        ..DefaultSettings::default()
    };
    assert!(settings.validate().is_err());

    let settings = DefaultSettings::<f64> {
        cg_rate: 1.0,
        ..DefaultSettings::default()
    };
    assert!(settings.validate().is_err());

    let settings = DefaultSettings::<f64> {
        scale: 0.0,
        ..DefaultSettings::default()
    };
    assert!(settings.validate().is_err());
}
