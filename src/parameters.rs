use crate::covariograms::Covariogram;
use crate::errors::{GpError, Result};
use crate::utils::NormalizationBounds;
use linfa::{Float, ParamGuard};

use ndarray::Array1;
#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Default value of the regularization parameter lambda
pub const GP_DEFAULT_LAMBDA: f64 = 1e-5;

/// A set of validated GP interpolation parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serializable",
    derive(Serialize, Deserialize),
    serde(bound(
        serialize = "F: Serialize, Cov: Serialize",
        deserialize = "F: Deserialize<'de>, Cov: Deserialize<'de>"
    ))
)]
pub struct GpValidParams<F: Float, Cov: Covariogram<F>> {
    /// Covariogram relating the function values at two points
    pub(crate) covariogram: Cov,
    /// Variance of the noise assumed on each sample, added to the covariance diagonal
    pub(crate) lambda: F,
    /// Prior mean of the interpolated function
    pub(crate) kriging: F,
    /// Optional (min, max) bounds used to normalize the parameter space
    pub(crate) bounds: Option<(Array1<F>, Array1<F>)>,
}

impl<F: Float, Cov: Covariogram<F> + Default> Default for GpValidParams<F, Cov> {
    fn default() -> GpValidParams<F, Cov> {
        GpValidParams {
            covariogram: Cov::default(),
            lambda: F::cast(GP_DEFAULT_LAMBDA),
            kriging: F::zero(),
            bounds: None,
        }
    }
}

impl<F: Float, Cov: Covariogram<F>> GpValidParams<F, Cov> {
    /// Get covariogram
    pub fn covariogram(&self) -> &Cov {
        &self.covariogram
    }

    /// Get regularization parameter
    pub fn lambda(&self) -> F {
        self.lambda
    }

    /// Get kriging parameter (prior mean)
    pub fn kriging_parameter(&self) -> F {
        self.kriging
    }

    /// Get normalization bounds if any
    pub fn bounds(&self) -> Option<&(Array1<F>, Array1<F>)> {
        self.bounds.as_ref()
    }

    pub(crate) fn normalization_bounds(&self) -> Result<Option<NormalizationBounds<F>>> {
        self.bounds
            .as_ref()
            .map(|(min, max)| NormalizationBounds::new(min, max))
            .transpose()
    }
}

#[derive(Clone, Debug)]
/// The set of hyperparameters that can be specified for the construction of
/// a [GP interpolation](struct.GaussianProcess.html).
pub struct GpParams<F: Float, Cov: Covariogram<F>>(GpValidParams<F, Cov>);

impl<F: Float, Cov: Covariogram<F>> GpParams<F, Cov> {
    /// A constructor for GP parameters given a covariogram
    pub fn new(covariogram: Cov) -> GpParams<F, Cov> {
        Self(GpValidParams {
            covariogram,
            lambda: F::cast(GP_DEFAULT_LAMBDA),
            kriging: F::zero(),
            bounds: None,
        })
    }

    /// A constructor for GP parameters from validated parameters
    pub fn new_from_valid(params: &GpValidParams<F, Cov>) -> Self {
        Self(params.clone())
    }

    /// Set covariogram.
    pub fn covariogram(mut self, covariogram: Cov) -> Self {
        self.0.covariogram = covariogram;
        self
    }

    /// Set the regularization parameter lambda.
    ///
    /// Lambda represents the characteristic variance of the noise on the
    /// sampled function, the same for every sample.
    pub fn lambda(mut self, lambda: F) -> Self {
        self.0.lambda = lambda;
        self
    }

    /// Set the kriging parameter, the constant prior mean of the function.
    pub fn kriging_parameter(mut self, kriging: F) -> Self {
        self.0.kriging = kriging;
        self
    }

    /// Normalize the parameter space by the span of each dimension.
    ///
    /// Training points and queries are then given in original coordinates
    /// and normalized internally.
    pub fn bounds(mut self, min: Array1<F>, max: Array1<F>) -> Self {
        self.0.bounds = Some((min, max));
        self
    }
}

impl<F: Float, Cov: Covariogram<F>> From<GpValidParams<F, Cov>> for GpParams<F, Cov> {
    fn from(valid: GpValidParams<F, Cov>) -> Self {
        GpParams(valid)
    }
}

impl<F: Float, Cov: Covariogram<F>> ParamGuard for GpParams<F, Cov> {
    type Checked = GpValidParams<F, Cov>;
    type Error = GpError;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if !self.0.lambda.is_finite() || self.0.lambda < F::zero() {
            return Err(GpError::InvalidValueError(format!(
                "`lambda` should be a non negative finite value, got {}",
                self.0.lambda
            )));
        }
        if !self.0.kriging.is_finite() {
            return Err(GpError::InvalidValueError(format!(
                "Kriging parameter should be finite, got {}",
                self.0.kriging
            )));
        }
        if let Some(bounds) = self.0.normalization_bounds()? {
            self.0.covariogram.check_dim(bounds.dim())?;
        }
        Ok(&self.0)
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}
