//! A module for covariogram functions used to build the covariance
//! matrices of the gaussian process interpolation.
//!
//! The following covariograms are implemented:
//! * squared exponential,
//! * neural network (Rasmussen & Williams 2006, eq. 4.29).

use crate::errors::{GpError, Result};
use linfa::Float;
use ndarray::{array, Array1, Array2, ArrayBase, Data, Ix1, Ix2, Zip};
#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// A trait for using a covariogram in GP interpolation.
///
/// A covariogram owns its hyperparameters which are replaced wholesale
/// with [`Covariogram::set_hyperparameters`].
pub trait Covariogram<F: Float>: Clone + fmt::Display + Send + Sync {
    /// Current hyperparameters
    fn hyperparameters(&self) -> &Array1<F>;

    /// Replace all hyperparameters at once
    fn set_hyperparameters(&mut self, params: &ArrayBase<impl Data<Elem = F>, Ix1>) -> Result<()>;

    /// Compute covariance `k(p1, p2)` between two points of same dimension.
    /// The result does not depend on the order of the points.
    ///
    /// Points are expected to have a dimension accepted by [`Covariogram::check_dim`],
    /// which is only asserted in debug builds.
    fn value(
        &self,
        p1: &ArrayBase<impl Data<Elem = F>, Ix1>,
        p2: &ArrayBase<impl Data<Elem = F>, Ix1>,
    ) -> F;

    /// Check hyperparameters are consistent with points of dimension `dim`
    fn check_dim(&self, _dim: usize) -> Result<()> {
        Ok(())
    }

    /// A brief description of the hyperparameters and their current values
    fn explain_hyperparameters(&self) -> String;

    /// Covariances between `x` and each row of `xt`, shape (nt,)
    fn cross_values(
        &self,
        x: &ArrayBase<impl Data<Elem = F>, Ix1>,
        xt: &ArrayBase<impl Data<Elem = F>, Ix2>,
    ) -> Array1<F> {
        let mut k = Array1::zeros(xt.nrows());
        Zip::from(&mut k)
            .and(xt.rows())
            .for_each(|ki, xi| *ki = self.value(x, &xi));
        k
    }

    /// Symmetric covariance matrix between rows of `xt`, shape (nt, nt)
    fn matrix(&self, xt: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Array2<F> {
        let n = xt.nrows();
        let mut c = Array2::zeros((n, n));
        for i in 0..n {
            let xi = xt.row(i);
            c[[i, i]] = self.value(&xi, &xi);
            for j in 0..i {
                let v = self.value(&xi, &xt.row(j));
                c[[i, j]] = v;
                c[[j, i]] = v;
            }
        }
        c
    }
}

fn check_finite<F: Float>(params: &ArrayBase<impl Data<Elem = F>, Ix1>, name: &str) -> Result<()> {
    if params.iter().any(|v| !v.is_finite()) {
        return Err(GpError::InvalidValueError(format!(
            "{name} hyperparameters should be finite, got {params}"
        )));
    }
    Ok(())
}

/// Squared exponential covariogram
///
/// `k(p1, p2) = exp(-0.5 * sum_j (p1_j - p2_j)^2 / ell_j^2)`
///
/// Hyperparameters are either one length scale `ell` shared by all dimensions
/// or one length scale per dimension.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serializable",
    derive(Serialize, Deserialize),
    serde(bound(deserialize = "F: Deserialize<'de>"))
)]
pub struct SquaredExpCovariogram<F: Float> {
    ellipse: Array1<F>,
}

impl<F: Float> Default for SquaredExpCovariogram<F> {
    fn default() -> Self {
        Self {
            ellipse: array![F::one()],
        }
    }
}

impl<F: Float> SquaredExpCovariogram<F> {
    /// Constructor given length scale(s)
    pub fn new(ellipse: &ArrayBase<impl Data<Elem = F>, Ix1>) -> Result<Self> {
        let mut cov = Self::default();
        cov.set_hyperparameters(ellipse)?;
        Ok(cov)
    }

    /// Constructor given one length scale shared by all dimensions
    pub fn isotropic(ellipse: F) -> Result<Self> {
        Self::new(&array![ellipse])
    }
}

impl<F: Float> Covariogram<F> for SquaredExpCovariogram<F> {
    fn hyperparameters(&self) -> &Array1<F> {
        &self.ellipse
    }

    fn set_hyperparameters(&mut self, params: &ArrayBase<impl Data<Elem = F>, Ix1>) -> Result<()> {
        if params.is_empty() {
            return Err(GpError::InvalidValueError(
                "SquaredExp covariogram needs at least one length scale".to_string(),
            ));
        }
        check_finite(params, "SquaredExp")?;
        if params.iter().any(|v| *v <= F::zero()) {
            return Err(GpError::InvalidValueError(format!(
                "SquaredExp length scales should be positive, got {params}"
            )));
        }
        self.ellipse = params.to_owned();
        Ok(())
    }

    fn value(
        &self,
        p1: &ArrayBase<impl Data<Elem = F>, Ix1>,
        p2: &ArrayBase<impl Data<Elem = F>, Ix1>,
    ) -> F {
        let sq = |acc: F, (a, b, ell): (&F, &F, F)| {
            let d = (*a - *b) / ell;
            acc + d * d
        };
        let d2 = if self.ellipse.len() == 1 {
            let ell = self.ellipse[0];
            p1.iter()
                .zip(p2.iter())
                .map(|(a, b)| (a, b, ell))
                .fold(F::zero(), sq)
        } else {
            debug_assert_eq!(
                self.ellipse.len(),
                p1.len(),
                "SquaredExp length scales do not match point dimension"
            );
            p1.iter()
                .zip(p2.iter())
                .zip(self.ellipse.iter())
                .map(|((a, b), ell)| (a, b, *ell))
                .fold(F::zero(), sq)
        };
        F::exp(F::cast(-0.5) * d2)
    }

    fn check_dim(&self, dim: usize) -> Result<()> {
        let n = self.ellipse.len();
        if n == 1 || n == dim {
            Ok(())
        } else {
            Err(GpError::DimensionMismatch {
                expected: dim,
                actual: n,
            })
        }
    }

    fn explain_hyperparameters(&self) -> String {
        format!(
            "SquaredExp covariogram exp(-0.5 * sum((p1 - p2)^2 / ell^2)): ell = {} \
            (one shared length scale or one per dimension)",
            self.ellipse
        )
    }
}

impl<F: Float> fmt::Display for SquaredExpCovariogram<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SquaredExp(ell={})", self.ellipse)
    }
}

/// Neural network covariogram recreating a neural network with infinitely
/// many hidden units, see Rasmussen & Williams (2006) <http://www.gaussianprocess.org/gpml/>
/// equation 4.29
///
/// ```text
///                  2 (s0 + s1 p1.p2)
/// k = 2/pi asin( ---------------------------------------------- )
///                sqrt((1 + 2 (s0 + s1 p1.p1)) (1 + 2 (s0 + s1 p2.p2)))
/// ```
///
/// Hyperparameters are `[s0, s1]`, the variances of the bias and of the input weights.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serializable",
    derive(Serialize, Deserialize),
    serde(bound(deserialize = "F: Deserialize<'de>"))
)]
pub struct NeuralNetCovariogram<F: Float> {
    sigmas: Array1<F>,
}

impl<F: Float> Default for NeuralNetCovariogram<F> {
    fn default() -> Self {
        Self {
            sigmas: array![F::one(), F::one()],
        }
    }
}

impl<F: Float> NeuralNetCovariogram<F> {
    /// Constructor given bias variance `sigma0` and weight variance `sigma1`
    pub fn new(sigma0: F, sigma1: F) -> Result<Self> {
        let mut cov = Self::default();
        cov.set_hyperparameters(&array![sigma0, sigma1])?;
        Ok(cov)
    }
}

impl<F: Float> Covariogram<F> for NeuralNetCovariogram<F> {
    fn hyperparameters(&self) -> &Array1<F> {
        &self.sigmas
    }

    fn set_hyperparameters(&mut self, params: &ArrayBase<impl Data<Elem = F>, Ix1>) -> Result<()> {
        if params.len() != 2 {
            return Err(GpError::InvalidValueError(format!(
                "NeuralNet covariogram expects 2 hyperparameters, got {}",
                params.len()
            )));
        }
        check_finite(params, "NeuralNet")?;
        if params.iter().any(|v| *v < F::zero()) {
            return Err(GpError::InvalidValueError(format!(
                "NeuralNet variances should be non negative, got {params}"
            )));
        }
        self.sigmas = params.to_owned();
        Ok(())
    }

    fn value(
        &self,
        p1: &ArrayBase<impl Data<Elem = F>, Ix1>,
        p2: &ArrayBase<impl Data<Elem = F>, Ix1>,
    ) -> F {
        let (s0, s1) = (self.sigmas[0], self.sigmas[1]);
        let two = F::cast(2.);
        let num = two * (s0 + s1 * p1.dot(p2));
        let d1 = F::one() + two * (s0 + s1 * p1.dot(p1));
        let d2 = F::one() + two * (s0 + s1 * p2.dot(p2));
        // round-off may push the ratio slightly outside asin domain
        let ratio = (num / (d1 * d2).sqrt()).max(-F::one()).min(F::one());
        two / F::cast(std::f64::consts::PI) * ratio.asin()
    }

    fn explain_hyperparameters(&self) -> String {
        format!(
            "NeuralNet covariogram (R&W eq. 4.29): sigma0 = {} is the bias variance, \
            sigma1 = {} is the variance of the input weights",
            self.sigmas[0], self.sigmas[1]
        )
    }
}

impl<F: Float> fmt::Display for NeuralNetCovariogram<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "NeuralNet(sigma0={}, sigma1={})",
            self.sigmas[0], self.sigmas[1]
        )
    }
}
