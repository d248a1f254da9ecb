use crate::covariograms::Covariogram;
use crate::errors::{GpError, Result};
use crate::kdtree::KdTree;
use crate::parameters::{GpParams, GpValidParams};
use crate::timer::GpTimer;
use crate::utils::NormalizationBounds;

use linfa::prelude::{DatasetBase, Fit, Float};
use linfa_linalg::{cholesky::*, triangular::*};
use ndarray::{array, s, Array1, Array2, ArrayBase, ArrayView2, Axis, Data, Ix1, Ix2, Zip};

use log::{debug, info, warn};
#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// A GP interpolation predicts the value of a function sampled on scattered
/// points of a parameter space, together with the variance of the prediction.
///
/// The sampled function is modeled as a gaussian process with a constant
/// prior mean (the kriging parameter) and a covariance given by a [`Covariogram`]
/// `k(x, x')`. Each sample is assumed to carry a gaussian noise of variance `lambda`.
///
/// Given `n` training points `X` with values `f`, the prediction at `x` is:
///
/// * mean: `kriging + k(x, X) . (K + lambda.I)^-1 . (f - kriging)`
/// * variance: `k(x, x) - k(x, X) . (K + lambda.I)^-1 . k(X, x)`
///
/// where `K = k(X, X)`.
///
/// # Implementation
///
/// * Training points are stored in a [`KdTree`] so that predictions can be computed
///   from the nearest neighbors of `x` only, which keeps the linear algebra small
///   whatever the number of samples.
/// * Points can be added to or removed from the training set without rebuilding.
/// * Several functions sampled on the same points can be interpolated at once.
///   As the covariogram does not relate the functions to each other, variances
///   are identical for all functions.
/// * Batch interpolation uses all the training points and processes queries in parallel.
/// * The parameter space can be normalized by per-dimension bounds.
///
/// # Example
///
/// ```no_run
/// use egobox_nngp::{covariograms::SquaredExpCovariogram, GaussianProcess};
/// use linfa::prelude::*;
/// use ndarray::{array, Array1};
///
/// let xt = array![[0.], [1.], [2.], [3.]];
/// let yt = array![0., 1., 4., 9.];
///
/// let mut gp = GaussianProcess::<f64, SquaredExpCovariogram<f64>>::params(
///         SquaredExpCovariogram::default())
///     .lambda(1e-8)
///     .fit(&Dataset::new(xt, yt))
///     .expect("GP built");
///
/// // Use the 3 nearest neighbors of x = 1.5
/// let (mean, variance) = gp.interpolate(&array![1.5], 3).expect("GP interpolation");
///
/// // Use all training points
/// let means = gp.batch_interpolate(&array![[0.5], [2.5]]).expect("GP interpolation");
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serializable",
    derive(Serialize, Deserialize),
    serde(bound(
        serialize = "F: Serialize, Cov: Serialize",
        deserialize = "F: Deserialize<'de>, Cov: Deserialize<'de>"
    ))
)]
pub struct GaussianProcess<F: Float, Cov: Covariogram<F>> {
    /// Training points, normalized if bounds are given
    kdtree: KdTree<F>,
    /// Function values, (room, n_functions) of which only the first `len()` rows are live
    values: Array2<F>,
    /// Normalization of the parameter space
    bounds: Option<NormalizationBounds<F>>,
    /// Noise variance added to the covariance diagonal
    lambda: F,
    /// Prior mean of the functions
    kriging: F,
    covariogram: Cov,
    timer: GpTimer,
}

impl<F: Float, Cov: Covariogram<F>> fmt::Display for GaussianProcess<F, Cov> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "GP(covariogram={}, lambda={}, kriging={}, points={}, functions={})",
            self.covariogram,
            self.lambda,
            self.kriging,
            self.len(),
            self.n_functions()
        )
    }
}

/// Solves with the covariance factor are rejected when fewer than two
/// significant digits are expected, ie when the reciprocal condition number
/// estimate is below `RCOND_FACTOR * n * epsilon`
const RCOND_FACTOR: f64 = 100.;

fn singular(err: linfa_linalg::LinalgError) -> GpError {
    GpError::SingularCovarianceMatrix(format!("covariance solve failed ({err})"))
}

/// Cholesky factor of a covariance matrix, singular or ill-conditioned
/// matrices are reported as such
fn cholesky<F: Float>(cov: Array2<F>) -> Result<Array2<F>> {
    let n = cov.nrows();
    let c_chol = cov.cholesky_into().map_err(|err| {
        warn!("Cholesky decomposition of {n}x{n} covariance matrix failed: {err}");
        GpError::SingularCovarianceMatrix(format!(
            "{n}x{n} covariance matrix is not positive definite ({err}), try a greater lambda"
        ))
    })?;

    // cond(C) is estimated from the extreme diagonal values of its factor
    let diag = c_chol.diag();
    let dmin = diag.fold(F::infinity(), |acc, &d| acc.min(d));
    let dmax = diag.fold(F::zero(), |acc, &d| acc.max(d));
    let rcond = (dmin / dmax) * (dmin / dmax);
    let threshold = F::cast(RCOND_FACTOR) * F::cast(n) * F::epsilon();
    // negated to catch NaN
    if !(rcond >= threshold) {
        warn!("{n}x{n} covariance matrix is ill-conditioned (rcond estimate {rcond})");
        return Err(GpError::SingularCovarianceMatrix(format!(
            "{n}x{n} covariance matrix is ill-conditioned (rcond estimate {rcond} < {threshold}), \
             try a greater lambda"
        )));
    }
    Ok(c_chol)
}

/// Solve `C x = rhs` given the lower Cholesky factor of `C`
fn cholesky_solve<F: Float>(
    c_chol: &Array2<F>,
    rhs: &ArrayBase<impl Data<Elem = F>, Ix2>,
) -> Result<Array2<F>> {
    let y = c_chol
        .solve_triangular(rhs, UPLO::Lower)
        .map_err(singular)?;
    let x = c_chol
        .t()
        .solve_triangular_into(y, UPLO::Upper)
        .map_err(singular)?;
    if x.iter().any(|v| !v.is_finite()) {
        return Err(GpError::SingularCovarianceMatrix(
            "covariance solve produced non finite values".to_string(),
        ));
    }
    Ok(x)
}

fn clamp_variance<F: Float>(v: F) -> F {
    // Variance might be slightly negative depending on
    // machine precision: set to zero in that case. NaN is kept.
    if v < F::zero() {
        F::zero()
    } else {
        v
    }
}

fn check_variances<'a, F: Float>(var: impl IntoIterator<Item = &'a F>) -> Result<()> {
    if var.into_iter().any(|v| !v.is_finite()) {
        return Err(GpError::SingularCovarianceMatrix(
            "variance computation produced non finite values".to_string(),
        ));
    }
    Ok(())
}

impl<F: Float, Cov: Covariogram<F>> GaussianProcess<F, Cov> {
    /// Gp parameters contructor
    pub fn params(covariogram: Cov) -> GpParams<F, Cov> {
        GpParams::new(covariogram)
    }

    fn build(
        params: &GpValidParams<F, Cov>,
        x: &ArrayBase<impl Data<Elem = F>, Ix2>,
        y: Array2<F>,
    ) -> Result<Self> {
        if x.nrows() != y.nrows() {
            return Err(GpError::DimensionMismatch {
                expected: x.nrows(),
                actual: y.nrows(),
            });
        }
        if y.ncols() == 0 {
            return Err(GpError::InvalidValueError(
                "At least one function is required".to_string(),
            ));
        }
        if y.iter().any(|v| !v.is_finite()) {
            return Err(GpError::InvalidValueError(
                "Function values should be finite".to_string(),
            ));
        }
        params.covariogram.check_dim(x.ncols())?;
        let bounds = params.normalization_bounds()?;
        let kdtree = match &bounds {
            Some(b) => {
                if b.dim() != x.ncols() {
                    return Err(GpError::DimensionMismatch {
                        expected: x.ncols(),
                        actual: b.dim(),
                    });
                }
                KdTree::new(&b.normalize_rows(x))?
            }
            None => KdTree::new(x)?,
        };
        info!(
            "GP built on {} points of dimension {} for {} function(s)",
            kdtree.len(),
            kdtree.dim(),
            y.ncols()
        );
        Ok(GaussianProcess {
            kdtree,
            values: y,
            bounds,
            lambda: params.lambda,
            kriging: params.kriging,
            covariogram: params.covariogram.clone(),
            timer: GpTimer::default(),
        })
    }

    /// Number of training points
    pub fn len(&self) -> usize {
        self.kdtree.len()
    }

    /// Whether there is no training point (never the case once built)
    pub fn is_empty(&self) -> bool {
        self.kdtree.is_empty()
    }

    /// Dimension of the parameter space
    pub fn dim(&self) -> usize {
        self.kdtree.dim()
    }

    /// Number of interpolated functions
    pub fn n_functions(&self) -> usize {
        self.values.ncols()
    }

    /// Regularization parameter
    pub fn lambda(&self) -> F {
        self.lambda
    }

    /// Kriging parameter (prior mean)
    pub fn kriging_parameter(&self) -> F {
        self.kriging
    }

    /// Covariogram in use
    pub fn covariogram(&self) -> &Cov {
        &self.covariogram
    }

    /// Normalization bounds if any
    pub fn bounds(&self) -> Option<&NormalizationBounds<F>> {
        self.bounds.as_ref()
    }

    /// Kd-tree of the (normalized) training points
    pub fn kdtree(&self) -> &KdTree<F> {
        &self.kdtree
    }

    /// Training point in original coordinates and its function values
    pub fn sample(&self, slot: usize) -> Result<(Array1<F>, Array1<F>)> {
        let xnorm = self.kdtree.point(slot)?;
        let x = match &self.bounds {
            Some(b) => b.denormalize(&xnorm),
            None => xnorm.to_owned(),
        };
        Ok((x, self.values.row(slot).to_owned()))
    }

    /// Function values of live training points as a (len, n_functions) view
    pub fn values(&self) -> ArrayView2<F> {
        self.values.slice(s![..self.len(), ..])
    }

    /// Snapshot of the time spent interpolating
    pub fn timer(&self) -> GpTimer {
        self.timer
    }

    /// Reset interpolation timings
    pub fn reset_timer(&mut self) {
        self.timer.reset()
    }

    /// Check consistency of the training points storage
    pub fn check_tree(&self) -> Result<()> {
        self.kdtree.check_tree()
    }

    /// Set the regularization parameter used by subsequent interpolations
    pub fn set_lambda(&mut self, lambda: F) -> Result<()> {
        if !lambda.is_finite() || lambda < F::zero() {
            return Err(GpError::InvalidValueError(format!(
                "`lambda` should be a non negative finite value, got {lambda}"
            )));
        }
        self.lambda = lambda;
        Ok(())
    }

    /// Set the kriging parameter used by subsequent interpolations
    pub fn set_kriging_parameter(&mut self, kriging: F) -> Result<()> {
        if !kriging.is_finite() {
            return Err(GpError::InvalidValueError(format!(
                "Kriging parameter should be finite, got {kriging}"
            )));
        }
        self.kriging = kriging;
        Ok(())
    }

    /// Set the covariogram used by subsequent interpolations
    pub fn set_covariogram(&mut self, covariogram: Cov) -> Result<()> {
        covariogram.check_dim(self.dim())?;
        debug!("GP covariogram set to {covariogram}");
        self.covariogram = covariogram;
        Ok(())
    }

    /// Use another kind of covariogram keeping training points and parameters.
    pub fn with_covariogram<NewCov: Covariogram<F>>(
        self,
        covariogram: NewCov,
    ) -> Result<GaussianProcess<F, NewCov>> {
        covariogram.check_dim(self.dim())?;
        debug!("GP covariogram changed to {covariogram}");
        Ok(GaussianProcess {
            kdtree: self.kdtree,
            values: self.values,
            bounds: self.bounds,
            lambda: self.lambda,
            kriging: self.kriging,
            covariogram,
            timer: self.timer,
        })
    }

    fn check_single_function(&self) -> Result<()> {
        if self.n_functions() != 1 {
            return Err(GpError::DimensionMismatch {
                expected: self.n_functions(),
                actual: 1,
            });
        }
        Ok(())
    }

    fn check_slot(&self, slot: usize) -> Result<()> {
        if slot >= self.len() {
            return Err(GpError::IndexOutOfRange {
                index: slot,
                len: self.len(),
            });
        }
        Ok(())
    }

    /// Map a point given in original coordinates into the tree coordinates
    fn normalize_point(&self, x: &ArrayBase<impl Data<Elem = F>, Ix1>) -> Result<Array1<F>> {
        if x.len() != self.dim() {
            return Err(GpError::DimensionMismatch {
                expected: self.dim(),
                actual: x.len(),
            });
        }
        Ok(match &self.bounds {
            Some(b) => b.normalize(x),
            None => x.to_owned(),
        })
    }

    fn normalize_points(&self, x: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<Array2<F>> {
        if x.ncols() != self.dim() {
            return Err(GpError::DimensionMismatch {
                expected: self.dim(),
                actual: x.ncols(),
            });
        }
        Ok(match &self.bounds {
            Some(b) => b.normalize_rows(x),
            None => x.to_owned(),
        })
    }

    /// Interpolate the function at `x` using its `n_nn` nearest training points.
    ///
    /// `x` is given in original coordinates (not normalized).
    /// Returns the predicted value and its variance.
    /// When fewer than `n_nn` training points exist, all of them are used.
    pub fn interpolate(
        &mut self,
        x: &ArrayBase<impl Data<Elem = F>, Ix1>,
        n_nn: usize,
    ) -> Result<(F, F)> {
        self.check_single_function()?;
        let (mu, var) = self.interpolate_functions(x, n_nn)?;
        Ok((mu[0], var[0]))
    }

    /// Interpolate all functions at `x` using its `n_nn` nearest training points.
    ///
    /// Returns predicted values and variances, one per function. Variances are
    /// identical as the covariogram does not depend on the function.
    pub fn interpolate_functions(
        &mut self,
        x: &ArrayBase<impl Data<Elem = F>, Ix1>,
        n_nn: usize,
    ) -> Result<(Array1<F>, Array1<F>)> {
        let start = Instant::now();
        let xnorm = self.normalize_point(x)?;

        let now = Instant::now();
        let (neighbors, _) = self.kdtree.find_neighbors(&xnorm, n_nn)?;
        self.timer.search += now.elapsed();

        let (mu, var) = self.predict_from(&xnorm, &neighbors)?;
        self.timer.total += start.elapsed();
        self.timer.interpolation_count += 1;
        Ok((mu, Array1::from_elem(self.n_functions(), var)))
    }

    /// Interpolate the function on the training point at `slot` using its `n_nn`
    /// nearest neighbors, the point itself being ignored.
    ///
    /// Useful to assess hyperparameters by leave-one-out cross validation.
    pub fn self_interpolate(&mut self, slot: usize, n_nn: usize) -> Result<(F, F)> {
        self.check_single_function()?;
        let (mu, var) = self.self_interpolate_functions(slot, n_nn)?;
        Ok((mu[0], var[0]))
    }

    /// Version of [`GaussianProcess::self_interpolate`] for all functions
    pub fn self_interpolate_functions(
        &mut self,
        slot: usize,
        n_nn: usize,
    ) -> Result<(Array1<F>, Array1<F>)> {
        let start = Instant::now();
        self.check_slot(slot)?;
        let xnorm = self.kdtree.point(slot)?.to_owned();

        let now = Instant::now();
        let neighbors = self.self_neighbors(slot, n_nn)?;
        self.timer.search += now.elapsed();

        let (mu, var) = self.predict_from(&xnorm, &neighbors)?;
        self.timer.total += start.elapsed();
        self.timer.interpolation_count += 1;
        Ok((mu, Array1::from_elem(self.n_functions(), var)))
    }

    /// Nearest neighbors of the training point at `slot`, the point excluded
    pub(crate) fn self_neighbors(&self, slot: usize, n_nn: usize) -> Result<Vec<usize>> {
        let xnorm = self.kdtree.point(slot)?;
        let (neighbors, _) = self.kdtree.find_neighbors_excluding(&xnorm, n_nn, slot)?;
        if neighbors.is_empty() {
            return Err(GpError::InvalidNeighborCount(n_nn));
        }
        Ok(neighbors)
    }

    /// Predict function values and variance at normalized `xnorm`
    /// from the training points at `neighbors` slots
    fn predict_from(&mut self, xnorm: &Array1<F>, neighbors: &[usize]) -> Result<(Array1<F>, F)> {
        let now = Instant::now();
        let xt = self.kdtree.data().select(Axis(0), neighbors);
        let rhs = self
            .values
            .select(Axis(0), neighbors)
            .mapv(|v| v - self.kriging);
        let mut cov = self.covariogram.matrix(&xt);
        cov.diag_mut().mapv_inplace(|v| v + self.lambda);
        let k = self.covariogram.cross_values(xnorm, &xt);
        self.timer.iteration += now.elapsed();

        let now = Instant::now();
        let c_chol = cholesky(cov)?;
        let alpha = cholesky_solve(&c_chol, &rhs)?;
        let mu = alpha.t().dot(&k).mapv(|v| v + self.kriging);
        self.timer.eigen += now.elapsed();

        let now = Instant::now();
        let w = c_chol
            .solve_triangular(&k.insert_axis(Axis(1)), UPLO::Lower)
            .map_err(singular)?;
        let var = clamp_variance(self.covariogram.value(xnorm, xnorm) - w.mapv(|v| v * v).sum());
        check_variances([&var])?;
        self.timer.variance += now.elapsed();

        Ok((mu, var))
    }

    /// Factorize the covariance matrix of all training points.
    /// Returns its Cholesky factor and the GP weights for each function.
    fn factorize(&mut self) -> Result<(Array2<F>, Array2<F>)> {
        let now = Instant::now();
        let n = self.len();
        let kriging = self.kriging;
        let mut cov = self.covariogram.matrix(&self.kdtree.data());
        cov.diag_mut().mapv_inplace(|v| v + self.lambda);
        let rhs = self.values().mapv(|v| v - kriging);
        self.timer.iteration += now.elapsed();

        let now = Instant::now();
        let c_chol = cholesky(cov)?;
        let alpha = cholesky_solve(&c_chol, &rhs)?;
        self.timer.eigen += now.elapsed();
        debug!("Covariance matrix of all {n} training points factorized");
        Ok((c_chol, alpha))
    }

    /// Interpolate all functions at `x` points given as rows of a (m, dim) matrix
    /// using all training points instead of nearest neighbors.
    ///
    /// Returns a (m, n_functions) matrix of predicted values.
    /// Variances are not computed, see [`GaussianProcess::batch_interpolate_valvar`].
    /// Be wary of the O(n^3) factorization when the number of training points is large.
    pub fn batch_interpolate(&mut self, x: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Result<Array2<F>> {
        let start = Instant::now();
        let xnorm = self.normalize_points(x)?;
        let (_, alpha) = self.factorize()?;

        let now = Instant::now();
        let kriging = self.kriging;
        let xt = self.kdtree.data();
        let covariogram = &self.covariogram;
        let mut mu = Array2::zeros((xnorm.nrows(), self.n_functions()));
        Zip::from(mu.rows_mut())
            .and(xnorm.rows())
            .par_for_each(|mut mu_i, x_i| {
                let k = covariogram.cross_values(&x_i, &xt);
                mu_i.assign(&alpha.t().dot(&k).mapv(|v| v + kriging));
            });
        self.timer.iteration += now.elapsed();

        self.timer.total += start.elapsed();
        self.timer.interpolation_count += xnorm.nrows();
        Ok(mu)
    }

    /// Interpolate all functions and their variances at `x` points given as rows
    /// of a (m, dim) matrix using all training points.
    ///
    /// Returns (m, n_functions) matrices of predicted values and variances,
    /// variances being identical across functions.
    pub fn batch_interpolate_valvar(
        &mut self,
        x: &ArrayBase<impl Data<Elem = F>, Ix2>,
    ) -> Result<(Array2<F>, Array2<F>)> {
        let start = Instant::now();
        let xnorm = self.normalize_points(x)?;
        let (c_chol, alpha) = self.factorize()?;

        let now = Instant::now();
        let c_chol_inv = c_chol
            .solve_triangular_into(Array2::eye(self.len()), UPLO::Lower)
            .map_err(singular)?;
        self.timer.eigen += now.elapsed();

        let now = Instant::now();
        let kriging = self.kriging;
        let xt = self.kdtree.data();
        let covariogram = &self.covariogram;
        let mut mu = Array2::zeros((xnorm.nrows(), self.n_functions()));
        let mut var = Array2::zeros((xnorm.nrows(), self.n_functions()));
        Zip::from(mu.rows_mut())
            .and(var.rows_mut())
            .and(xnorm.rows())
            .par_for_each(|mut mu_i, mut var_i, x_i| {
                let k = covariogram.cross_values(&x_i, &xt);
                mu_i.assign(&alpha.t().dot(&k).mapv(|v| v + kriging));
                let w = c_chol_inv.dot(&k);
                var_i.fill(clamp_variance(covariogram.value(&x_i, &x_i) - w.dot(&w)));
            });
        check_variances(&var)?;
        self.timer.variance += now.elapsed();

        self.timer.total += start.elapsed();
        self.timer.interpolation_count += xnorm.nrows();
        Ok((mu, var))
    }

    /// Add a training point `x` (original coordinates) with function value `y`.
    /// Returns the slot of the new point.
    ///
    /// Note: many additions or removals may unbalance the kd-tree which slows
    /// down nearest neighbor searches.
    pub fn add_point(&mut self, x: &ArrayBase<impl Data<Elem = F>, Ix1>, y: F) -> Result<usize> {
        self.check_single_function()?;
        self.add_point_functions(x, &array![y])
    }

    /// Version of [`GaussianProcess::add_point`] for all functions
    pub fn add_point_functions(
        &mut self,
        x: &ArrayBase<impl Data<Elem = F>, Ix1>,
        y: &ArrayBase<impl Data<Elem = F>, Ix1>,
    ) -> Result<usize> {
        if y.len() != self.n_functions() {
            return Err(GpError::DimensionMismatch {
                expected: self.n_functions(),
                actual: y.len(),
            });
        }
        if y.iter().any(|v| !v.is_finite()) {
            return Err(GpError::InvalidValueError(format!(
                "Function values should be finite, got {y}"
            )));
        }
        let xnorm = self.normalize_point(x)?;
        // kd-tree validates the point before any change
        let slot = self.kdtree.add_point(&xnorm)?;
        if self.values.nrows() < self.kdtree.room() {
            let mut values = Array2::zeros((self.kdtree.room(), self.n_functions()));
            values
                .slice_mut(s![..slot, ..])
                .assign(&self.values.slice(s![..slot, ..]));
            self.values = values;
        }
        self.values.row_mut(slot).assign(y);
        debug!("Training point added at slot {slot}");
        Ok(slot)
    }

    /// Remove the training point at `slot`.
    ///
    /// Points at greater slots are shifted down by one.
    pub fn remove_point(&mut self, slot: usize) -> Result<()> {
        let len = self.len();
        // kd-tree validates the slot before any change
        self.kdtree.remove_point(slot)?;
        let tail = self.values.slice(s![slot + 1..len, ..]).to_owned();
        self.values.slice_mut(s![slot..len - 1, ..]).assign(&tail);
        debug!("Training point removed at slot {slot}");
        Ok(())
    }
}

impl<F: Float, Cov: Covariogram<F>, D: Data<Elem = F>>
    Fit<ArrayBase<D, Ix2>, ArrayBase<D, Ix1>, GpError> for GpValidParams<F, Cov>
{
    type Object = GaussianProcess<F, Cov>;

    /// Build the GP interpolation of one function
    fn fit(
        &self,
        dataset: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<D, Ix1>>,
    ) -> Result<Self::Object> {
        let y = dataset.targets().to_owned().insert_axis(Axis(1));
        GaussianProcess::build(self, dataset.records(), y)
    }
}

impl<F: Float, Cov: Covariogram<F>, D: Data<Elem = F>>
    Fit<ArrayBase<D, Ix2>, ArrayBase<D, Ix2>, GpError> for GpValidParams<F, Cov>
{
    type Object = GaussianProcess<F, Cov>;

    /// Build the GP interpolation of several functions given as columns of targets
    fn fit(
        &self,
        dataset: &DatasetBase<ArrayBase<D, Ix2>, ArrayBase<D, Ix2>>,
    ) -> Result<Self::Object> {
        GaussianProcess::build(self, dataset.records(), dataset.targets().to_owned())
    }
}
