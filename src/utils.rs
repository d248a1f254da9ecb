use crate::errors::{GpError, Result};
use linfa::Float;
use ndarray::{Array1, Array2, ArrayBase, Data, Ix1, Ix2};
#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};

/// Per-dimension bounds of the parameter space used to normalize
/// points as `(x - min) / (max - min)`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serializable",
    derive(Serialize, Deserialize),
    serde(bound(deserialize = "F: Deserialize<'de>"))
)]
pub struct NormalizationBounds<F: Float> {
    min: Array1<F>,
    max: Array1<F>,
}

impl<F: Float> NormalizationBounds<F> {
    /// Constructor, `max` should be strictly greater than `min` on each dimension
    pub fn new(
        min: &ArrayBase<impl Data<Elem = F>, Ix1>,
        max: &ArrayBase<impl Data<Elem = F>, Ix1>,
    ) -> Result<Self> {
        if min.len() != max.len() {
            return Err(GpError::DimensionMismatch {
                expected: min.len(),
                actual: max.len(),
            });
        }
        if min.is_empty() {
            return Err(GpError::InvalidValueError(
                "Normalization bounds should not be empty".to_string(),
            ));
        }
        let valid = min
            .iter()
            .zip(max.iter())
            .all(|(lo, up)| lo.is_finite() && up.is_finite() && up > lo);
        if !valid {
            return Err(GpError::InvalidValueError(format!(
                "Normalization bounds should be finite with max > min, got min={min} max={max}"
            )));
        }
        Ok(NormalizationBounds {
            min: min.to_owned(),
            max: max.to_owned(),
        })
    }

    /// Dimension of the parameter space
    pub fn dim(&self) -> usize {
        self.min.len()
    }

    /// Lower bounds
    pub fn min(&self) -> &Array1<F> {
        &self.min
    }

    /// Upper bounds
    pub fn max(&self) -> &Array1<F> {
        &self.max
    }

    fn span(&self) -> Array1<F> {
        &self.max - &self.min
    }

    /// Normalize a point
    pub fn normalize(&self, x: &ArrayBase<impl Data<Elem = F>, Ix1>) -> Array1<F> {
        (x - &self.min) / self.span()
    }

    /// Normalize points given as rows of a (n, dim) matrix
    pub fn normalize_rows(&self, x: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Array2<F> {
        (x - &self.min) / &self.span()
    }

    /// Get back the original coordinates of a normalized point
    pub fn denormalize(&self, xnorm: &ArrayBase<impl Data<Elem = F>, Ix1>) -> Array1<F> {
        xnorm * &self.span() + &self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_normalization() {
        let bounds = NormalizationBounds::new(&array![0., -2.], &array![10., 2.]).unwrap();
        assert_eq!(bounds.dim(), 2);
        let x = array![5., 1.];
        let xnorm = bounds.normalize(&x);
        assert_abs_diff_eq!(xnorm, array![0.5, 0.75], epsilon = 1e-15);
        assert_abs_diff_eq!(bounds.denormalize(&xnorm), x, epsilon = 1e-15);
        let rows = bounds.normalize_rows(&array![[0., -2.], [10., 2.]]);
        assert_abs_diff_eq!(rows, array![[0., 0.], [1., 1.]], epsilon = 1e-15);
    }

    #[test]
    fn test_bad_bounds() {
        assert!(matches!(
            NormalizationBounds::new(&array![0., 0.], &array![1.]),
            Err(GpError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
        assert!(NormalizationBounds::new(&array![0., 1.], &array![1., 1.]).is_err());
        assert!(NormalizationBounds::new(&array![0.], &array![f64::INFINITY]).is_err());
    }
}
