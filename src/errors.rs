use thiserror::Error;

/// A result type for nearest-neighbor GP interpolation
pub type Result<T> = std::result::Result<T, GpError>;

/// An error when using [`GaussianProcess`](crate::GaussianProcess) or its [`KdTree`](crate::KdTree)
#[derive(Error, Debug)]
pub enum GpError {
    /// When a point, a query or a function vector has not the expected size
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected size
        expected: usize,
        /// Given size
        actual: usize,
    },
    /// When a slot does not refer to a live sample
    #[error("Index {index} out of range (number of points: {len})")]
    IndexOutOfRange {
        /// Requested slot
        index: usize,
        /// Number of live points
        len: usize,
    },
    /// When the number of requested nearest neighbors is not usable
    #[error("Invalid number of neighbors: {0}")]
    InvalidNeighborCount(usize),
    /// When the covariance matrix cannot be factorized or solved
    #[error("Singular covariance matrix: {0}")]
    SingularCovarianceMatrix(String),
    /// When the kd-tree self check fails
    #[error("Kd-tree structure error: {0}")]
    StructuralInvariantViolation(String),
    #[error(transparent)]
    /// When linear algebra computation fails
    LinalgError(#[from] linfa_linalg::LinalgError),
    /// When a linfa error occurs
    #[error(transparent)]
    LinfaError(#[from] linfa::error::Error),
    /// When error due to a bad value
    #[error("InvalidValue error: {0}")]
    InvalidValueError(String),
}
