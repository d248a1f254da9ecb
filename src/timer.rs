//! Bookkeeping of the time spent in the different parts of the interpolation.

#[cfg(feature = "serializable")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Time spent by [`GaussianProcess`](crate::GaussianProcess) interpolations
///
/// * `eigen`: linear algebra (covariance factorization and solves)
/// * `iteration`: iterating over matrix indices to assemble covariances
/// * `search`: nearest neighbor searches
/// * `variance`: variance computation, linear algebra included
/// * `total`: whole interpolation calls
///
/// A snapshot is retrieved with [`GaussianProcess::timer`](crate::GaussianProcess::timer).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serializable", derive(Serialize, Deserialize))]
pub struct GpTimer {
    /// Time spent in linear algebra
    pub eigen: Duration,
    /// Time spent iterating over matrix indices
    pub iteration: Duration,
    /// Time spent in nearest neighbor searches
    pub search: Duration,
    /// Time spent computing variances
    pub variance: Duration,
    /// Total time spent interpolating
    pub total: Duration,
    /// Number of interpolated points
    pub interpolation_count: usize,
}

impl GpTimer {
    /// Reset all counters to zero
    pub fn reset(&mut self) {
        *self = GpTimer::default();
    }

    /// Mean time spent per interpolated point
    pub fn mean_time(&self) -> Option<Duration> {
        u32::try_from(self.interpolation_count)
            .ok()
            .filter(|&n| n > 0)
            .map(|n| self.total / n)
    }
}

impl fmt::Display for GpTimer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "GpTimer(count={}, total={:?}, eigen={:?}, iteration={:?}, search={:?}, variance={:?})",
            self.interpolation_count,
            self.total,
            self.eigen,
            self.iteration,
            self.search,
            self.variance
        )
    }
}
