//! This library implements scattered data interpolation with [Gaussian Process](https://en.wikipedia.org/wiki/Gaussian_process)
//! regression, also known as [Kriging](https://en.wikipedia.org/wiki/Kriging), restricted to nearest neighbors.
//!
//! The complexity of GP algorithm is in O(N^3) in processing time where N is the number of training points.
//! Here, training points are stored in a [KdTree] and each interpolation only uses the K nearest neighbors
//! of the query point, the complexity of one interpolation being then in O(K^3) whatever N.
//! Training points can be added or removed on the fly and several functions sampled on the same
//! points can be interpolated at once.
//!
//! GP interpolation is implemented by [GaussianProcess] parameterized by [GpParams].
//! Available covariograms are in the [covariograms] module.
#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
mod algorithm;
pub mod covariograms;
mod errors;
mod kdtree;
mod parameters;
mod timer;
mod utils;

pub use algorithm::*;
pub use errors::*;
pub use kdtree::*;
pub use parameters::*;
pub use timer::*;
pub use utils::NormalizationBounds;
