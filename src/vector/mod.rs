//! Document clustering core.
//!
//! This module turns text into hashed TF-IDF feature vectors and groups them
//! with a k-means variant that picks the number of clusters itself.
//!
//! # Architecture
//! - [`Vector`]: dense `f64` vector with in-place elementwise arithmetic
//! - [`TfIdfEncoder`]: two-pass encoder, [`RawHistogram`] -> [`FeatureVector`]
//! - [`DistanceMetric`]: cosine or generalized Jaccard distance
//! - [`Cluster`] / [`ClusterCollection`]: membership, centroids and the
//!   intra/inter distance statistics used for model selection
//! - [`KMeansClusterer`]: the adaptive search over `k`

mod cluster;
mod clustering;
mod distance;
mod encoder;
mod types;

// Re-export core types for public API
pub use cluster::{Allocation, Cluster, ClusterCollection};
pub use clustering::{
    ClusteringError, ClusteringOutcome, ClusteringResult, DEFAULT_CLUSTERING_ITERATIONS,
    DEFAULT_CLUSTERING_THRESHOLD, KMeansClusterer,
};
pub use distance::DistanceMetric;
pub use encoder::{
    DEFAULT_NUM_FEATURES, Encoder, FeatureVector, RawHistogram, TfIdfEncoder, string_hash,
    tokenize,
};
pub use types::Vector;
