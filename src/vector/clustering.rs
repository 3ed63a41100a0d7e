//! Adaptive k-means clustering of encoded documents.
//!
//! The cluster count is not supplied by the caller. [`KMeansClusterer`] runs a
//! k-means trial for `k = 1, 2, ..., N` and stops at the first trial whose
//! intra/inter cluster distance ratio falls below the configured threshold.
//! When no trial qualifies, the `k = N` trial is returned, or the last trial
//! reached if seeding runs out of distinct documents first.
//!
//! # Algorithm Details
//! - Seeding: the first seed is drawn uniformly from the first `k` documents,
//!   the remaining `k - 1` seeds are chosen farthest-point first
//! - Reassignment: a fixed number of rounds; each round assigns every
//!   unallocated document to its nearest centroid, then recomputes all
//!   centroids in one batch
//! - Between rounds all allocations and memberships are cleared, centroids
//!   are kept
//!
//! The only source of randomness is the seed draw, taken from the caller's
//! generator, so a seeded generator gives reproducible runs.

use crate::config::ClusteringConfig;
use crate::document::{DocumentCollection, DocumentId};
use crate::vector::{Allocation, ClusterCollection, DistanceMetric, FeatureVector};
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

/// Default intra/inter ratio below which a trial is accepted.
pub const DEFAULT_CLUSTERING_THRESHOLD: f64 = 0.4;

/// Default number of reassignment rounds per trial.
pub const DEFAULT_CLUSTERING_ITERATIONS: usize = 3;

/// Errors that can occur during clustering operations.
#[derive(Error, Debug)]
pub enum ClusteringError {
    #[error(
        "Empty document collection provided for clustering\nSuggestion: Ensure the input contains at least one record"
    )]
    EmptyCollection,

    #[error("Invalid cluster count: {0}\nSuggestion: Use k between 1 and the number of documents")]
    InvalidClusterCount(usize),

    #[error(
        "Document {id} has no feature vector\nSuggestion: Encode the collection before clustering"
    )]
    NotEncoded { id: DocumentId },

    #[error(
        "Document {id} produced no tokens, its feature vector is undefined\nSuggestion: Remove records whose content has no letters or digits"
    )]
    UndefinedFeatures { id: DocumentId },

    #[error(
        "Failed to initialize {k} clusters\nSuggestion: Every remaining document coincides with an existing seed"
    )]
    InitializationFailed { k: usize },

    #[error("Invalid clustering configuration: {reason}")]
    InvalidConfig { reason: String },
}

/// Result type alias for clustering operations
pub type ClusteringResult<T> = Result<T, ClusteringError>;

/// Clusters selected by the adaptive search, with the statistics that chose them.
#[derive(Debug, Clone)]
pub struct ClusteringOutcome {
    /// Clusters of the accepted trial.
    pub clusters: ClusterCollection,

    /// Trial value of `k` that was accepted.
    pub k: usize,

    /// Intra/inter distance ratio of the accepted trial.
    pub ratio: f64,

    /// Whether `ratio` met the threshold, as opposed to exhausting `k`.
    pub threshold_met: bool,
}

/// K-means clusterer that chooses `k` by the intra/inter distance ratio.
#[derive(Debug, Clone, Copy)]
pub struct KMeansClusterer {
    metric: DistanceMetric,
    threshold: f64,
    iterations: usize,
}

impl KMeansClusterer {
    /// Creates a clusterer.
    ///
    /// # Arguments
    /// * `metric` - Distance used for every comparison
    /// * `threshold` - Ratio below which a trial is accepted (finite, > 0)
    /// * `iterations` - Reassignment rounds per trial (>= 1)
    pub fn new(
        metric: DistanceMetric,
        threshold: f64,
        iterations: usize,
    ) -> ClusteringResult<Self> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(ClusteringError::InvalidConfig {
                reason: format!("threshold must be a positive number, got {threshold}"),
            });
        }
        if iterations == 0 {
            return Err(ClusteringError::InvalidConfig {
                reason: "iterations must be at least 1".to_string(),
            });
        }

        Ok(Self {
            metric,
            threshold,
            iterations,
        })
    }

    pub fn from_config(config: &ClusteringConfig) -> ClusteringResult<Self> {
        Self::new(config.metric, config.threshold, config.iterations)
    }

    #[must_use]
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Clusters an encoded collection, searching `k` upward from 1.
    ///
    /// When no unallocated document is at a positive distance from the seeds
    /// of a trial, `k` cannot grow any further and the previous trial is
    /// returned with `threshold_met` unset.
    #[must_use = "clustering results should be used or the computation is wasted"]
    pub fn cluster<R: Rng + ?Sized>(
        &self,
        documents: &DocumentCollection,
        rng: &mut R,
    ) -> ClusteringResult<ClusteringOutcome> {
        let features = collect_features(documents)?;
        let n = features.len();

        let mut last: Option<ClusteringOutcome> = None;
        for k in 1..=n {
            let clusters = match self.kmeans(&features, k, rng) {
                Ok(clusters) => clusters,
                Err(ClusteringError::InitializationFailed { .. }) if last.is_some() => {
                    info!(k, "no further seed documents, stopping the search");
                    break;
                }
                Err(e) => return Err(e),
            };
            let ratio = clusters.calc_intra_inter_distance_ratio(self.metric, &features);
            debug!(k, clusters = clusters.len(), ratio, "k-means trial finished");

            let threshold_met = ratio < self.threshold;
            let outcome = ClusteringOutcome {
                clusters,
                k,
                ratio,
                threshold_met,
            };
            if threshold_met {
                info!(k, ratio, metric = %self.metric, "selected cluster count");
                return Ok(outcome);
            }
            last = Some(outcome);
        }

        let outcome = last.ok_or(ClusteringError::EmptyCollection)?;
        info!(
            k = outcome.k,
            threshold = self.threshold,
            "threshold never met, returning the last trial"
        );
        Ok(outcome)
    }

    /// Runs a single k-means trial for a fixed `k`.
    pub fn run_trial<R: Rng + ?Sized>(
        &self,
        documents: &DocumentCollection,
        k: usize,
        rng: &mut R,
    ) -> ClusteringResult<ClusterCollection> {
        let features = collect_features(documents)?;
        self.kmeans(&features, k, rng)
    }

    fn kmeans<R: Rng + ?Sized>(
        &self,
        features: &[&FeatureVector],
        k: usize,
        rng: &mut R,
    ) -> ClusteringResult<ClusterCollection> {
        let n = features.len();
        if n == 0 {
            return Err(ClusteringError::EmptyCollection);
        }
        if k == 0 || k > n {
            return Err(ClusteringError::InvalidClusterCount(k));
        }

        let mut allocation = Allocation::new(n);
        let mut clusters = ClusterCollection::with_capacity(k);

        // The first seed is drawn from the first k documents only
        let seed = rng.random_range(0..k);
        clusters.spawn(seed, features[seed], &mut allocation);

        while clusters.len() < k {
            let furthest = clusters
                .find_furthest_document(self.metric, features, &allocation)
                .ok_or(ClusteringError::InitializationFailed { k })?;
            clusters.spawn(furthest, features[furthest], &mut allocation);
        }

        for round in 0..self.iterations {
            for document in 0..n {
                if allocation.is_allocated(document) {
                    continue;
                }
                let nearest = clusters
                    .find_nearest_cluster(self.metric, features[document])
                    .ok_or(ClusteringError::InitializationFailed { k })?;
                clusters.assign(nearest, document, &mut allocation);
            }

            clusters.update_centroids(features);

            if round + 1 < self.iterations {
                allocation.clear();
                clusters.clear_members();
            }
        }

        let dropped = clusters.retain_populated();
        if dropped > 0 {
            debug!(k, dropped, "dropped clusters that ended the trial empty");
        }

        Ok(clusters)
    }
}

impl Default for KMeansClusterer {
    fn default() -> Self {
        Self {
            metric: DistanceMetric::default(),
            threshold: DEFAULT_CLUSTERING_THRESHOLD,
            iterations: DEFAULT_CLUSTERING_ITERATIONS,
        }
    }
}

fn collect_features(documents: &DocumentCollection) -> ClusteringResult<Vec<&FeatureVector>> {
    if documents.size() == 0 {
        return Err(ClusteringError::EmptyCollection);
    }
    documents
        .iter()
        .map(|document| {
            let features = document
                .features()
                .ok_or(ClusteringError::NotEncoded { id: document.id() })?;
            if features.norm().is_nan() {
                return Err(ClusteringError::UndefinedFeatures { id: document.id() });
            }
            Ok(features)
        })
        .collect()
}
