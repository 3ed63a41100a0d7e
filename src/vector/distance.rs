//! Distance metrics between feature vectors, clusters and cluster sets.
//!
//! Norms are passed in rather than recomputed; callers keep them in sync
//! with their vectors through [`FeatureVector`].

use crate::vector::{Cluster, ClusterCollection, FeatureVector, Vector};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two supported distance semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// `1 - (A.B) / (|A| |B|)`
    #[default]
    Cosine,
    /// `|1 - (A.B) / (|A| + |B| - A.B)|`
    Jaccard,
}

impl DistanceMetric {
    /// Distance between two vectors given their precomputed norms.
    #[must_use]
    pub fn distance(&self, a: &Vector, b: &Vector, norm_a: f64, norm_b: f64) -> f64 {
        let inner_product = a.inner_product(b);
        match self {
            Self::Cosine => 1.0 - inner_product / norm_a / norm_b,
            Self::Jaccard => (1.0 - inner_product / (norm_a + norm_b - inner_product)).abs(),
        }
    }

    #[must_use]
    pub fn between(&self, a: &FeatureVector, b: &FeatureVector) -> f64 {
        self.distance(a.vector(), b.vector(), a.norm(), b.norm())
    }

    /// Distance from a document to a cluster's current centroid.
    #[must_use]
    pub fn document_to_cluster(&self, document: &FeatureVector, cluster: &Cluster) -> f64 {
        self.between(document, cluster.centroid())
    }

    /// Centroid-to-centroid distance.
    #[must_use]
    pub fn cluster_to_cluster(&self, first: &Cluster, second: &Cluster) -> f64 {
        self.between(first.centroid(), second.centroid())
    }

    /// Distance from a document to the nearest cluster of `clusters`.
    ///
    /// `f64::MAX` when `clusters` is empty. `NaN` distances are ignored; the
    /// result is `NaN` only when no cluster is at a defined distance.
    #[must_use]
    pub fn document_to_clusters(
        &self,
        document: &FeatureVector,
        clusters: &ClusterCollection,
    ) -> f64 {
        if clusters.is_empty() {
            return f64::MAX;
        }
        clusters
            .iter()
            .map(|cluster| self.document_to_cluster(document, cluster))
            .filter(|distance| !distance.is_nan())
            .reduce(f64::min)
            .unwrap_or(f64::NAN)
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cosine => "cosine",
            Self::Jaccard => "jaccard",
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistanceMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cosine" => Ok(Self::Cosine),
            "jaccard" => Ok(Self::Jaccard),
            other => Err(format!("unknown distance metric '{other}' (expected cosine or jaccard)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(values: &[f64]) -> FeatureVector {
        FeatureVector::new(Vector::from(values.to_vec()))
    }

    #[test]
    fn test_cosine_self_distance_is_zero() {
        let a = features(&[1.0, 2.0, 3.0]);
        assert!(DistanceMetric::Cosine.between(&a, &a).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_orthogonal_and_opposite() {
        let x = features(&[1.0, 0.0]);
        let y = features(&[0.0, 2.0]);
        let minus_x = features(&[-3.0, 0.0]);

        assert_eq!(DistanceMetric::Cosine.between(&x, &y), 1.0);
        assert_eq!(DistanceMetric::Cosine.between(&x, &minus_x), 2.0);
    }

    #[test]
    fn test_jaccard_generalized_formula() {
        let a = features(&[3.0, 4.0]);
        let b = features(&[3.0, 0.0]);
        // A.B = 9, |A| = 5, |B| = 3 -> |1 - 9 / (5 + 3 - 9)| = 10
        assert_eq!(DistanceMetric::Jaccard.between(&a, &b), 10.0);

        let x = features(&[1.0, 0.0]);
        let y = features(&[0.0, 1.0]);
        assert_eq!(DistanceMetric::Jaccard.between(&x, &y), 1.0);
        // Unit vector against itself: 1 - 1 / (1 + 1 - 1) = 0
        assert_eq!(DistanceMetric::Jaccard.between(&x, &x), 0.0);
    }

    #[test]
    fn test_jaccard_is_never_negative() {
        let a = features(&[0.5, 0.5]);
        let b = features(&[0.4, 0.6]);
        assert!(DistanceMetric::Jaccard.between(&a, &b) >= 0.0);
    }

    #[test]
    fn test_document_to_empty_clusters_is_max() {
        let a = features(&[1.0]);
        let clusters = ClusterCollection::new();
        assert_eq!(DistanceMetric::Cosine.document_to_clusters(&a, &clusters), f64::MAX);
    }

    #[test]
    fn test_document_to_clusters_skips_undefined_distances() {
        let zero = features(&[0.0, 0.0]);
        let x = features(&[1.0, 0.0]);
        let y = features(&[0.0, 1.0]);
        let mut allocation = crate::vector::Allocation::new(3);
        let mut clusters = ClusterCollection::new();
        clusters.spawn(0, &zero, &mut allocation);
        clusters.spawn(1, &x, &mut allocation);

        // Cosine against the zero centroid is 0/0; the x centroid still counts
        assert_eq!(DistanceMetric::Cosine.document_to_clusters(&y, &clusters), 1.0);

        let mut only_zero = ClusterCollection::new();
        only_zero.spawn(0, &zero, &mut allocation);
        assert!(DistanceMetric::Cosine.document_to_clusters(&y, &only_zero).is_nan());
    }

    #[test]
    fn test_metric_parsing_and_display() {
        assert_eq!("cosine".parse::<DistanceMetric>().unwrap(), DistanceMetric::Cosine);
        assert_eq!("Jaccard".parse::<DistanceMetric>().unwrap(), DistanceMetric::Jaccard);
        assert!("euclidean".parse::<DistanceMetric>().is_err());
        assert_eq!(DistanceMetric::Jaccard.to_string(), "jaccard");
        assert_eq!(DistanceMetric::default(), DistanceMetric::Cosine);
    }
}
