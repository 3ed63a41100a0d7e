//! Clusters, cluster sets and per-trial document allocation.
//!
//! Clusters refer to documents by their index in the
//! [`DocumentCollection`](crate::document::DocumentCollection); the feature
//! vectors themselves are borrowed from the collection for the duration of a
//! clustering run and passed in as `features`, indexed the same way.
//!
//! Adding a member never touches the centroid. Centroids are recomputed in
//! one batch per round via [`ClusterCollection::update_centroids`], so every
//! assignment within a round is judged against the same centroid snapshot.

use crate::vector::{DistanceMetric, FeatureVector, Vector};
use tracing::debug;

/// Which cluster, if any, each document is allocated to in the current trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    slots: Vec<Option<usize>>,
}

impl Allocation {
    /// Creates an allocation with every one of `documents` unallocated.
    #[must_use]
    pub fn new(documents: usize) -> Self {
        Self {
            slots: vec![None; documents],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn is_allocated(&self, document: usize) -> bool {
        self.slots[document].is_some()
    }

    #[must_use]
    pub fn cluster_of(&self, document: usize) -> Option<usize> {
        self.slots[document]
    }

    pub fn assign(&mut self, document: usize, cluster: usize) {
        self.slots[document] = Some(cluster);
    }

    /// Marks every document unallocated.
    pub fn clear(&mut self) {
        self.slots.fill(None);
    }

    /// Indices of unallocated documents in collection order.
    pub fn unallocated(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.is_none().then_some(i))
    }

    #[must_use]
    pub fn allocated_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

/// A centroid and the documents currently assigned to it.
#[derive(Debug, Clone)]
pub struct Cluster {
    centroid: FeatureVector,
    members: Vec<usize>,
}

impl Cluster {
    /// Singleton cluster whose centroid is a copy of the seed's features.
    #[must_use]
    pub fn seeded(document: usize, features: &FeatureVector) -> Self {
        Self {
            centroid: features.clone(),
            members: vec![document],
        }
    }

    /// Appends a member. The centroid is left as is.
    pub fn add(&mut self, document: usize) {
        self.members.push(document);
    }

    /// Removes all members, keeping the centroid.
    pub fn clear(&mut self) {
        self.members.clear();
    }

    #[must_use]
    pub fn centroid(&self) -> &FeatureVector {
        &self.centroid
    }

    #[must_use]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Recomputes the centroid as the mean of the members' vectors.
    ///
    /// # Panics
    /// Panics if the cluster has no members.
    pub fn update_centroid(&mut self, features: &[&FeatureVector]) {
        assert!(
            !self.members.is_empty(),
            "cannot update the centroid of an empty cluster"
        );

        let mut sum = Vector::zeros(features[self.members[0]].vector().len());
        for &member in &self.members {
            sum.add(features[member].vector());
        }
        sum.divide_scalar(self.members.len() as f64);
        self.centroid = FeatureVector::new(sum);
    }
}

/// Ordered set of clusters for one trial value of `k`.
#[derive(Debug, Clone, Default)]
pub struct ClusterCollection {
    clusters: Vec<Cluster>,
}

impl ClusterCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(k: usize) -> Self {
        Self {
            clusters: Vec::with_capacity(k),
        }
    }

    /// Seeds a new singleton cluster from `document` and marks it allocated.
    /// Returns the new cluster's index.
    pub fn spawn(
        &mut self,
        document: usize,
        features: &FeatureVector,
        allocation: &mut Allocation,
    ) -> usize {
        let index = self.clusters.len();
        self.clusters.push(Cluster::seeded(document, features));
        allocation.assign(document, index);
        index
    }

    /// Adds `document` to cluster `cluster` and marks it allocated.
    pub fn assign(&mut self, cluster: usize, document: usize, allocation: &mut Allocation) {
        self.clusters[cluster].add(document);
        allocation.assign(document, cluster);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Cluster> {
        self.clusters.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cluster> {
        self.clusters.iter()
    }

    /// Total number of member documents across all clusters.
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.clusters.iter().map(Cluster::size).sum()
    }

    /// Recomputes every populated cluster's centroid. Empty clusters keep
    /// their previous centroid. Returns how many clusters were empty.
    pub fn update_centroids(&mut self, features: &[&FeatureVector]) -> usize {
        let mut empty = 0;
        for (index, cluster) in self.clusters.iter_mut().enumerate() {
            if cluster.is_empty() {
                debug!(cluster = index, "cluster attracted no documents this round");
                empty += 1;
            } else {
                cluster.update_centroid(features);
            }
        }
        empty
    }

    /// Empties every cluster, keeping centroids.
    pub fn clear_members(&mut self) {
        for cluster in &mut self.clusters {
            cluster.clear();
        }
    }

    /// Drops clusters without members. Returns how many were dropped.
    pub fn retain_populated(&mut self) -> usize {
        let before = self.clusters.len();
        self.clusters.retain(|cluster| !cluster.is_empty());
        before - self.clusters.len()
    }

    /// Finds the unallocated document farthest from its nearest cluster.
    ///
    /// Only documents at a positive distance qualify, so a document that
    /// coincides with a centroid or has no defined distance is never chosen.
    /// Ties go to the earliest document. `None` when nothing qualifies.
    #[must_use]
    pub fn find_furthest_document(
        &self,
        metric: DistanceMetric,
        features: &[&FeatureVector],
        allocation: &Allocation,
    ) -> Option<usize> {
        let mut furthest: Option<(usize, f64)> = None;
        for document in allocation.unallocated() {
            let distance = metric.document_to_clusters(features[document], self);
            if distance > furthest.map_or(0.0, |(_, best)| best) {
                furthest = Some((document, distance));
            }
        }
        furthest.map(|(document, _)| document)
    }

    /// Finds the cluster whose centroid is nearest to `document`.
    ///
    /// `NaN` distances never beat a defined one. Ties go to the earliest
    /// cluster, and a document with no defined distance to any centroid falls
    /// back to the first cluster. `None` only when there are no clusters.
    #[must_use]
    pub fn find_nearest_cluster(
        &self,
        metric: DistanceMetric,
        document: &FeatureVector,
    ) -> Option<usize> {
        let mut nearest: Option<(usize, f64)> = None;
        for (index, cluster) in self.clusters.iter().enumerate() {
            let distance = metric.document_to_cluster(document, cluster);
            if distance.is_nan() {
                continue;
            }
            if nearest.is_none_or(|(_, best)| distance < best) {
                nearest = Some((index, distance));
            }
        }
        match nearest {
            Some((index, _)) => Some(index),
            None if self.clusters.is_empty() => None,
            None => Some(0),
        }
    }

    /// Size-weighted mean distance of members to their own centroid.
    #[must_use]
    pub fn calc_intra_cluster_distance(
        &self,
        metric: DistanceMetric,
        features: &[&FeatureVector],
    ) -> f64 {
        let mut total = 0.0;
        for cluster in &self.clusters {
            total += cluster
                .members()
                .iter()
                .map(|&member| metric.document_to_cluster(features[member], cluster))
                .sum::<f64>();
        }
        total / self.document_count() as f64
    }

    /// Mean centroid distance over all ordered pairs of distinct clusters.
    /// Zero when there are fewer than two clusters.
    #[must_use]
    pub fn calc_inter_cluster_distance(&self, metric: DistanceMetric) -> f64 {
        let k = self.clusters.len();
        if k <= 1 {
            return 0.0;
        }

        let mut total = 0.0;
        for (i, first) in self.clusters.iter().enumerate() {
            for (j, second) in self.clusters.iter().enumerate() {
                if i != j {
                    total += metric.cluster_to_cluster(first, second);
                }
            }
        }
        total / (k * (k - 1)) as f64
    }

    /// Intra/inter distance ratio used to choose `k`. Lower is better.
    ///
    /// Returns `f64::MAX` when there are fewer than two clusters, the
    /// inter-cluster distance is not positive, or the ratio is undefined.
    #[must_use]
    pub fn calc_intra_inter_distance_ratio(
        &self,
        metric: DistanceMetric,
        features: &[&FeatureVector],
    ) -> f64 {
        if self.clusters.len() <= 1 {
            return f64::MAX;
        }

        let inter = self.calc_inter_cluster_distance(metric);
        if inter.is_nan() || inter <= 0.0 {
            return f64::MAX;
        }
        let ratio = self.calc_intra_cluster_distance(metric, features) / inter;
        if ratio.is_nan() { f64::MAX } else { ratio }
    }
}

impl<'a> IntoIterator for &'a ClusterCollection {
    type Item = &'a Cluster;
    type IntoIter = std::slice::Iter<'a, Cluster>;

    fn into_iter(self) -> Self::IntoIter {
        self.clusters.iter()
    }
}
