//! End-to-end clustering run: input line to rendered partition.

use crate::config::ClusteringConfig;
use crate::error::DocClusterResult;
use crate::io::format::{Partition, ResponseMeta};
use crate::document::DocumentCollection;
use crate::io::parse::{into_collection, parse_records};
use crate::vector::{ClusterCollection, ClusteringOutcome, Encoder, KMeansClusterer, TfIdfEncoder};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

/// Result of a full run.
#[derive(Debug, Clone)]
pub struct ClusterReport {
    pub partition: Partition,
    pub outcome: ClusteringOutcome,
}

impl ClusterReport {
    /// Statistics for the JSON envelope.
    pub fn meta(&self, metric: &str) -> ResponseMeta {
        ResponseMeta {
            version: env!("CARGO_PKG_VERSION").to_string(),
            k: self.outcome.k,
            ratio: self.outcome.ratio,
            threshold_met: self.outcome.threshold_met,
            metric: metric.to_string(),
        }
    }
}

/// Random source for a run: seeded when `seed` is set, fresh entropy otherwise.
pub fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Parses `line`, encodes the documents and clusters them.
pub fn cluster_line<R: Rng + ?Sized>(
    line: &str,
    config: &ClusteringConfig,
    rng: &mut R,
) -> DocClusterResult<ClusterReport> {
    config.validate()?;
    let clusterer = KMeansClusterer::from_config(config)?;

    let records = parse_records(line)?;
    debug!(records = records.len(), "parsed input records");
    let mut documents = into_collection(records)?;

    let mut encoder = TfIdfEncoder::new(config.num_features);
    encoder.encode(&mut documents);

    let outcome = clusterer.cluster(&documents, rng)?;
    let partition = Partition::from_clusters(&outcome.clusters, &documents);
    let titles = cluster_titles(&outcome.clusters, &documents);
    for (cluster, members) in titles.iter().enumerate() {
        debug!(cluster, titles = ?members, "cluster members");
    }
    info!(
        documents = documents.size(),
        clusters = partition.len(),
        "clustering complete"
    );

    Ok(ClusterReport { partition, outcome })
}

/// Titles of each cluster's members, in member order. Untitled records are skipped.
fn cluster_titles<'a>(
    clusters: &ClusterCollection,
    documents: &'a DocumentCollection,
) -> Vec<Vec<&'a str>> {
    clusters
        .iter()
        .map(|cluster| {
            cluster
                .members()
                .iter()
                .filter_map(|&index| documents[index].title())
                .collect()
        })
        .collect()
}
