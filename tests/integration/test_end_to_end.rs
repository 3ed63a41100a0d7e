//! Full runs from an input line to the printed partition.

use crate::common::{TestInput, corpus, records_line};
use doccluster::io::read_first_line;
use doccluster::pipeline::{cluster_line, rng_for};
use doccluster::{ClusteringConfig, DistanceMetric, DocumentId, Partition};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;

fn config(metric: DistanceMetric, threshold: f64) -> ClusteringConfig {
    ClusteringConfig {
        metric,
        threshold,
        ..ClusteringConfig::default()
    }
}

/// Every id appears exactly once and the presentation order holds.
fn assert_well_formed(partition: &Partition, ids: &[i64]) {
    let mut seen = BTreeSet::new();
    for group in partition.groups() {
        assert!(!group.is_empty());
        assert!(group.windows(2).all(|pair| pair[0] < pair[1]));
        for id in group {
            assert!(seen.insert(id.get()), "id {id} printed twice");
        }
    }
    assert_eq!(seen, ids.iter().copied().collect::<BTreeSet<_>>());

    let firsts: Vec<DocumentId> = partition.groups().iter().map(|g| g[0]).collect();
    assert!(firsts.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_disjoint_vocabularies_split_in_two() {
    let line = records_line(&corpus::DISJOINT);
    let config = config(DistanceMetric::Cosine, 0.99);

    for seed in 0..6 {
        let report = cluster_line(&line, &config, &mut rng_for(Some(seed))).unwrap();

        // k = 1 never satisfies the ratio test, so two clusters is the minimum
        assert_eq!(report.outcome.k, 2);
        assert_eq!(report.partition.len(), 2);
        assert_well_formed(&report.partition, &[1, 2, 3, 4]);
        assert!(report.partition.to_string().starts_with("[[1"));
    }
}

#[test]
fn test_duplicate_documents_land_together() {
    let line = records_line(&[(1, "same words here"), (2, "same words here"), (3, "other text")]);

    let report = cluster_line(&line, &ClusteringConfig::default(), &mut rng_for(None)).unwrap();
    assert_eq!(report.partition.to_string(), "[[1, 2], [3]]");
    assert!(report.outcome.ratio.abs() < 1e-12);
}

#[test]
fn test_cluster_count_never_exceeds_documents() {
    let line = records_line(&corpus::NEWS);
    let ids: Vec<i64> = corpus::NEWS.iter().map(|(id, _)| *id).collect();

    for metric in [DistanceMetric::Cosine, DistanceMetric::Jaccard] {
        for threshold in [0.05, 0.4, 0.9] {
            for seed in 0..3 {
                let report =
                    cluster_line(&line, &config(metric, threshold), &mut rng_for(Some(seed)))
                        .unwrap();

                assert!(report.outcome.k >= 1);
                assert!(report.outcome.k <= ids.len());
                assert!(report.partition.len() <= report.outcome.k);
                assert_well_formed(&report.partition, &ids);
                if report.outcome.threshold_met {
                    assert!(report.outcome.ratio < threshold);
                } else {
                    assert_eq!(report.outcome.k, ids.len());
                }
            }
        }
    }
}

#[test]
fn test_same_seed_gives_same_partition() {
    let line = records_line(&corpus::NEWS);
    let config = config(DistanceMetric::Cosine, 0.4);

    let first = cluster_line(&line, &config, &mut rng_for(Some(9))).unwrap();
    let second = cluster_line(&line, &config, &mut rng_for(Some(9))).unwrap();
    assert_eq!(first.partition, second.partition);
    assert_eq!(first.outcome.k, second.outcome.k);
}

#[test]
fn test_only_the_first_line_is_read() {
    let input = TestInput::new();
    let content = format!(
        "{}\n{}\n",
        records_line(&corpus::DISJOINT),
        records_line(&[(99, "ignored")])
    );
    let path = input.add_file("records.txt", &content);

    let line = read_first_line(BufReader::new(File::open(&path).unwrap())).unwrap();
    let report = cluster_line(
        &line,
        &config(DistanceMetric::Cosine, 0.99),
        &mut rng_for(Some(1)),
    )
    .unwrap();

    assert_well_formed(&report.partition, &[1, 2, 3, 4]);
}

#[test]
fn test_json_rendering_matches_text_rendering() {
    let line = records_line(&corpus::DISJOINT);
    let report = cluster_line(
        &line,
        &config(DistanceMetric::Cosine, 0.99),
        &mut rng_for(Some(2)),
    )
    .unwrap();

    let json = serde_json::to_string(&report.partition).unwrap();
    let text = report.partition.to_string();
    assert_eq!(json, text.replace(", ", ","));

    let meta = report.meta("cosine");
    assert_eq!(meta.k, 2);
    assert!(meta.threshold_met);
}
