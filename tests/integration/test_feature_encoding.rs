//! Properties of encoded feature vectors as seen by the distance metrics.

use crate::common::{corpus, encoded};
use doccluster::vector::string_hash;
use doccluster::{DistanceMetric, DocumentCollection, Encoder, TfIdfEncoder};

#[test]
fn test_cached_norm_matches_vector_norm() {
    let texts: Vec<&str> = corpus::NEWS.iter().map(|(_, text)| *text).collect();
    let documents = encoded(&texts);

    for document in &documents {
        let features = document.features().unwrap();
        assert_eq!(features.norm(), features.vector().norm());
        assert!(features.norm() > 0.0);
    }
}

#[test]
fn test_identical_texts_are_at_distance_zero() {
    let documents = encoded(&["same words here", "same words here", "other text"]);
    let a = documents[0].features().unwrap();
    let b = documents[1].features().unwrap();

    assert!(DistanceMetric::Cosine.between(a, b).abs() < 1e-12);
    assert_eq!(a, b);
}

#[test]
fn test_disjoint_texts_are_at_cosine_distance_one() {
    let documents = encoded(&["apple banana", "cherry durian", "shared"]);
    let a = documents[0].features().unwrap();
    let b = documents[1].features().unwrap();

    assert!((DistanceMetric::Cosine.between(a, b) - 1.0).abs() < 1e-12);
    assert_eq!(DistanceMetric::Jaccard.between(a, b), 1.0);
}

#[test]
fn test_terms_in_every_document_carry_no_weight() {
    let mut documents = DocumentCollection::from_pairs([
        (1, "common alpha"),
        (2, "common bravo"),
        (3, "common charlie"),
    ])
    .unwrap();
    let mut encoder = TfIdfEncoder::default();
    encoder.encode(&mut documents);

    let common = encoder.bucket("common");
    assert_eq!(encoder.inverse_document_frequency().unwrap()[common], 0.0);
    for document in &documents {
        let features = document.features().unwrap();
        assert_eq!(features.vector()[common], 0.0);
        assert!(features.norm() > 0.0);
    }
}

#[test]
fn test_bucket_follows_string_hash() {
    let encoder = TfIdfEncoder::default();
    assert_eq!(string_hash("hello"), 99_162_322);
    assert_eq!(encoder.bucket("hello"), 2322);
    // Hash of i32::MIN must not overflow when folded into a bucket
    assert_eq!(string_hash("polygenelubricants"), i32::MIN);
    assert_eq!(encoder.bucket("polygenelubricants"), 3648);
}
