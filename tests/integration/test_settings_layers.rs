//! Settings file creation and loading feeding a clusterer.

use doccluster::vector::KMeansClusterer;
use doccluster::{DistanceMetric, Settings};
use tempfile::TempDir;

#[test]
fn test_init_then_edit_then_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = Settings::init_config_file(temp_dir.path(), false).unwrap();

    let edited = std::fs::read_to_string(&path)
        .unwrap()
        .replace("metric = \"cosine\"", "metric = \"jaccard\"")
        .replace("iterations = 3", "iterations = 5");
    std::fs::write(&path, edited).unwrap();

    let settings = Settings::load_from(&path).unwrap();
    assert_eq!(settings.clustering.metric, DistanceMetric::Jaccard);
    assert_eq!(settings.clustering.iterations, 5);

    let clusterer = KMeansClusterer::from_config(&settings.clustering).unwrap();
    assert_eq!(clusterer.metric(), DistanceMetric::Jaccard);
    assert_eq!(clusterer.iterations(), 5);
}

#[test]
fn test_invalid_values_load_but_fail_validation() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.toml");
    std::fs::write(&path, "[clustering]\nthreshold = 0.0\n").unwrap();

    let settings = Settings::load_from(&path).unwrap();
    assert!(settings.clustering.validate().is_err());
    assert!(KMeansClusterer::from_config(&settings.clustering).is_err());
}

#[test]
fn test_unknown_metric_is_a_load_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.toml");
    std::fs::write(&path, "[clustering]\nmetric = \"euclidean\"\n").unwrap();

    assert!(Settings::load_from(&path).is_err());
}
