// Gateway file to expose integration tests from the integration/ subdirectory
// This file allows Rust's test runner to discover tests in subdirectories

mod common;

#[path = "integration/test_end_to_end.rs"]
mod test_end_to_end;

#[path = "integration/test_feature_encoding.rs"]
mod test_feature_encoding;

#[path = "integration/test_settings_layers.rs"]
mod test_settings_layers;
