//! Adaptive k-means clustering of text documents over hashed TF-IDF features.

pub mod config;
pub mod document;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod vector;

// Explicit exports for better API clarity
pub use config::{ClusteringConfig, Settings};
pub use document::{Document, DocumentCollection, DocumentId};
pub use error::{DocClusterError, DocClusterResult, DocumentError, DocumentResult};
pub use io::{ParseError, Partition};
pub use vector::{
    ClusteringError, ClusteringOutcome, ClusteringResult, DistanceMetric, Encoder,
    KMeansClusterer, TfIdfEncoder,
};
