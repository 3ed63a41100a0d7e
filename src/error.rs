//! Error types for the document clustering system
//!
//! This module provides structured error types using thiserror for better
//! error handling and actionable error messages. Each layer keeps its own
//! enum; [`DocClusterError`] gathers them for the command-line surface.

use crate::document::DocumentId;
use crate::io::parse::ParseError;
use crate::vector::ClusteringError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a document collection
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("No documents to cluster\nSuggestion: Ensure the input line contains at least one record")]
    Empty,

    #[error("Duplicate document id {0}\nSuggestion: Document ids must be unique within one input")]
    DuplicateId(DocumentId),
}

/// Main error type for a clustering run
#[derive(Error, Debug)]
pub enum DocClusterError {
    /// File system errors
    #[error("Failed to read input file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Input record errors
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Clustering errors
    #[error(transparent)]
    Clustering(#[from] ClusteringError),

    /// Configuration errors
    #[error("Invalid configuration: {reason}")]
    ConfigError { reason: String },
}

impl DocClusterError {
    /// Get a stable status code for this error type.
    ///
    /// Returns a string identifier that can be used in JSON responses
    /// for programmatic error handling.
    pub fn status_code(&self) -> String {
        match self {
            Self::FileRead { .. } => "FILE_READ_ERROR",
            Self::Parse(_) => "PARSE_ERROR",
            Self::Document(DocumentError::Empty) => "EMPTY_INPUT",
            Self::Document(DocumentError::DuplicateId(_)) => "DUPLICATE_ID",
            Self::Clustering(ClusteringError::InvalidConfig { .. }) | Self::ConfigError { .. } => {
                "CONFIG_ERROR"
            }
            Self::Clustering(ClusteringError::UndefinedFeatures { .. }) => "EMPTY_DOCUMENT",
            Self::Clustering(_) => "CLUSTERING_ERROR",
        }
        .to_string()
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::FileRead { .. } => vec![
                "Check that the file exists and you have read permissions",
                "Omit the file argument to read the records from stdin",
            ],
            Self::Parse(_) | Self::Document(DocumentError::Empty) => vec![
                "Records must look like {\"content\": \"...\", \"id\": 1, \"title\": \"...\"}",
                "All records are expected on the first line of the input",
            ],
            Self::Document(DocumentError::DuplicateId(_)) => {
                vec!["Remove or renumber the repeated records"]
            }
            Self::Clustering(ClusteringError::UndefinedFeatures { .. }) => {
                vec!["Remove records whose content has no letters or digits"]
            }
            Self::Clustering(ClusteringError::InvalidConfig { .. }) | Self::ConfigError { .. } => {
                vec![
                    "Run 'doccluster config' to inspect the effective settings",
                    "Run 'doccluster init --force' to regenerate the settings file",
                ]
            }
            _ => vec![],
        }
    }
}

/// Result type alias for document collection construction
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Result type alias for a full clustering run
pub type DocClusterResult<T> = Result<T, DocClusterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let error = DocClusterError::from(DocumentError::DuplicateId(DocumentId::new(3)));
        assert_eq!(error.status_code(), "DUPLICATE_ID");
        assert!(error.to_string().contains("Duplicate document id 3"));

        let error = DocClusterError::from(ClusteringError::InvalidConfig {
            reason: "iterations must be at least 1".to_string(),
        });
        assert_eq!(error.status_code(), "CONFIG_ERROR");
        assert!(!error.recovery_suggestions().is_empty());

        let error = DocClusterError::from(ClusteringError::UndefinedFeatures {
            id: DocumentId::new(8),
        });
        assert_eq!(error.status_code(), "EMPTY_DOCUMENT");
        assert!(error.to_string().contains("Document 8 produced no tokens"));
        assert_eq!(error.recovery_suggestions().len(), 1);

        let error = DocClusterError::from(ClusteringError::EmptyCollection);
        assert_eq!(error.status_code(), "CLUSTERING_ERROR");
        assert!(error.recovery_suggestions().is_empty());
    }

    #[test]
    fn test_parse_errors_suggest_record_format() {
        let error = DocClusterError::from(ParseError::NoRecords);
        assert_eq!(error.status_code(), "PARSE_ERROR");
        assert!(error.recovery_suggestions()[0].contains("\"content\""));
    }
}
