//! Format definitions for CLI output.
//!
//! Provides the [`Partition`] rendering of a clustering result and the JSON
//! envelope used when `--json` is requested.

use crate::document::{DocumentCollection, DocumentId};
use crate::error::DocClusterError;
use crate::io::exit_code::ExitCode;
use crate::vector::ClusterCollection;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text (default)
    Text,
    /// JSON for tool integration
    Json,
}

impl OutputFormat {
    /// Create format from JSON flag.
    #[must_use]
    pub fn from_json_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// Document ids grouped by cluster, in presentation order.
///
/// Ids within a cluster ascend; clusters are ordered by their smallest id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Partition(Vec<Vec<DocumentId>>);

impl Partition {
    /// Sorts raw id groups into presentation order. Empty groups are dropped.
    pub fn new(groups: Vec<Vec<DocumentId>>) -> Self {
        let mut groups: Vec<Vec<DocumentId>> = groups
            .into_iter()
            .filter(|group| !group.is_empty())
            .map(|mut group| {
                group.sort_unstable();
                group
            })
            .collect();
        groups.sort_unstable_by_key(|group| group[0]);
        Self(groups)
    }

    /// Maps cluster members back to the ids of `documents`.
    pub fn from_clusters(clusters: &ClusterCollection, documents: &DocumentCollection) -> Self {
        Self::new(
            clusters
                .iter()
                .map(|cluster| {
                    cluster
                        .members()
                        .iter()
                        .map(|&index| documents[index].id())
                        .collect()
                })
                .collect(),
        )
    }

    #[must_use]
    pub fn groups(&self) -> &[Vec<DocumentId>] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, group) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str("[")?;
            for (j, id) in group.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{id}")?;
            }
            f.write_str("]")?;
        }
        f.write_str("]")
    }
}

/// Standard JSON response format.
///
/// Provides consistent structure for both success and error responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonResponse<T = serde_json::Value>
where
    T: Serialize,
{
    /// Status: "success" or "error"
    pub status: String,

    /// Result code (e.g., "OK", "PARSE_ERROR")
    pub code: String,

    /// Human-readable message
    pub message: String,

    /// Actual data payload (only for success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Error details and suggestions (only for errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetails>,

    /// Exit code for shell scripts
    pub exit_code: u8,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

/// Error details for JSON responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Recovery suggestions
    pub suggestions: Vec<String>,
}

/// Statistics of the accepted clustering trial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMeta {
    /// Version of the tool
    pub version: String,
    /// Number of clusters the search settled on
    pub k: usize,
    /// Intra/inter distance ratio of that trial
    pub ratio: f64,
    /// False when the search ran out of cluster counts instead
    pub threshold_met: bool,
    pub metric: String,
}

impl<T> JsonResponse<T>
where
    T: Serialize,
{
    /// Create a success response with data.
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            code: "OK".to_string(),
            message: "Operation completed successfully".to_string(),
            data: Some(data),
            error: None,
            exit_code: ExitCode::Success as u8,
            meta: None,
        }
    }

    /// Add metadata to the response.
    pub fn with_meta(mut self, meta: ResponseMeta) -> Self {
        self.meta = Some(meta);
        self
    }
}

impl JsonResponse<serde_json::Value> {
    /// Create an error response from DocClusterError.
    pub fn from_error(error: &DocClusterError) -> Self {
        Self {
            status: "error".to_string(),
            code: error.status_code(),
            message: error.to_string(),
            data: None,
            error: Some(ErrorDetails {
                suggestions: error
                    .recovery_suggestions()
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            }),
            exit_code: ExitCode::from_error(error) as u8,
            meta: None,
        }
    }
}
