//! Exit codes for CLI operations following Unix conventions.
//!
//! # Exit Code Semantics
//!
//! - `0`: Success - a partition was printed
//! - `1`: General error - unspecified failure
//! - `4-6`: Specific recoverable errors
//! - `126-255`: Reserved by shell

use crate::error::{DocClusterError, DocumentError};
use crate::io::parse::ParseError;
use crate::vector::ClusteringError;

/// Standard exit codes for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Operation succeeded (code 0)
    Success = 0,

    /// Unspecified error occurred (code 1)
    GeneralError = 1,

    /// Input records could not be understood (code 4)
    ParseError = 4,

    /// File I/O error (code 5)
    IoError = 5,

    /// Configuration error (code 6)
    ConfigError = 6,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl ExitCode {
    /// Convert a `DocClusterError` to the appropriate exit code.
    pub fn from_error(error: &DocClusterError) -> Self {
        match error {
            DocClusterError::FileRead { .. } | DocClusterError::Parse(ParseError::Read(_)) => {
                ExitCode::IoError
            }

            DocClusterError::Parse(_)
            | DocClusterError::Document(DocumentError::Empty | DocumentError::DuplicateId(_))
            | DocClusterError::Clustering(ClusteringError::UndefinedFeatures { .. }) => {
                ExitCode::ParseError
            }

            DocClusterError::ConfigError { .. }
            | DocClusterError::Clustering(ClusteringError::InvalidConfig { .. }) => {
                ExitCode::ConfigError
            }

            DocClusterError::Clustering(_) => ExitCode::GeneralError,
        }
    }
}
