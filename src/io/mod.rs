//! Input/Output handling for the command-line surface.
//!
//! This module provides:
//! - Parsing of the single-line record input
//! - Unified output formatting (text, JSON)
//! - Consistent error handling and exit codes

pub mod exit_code;
pub mod format;
pub mod output;
pub mod parse;

pub use exit_code::ExitCode;
pub use format::{ErrorDetails, JsonResponse, OutputFormat, Partition, ResponseMeta};
pub use output::OutputManager;
pub use parse::{ParseError, Record, into_collection, parse_records, read_first_line};
