//! Output management for CLI commands.
//!
//! Handles formatting and display for different output formats,
//! providing a unified interface for text and JSON output.

use crate::error::DocClusterError;
use crate::io::exit_code::ExitCode;
use crate::io::format::{JsonResponse, OutputFormat, ResponseMeta};
use serde::Serialize;
use std::fmt::Display;
use std::io::{self, Write};

/// Manages output formatting and display.
///
/// Results go to stdout; errors go to stderr in either format.
pub struct OutputManager {
    format: OutputFormat,
    stdout: Box<dyn Write>,
    stderr: Box<dyn Write>,
}

impl OutputManager {
    /// Create a new output manager with the specified format.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            stdout: Box::new(io::stdout()),
            stderr: Box::new(io::stderr()),
        }
    }

    /// Create an output manager with custom writers.
    pub fn new_with_writers(
        format: OutputFormat,
        stdout: Box<dyn Write>,
        stderr: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            stdout,
            stderr,
        }
    }

    /// Output a successful result.
    ///
    /// In JSON mode, wraps the data in a success response.
    /// In text mode, displays the data using its Display implementation.
    pub fn success<T>(&mut self, data: T) -> io::Result<ExitCode>
    where
        T: Serialize + Display,
    {
        self.success_with_meta(data, None)
    }

    /// Output a successful result, attaching run statistics in JSON mode.
    ///
    /// Text mode prints only the data so the line stays byte-comparable.
    pub fn success_with_meta<T>(
        &mut self,
        data: T,
        meta: Option<ResponseMeta>,
    ) -> io::Result<ExitCode>
    where
        T: Serialize + Display,
    {
        match self.format {
            OutputFormat::Json => {
                let mut response = JsonResponse::success(&data);
                if let Some(meta) = meta {
                    response = response.with_meta(meta);
                }
                writeln!(self.stdout, "{}", serde_json::to_string_pretty(&response)?)?;
            }
            OutputFormat::Text => {
                writeln!(self.stdout, "{data}")?;
            }
        }
        Ok(ExitCode::Success)
    }

    /// Output an error with suggestions.
    pub fn error(&mut self, error: &DocClusterError) -> io::Result<ExitCode> {
        match self.format {
            OutputFormat::Json => {
                let response = JsonResponse::from_error(error);
                writeln!(self.stderr, "{}", serde_json::to_string_pretty(&response)?)?;
            }
            OutputFormat::Text => {
                writeln!(self.stderr, "Error: {error}")?;
                for suggestion in error.recovery_suggestions() {
                    writeln!(self.stderr, "  Suggestion: {suggestion}")?;
                }
            }
        }
        Ok(ExitCode::from_error(error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentId;
    use crate::io::format::Partition;
    use crate::io::parse::ParseError;
    use std::sync::{Arc, Mutex};

    /// Writer that keeps its bytes reachable after being boxed.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn manager(format: OutputFormat) -> (OutputManager, SharedBuffer, SharedBuffer) {
        let stdout = SharedBuffer::default();
        let stderr = SharedBuffer::default();
        let manager = OutputManager::new_with_writers(
            format,
            Box::new(stdout.clone()),
            Box::new(stderr.clone()),
        );
        (manager, stdout, stderr)
    }

    fn partition() -> Partition {
        Partition::new(vec![
            vec![DocumentId::new(3)],
            vec![DocumentId::new(2), DocumentId::new(1)],
        ])
    }

    #[test]
    fn test_text_success_prints_partition_line() {
        let (mut manager, stdout, stderr) = manager(OutputFormat::Text);

        let code = manager.success(partition()).unwrap();
        assert_eq!(code, ExitCode::Success);
        assert_eq!(stdout.contents(), "[[1, 2], [3]]\n");
        assert!(stderr.contents().is_empty());
    }

    #[test]
    fn test_json_success_includes_meta() {
        let (mut manager, stdout, _stderr) = manager(OutputFormat::Json);

        let meta = ResponseMeta {
            version: "test".to_string(),
            k: 2,
            ratio: 0.25,
            threshold_met: true,
            metric: "cosine".to_string(),
        };
        manager.success_with_meta(partition(), Some(meta)).unwrap();

        let value: serde_json::Value = serde_json::from_str(&stdout.contents()).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"], serde_json::json!([[1, 2], [3]]));
        assert_eq!(value["meta"]["k"], 2);
    }

    #[test]
    fn test_text_error_goes_to_stderr() {
        let (mut manager, stdout, stderr) = manager(OutputFormat::Text);

        let error = DocClusterError::from(ParseError::NoRecords);
        let code = manager.error(&error).unwrap();

        assert_eq!(code, ExitCode::ParseError);
        assert!(stdout.contents().is_empty());
        let message = stderr.contents();
        assert!(message.starts_with("Error: No document records found"));
        assert!(message.contains("  Suggestion: "));
    }
}
