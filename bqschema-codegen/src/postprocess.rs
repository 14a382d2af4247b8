//! Formatting and import resolution of the assembled source.
//!
//! The generator hands its output to a [`Formatter`] and then to an
//! [`ImportResolver`]. The process-backed implementations shell out to the Go
//! toolchain; [`Passthrough`] leaves the text untouched.

use crate::error::PostProcessError;
use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use std::thread;

/// Formats Go source text.
pub trait Formatter {
    /// Returns the formatted source.
    ///
    /// # Errors
    /// Returns `PostProcessError::Format` if the source is rejected.
    fn format(&self, source: &str) -> Result<String, PostProcessError>;
}

/// Completes and prunes the import statements of Go source text.
pub trait ImportResolver {
    /// Returns the source with its imports resolved.
    ///
    /// # Errors
    /// Returns `PostProcessError::ResolveImports` if the source is rejected.
    fn resolve_imports(&self, source: &str) -> Result<String, PostProcessError>;
}

/// Post-processor that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Formatter for Passthrough {
    fn format(&self, source: &str) -> Result<String, PostProcessError> {
        Ok(source.to_string())
    }
}

impl ImportResolver for Passthrough {
    fn resolve_imports(&self, source: &str) -> Result<String, PostProcessError> {
        Ok(source.to_string())
    }
}

/// Formatter that pipes the source through `gofmt`.
#[derive(Debug, Clone)]
pub struct GofmtFormatter {
    program: String,
}

impl GofmtFormatter {
    /// Uses `gofmt` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_program("gofmt")
    }

    /// Uses the given executable.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GofmtFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for GofmtFormatter {
    fn format(&self, source: &str) -> Result<String, PostProcessError> {
        run_filter(&self.program, source).map_err(|message| PostProcessError::Format {
            tool: self.program.clone(),
            message,
        })
    }
}

/// Import resolver that pipes the source through `goimports`.
#[derive(Debug, Clone)]
pub struct GoimportsResolver {
    program: String,
}

impl GoimportsResolver {
    /// Uses `goimports` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_program("goimports")
    }

    /// Uses the given executable.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GoimportsResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ImportResolver for GoimportsResolver {
    fn resolve_imports(&self, source: &str) -> Result<String, PostProcessError> {
        run_filter(&self.program, source).map_err(|message| PostProcessError::ResolveImports {
            tool: self.program.clone(),
            message,
        })
    }
}

/// Runs `program` with `input` on stdin and returns its stdout.
///
/// Input is fed from a separate thread while the output is drained, so a
/// filter that streams its output cannot block on a full pipe.
fn run_filter(program: &str, input: &str) -> Result<String, String> {
    let mut child = Command::new(program)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| format!("failed to start: {}", e))?;

    let writer = child.stdin.take().map(|mut stdin| {
        let input = input.to_owned();
        thread::spawn(move || match stdin.write_all(input.as_bytes()) {
            // A tool that exits early closes the pipe; its exit status is
            // reported instead.
            Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
            other => other,
        })
    });

    let output = child
        .wait_with_output()
        .map_err(|e| format!("failed to wait: {}", e))?;

    if let Some(writer) = writer {
        writer
            .join()
            .map_err(|_| "input writer panicked".to_string())?
            .map_err(|e| format!("failed to write input: {}", e))?;
    }

    if !output.status.success() {
        return Err(format!(
            "exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    String::from_utf8(output.stdout).map_err(|e| format!("output is not UTF-8: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_is_identity() {
        let source = "package x\n\ntype A struct {\n}\n";
        assert_eq!(Passthrough.format(source).expect("format"), source);
        assert_eq!(Passthrough.resolve_imports(source).expect("resolve"), source);
    }

    #[test]
    fn test_missing_formatter_is_format_error() {
        let formatter = GofmtFormatter::with_program("bqschema-no-such-gofmt");
        let err = formatter.format("package x\n").unwrap_err();

        assert!(matches!(err, PostProcessError::Format { .. }));
        assert!(err.to_string().contains("bqschema-no-such-gofmt"));
    }

    #[test]
    fn test_missing_resolver_is_resolve_error() {
        let resolver = GoimportsResolver::with_program("bqschema-no-such-goimports");
        let err = resolver.resolve_imports("package x\n").unwrap_err();

        assert!(matches!(err, PostProcessError::ResolveImports { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_filter_output_is_returned() {
        let formatter = GofmtFormatter::with_program("cat");
        assert_eq!(formatter.format("package x\n").expect("format"), "package x\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_filter_handles_input_larger_than_pipe_buffer() {
        let line = "\tName string `bigquery:\"name\"`\n";
        let source = line.repeat(1 << 16);
        assert!(source.len() > 1 << 20);

        let formatter = GofmtFormatter::with_program("cat");
        assert_eq!(formatter.format(&source).expect("format"), source);
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_filter_is_error() {
        let formatter = GofmtFormatter::with_program("false");
        let err = formatter.format("package x\n").unwrap_err();
        assert!(err.to_string().contains("exited with"));
    }
}
