//! Compiler: concatenates the files of a source tree into one annotated document

use crate::error::CompileError;
use crate::walker::{Walker, WalkerConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Summary of a compile run. Describes the produced document; it is not
/// part of the document itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileReport {
    /// Files whose content was written verbatim
    pub files_compiled: usize,
    /// Files recorded as inline error annotations
    pub files_failed: usize,
    /// Content bytes written (headers and separators excluded)
    pub content_bytes: u64,
    /// Destination document
    pub output: PathBuf,
}

/// Walks a source folder and appends one tagged block per discovered file
/// to a single output document.
pub struct Compiler {
    walker_config: WalkerConfig,
}

impl Compiler {
    /// Create a compiler with default traversal settings
    pub fn new() -> Self {
        Self {
            walker_config: WalkerConfig::default(),
        }
    }

    /// Create a compiler with custom traversal settings
    pub fn with_walker_config(walker_config: WalkerConfig) -> Self {
        Self { walker_config }
    }

    /// Compile every file under `source_folder` into `output_file`.
    ///
    /// The output file is created fresh, truncating any prior content.
    /// Failure to create or write it aborts the run. Failure to read any
    /// single source file (permission denied, invalid UTF-8, vanished
    /// mid-walk) is downgraded to an inline `(ERROR: ...)` header and the
    /// remaining files are still processed.
    pub fn compile(
        &self,
        source_folder: &Path,
        output_file: &Path,
    ) -> Result<CompileReport, CompileError> {
        let output = fs::File::create(output_file).map_err(|e| CompileError::OutputCreate {
            path: output_file.to_path_buf(),
            source: e,
        })?;
        let mut writer = BufWriter::new(output);

        let walker = Walker::with_config(source_folder.to_path_buf(), self.walker_config.clone());
        let entries = walker.walk();
        info!(
            source = %source_folder.display(),
            files = entries.len(),
            source_bytes = entries.iter().map(|e| e.size).sum::<u64>(),
            "Compiling source contents"
        );

        let mut report = CompileReport {
            files_compiled: 0,
            files_failed: 0,
            content_bytes: 0,
            output: output_file.to_path_buf(),
        };

        let write_err = |e: std::io::Error| CompileError::OutputWrite {
            path: output_file.to_path_buf(),
            source: e,
        };

        for entry in entries {
            match fs::read_to_string(&entry.path) {
                Ok(content) => {
                    write_content_block(&mut writer, &entry.path, &content).map_err(write_err)?;
                    report.files_compiled += 1;
                    report.content_bytes += content.len() as u64;
                    debug!(path = %entry.path.display(), bytes = content.len(), "Compiled file");
                }
                Err(e) => {
                    write_error_block(&mut writer, &entry.path, &e).map_err(write_err)?;
                    report.files_failed += 1;
                    warn!(path = %entry.path.display(), error = %e, "Recorded file read error");
                }
            }
        }

        writer.flush().map_err(write_err)?;
        Ok(report)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Block for a successfully read file: header line, content, blank separator.
fn write_content_block(
    writer: &mut impl Write,
    path: &Path,
    content: &str,
) -> std::io::Result<()> {
    writeln!(writer, "=== {} ===", path.display())?;
    writer.write_all(content.as_bytes())?;
    writer.write_all(b"\n\n")
}

/// Block for a file that failed to read: annotated header, blank separator.
fn write_error_block(
    writer: &mut impl Write,
    path: &Path,
    error: &std::io::Error,
) -> std::io::Result<()> {
    writeln!(writer, "=== {} (ERROR: {}) ===", path.display(), error)?;
    writer.write_all(b"\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_content_block_format() {
        let mut buf = Vec::new();
        write_content_block(&mut buf, Path::new("src/a.txt"), "hello").unwrap();
        assert_eq!(buf, b"=== src/a.txt ===\nhello\n\n");
    }

    #[test]
    fn test_error_block_format() {
        let mut buf = Vec::new();
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        write_error_block(&mut buf, Path::new("src/locked.txt"), &err).unwrap();
        assert_eq!(buf, b"=== src/locked.txt (ERROR: permission denied) ===\n\n");
    }

    #[test]
    fn test_compile_writes_one_block_per_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        std::fs::create_dir(&source).unwrap();
        std::fs::write(source.join("a.txt"), "hello").unwrap();
        std::fs::write(source.join("b.txt"), "world").unwrap();

        let output = temp_dir.path().join("out.txt");
        let report = Compiler::new().compile(&source, &output).unwrap();

        assert_eq!(report.files_compiled, 2);
        assert_eq!(report.files_failed, 0);
        assert_eq!(report.content_bytes, 10);

        let document = std::fs::read_to_string(&output).unwrap();
        assert_eq!(document.matches("=== ").count(), 2);
        assert!(document.contains("hello"));
        assert!(document.contains("world"));
    }

    #[test]
    fn test_compile_truncates_previous_document() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        std::fs::create_dir(&source).unwrap();

        let output = temp_dir.path().join("out.txt");
        std::fs::write(&output, "stale content from a previous run").unwrap();

        Compiler::new().compile(&source, &output).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
    }

    #[test]
    fn test_compile_output_create_failure_propagates() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("src");
        std::fs::create_dir(&source).unwrap();

        let output = temp_dir.path().join("missing_dir").join("out.txt");
        let result = Compiler::new().compile(&source, &output);

        assert!(matches!(
            result,
            Err(CompileError::OutputCreate { .. })
        ));
    }
}
