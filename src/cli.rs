//! CLI domain: clap surface, run context, and error mapping.
//! Parsing and formatting only; compile semantics live in the compiler.

use crate::compiler::{CompileReport, Compiler};
use crate::config::{ConfigLoader, SheafConfig};
use crate::error::CompileError;
use clap::Parser;
use std::path::PathBuf;

/// Sheaf CLI - Bundle a source tree into a single annotated text document
#[derive(Parser)]
#[command(name = "sheaf")]
#[command(about = "Bundle a source tree into a single annotated text document")]
pub struct Cli {
    /// Source folder to traverse (default: ./src, or the configured source)
    pub source: Option<PathBuf>,

    /// Output file (default: compiled_contents.txt, or the configured output)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keep the raw directory-listing order instead of sorting by path
    #[arg(long)]
    pub no_sort: bool,

    /// Follow symbolic links during traversal
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Maximum traversal depth
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Path component to skip (repeatable)
    #[arg(long = "ignore", value_name = "PATTERN")]
    pub ignore: Vec<String>,

    /// Completion report format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Disable logging
    #[arg(long)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Runtime context for CLI execution: the effective configuration after
/// applying CLI overrides on top of the loaded config.
pub struct RunContext {
    config: SheafConfig,
    report_format: String,
}

impl RunContext {
    /// Create run context: load configuration, apply CLI flags.
    /// Precedence: CLI flags over config file over built-in defaults.
    pub fn new(cli: &Cli) -> Result<Self, CompileError> {
        let mut config = if let Some(ref config_path) = cli.config {
            ConfigLoader::load_from_file(config_path)?
        } else {
            ConfigLoader::load()?
        };

        if let Some(ref source) = cli.source {
            config.source = source.clone();
        }
        if let Some(ref output) = cli.output {
            config.output = output.clone();
        }
        if cli.no_sort {
            config.walker.sort = false;
        }
        if cli.follow_symlinks {
            config.walker.follow_symlinks = true;
        }
        if let Some(depth) = cli.max_depth {
            config.walker.max_depth = Some(depth);
        }
        config.walker.ignore.extend(cli.ignore.iter().cloned());

        if cli.format != "text" && cli.format != "json" {
            return Err(CompileError::Config(format!(
                "Invalid report format: {} (must be 'text' or 'json')",
                cli.format
            )));
        }

        Ok(Self {
            config,
            report_format: cli.format.clone(),
        })
    }

    /// Effective configuration after CLI overrides.
    pub fn config(&self) -> &SheafConfig {
        &self.config
    }

    /// Run the compiler and format the completion report.
    pub fn execute(&self) -> Result<String, CompileError> {
        let compiler = Compiler::with_walker_config(self.config.walker.to_walker_config());
        let report = compiler.compile(&self.config.source, &self.config.output)?;

        if self.report_format == "json" {
            serde_json::to_string_pretty(&report)
                .map_err(|e| CompileError::Config(format!("Failed to encode report: {}", e)))
        } else {
            Ok(format_report_text(&report))
        }
    }
}

/// Human-readable completion message naming the output file.
fn format_report_text(report: &CompileReport) -> String {
    if report.files_failed == 0 {
        format!(
            "Compiled {} file(s) into {}",
            report.files_compiled,
            report.output.display()
        )
    } else {
        format!(
            "Compiled {} file(s) ({} with read errors) into {}",
            report.files_compiled,
            report.files_failed,
            report.output.display()
        )
    }
}

/// Map domain errors to a string for CLI output.
/// Keeps the binary thin; extend with stable categories if needed.
pub fn map_error(e: &CompileError) -> String {
    e.to_string()
}
