//! Sheaf CLI Binary
//!
//! Command-line interface for the sheaf source bundling tool.

use clap::Parser;
use sheaf::cli::{map_error, Cli, RunContext};
use sheaf::config::ConfigLoader;
use sheaf::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    // Initialize logging early
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Sheaf CLI starting");

    let context = match RunContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    match context.execute() {
        Ok(output) => {
            info!("Compile completed successfully");
            println!("{}", output);
        }
        Err(e) => {
            error!("Compile failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args, environment, and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = if let Some(ref config_path) = cli.config {
        ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    } else {
        ConfigLoader::load()
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    };

    if cli.quiet {
        config.level = "off".to_string();
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = file.clone();
        // A bare --log-file implies file output
        if cli.log_output.is_none() {
            config.output = "file".to_string();
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_logging_config_default() {
        let cli = Cli::try_parse_from(["sheaf"]).unwrap();
        let config = build_logging_config(&cli);
        assert_eq!(config.level, "info", "default level should be info");
        assert_eq!(config.output, "stderr", "default output should be stderr");
    }

    #[test]
    fn test_build_logging_config_quiet() {
        let cli = Cli::try_parse_from(["sheaf", "--quiet"]).unwrap();
        let config = build_logging_config(&cli);
        assert_eq!(config.level, "off", "quiet should disable logging");
    }

    #[test]
    fn test_build_logging_config_verbose() {
        let cli = Cli::try_parse_from(["sheaf", "--verbose"]).unwrap();
        let config = build_logging_config(&cli);
        assert_eq!(config.level, "debug", "verbose should set level to debug");
    }

    #[test]
    fn test_build_logging_config_explicit_level_wins_over_verbose() {
        let cli =
            Cli::try_parse_from(["sheaf", "--verbose", "--log-level", "warn"]).unwrap();
        let config = build_logging_config(&cli);
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn test_build_logging_config_log_file_implies_file_output() {
        let cli = Cli::try_parse_from(["sheaf", "--log-file", "run.log"]).unwrap();
        let config = build_logging_config(&cli);
        assert_eq!(config.output, "file");
        assert_eq!(config.file, std::path::PathBuf::from("run.log"));
    }
}
