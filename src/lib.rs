//! picdupe - Perceptual Duplicate Photo Finder
//!
//! A cross-platform Rust CLI that finds near-duplicate photos by
//! reducing each image to a 32-bit average-threshold perceptual
//! fingerprint and grouping files whose fingerprints are bit-identical.
//!
//! The library surface mirrors the pipeline:
//! - [`hashing`]: reduce + hash, the pure fingerprinting core
//! - [`scanner`]: candidate discovery and image decoding
//! - [`duplicates`]: records, grouping, and the scan orchestration
//! - [`output`]: text/JSON/CSV report formatting

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod hashing;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod signal;

use std::sync::Arc;

use anyhow::Result;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::duplicates::{DuplicateFinder, DuplicateGroup, FinderConfig, ScanSummary};
use crate::error::ExitCode;
use crate::output::{CsvOutput, JsonOutput, TextOutput};
use crate::progress::Progress;
use crate::scanner::WalkerConfig;

/// Run the application with parsed CLI arguments.
///
/// Wires config, signal handling, and progress reporting around a
/// [`DuplicateFinder`] scan, then prints the report in the requested
/// format and maps the result to an exit code.
///
/// # Errors
///
/// Returns an error for unwalkable roots, invalid detail sizes, and
/// interruption; `main` maps these to exit codes.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let config = Config::load();

    let detail_size = cli.detail_size.unwrap_or(config.detail_size);
    let extensions = if cli.extensions.is_empty() {
        config.extensions.clone()
    } else {
        cli.extensions
            .iter()
            .map(|e| e.to_ascii_lowercase())
            .collect()
    };

    let handler = signal::install_handler();

    let walker_config = WalkerConfig {
        extensions,
        max_files: cli.max_files,
        skip_hidden: cli.skip_hidden,
        follow_symlinks: cli.follow_symlinks,
    };

    let mut finder_config = FinderConfig::default()
        .with_detail_size(detail_size)
        .with_threads(cli.threads)
        .with_walker(walker_config)
        .with_shutdown_flag(handler.get_flag());

    // Progress bars only make sense on the human-facing path.
    if cli.output == OutputFormat::Text && !cli.quiet {
        finder_config = finder_config.with_progress_callback(Arc::new(Progress::new(false)));
    }

    let finder = DuplicateFinder::new(finder_config);
    let (groups, summary) = finder.find_duplicates(&cli.paths)?;

    let exit_code = resolve_exit_code(&groups, &summary);
    emit_report(cli.output, &groups, &summary, exit_code)?;

    Ok(exit_code)
}

/// Map scan results to an exit code.
fn resolve_exit_code(groups: &[DuplicateGroup], summary: &ScanSummary) -> ExitCode {
    if summary.has_failures() {
        ExitCode::PartialSuccess
    } else if groups.is_empty() {
        ExitCode::NoDuplicates
    } else {
        ExitCode::Success
    }
}

/// Print the report in the requested format.
fn emit_report(
    format: OutputFormat,
    groups: &[DuplicateGroup],
    summary: &ScanSummary,
    exit_code: ExitCode,
) -> Result<()> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    match format {
        OutputFormat::Text => TextOutput::new(groups, summary).write_to(&mut lock)?,
        OutputFormat::Json => JsonOutput::new(groups, summary, exit_code).write_to(&mut lock)?,
        OutputFormat::Csv => CsvOutput::new(groups).write_to(&mut lock)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplicates::PhotoRecord;
    use std::path::PathBuf;

    fn group_of_two() -> DuplicateGroup {
        DuplicateGroup::new(
            1,
            vec![
                PhotoRecord::new(PathBuf::from("/a.jpg"), 1, 10),
                PhotoRecord::new(PathBuf::from("/b.jpg"), 1, 10),
            ],
        )
    }

    #[test]
    fn test_resolve_exit_code_success() {
        let summary = ScanSummary::default();
        assert_eq!(
            resolve_exit_code(&[group_of_two()], &summary),
            ExitCode::Success
        );
    }

    #[test]
    fn test_resolve_exit_code_no_duplicates() {
        let summary = ScanSummary::default();
        assert_eq!(resolve_exit_code(&[], &summary), ExitCode::NoDuplicates);
    }

    #[test]
    fn test_resolve_exit_code_partial_on_failures() {
        let summary = ScanSummary {
            decode_failures: 1,
            ..Default::default()
        };
        // Decode failures win even when duplicates were found.
        assert_eq!(
            resolve_exit_code(&[group_of_two()], &summary),
            ExitCode::PartialSuccess
        );
    }
}
