//! Command-line interface definitions for picdupe.
//!
//! Single-purpose CLI using the clap derive API: point it at one or
//! more directories, get a duplicate report.
//!
//! # Example
//!
//! ```bash
//! # Scan one directory with the default text report
//! picdupe ~/Pictures
//!
//! # Scan several roots with JSON output for scripting
//! picdupe ~/Pictures ~/Downloads --output json
//!
//! # Coarser fingerprints, more worker threads
//! picdupe ~/Pictures --detail-size 4 --threads 8
//! ```

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Perceptual duplicate photo finder.
///
/// picdupe fingerprints every photo under the given directories with an
/// average-threshold perceptual hash and reports groups of files whose
/// fingerprints are identical. The largest copy in each group is marked
/// as the canonical one.
#[derive(Debug, Parser)]
#[command(name = "picdupe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directories to scan for duplicate photos
    #[arg(value_name = "PATH", required = true, num_args = 1..)]
    pub paths: Vec<PathBuf>,

    /// Fingerprint detail size (grid side length, 4-64)
    ///
    /// Higher values sample the image more finely. Defaults to the
    /// configured value, or 8.
    #[arg(short = 'd', long, value_name = "N")]
    pub detail_size: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Maximum number of candidate files to scan
    #[arg(long, value_name = "N", default_value_t = crate::scanner::DEFAULT_MAX_FILES)]
    pub max_files: usize,

    /// File extensions to scan (can be specified multiple times)
    ///
    /// Defaults to the configured set, or the common raster formats
    /// (jpg, jpeg, png, gif, bmp, tif, tiff, webp).
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Number of decode/fingerprint worker threads
    #[arg(long, value_name = "N", default_value_t = 4)]
    pub threads: usize,

    /// Skip hidden files and directories (starting with .)
    #[arg(long)]
    pub skip_hidden: bool,

    /// Follow symbolic links during the scan
    ///
    /// Warning: may loop if symlinks form cycles.
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors and the report
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Emit errors as JSON on stderr
    #[arg(long)]
    pub json_errors: bool,
}

/// Output format for scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// JSON output for scripting
    Json,
    /// CSV output for spreadsheets
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
