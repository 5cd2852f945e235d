//! Scanner module for candidate discovery and image decoding.
//!
//! This module is the glue around the fingerprinting core:
//! - [`walker`]: recursive, extension-filtered, capped file discovery
//! - [`decode`]: turning files into owned pixel grids
//!
//! The fingerprinting core never touches the filesystem itself: it only
//! ever sees the bounded sequence of decoded images produced here.

pub mod decode;
pub mod walker;

use std::path::PathBuf;

// Re-export main types
pub use decode::{decode, DecodeError, DecodedPhoto};
pub use walker::Walker;

/// Default cap on the number of candidate files per scan.
pub const DEFAULT_MAX_FILES: usize = 20_000;

/// Extensions scanned when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "tif", "tiff", "webp",
];

/// Configuration for candidate discovery.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Lowercase file extensions to accept.
    pub extensions: Vec<String>,

    /// Hard cap on collected candidates across all roots.
    pub max_files: usize,

    /// Skip hidden files and directories (names starting with `.`).
    pub skip_hidden: bool,

    /// Follow symbolic links during traversal.
    /// Warning: may loop on symlink cycles.
    pub follow_symlinks: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| (*s).to_string()).collect(),
            max_files: DEFAULT_MAX_FILES,
            skip_hidden: false,
            follow_symlinks: false,
        }
    }
}

/// Errors that can occur while walking the candidate roots.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The specified root was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The specified root is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An I/O error occurred while accessing a root.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
