//! Candidate file discovery using walkdir.
//!
//! # Overview
//!
//! The [`Walker`] recursively enumerates candidate image files under one
//! or more root directories, filtered by extension and bounded by a hard
//! file cap. The cap is a walker policy, not a fingerprinting one: the
//! core downstream always sees a finite, already-filtered sequence.
//!
//! # Example
//!
//! ```no_run
//! use picdupe::scanner::{Walker, WalkerConfig};
//! use std::path::PathBuf;
//!
//! let roots = vec![PathBuf::from("/home/user/Pictures")];
//! let walker = Walker::new(&roots, WalkerConfig::default());
//! let (files, errors) = walker.collect_files().unwrap();
//! println!("{} candidates, {} unreadable entries", files.len(), errors);
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use walkdir::WalkDir;

use super::{ScanError, WalkerConfig};

/// Recursive, extension-filtered, capped directory walker.
#[derive(Debug)]
pub struct Walker {
    roots: Vec<PathBuf>,
    config: WalkerConfig,
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Walker {
    /// Create a walker over the given root directories.
    #[must_use]
    pub fn new(roots: &[PathBuf], config: WalkerConfig) -> Self {
        Self {
            roots: roots.to_vec(),
            config,
            shutdown_flag: None,
        }
    }

    /// Set the shutdown flag for graceful termination.
    ///
    /// When the flag flips to `true`, the walk stops at the next entry
    /// and returns what it has collected so far.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Collect candidate files across all roots, in discovery order.
    ///
    /// Stops once `max_files` candidates have been collected. Unreadable
    /// directory entries are logged and counted, never fatal; the count
    /// is returned alongside the files.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError`] if a root is missing or not a directory.
    pub fn collect_files(&self) -> Result<(Vec<PathBuf>, usize), ScanError> {
        let mut files = Vec::new();
        let mut walk_errors = 0usize;

        for root in &self.roots {
            if !root.exists() {
                return Err(ScanError::NotFound(root.clone()));
            }
            if !root.is_dir() {
                return Err(ScanError::NotADirectory(root.clone()));
            }

            log::debug!("Walking {}", root.display());
            let walk = WalkDir::new(root)
                .follow_links(self.config.follow_symlinks)
                .into_iter()
                .filter_entry(|e| self.keep_entry(e));

            for entry in walk {
                if self.is_shutdown_requested() {
                    log::info!("Walk interrupted after {} candidates", files.len());
                    return Ok((files, walk_errors));
                }
                if files.len() >= self.config.max_files {
                    log::warn!(
                        "File cap reached ({}), ignoring remaining candidates",
                        self.config.max_files
                    );
                    return Ok((files, walk_errors));
                }

                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        log::warn!("Skipping unreadable entry: {}", e);
                        walk_errors += 1;
                        continue;
                    }
                };

                if !entry.file_type().is_file() {
                    continue;
                }
                if !self.matches_extension(entry.path()) {
                    continue;
                }

                files.push(entry.into_path());
            }
        }

        log::debug!("Walk complete: {} candidate files", files.len());
        Ok((files, walk_errors))
    }

    /// Traversal filter: hidden entries (files and whole directories)
    /// are pruned when `skip_hidden` is set. The root itself is always
    /// kept so scans of dot-directories still work.
    fn keep_entry(&self, entry: &walkdir::DirEntry) -> bool {
        if !self.config.skip_hidden || entry.depth() == 0 {
            return true;
        }
        if is_hidden(entry.path()) {
            log::trace!("Skipping hidden entry {}", entry.path().display());
            return false;
        }
        true
    }

    /// Case-insensitive extension match against the configured set.
    fn matches_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let ext = ext.to_ascii_lowercase();
        self.config.extensions.iter().any(|e| *e == ext)
    }
}

/// A file is hidden when its name starts with a dot.
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}
