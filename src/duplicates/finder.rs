//! Scan pipeline: walk, fingerprint, group.
//!
//! # Overview
//!
//! [`DuplicateFinder`] orchestrates the full pass over the candidate
//! roots:
//!
//! 1. **Walk**: collect candidate files (extension-filtered, capped).
//! 2. **Fingerprint**: decode + fingerprint each file on a dedicated
//!    rayon pool. Each file is independent, so there is no shared
//!    mutable state; the results land in an unordered buffer.
//! 3. **Group**: once the complete record set exists, partition it by
//!    exact fingerprint equality.
//!
//! Decode failures are per-file and non-fatal: the file becomes an
//! invalid record and the scan continues. A shutdown request observed in
//! any phase aborts the scan with [`FinderError::Interrupted`].
//!
//! # Example
//!
//! ```no_run
//! use picdupe::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::PathBuf;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default());
//! let (groups, summary) = finder
//!     .find_duplicates(&[PathBuf::from("/home/user/Pictures")])
//!     .unwrap();
//! println!("{} duplicate groups in {} files", groups.len(), summary.total_files);
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use crate::hashing::{fingerprint, validate_detail_size, FingerprintError, DEFAULT_DETAIL_SIZE};
use crate::progress::ProgressCallback;
use crate::scanner::{decode, ScanError, Walker, WalkerConfig};

use super::{group_records, DuplicateGroup, GroupingStats, PhotoRecord};

/// Errors that abort a scan.
#[derive(Debug, thiserror::Error)]
pub enum FinderError {
    /// A candidate root could not be walked.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// The configured detail size is invalid.
    #[error(transparent)]
    Fingerprint(#[from] FingerprintError),

    /// The worker pool could not be created.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// The scan was interrupted by a shutdown request.
    #[error("Scan interrupted")]
    Interrupted,
}

/// Configuration for a duplicate scan.
#[derive(Clone)]
pub struct FinderConfig {
    /// Square grid side length for fingerprinting, in `[4, 64]`.
    pub detail_size: u32,
    /// Number of decode/fingerprint workers.
    pub threads: usize,
    /// Candidate discovery options.
    pub walker: WalkerConfig,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("detail_size", &self.detail_size)
            .field("threads", &self.threads)
            .field("walker", &self.walker)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            detail_size: DEFAULT_DETAIL_SIZE,
            threads: 4,
            walker: WalkerConfig::default(),
            shutdown_flag: None,
            progress_callback: None,
        }
    }
}

impl FinderConfig {
    /// Set the fingerprint detail size.
    #[must_use]
    pub fn with_detail_size(mut self, detail_size: u32) -> Self {
        self.detail_size = detail_size;
        self
    }

    /// Set the worker thread count.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Set the candidate discovery options.
    #[must_use]
    pub fn with_walker(mut self, walker: WalkerConfig) -> Self {
        self.walker = walker;
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Summary statistics for a completed scan.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Candidate files discovered by the walker
    pub total_files: usize,
    /// Files successfully decoded and fingerprinted
    pub fingerprinted_files: usize,
    /// Files that failed to decode (excluded from grouping)
    pub decode_failures: usize,
    /// Unreadable directory entries skipped during the walk
    pub walk_errors: usize,
    /// Grouping statistics
    pub grouping: GroupingStats,
    /// Wall-clock duration of the whole scan in milliseconds
    pub scan_duration_ms: u64,
    /// Duration of the walk phase in milliseconds
    pub walk_duration_ms: u64,
    /// Duration of the fingerprint phase in milliseconds
    pub fingerprint_duration_ms: u64,
}

impl ScanSummary {
    /// True if any candidate failed to decode.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.decode_failures > 0
    }
}

/// Duplicate photo finder.
///
/// Stateless between scans: all knobs live in [`FinderConfig`].
#[derive(Debug)]
pub struct DuplicateFinder {
    config: FinderConfig,
}

impl DuplicateFinder {
    /// Create a finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }

    /// Create a finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Run a full scan over the given roots.
    ///
    /// # Errors
    ///
    /// Fails fast on an invalid detail size, an unwalkable root, a
    /// worker-pool build failure, or a shutdown request. Per-file decode
    /// errors never fail the scan.
    pub fn find_duplicates(
        &self,
        roots: &[PathBuf],
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        // A bad detail size is a configuration mistake; surface it
        // before any I/O instead of once per file.
        validate_detail_size(self.config.detail_size)?;

        let scan_start = Instant::now();
        let mut summary = ScanSummary::default();

        // Phase 1: discovery.
        self.on_phase_start("walk", 0);
        let walk_start = Instant::now();
        let mut walker = Walker::new(roots, self.config.walker.clone());
        if let Some(flag) = &self.config.shutdown_flag {
            walker = walker.with_shutdown_flag(Arc::clone(flag));
        }
        let (files, walk_errors) = walker.collect_files()?;
        summary.walk_duration_ms = duration_ms(walk_start);
        summary.total_files = files.len();
        summary.walk_errors = walk_errors;
        self.on_phase_end("walk");

        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        log::info!(
            "Fingerprinting {} files with detail size {} on {} threads",
            files.len(),
            self.config.detail_size,
            self.config.threads
        );

        // Phase 2: decode + fingerprint fan-out.
        self.on_phase_start("fingerprint", files.len());
        let fingerprint_start = Instant::now();
        let records = self.fingerprint_files(&files)?;
        summary.fingerprint_duration_ms = duration_ms(fingerprint_start);
        summary.fingerprinted_files = records.iter().filter(|r| r.valid).count();
        summary.decode_failures = records.len() - summary.fingerprinted_files;
        self.on_phase_end("fingerprint");

        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        // Phase 3: grouping over the complete record set.
        let (groups, grouping) = group_records(records);
        summary.grouping = grouping;
        summary.scan_duration_ms = duration_ms(scan_start);

        Ok((groups, summary))
    }

    /// Fingerprint every candidate on a dedicated worker pool.
    ///
    /// Result order is unspecified relative to input order; grouping
    /// does not care, and record construction is order-independent.
    fn fingerprint_files(&self, files: &[PathBuf]) -> Result<Vec<PhotoRecord>, FinderError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.threads)
            .build()?;

        let detail_size = self.config.detail_size;
        let processed = AtomicUsize::new(0);

        let records: Vec<PhotoRecord> = pool.install(|| {
            files
                .par_iter()
                .map(|path| {
                    let record = fingerprint_file(path, detail_size);
                    let current = processed.fetch_add(1, Ordering::Relaxed) + 1;
                    self.on_progress(current, path);
                    record
                })
                .collect()
        });

        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        Ok(records)
    }

    fn on_phase_start(&self, phase: &str, total: usize) {
        if let Some(cb) = &self.config.progress_callback {
            cb.on_phase_start(phase, total);
        }
    }

    fn on_progress(&self, current: usize, path: &Path) {
        if let Some(cb) = &self.config.progress_callback {
            cb.on_progress(current, &path.display().to_string());
        }
    }

    fn on_phase_end(&self, phase: &str) {
        if let Some(cb) = &self.config.progress_callback {
            cb.on_phase_end(phase);
        }
    }
}

/// Decode and fingerprint one candidate file.
///
/// Decode failures become invalid records; the caller has already
/// validated the detail size, so a fingerprint error here is a bug and
/// is downgraded to an invalid record with an error log rather than
/// aborting the scan.
fn fingerprint_file(path: &Path, detail_size: u32) -> PhotoRecord {
    match decode(path) {
        Ok(photo) => match fingerprint(&photo.grid, detail_size) {
            Ok(fp) => {
                log::trace!("{} -> {:08x}", path.display(), fp);
                PhotoRecord::new(path.to_path_buf(), fp, photo.pixel_area)
            }
            Err(e) => {
                log::error!("Fingerprint failed for {}: {}", path.display(), e);
                PhotoRecord::invalid(path.to_path_buf())
            }
        },
        Err(e) => {
            log::debug!("Skipping undecodable file: {}", e);
            PhotoRecord::invalid(path.to_path_buf())
        }
    }
}

fn duration_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
