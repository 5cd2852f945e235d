//! Human-readable report.
//!
//! One block per group: member count and canonical path, then every
//! member path on its own line, followed by a one-line scan summary.

use std::io::{self, Write};

use crate::duplicates::{DuplicateGroup, ScanSummary};

/// Plain-text report writer.
pub struct TextOutput<'a> {
    groups: &'a [DuplicateGroup],
    summary: &'a ScanSummary,
}

impl<'a> TextOutput<'a> {
    /// Create a text report over scan results.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup], summary: &'a ScanSummary) -> Self {
        Self { groups, summary }
    }

    /// Write the report to the given writer.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the writer.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for group in self.groups {
            writeln!(writer)?;
            writeln!(
                writer,
                "{} duplicates of {}:",
                group.len(),
                group.canonical().path.display()
            )?;
            for member in &group.members {
                writeln!(writer, "{}", member.path.display())?;
            }
        }

        writeln!(writer)?;
        writeln!(
            writer,
            "Scanned {} files in {} ms: {} duplicate groups, {} redundant copies ({} files failed to decode)",
            self.summary.total_files,
            self.summary.scan_duration_ms,
            self.summary.grouping.duplicate_groups,
            self.summary.grouping.redundant_copies(),
            self.summary.decode_failures
        )?;

        Ok(())
    }

    /// Print the report to stdout.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from stdout.
    pub fn print(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.write_to(&mut lock)
    }
}
