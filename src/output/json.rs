//! JSON output formatter for duplicate scan results.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "duplicates": [
//!     {
//!       "fingerprint": "fffe0001",
//!       "canonical": "/pics/big.jpg",
//!       "member_count": 2,
//!       "files": ["/pics/big.jpg", "/pics/copy.jpg"]
//!     }
//!   ],
//!   "summary": {
//!     "total_files": 100,
//!     "fingerprinted_files": 98,
//!     "decode_failures": 2,
//!     "duplicate_groups": 5,
//!     "redundant_copies": 7,
//!     "scan_duration_ms": 1234,
//!     "exit_code": 0,
//!     "exit_code_name": "PD000"
//!   }
//! }
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::{DuplicateGroup, ScanSummary};
use crate::error::ExitCode;

/// A single duplicate group in JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuplicateGroup {
    /// Shared fingerprint as a hex string
    pub fingerprint: String,
    /// Path of the canonical member
    pub canonical: String,
    /// Number of members
    pub member_count: usize,
    /// All member paths in discovery order
    pub files: Vec<String>,
}

impl JsonDuplicateGroup {
    /// Convert a [`DuplicateGroup`].
    #[must_use]
    pub fn from_group(group: &DuplicateGroup) -> Self {
        Self {
            fingerprint: group.fingerprint_hex(),
            canonical: group.canonical().path.display().to_string(),
            member_count: group.len(),
            files: group
                .members
                .iter()
                .map(|m| m.path.display().to_string())
                .collect(),
        }
    }
}

/// Summary statistics in JSON form.
#[derive(Debug, Clone, Serialize)]
pub struct JsonSummary {
    /// Candidate files discovered
    pub total_files: usize,
    /// Files successfully fingerprinted
    pub fingerprinted_files: usize,
    /// Files that failed to decode
    pub decode_failures: usize,
    /// Unreadable directory entries skipped during the walk
    pub walk_errors: usize,
    /// Number of duplicate groups
    pub duplicate_groups: usize,
    /// Redundant copies across all groups
    pub redundant_copies: usize,
    /// Total scan duration in milliseconds
    pub scan_duration_ms: u64,
    /// Walk phase duration in milliseconds
    pub walk_duration_ms: u64,
    /// Fingerprint phase duration in milliseconds
    pub fingerprint_duration_ms: u64,
    /// The exit code number
    pub exit_code: i32,
    /// The machine-readable exit code name (e.g., "PD000")
    pub exit_code_name: String,
}

impl JsonSummary {
    /// Convert a [`ScanSummary`] plus the exit code.
    #[must_use]
    pub fn from_summary(summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            total_files: summary.total_files,
            fingerprinted_files: summary.fingerprinted_files,
            decode_failures: summary.decode_failures,
            walk_errors: summary.walk_errors,
            duplicate_groups: summary.grouping.duplicate_groups,
            redundant_copies: summary.grouping.redundant_copies(),
            scan_duration_ms: summary.scan_duration_ms,
            walk_duration_ms: summary.walk_duration_ms,
            fingerprint_duration_ms: summary.fingerprint_duration_ms,
            exit_code: exit_code.as_i32(),
            exit_code_name: exit_code.code_prefix().to_string(),
        }
    }
}

/// Complete JSON document for a scan.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    /// All duplicate groups
    pub duplicates: Vec<JsonDuplicateGroup>,
    /// Scan summary
    pub summary: JsonSummary,
}

impl JsonOutput {
    /// Build the JSON document from scan results.
    #[must_use]
    pub fn new(groups: &[DuplicateGroup], summary: &ScanSummary, exit_code: ExitCode) -> Self {
        Self {
            duplicates: groups.iter().map(JsonDuplicateGroup::from_group).collect(),
            summary: JsonSummary::from_summary(summary, exit_code),
        }
    }

    /// Compact JSON string.
    ///
    /// # Errors
    ///
    /// Returns a serialization error (should not happen for this type).
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Pretty-printed JSON string.
    ///
    /// # Errors
    ///
    /// Returns a serialization error (should not happen for this type).
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write pretty JSON to the given writer.
    ///
    /// # Errors
    ///
    /// Returns any I/O or serialization error.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        let json = self.to_json_pretty()?;
        writeln!(writer, "{}", json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplicates::PhotoRecord;
    use std::path::PathBuf;

    fn sample() -> (Vec<DuplicateGroup>, ScanSummary) {
        let groups = vec![DuplicateGroup::new(
            0xFFFE_0001,
            vec![
                PhotoRecord::new(PathBuf::from("/pics/big.jpg"), 0xFFFE_0001, 1000),
                PhotoRecord::new(PathBuf::from("/pics/copy.jpg"), 0xFFFE_0001, 10),
            ],
        )];
        let summary = ScanSummary {
            total_files: 3,
            fingerprinted_files: 3,
            ..Default::default()
        };
        (groups, summary)
    }

    #[test]
    fn test_json_group_conversion() {
        let (groups, _) = sample();
        let json_group = JsonDuplicateGroup::from_group(&groups[0]);

        assert_eq!(json_group.fingerprint, "fffe0001");
        assert_eq!(json_group.canonical, "/pics/big.jpg");
        assert_eq!(json_group.member_count, 2);
        assert_eq!(json_group.files.len(), 2);
    }

    #[test]
    fn test_json_output_parses_back() {
        let (groups, summary) = sample();
        let output = JsonOutput::new(&groups, &summary, ExitCode::Success);
        let json = output.to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["duplicates"][0]["member_count"], 2);
        assert_eq!(value["summary"]["total_files"], 3);
        assert_eq!(value["summary"]["exit_code_name"], "PD000");
    }

    #[test]
    fn test_json_output_empty_scan() {
        let summary = ScanSummary::default();
        let output = JsonOutput::new(&[], &summary, ExitCode::NoDuplicates);
        let json = output.to_json_pretty().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["duplicates"].as_array().unwrap().len(), 0);
        assert_eq!(value["summary"]["exit_code"], 2);
    }
}
