//! CSV output formatter for duplicate scan results.
//!
//! One row per group member, so spreadsheet filters work directly:
//!
//! ```csv
//! group,fingerprint,canonical,path,pixel_area
//! 1,fffe0001,true,/pics/big.jpg,1000
//! 1,fffe0001,false,/pics/copy.jpg,10
//! ```

use std::io::Write;

use serde::Serialize;

use crate::duplicates::DuplicateGroup;

/// One CSV row.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    /// 1-based group number
    group: usize,
    /// Shared fingerprint as hex
    fingerprint: String,
    /// Whether this member is the canonical copy
    canonical: bool,
    /// Member path
    path: &'a str,
    /// Original pixel area
    pixel_area: u64,
}

/// CSV report writer.
pub struct CsvOutput<'a> {
    groups: &'a [DuplicateGroup],
}

impl<'a> CsvOutput<'a> {
    /// Create a CSV report over the duplicate groups.
    #[must_use]
    pub fn new(groups: &'a [DuplicateGroup]) -> Self {
        Self { groups }
    }

    /// Write all rows, with header, to the given writer.
    ///
    /// # Errors
    ///
    /// Returns any I/O or serialization error.
    pub fn write_to<W: Write>(&self, writer: W) -> anyhow::Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for (index, group) in self.groups.iter().enumerate() {
            let canonical_path = &group.canonical().path;
            for member in &group.members {
                let path = member.path.to_string_lossy();
                csv_writer.serialize(CsvRow {
                    group: index + 1,
                    fingerprint: group.fingerprint_hex(),
                    canonical: member.path == *canonical_path,
                    path: &path,
                    pixel_area: member.pixel_area,
                })?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// CSV document as a string.
    ///
    /// # Errors
    ///
    /// Returns any serialization error.
    pub fn to_string(&self) -> anyhow::Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}
