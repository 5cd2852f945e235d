//! Output formatters for duplicate scan results.
//!
//! Presentation only; the scan result is the same `(groups, summary)`
//! pair for every format:
//! - text for humans
//! - JSON for automation and scripting
//! - CSV for spreadsheet import

pub mod csv;
pub mod json;
pub mod text;

// Re-export main types
pub use csv::CsvOutput;
pub use json::JsonOutput;
pub use text::TextOutput;
