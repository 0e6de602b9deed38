//! Listing export use case
//!
//! Turns the content listing into a JSON Lines file, one record per row.

use crate::domain::export::export_timestamp;
use crate::domain::ExportRecord;
use crate::error::Result;
use crate::infrastructure::content::write_atomic;
use crate::infrastructure::ListingSource;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::info;

/// Options for an export run
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Where the listing comes from
    pub source: ListingSource,

    /// JSON Lines file to (re)write
    pub output: PathBuf,
}

/// What an export run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub records: usize,
    pub output: PathBuf,
}

/// Service for exporting the listing
#[derive(Debug, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        ExportService
    }

    /// Execute the export with the current time as the timestamp
    pub fn execute(&self, options: ExportOptions) -> Result<ExportSummary> {
        self.execute_at(options, Utc::now())
    }

    /// Execute the export with a fixed timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The listing is missing, empty or malformed
    /// - The listing generator fails
    /// - The output file cannot be written
    pub fn execute_at(&self, options: ExportOptions, now: DateTime<Utc>) -> Result<ExportSummary> {
        let listing = options.source.load()?;
        let timestamp = export_timestamp(now);

        // Every row is serialized before anything touches the output file
        let mut lines = String::new();
        for row in listing.rows() {
            lines.push_str(&ExportRecord::from_row(row, &timestamp).to_json_line()?);
            lines.push('\n');
        }

        write_atomic(&options.output, &lines)?;

        info!(
            records = listing.len(),
            output = %options.output.display(),
            "export written"
        );

        Ok(ExportSummary {
            records: listing.len(),
            output: options.output,
        })
    }
}
