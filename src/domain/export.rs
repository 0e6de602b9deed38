//! Export records written as JSON Lines

use crate::domain::content_type::ContentType;
use crate::domain::listing::ListingRow;
use crate::error::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// One exported line: the listing row plus derived fields.
///
/// Field order here is the key order in the written JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRecord {
    pub path: String,
    pub slug: String,
    pub title: String,
    pub date: String,
    #[serde(rename = "expiryDate")]
    pub expiry_date: String,
    #[serde(rename = "publishDate")]
    pub publish_date: String,
    pub draft: bool,
    pub permalink: String,
    pub kind: String,
    pub section: String,
    pub content_type: ContentType,
    pub export_timestamp: String,
}

impl ExportRecord {
    pub fn from_row(row: &ListingRow, export_timestamp: &str) -> Self {
        ExportRecord {
            path: row.path.clone(),
            slug: row.slug.clone(),
            title: row.title.clone(),
            date: row.date.clone(),
            expiry_date: row.expiry_date.clone(),
            publish_date: row.publish_date.clone(),
            draft: row.draft,
            permalink: row.permalink.clone(),
            kind: row.kind.clone(),
            section: row.section.clone(),
            content_type: ContentType::from_path(&row.path),
            export_timestamp: export_timestamp.to_string(),
        }
    }

    /// Serialize as a single JSON line (no trailing newline)
    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Format the export timestamp as RFC 3339 UTC with microseconds
pub fn export_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Micros, false)
}
