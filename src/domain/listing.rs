//! Content listing produced by `hugo list all`

use crate::error::{Result, SitepipeError};

/// Columns every listing must carry, in the order Hugo writes them
pub const LISTING_COLUMNS: [&str; 10] = [
    "path",
    "slug",
    "title",
    "date",
    "expiryDate",
    "publishDate",
    "draft",
    "permalink",
    "kind",
    "section",
];

/// One row of the listing, with values trimmed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingRow {
    pub path: String,
    pub slug: String,
    pub title: String,
    pub date: String,
    pub expiry_date: String,
    pub publish_date: String,
    pub draft: bool,
    pub permalink: String,
    pub kind: String,
    pub section: String,
}

impl ListingRow {
    /// A page is published when it is not flagged as a draft
    pub fn is_published(&self) -> bool {
        !self.draft
    }

    /// Whether this row describes the file at `file_path` (`/`-separated).
    ///
    /// Listing paths are relative to the site root, so a file matches when
    /// its path equals the listing path or ends with `/<listing path>`.
    pub fn matches_file(&self, file_path: &str) -> bool {
        let listed = self.path.replace('\\', "/");
        let listed = listed.trim_start_matches("./");
        if listed.is_empty() {
            return false;
        }
        let file = file_path.trim_start_matches("./");
        file == listed || file.ends_with(&format!("/{}", listed))
    }
}

/// Interpret the boolean-like `draft` column.
///
/// Hugo writes `true`/`false`; hand-edited listings sometimes use `1`/`yes`.
pub fn parse_draft(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "y"
    )
}

/// Header positions of the required columns
struct ColumnIndex([usize; LISTING_COLUMNS.len()]);

impl ColumnIndex {
    fn from_headers(source: &str, headers: &csv::StringRecord) -> Result<Self> {
        let mut positions = [0usize; LISTING_COLUMNS.len()];
        let mut missing = Vec::new();

        for (slot, column) in LISTING_COLUMNS.iter().enumerate() {
            match headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(column))
            {
                Some(pos) => positions[slot] = pos,
                None => missing.push(*column),
            }
        }

        if !missing.is_empty() {
            return Err(SitepipeError::MalformedListing(format!(
                "{}: missing column(s): {}",
                source,
                missing.join(", ")
            )));
        }

        Ok(ColumnIndex(positions))
    }

    fn row(&self, record: &csv::StringRecord) -> ListingRow {
        let field = |slot: usize| record.get(self.0[slot]).unwrap_or("").trim().to_string();

        ListingRow {
            path: field(0),
            slug: field(1),
            title: field(2),
            date: field(3),
            expiry_date: field(4),
            publish_date: field(5),
            draft: parse_draft(&field(6)),
            permalink: field(7),
            kind: field(8),
            section: field(9),
        }
    }
}

/// A parsed, non-empty listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    rows: Vec<ListingRow>,
}

impl Listing {
    /// Parse listing CSV text. `source` names the input in error messages.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The text is empty or holds only a header line
    /// - A required column is missing from the header
    /// - A row cannot be parsed or has the wrong number of fields
    pub fn parse(source: &str, text: &str) -> Result<Self> {
        let text = text.trim_start_matches('\u{feff}');
        if text.trim().is_empty() {
            return Err(SitepipeError::EmptyListing(source.to_string()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let index = ColumnIndex::from_headers(source, &headers)?;

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                // Line 1 is the header
                SitepipeError::MalformedListing(format!("{}: row {}: {}", source, i + 2, e))
            })?;
            rows.push(index.row(&record));
        }

        if rows.is_empty() {
            return Err(SitepipeError::EmptyListing(source.to_string()));
        }

        Ok(Listing { rows })
    }

    pub fn rows(&self) -> &[ListingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows that are not drafts, in listing order
    pub fn published(&self) -> impl Iterator<Item = &ListingRow> {
        self.rows.iter().filter(|row| row.is_published())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "path,slug,title,date,expiryDate,publishDate,draft,permalink,kind,section";

    #[test]
    fn test_parse_draft_values() {
        assert!(parse_draft("true"));
        assert!(parse_draft(" TRUE "));
        assert!(parse_draft("1"));
        assert!(parse_draft("yes"));
        assert!(!parse_draft("false"));
        assert!(!parse_draft("0"));
        assert!(!parse_draft(""));
    }

    #[test]
    fn test_parse_listing_rows_in_order() {
        let text = format!(
            "{}\n\
            content/blog/first/index.md,first,First Post,2025-01-01T00:00:00Z,,2025-01-01T00:00:00Z,false,https://example.com/blog/first/,page,blog\n\
            content/blog/second.md,second,Second,2025-01-02T00:00:00Z,,,true,https://example.com/blog/second/,page,blog\n",
            HEADER
        );

        let listing = Listing::parse("listing.csv", &text).unwrap();
        assert_eq!(listing.len(), 2);

        let first = &listing.rows()[0];
        assert_eq!(first.path, "content/blog/first/index.md");
        assert_eq!(first.title, "First Post");
        assert_eq!(first.publish_date, "2025-01-01T00:00:00Z");
        assert!(!first.draft);
        assert!(listing.rows()[1].draft);
    }

    #[test]
    fn test_parse_trims_values_and_handles_quotes() {
        let text = format!(
            "{}\n\"content/blog/a.md\",a,\"  Hello, World  \",,,,false,/a/,page,blog\n",
            HEADER
        );
        let listing = Listing::parse("listing.csv", &text).unwrap();
        assert_eq!(listing.rows()[0].title, "Hello, World");
    }

    #[test]
    fn test_columns_matched_by_name_not_position() {
        let text = "title,path,draft,slug,date,expiryDate,publishDate,permalink,kind,section\n\
                    Reordered,content/pages/about.md,false,about,,,,/about/,page,pages\n";
        let listing = Listing::parse("listing.csv", text).unwrap();
        assert_eq!(listing.rows()[0].path, "content/pages/about.md");
        assert_eq!(listing.rows()[0].title, "Reordered");
    }

    #[test]
    fn test_published_filters_drafts() {
        let text = format!(
            "{}\na.md,a,A,,,,false,/a/,page,blog\nb.md,b,B,,,,true,/b/,page,blog\nc.md,c,C,,,,,/c/,page,blog\n",
            HEADER
        );
        let listing = Listing::parse("listing.csv", &text).unwrap();
        let published: Vec<&str> = listing.published().map(|r| r.path.as_str()).collect();
        assert_eq!(published, vec!["a.md", "c.md"]);
    }

    #[test]
    fn test_matches_file() {
        let row = ListingRow {
            path: "content/blog/post/index.md".to_string(),
            ..ListingRow::default()
        };
        assert!(row.matches_file("content/blog/post/index.md"));
        assert!(row.matches_file("./content/blog/post/index.md"));
        assert!(row.matches_file("/srv/site/content/blog/post/index.md"));
        assert!(!row.matches_file("content/blog/other/index.md"));
        assert!(!row.matches_file("/srv/site/mycontent/blog/post/index.md"));
        assert!(!ListingRow::default().matches_file("content/blog/a.md"));
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let err = Listing::parse("listing.csv", "  \n").unwrap_err();
        assert!(matches!(err, SitepipeError::EmptyListing(_)));
    }

    #[test]
    fn test_header_only_is_rejected() {
        let err = Listing::parse("listing.csv", &format!("{}\n", HEADER)).unwrap_err();
        assert!(matches!(err, SitepipeError::EmptyListing(_)));
    }

    #[test]
    fn test_missing_columns_are_reported() {
        let err = Listing::parse("listing.csv", "path,title\na.md,A\n").unwrap_err();
        match err {
            SitepipeError::MalformedListing(msg) => {
                assert!(msg.contains("slug"));
                assert!(msg.contains("section"));
                assert!(!msg.contains("title"));
            }
            other => panic!("Expected MalformedListing, got {:?}", other),
        }
    }

    #[test]
    fn test_ragged_row_fails_whole_parse() {
        let text = format!("{}\na.md,a,A,,,,false,/a/,page,blog\nb.md,b\n", HEADER);
        let err = Listing::parse("listing.csv", &text).unwrap_err();
        match err {
            SitepipeError::MalformedListing(msg) => assert!(msg.contains("row 3")),
            other => panic!("Expected MalformedListing, got {:?}", other),
        }
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let text = format!("\u{feff}{}\na.md,a,A,,,,false,/a/,page,blog\n", HEADER);
        let listing = Listing::parse("listing.csv", &text).unwrap();
        assert_eq!(listing.rows()[0].path, "a.md");
    }
}
