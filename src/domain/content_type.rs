//! Content type classification from a listing path

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Blog,
    Page,
    Prompt,
    Other,
}

impl ContentType {
    /// Classify a Hugo content path (e.g. `content/blog/post/index.md`).
    ///
    /// Matching is case-insensitive and treats `\` as `/`. The first marker
    /// found wins, checked in the order blog, pages, prompts.
    pub fn from_path(path: &str) -> Self {
        let normalized = path.trim().to_lowercase().replace('\\', "/");
        if normalized.is_empty() {
            return ContentType::Other;
        }

        if normalized.contains("/blog/") {
            ContentType::Blog
        } else if normalized.contains("/pages/") {
            ContentType::Page
        } else if normalized.contains("/prompts/") {
            ContentType::Prompt
        } else {
            ContentType::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Blog => "blog",
            ContentType::Page => "page",
            ContentType::Prompt => "prompt",
            ContentType::Other => "other",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
