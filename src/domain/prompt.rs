//! Chat request construction and response extraction for link annotation

use crate::domain::listing::ListingRow;
use regex::Regex;
use std::sync::OnceLock;

fn file_block_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?s)===FILE_START:(.+?)===\s*(.*?)\s*===FILE_END:(.+?)===").unwrap()
    })
}

/// A published page the model may link to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCandidate {
    pub title: String,
    pub path: String,
    pub permalink: String,
}

impl From<&ListingRow> for LinkCandidate {
    fn from(row: &ListingRow) -> Self {
        LinkCandidate {
            title: row.title.clone(),
            path: row.path.clone(),
            permalink: row.permalink.clone(),
        }
    }
}

/// Build the full request sent to the chat CLI for one file
pub fn build_request(
    prompt: &str,
    file_path: &str,
    content: &str,
    candidates: &[LinkCandidate],
) -> String {
    let mut request = String::new();
    request.push_str(prompt.trim_end());
    request.push_str("\n\n## Published Pages\n\n");

    if candidates.is_empty() {
        request.push_str("(no other published pages)\n");
    } else {
        for candidate in candidates {
            request.push_str(&format!(
                "- {} | path: {} | permalink: {}\n",
                candidate.title, candidate.path, candidate.permalink
            ));
        }
    }

    request.push_str(
        "\n**CRITICAL: ONLY link to pages from this list. \
        If a page is not in this list, DO NOT create a link to it.**\n",
    );

    request.push_str(&format!(
        "\n## File: {}\n\n````markdown\n{}\n````\n",
        file_path,
        content.trim_end()
    ));

    request.push_str(&format!(
        "\n## Instructions\n\n\
        Return the complete updated markdown for {} with internal links added, \
        wrapped as:\n\n\
        ===FILE_START:{}===\n\
        [updated markdown content]\n\
        ===FILE_END:{}===\n\n\
        Keep front matter and all existing text unchanged apart from the added links.\n",
        file_path, file_path, file_path
    ));

    request
}

/// Pull the updated document for `file_path` out of a chat response.
///
/// Accepts a `FILE_START`/`FILE_END` block naming the file, a reply wrapped
/// in a single code fence, or the bare document. Returns `None` when the
/// response holds nothing usable or only blocks for other files.
pub fn extract_updated_content(response: &str, file_path: &str) -> Option<String> {
    let response = response.trim();
    if response.is_empty() {
        return None;
    }

    let mut saw_block = false;
    for caps in file_block_regex().captures_iter(response) {
        saw_block = true;
        let start = caps[1].trim();
        let end = caps[3].trim();
        if start == end && paths_match(start, file_path) {
            return Some(caps[2].to_string());
        }
    }
    // Blocks for other files only; the reply is not this document
    if saw_block {
        return None;
    }

    if let Some(inner) = strip_code_fence(response) {
        return Some(inner.to_string());
    }

    Some(response.to_string())
}

fn paths_match(reported: &str, expected: &str) -> bool {
    let reported = reported.replace('\\', "/");
    let expected = expected.replace('\\', "/");
    reported == expected
        || reported.ends_with(&format!("/{}", expected))
        || expected.ends_with(&format!("/{}", reported))
}

fn strip_code_fence(text: &str) -> Option<&str> {
    let (opening, rest) = text.split_once('\n')?;
    let fence_len = opening.len() - opening.trim_start_matches('`').len();
    if fence_len < 3 {
        return None;
    }

    let body = rest.trim_end().strip_suffix(&opening[..fence_len])?;
    Some(body.trim_end_matches('\n'))
}
