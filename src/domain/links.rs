//! Link extraction from markdown documents

use pulldown_cmark::{Event, Parser as MdParser, Tag, TagEnd};
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;
use std::sync::OnceLock;

/// `[text]({{< relref "path" >}})`
fn relref_link_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r#"\[([^\]]+)\]\(\{\{<\s*relref\s+["']([^"']+)["']\s*>\}\}\)"#).unwrap()
    })
}

/// `{{< relref "path" >}}` on its own
fn relref_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r#"\{\{<\s*relref\s+["']([^"']+)["']\s*>\}\}"#).unwrap())
}

/// A link found in a markdown document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Link {
    /// Inline markdown link: `[text](url)`
    Markdown { text: String, url: String },
    /// Markdown link whose target is a relref shortcode
    Relref { text: String, target: String },
    /// Bare relref shortcode outside any link text
    BareRelref { target: String },
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Link::Markdown { text, url } => write!(f, "[{}]({})", text, url),
            Link::Relref { text, target } => {
                write!(f, "[{}]({{{{< relref \"{}\" >}}}})", text, target)
            }
            Link::BareRelref { target } => write!(f, "{{{{< relref \"{}\" >}}}}", target),
        }
    }
}

/// Collect every link in a markdown document
pub fn extract_links(markdown: &str) -> BTreeSet<Link> {
    let mut links = BTreeSet::new();
    collect_markdown_links(markdown, &mut links);
    collect_relref_links(markdown, &mut links);
    links
}

/// Links present in `updated` but not in `original`, sorted
pub fn added_links(original: &str, updated: &str) -> Vec<Link> {
    let before = extract_links(original);
    extract_links(updated)
        .into_iter()
        .filter(|link| !before.contains(link))
        .collect()
}

fn collect_markdown_links(markdown: &str, output: &mut BTreeSet<Link>) {
    // (destination, accumulated text) for the link currently open
    let mut current: Option<(String, String)> = None;

    for event in MdParser::new(markdown) {
        match event {
            Event::Start(Tag::Link { dest_url, .. }) => {
                current = Some((dest_url.to_string(), String::new()));
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buf)) = current.as_mut() {
                    buf.push_str(&text);
                }
            }
            Event::End(TagEnd::Link) => {
                if let Some((url, text)) = current.take() {
                    let text = text.trim().to_string();
                    if !url.is_empty() && !text.is_empty() {
                        output.insert(Link::Markdown { text, url });
                    }
                }
            }
            _ => {}
        }
    }
}

fn collect_relref_links(markdown: &str, output: &mut BTreeSet<Link>) {
    let mut covered: Vec<Range<usize>> = Vec::new();

    for caps in relref_link_regex().captures_iter(markdown) {
        if let Some(whole) = caps.get(0) {
            covered.push(whole.range());
        }
        output.insert(Link::Relref {
            text: caps[1].trim().to_string(),
            target: caps[2].to_string(),
        });
    }

    for caps in relref_regex().captures_iter(markdown) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let inside_link = covered
            .iter()
            .any(|range| range.start <= whole.start() && whole.end() <= range.end);
        if !inside_link {
            output.insert(Link::BareRelref {
                target: caps[1].to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_markdown_links() {
        let links = extract_links("See [the intro](/blog/intro/) and [`code` docs](https://x.dev).");
        assert!(links.contains(&Link::Markdown {
            text: "the intro".to_string(),
            url: "/blog/intro/".to_string()
        }));
        assert!(links.contains(&Link::Markdown {
            text: "code docs".to_string(),
            url: "https://x.dev".to_string()
        }));
    }

    #[test]
    fn test_images_are_not_links() {
        let links = extract_links("![diagram](/img/diagram.png)");
        assert!(links.is_empty());
    }

    #[test]
    fn test_relref_link_is_not_double_counted() {
        let links = extract_links(r#"Read [setup]({{< relref "blog/setup.md" >}}) first."#);
        assert_eq!(links.len(), 1);
        assert!(links.contains(&Link::Relref {
            text: "setup".to_string(),
            target: "blog/setup.md".to_string()
        }));
    }

    #[test]
    fn test_bare_relref() {
        let links = extract_links(r#"Permalink: {{< relref 'pages/about.md' >}}"#);
        assert!(links.contains(&Link::BareRelref {
            target: "pages/about.md".to_string()
        }));
    }

    #[test]
    fn test_added_links_ignores_existing() {
        let original = "Intro with [old](/old/).";
        let updated = "Intro with [old](/old/) and [new](/new/).\n\nAlso {{< relref \"x.md\" >}}";
        let added = added_links(original, updated);
        assert_eq!(
            added,
            vec![
                Link::Markdown {
                    text: "new".to_string(),
                    url: "/new/".to_string()
                },
                Link::BareRelref {
                    target: "x.md".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_no_links_added_for_prose_change() {
        assert!(added_links("Some text.", "Some better text.").is_empty());
    }

    #[test]
    fn test_display_formats() {
        let md = Link::Markdown {
            text: "a".to_string(),
            url: "/a/".to_string(),
        };
        let relref = Link::Relref {
            text: "b".to_string(),
            target: "b.md".to_string(),
        };
        let bare = Link::BareRelref {
            target: "c.md".to_string(),
        };
        assert_eq!(md.to_string(), "[a](/a/)");
        assert_eq!(relref.to_string(), "[b]({{< relref \"b.md\" >}})");
        assert_eq!(bare.to_string(), "{{< relref \"c.md\" >}}");
    }
}
