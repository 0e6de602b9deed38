//! Link annotation use case
//!
//! Asks the chat CLI to add internal links to published markdown files and
//! writes back the files that gained links.

use crate::domain::links::added_links;
use crate::domain::prompt::{build_request, extract_updated_content};
use crate::domain::{Link, LinkCandidate, ListingRow};
use crate::error::{Result, SitepipeError};
use crate::infrastructure::content::display_path;
use crate::infrastructure::{ChatClient, ContentFolder, ListingSource};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where the prompt text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSource {
    /// Inline prompt; wins over the file when non-blank
    pub override_text: Option<String>,
    pub file: PathBuf,
}

impl PromptSource {
    pub fn resolve(&self) -> Result<String> {
        if let Some(text) = self.override_text.as_deref() {
            if !text.trim().is_empty() {
                return Ok(text.to_string());
            }
        }

        if !self.file.is_file() {
            return Err(SitepipeError::PromptUnresolved(format!(
                "prompt file {} not found",
                self.file.display()
            )));
        }

        let text = fs::read_to_string(&self.file)?;
        if text.trim().is_empty() {
            return Err(SitepipeError::PromptUnresolved(format!(
                "prompt file {} is empty",
                self.file.display()
            )));
        }
        Ok(text)
    }
}

/// Options for a link annotation run
#[derive(Debug, Clone)]
pub struct LinkOptions {
    pub source: ListingSource,
    pub content_folder: PathBuf,
    pub prompt: PromptSource,

    /// Process only this file
    pub target: Option<PathBuf>,

    /// Report without writing
    pub dry_run: bool,

    /// Continue past per-file failures
    pub keep_going: bool,

    pub max_files: usize,
}

/// Result for one processed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// New links were added (written unless dry run)
    Updated(Vec<Link>),
    /// The reply changed the text but added no link
    NoNewLinks,
    /// The reply matched the original
    Unchanged,
    /// The chat CLI or a file operation failed (only with keep-going)
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: String,
    pub outcome: FileOutcome,
}

/// Summary of a link annotation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    pub files: Vec<FileReport>,
    pub dry_run: bool,
    /// Why nothing was processed, when that is the case
    pub notice: Option<String>,
}

impl LinkReport {
    fn nothing_to_do(notice: impl Into<String>, dry_run: bool) -> Self {
        LinkReport {
            files: Vec::new(),
            dry_run,
            notice: Some(notice.into()),
        }
    }

    pub fn updated(&self) -> impl Iterator<Item = (&str, &[Link])> {
        self.files.iter().filter_map(|f| match &f.outcome {
            FileOutcome::Updated(links) => Some((f.path.as_str(), links.as_slice())),
            _ => None,
        })
    }

    pub fn updated_count(&self) -> usize {
        self.updated().count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().filter_map(|f| match &f.outcome {
            FileOutcome::Failed(msg) => Some((f.path.as_str(), msg.as_str())),
            _ => None,
        })
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }
}

/// Service for adding internal links through a chat client
pub struct LinkService<C: ChatClient> {
    chat: C,
}

impl<C: ChatClient> LinkService<C> {
    pub fn new(chat: C) -> Self {
        LinkService { chat }
    }

    /// Execute the annotation run
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The prompt cannot be resolved
    /// - The listing or content folder is missing or invalid
    /// - A named target file is not a published page in the content folder
    /// - The chat CLI fails for a file (unless `keep_going` is set)
    pub fn execute(&self, options: LinkOptions) -> Result<LinkReport> {
        let prompt = options.prompt.resolve()?;
        let listing = options.source.load()?;
        let folder = ContentFolder::open(&options.content_folder)?;

        let published: Vec<&ListingRow> = listing.published().collect();
        debug!(
            rows = listing.len(),
            published = published.len(),
            prompt_len = prompt.len(),
            "listing filtered"
        );

        if published.is_empty() {
            return Ok(LinkReport::nothing_to_do(
                "The listing contains no published pages (draft=false)",
                options.dry_run,
            ));
        }

        let targets = match &options.target {
            Some(target) => vec![self.check_target(&folder, &published, target)?],
            None => {
                let mut files: Vec<PathBuf> = folder
                    .markdown_files()
                    .into_iter()
                    .filter(|path| {
                        let shown = display_path(path);
                        published.iter().any(|row| row.matches_file(&shown))
                    })
                    .collect();

                if files.len() > options.max_files {
                    warn!(
                        found = files.len(),
                        limit = options.max_files,
                        "too many files, processing only the first ones"
                    );
                    files.truncate(options.max_files);
                }
                files
            }
        };

        if targets.is_empty() {
            return Ok(LinkReport::nothing_to_do(
                "No published markdown files matched the listing; \
                check that the content folder and listing paths agree",
                options.dry_run,
            ));
        }

        info!(files = targets.len(), dry_run = options.dry_run, "annotating files");

        let mut report = LinkReport {
            files: Vec::new(),
            dry_run: options.dry_run,
            notice: None,
        };

        for path in targets {
            let shown = display_path(&path);
            let result = self.process_file(&folder, &published, &prompt, &path, options.dry_run);
            let outcome = match result {
                Ok(outcome) => outcome,
                Err(e) if options.keep_going => {
                    warn!(file = %shown, error = %e, "file failed, continuing");
                    FileOutcome::Failed(e.to_string())
                }
                Err(e) => return Err(e),
            };
            report.files.push(FileReport {
                path: shown,
                outcome,
            });
        }

        Ok(report)
    }

    fn check_target(
        &self,
        folder: &ContentFolder,
        published: &[&ListingRow],
        target: &Path,
    ) -> Result<PathBuf> {
        if !target.is_file() {
            return Err(SitepipeError::InvalidInput(format!(
                "Target file {} does not exist",
                target.display()
            )));
        }
        if !folder.contains(target) {
            return Err(SitepipeError::InvalidInput(format!(
                "Target file {} is not inside content folder {}",
                target.display(),
                folder.root().display()
            )));
        }
        let shown = display_path(target);
        if !published.iter().any(|row| row.matches_file(&shown)) {
            return Err(SitepipeError::InvalidInput(format!(
                "Target file {} is not a published page in the listing",
                target.display()
            )));
        }
        Ok(target.to_path_buf())
    }

    fn process_file(
        &self,
        folder: &ContentFolder,
        published: &[&ListingRow],
        prompt: &str,
        path: &Path,
        dry_run: bool,
    ) -> Result<FileOutcome> {
        let shown = display_path(path);
        let original = folder.read(path)?;

        let candidates: Vec<LinkCandidate> = published
            .iter()
            .filter(|row| !row.matches_file(&shown))
            .map(|row| LinkCandidate::from(*row))
            .collect();

        let request = build_request(prompt, &shown, &original, &candidates);
        info!(file = %shown, chat = self.chat.name(), "requesting links");
        let response = self.chat.complete(&request)?;

        let Some(mut updated) = extract_updated_content(&response, &shown) else {
            return Ok(FileOutcome::Unchanged);
        };
        if original.ends_with('\n') && !updated.ends_with('\n') {
            updated.push('\n');
        }

        if updated == original {
            debug!(file = %shown, "no changes needed");
            return Ok(FileOutcome::Unchanged);
        }

        let links = added_links(&original, &updated);
        if links.is_empty() {
            debug!(file = %shown, "content changed but no new links detected");
            return Ok(FileOutcome::NoNewLinks);
        }

        if !dry_run {
            folder.write(path, &updated)?;
        }
        Ok(FileOutcome::Updated(links))
    }
}
