//! Content folder access

use crate::error::{Result, SitepipeError};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory names never descended into
const EXCLUDED_DIRS: [&str; 2] = ["node_modules", ".git"];

/// Markdown files that are never annotated
const EXCLUDED_FILES: [&str; 3] = ["notes.md", "links.md", "_index.md"];

/// Markdown tree eligible for link annotation
#[derive(Debug, Clone)]
pub struct ContentFolder {
    root: PathBuf,
}

impl ContentFolder {
    /// Open an existing content folder
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(SitepipeError::InvalidInput(format!(
                "Content folder {} does not exist",
                root.display()
            )));
        }
        Ok(ContentFolder { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All annotatable markdown files, sorted by path
    pub fn markdown_files(&self) -> Vec<PathBuf> {
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                entry
                    .file_name()
                    .to_str()
                    .is_none_or(|name| !EXCLUDED_DIRS.contains(&name))
            });

        let mut files = Vec::new();
        for entry in walker {
            let Ok(entry) = entry else {
                continue;
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            if name.ends_with(".md") && !EXCLUDED_FILES.contains(&name) {
                files.push(entry.into_path());
            }
        }
        files
    }

    /// Whether `path` lies inside this folder
    pub fn contains(&self, path: &Path) -> bool {
        match (fs::canonicalize(&self.root), fs::canonicalize(path)) {
            (Ok(root), Ok(path)) => path.starts_with(root),
            _ => false,
        }
    }

    pub fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(SitepipeError::Io)
    }

    pub fn write(&self, path: &Path, content: &str) -> Result<()> {
        write_atomic(path, content)
    }
}

/// `/`-separated form of a path, for matching against listing paths
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Write via a temp file in the same directory, then rename into place.
///
/// On Windows, `rename` does not overwrite existing files, so the destination
/// is removed first.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_name = format!(
        "{}.sitepipe-tmp-{}",
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("output"),
        std::process::id()
    );
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, content)?;

    if cfg!(windows) && path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&tmp_path, path)?;
    Ok(())
}
