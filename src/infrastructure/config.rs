//! Configuration file (`sitepipe.toml`)

use crate::error::{Result, SitepipeError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "sitepipe.toml";

pub const DEFAULT_EXPORT_OUTPUT: &str = "posts_export.jsonl";
pub const DEFAULT_CONTENT_FOLDER: &str = "content/blog";
pub const DEFAULT_PROMPT_FILE: &str = ".github/prompts/generate-links.md";
pub const DEFAULT_MAX_FILES: usize = 10;
pub const DEFAULT_CHAT_PROGRAM: &str = "copilot";
pub const DEFAULT_CHAT_ARGS: [&str; 2] = ["--allow-all-tools", "--silent"];
pub const DEFAULT_GRAPH_OUTPUT: &str = "graph.csv";
pub const DEFAULT_MAX_DEPTH: u32 = 5;
pub const DEFAULT_CRAWL_DELAY: f64 = 0.5;

/// Settings read from the optional config file.
///
/// Every value is optional; flags and environment variables take precedence.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub export: ExportConfig,
    pub links: LinksConfig,
    pub graph: GraphConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    pub listing: Option<PathBuf>,
    pub site_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinksConfig {
    pub listing: Option<PathBuf>,
    pub site_dir: Option<PathBuf>,
    pub content_folder: Option<PathBuf>,
    pub prompt_file: Option<PathBuf>,
    pub max_files: Option<usize>,
    pub chat_program: Option<String>,
    pub chat_args: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    pub output: Option<PathBuf>,
    pub max_pages: Option<usize>,
    pub max_depth: Option<u32>,
    pub respect_robots: Option<bool>,
    pub delay: Option<f64>,
}

impl Config {
    /// Load an explicitly named config file, or `sitepipe.toml` from the
    /// current directory when present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => Self::load_from_dir(&std::env::current_dir()?),
        }
    }

    /// Load `sitepipe.toml` from `dir`, falling back to defaults if absent
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(Config::default());
        }
        Self::load_from_file(&path)
    }

    /// Load a config file that must exist
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SitepipeError::Config(format!("Config file not found: {}", path.display()))
            } else {
                SitepipeError::Io(e)
            }
        })?;

        toml::from_str(&contents).map_err(|e| {
            SitepipeError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}
