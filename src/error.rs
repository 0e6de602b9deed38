//! Error types for sitepipe

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sitepipe
#[derive(Debug, Error)]
pub enum SitepipeError {
    #[error("Required tool not found: {tool}")]
    MissingTool { tool: String, install_hint: String },

    #[error("Listing file not found: {0}")]
    ListingNotFound(PathBuf),

    #[error("Listing contains no rows: {0}")]
    EmptyListing(String),

    #[error("Malformed listing: {0}")]
    MalformedListing(String),

    #[error("No prompt provided: {0}")]
    PromptUnresolved(String),

    #[error("COPILOT_GITHUB_TOKEN environment variable is required")]
    MissingToken,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{tool} failed: {message}")]
    ExternalTool { tool: String, message: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
}

impl SitepipeError {
    /// Shorthand for an external tool failure
    pub fn external(tool: impl Into<String>, message: impl Into<String>) -> Self {
        SitepipeError::ExternalTool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SitepipeError::MissingTool { .. } => 2,
            SitepipeError::ListingNotFound(_)
            | SitepipeError::EmptyListing(_)
            | SitepipeError::MalformedListing(_)
            | SitepipeError::PromptUnresolved(_)
            | SitepipeError::MissingToken
            | SitepipeError::InvalidUrl(_)
            | SitepipeError::InvalidInput(_)
            | SitepipeError::Csv(_) => 3,
            SitepipeError::ExternalTool { .. } => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with remediation steps
    pub fn display_with_suggestions(&self) -> String {
        match self {
            SitepipeError::MissingTool { tool, install_hint } => {
                format!(
                    "Required tool not found: {}\n\n\
                    Suggestions:\n\
                    • {}\n\
                    • Make sure '{}' is on your PATH",
                    tool, install_hint, tool
                )
            }
            SitepipeError::ListingNotFound(path) => {
                format!(
                    "Listing file not found: {}\n\n\
                    Suggestions:\n\
                    • Generate one with: hugo list all > listing.csv\n\
                    • Point HUGO_LIST_FILE (or --listing) at the CSV file\n\
                    • Or pass --site-dir to run 'hugo list all' directly",
                    path.display()
                )
            }
            SitepipeError::EmptyListing(source) => {
                format!(
                    "Listing contains no rows: {}\n\n\
                    Suggestions:\n\
                    • Check that 'hugo list all' ran in the site root\n\
                    • A listing with only a header line is treated as empty",
                    source
                )
            }
            SitepipeError::PromptUnresolved(msg) => {
                format!(
                    "No prompt provided: {}\n\n\
                    Suggestions:\n\
                    • Set CUSTOM_PROMPT (or --prompt) to the prompt text\n\
                    • Set PROMPT_FILE (or --prompt-file) to a non-empty file",
                    msg
                )
            }
            SitepipeError::MissingToken => "COPILOT_GITHUB_TOKEN environment variable is required\n\n\
                Suggestions:\n\
                • Set the COPILOT_GITHUB_TOKEN secret in the workflow\n\
                • Export COPILOT_GITHUB_TOKEN locally before running"
                .to_string(),
            SitepipeError::InvalidUrl(url) => {
                format!(
                    "Invalid URL: '{}'\n\n\
                    The start URL needs a scheme and a host.\n\
                    Example: sitepipe graph --url https://example.com",
                    url
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using SitepipeError
pub type Result<T> = std::result::Result<T, SitepipeError>;
