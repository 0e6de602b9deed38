//! Where the content listing comes from

use crate::domain::Listing;
use crate::error::{Result, SitepipeError};
use crate::infrastructure::prerequisites::{require_program, HUGO_INSTALL_HINT};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

pub const HUGO_PROGRAM: &str = "hugo";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingSource {
    /// A CSV file previously written by `hugo list all`
    File(PathBuf),
    /// A Hugo site directory; `hugo list all` is run there
    HugoSite(PathBuf),
}

impl ListingSource {
    /// Read and parse the listing
    pub fn load(&self) -> Result<Listing> {
        match self {
            ListingSource::File(path) => {
                if !path.is_file() {
                    return Err(SitepipeError::ListingNotFound(path.clone()));
                }
                let text = fs::read_to_string(path).map_err(|e| match e.kind() {
                    io::ErrorKind::InvalidData => SitepipeError::MalformedListing(format!(
                        "{}: not valid UTF-8 text",
                        path.display()
                    )),
                    _ => SitepipeError::Io(e),
                })?;
                let listing = Listing::parse(&path.display().to_string(), &text)?;
                debug!(path = %path.display(), rows = listing.len(), "listing loaded");
                Ok(listing)
            }
            ListingSource::HugoSite(dir) => {
                let text = run_hugo_list(dir)?;
                let source = format!("hugo list all ({})", dir.display());
                let listing = Listing::parse(&source, &text)?;
                debug!(site = %dir.display(), rows = listing.len(), "listing generated");
                Ok(listing)
            }
        }
    }
}

fn run_hugo_list(dir: &Path) -> Result<String> {
    if !dir.is_dir() {
        return Err(SitepipeError::InvalidInput(format!(
            "Hugo site directory {} does not exist",
            dir.display()
        )));
    }

    let hugo = require_program(HUGO_PROGRAM, HUGO_INSTALL_HINT)?;
    info!(site = %dir.display(), "running hugo list all");

    let output = Command::new(&hugo)
        .args(["list", "all"])
        .current_dir(dir)
        .output()
        .map_err(|e| SitepipeError::external(HUGO_PROGRAM, format!("failed to launch: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SitepipeError::external(
            HUGO_PROGRAM,
            format!("list all exited with {}: {}", output.status, stderr.trim()),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
