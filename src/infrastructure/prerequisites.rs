//! Checks for external tools on PATH

use crate::error::{Result, SitepipeError};
use std::path::{Path, PathBuf};

pub const HUGO_INSTALL_HINT: &str = "Install Hugo: https://gohugo.io/installation/";
pub const COPILOT_INSTALL_HINT: &str = "Install the Copilot CLI with: npm install -g @github/copilot";

/// Locate `program`, either as a path or by searching PATH
pub fn find_program(program: &str) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 || candidate.is_absolute() {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .flat_map(|dir| executable_names(program).map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

#[cfg(windows)]
fn executable_names(program: &str) -> impl Iterator<Item = String> + '_ {
    ["", ".exe", ".cmd", ".bat"]
        .into_iter()
        .map(move |ext| format!("{}{}", program, ext))
}

#[cfg(not(windows))]
fn executable_names(program: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(program.to_string())
}

/// Fail with a missing-tool error unless `program` can be found
pub fn require_program(program: &str, install_hint: &str) -> Result<PathBuf> {
    find_program(program).ok_or_else(|| SitepipeError::MissingTool {
        tool: program.to_string(),
        install_hint: install_hint.to_string(),
    })
}
