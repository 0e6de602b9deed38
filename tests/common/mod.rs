#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

pub const HEADER: &str = "path,slug,title,date,expiryDate,publishDate,draft,permalink,kind,section\n";

pub fn sitepipe_cmd() -> Command {
    let mut cmd = Command::cargo_bin("sitepipe").unwrap();
    for var in [
        "HUGO_LIST_FILE",
        "HUGO_SITE_DIR",
        "OUTPUT_FILE",
        "CONTENT_FOLDER",
        "PROMPT_FILE",
        "CUSTOM_PROMPT",
        "TARGET_FILE",
        "DRY_RUN",
        "KEEP_GOING",
        "MAX_FILES",
        "CHAT_PROGRAM",
        "COPILOT_GITHUB_TOKEN",
        "WEBSITE_URL",
        "MAX_PAGES",
        "MAX_DEPTH",
        "RESPECT_ROBOTS",
        "CRAWL_DELAY",
        "DEBUG",
        "RUST_LOG",
        "HTTP_PROXY",
        "HTTPS_PROXY",
        "ALL_PROXY",
        "http_proxy",
        "https_proxy",
        "all_proxy",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Write `content` to `root/rel`, creating parent directories
pub fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

/// Listing CSV with one row per `(path, draft)` pair
pub fn listing(rows: &[(&str, bool)]) -> String {
    let mut text = HEADER.to_string();
    for (i, (path, draft)) in rows.iter().enumerate() {
        text.push_str(&format!(
            "{},post-{},Post {},2025-01-0{},,,{},/blog/post-{}/,page,blog\n",
            path,
            i,
            i,
            i + 1,
            draft,
            i
        ));
    }
    text
}

/// Executable shell script at `root/name`
#[cfg(unix)]
pub fn write_script(root: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = root.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}
