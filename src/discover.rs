//! GIR file discovery.
//!
//! Inputs may be files, directories (scanned non-recursively for `*.gir`)
//! or glob patterns. Each hit is paired with its module name, the file stem
//! without a trailing `-<version>`.

use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::warn;

static RE_VERSION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)-[0-9][0-9.]*$").unwrap());

const GIR_EXTENSION: &str = "gir";

/// A discovered GIR file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GirFile {
    /// `Gtk` for `Gtk-4.0.gir`.
    pub module: String,
    pub path: PathBuf,
}

/// Expand inputs into a sorted, de-duplicated list of GIR files.
pub fn discover(patterns: &[String]) -> Result<Vec<GirFile>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && p.extension().and_then(|e| e.to_str()) == Some(GIR_EXTENSION) {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    files.sort();
    files.dedup();

    Ok(files
        .into_iter()
        .map(|path| GirFile {
            module: module_name(&path),
            path,
        })
        .collect())
}

/// Module name of a GIR file: `/usr/share/gir-1.0/Gtk-4.0.gir` -> `Gtk`.
pub fn module_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    match RE_VERSION_SUFFIX.captures(&stem) {
        Some(caps) => caps[1].to_string(),
        None => stem,
    }
}
