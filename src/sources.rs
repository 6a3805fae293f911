//! Source discovery and concatenation.
//!
//! Sources live in a base directory laid out as one subdirectory per
//! source under `data/`, each holding a hosts file and an optional
//! `update.json` describing where it came from. Extensions follow the
//! same shape under `extensions/`. Collection order is fixed: base
//! sources, then selected extensions, then the blacklist file. The
//! merge pass is first-occurrence-wins, so order is part of the output
//! contract.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;

/// Sidecar metadata describing one source (`update.json`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourceInfo {
    pub name: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
}

/// One discovered source directory, for reporting.
#[derive(Debug, Clone)]
pub struct SourceReport {
    /// Directory name under `data/` or `extensions/<ext>/`.
    pub name: String,
    /// Whether the directory currently holds a hosts file.
    pub has_hosts: bool,
    /// Parsed sidecar metadata, when present and well-formed.
    pub info: Option<SourceInfo>,
}

/// Resolved filesystem layout for one run.
#[derive(Debug, Clone)]
pub struct SourceLayout {
    pub data_path: PathBuf,
    pub extensions_path: PathBuf,
    pub whitelist_file: PathBuf,
    pub blacklist_file: PathBuf,
    pub preamble_file: PathBuf,
    host_filename: String,
    source_data_filename: String,
}

impl SourceLayout {
    /// Resolve the configured layout against a base directory.
    pub fn new(base_dir: &Path, config: &Config) -> Self {
        Self {
            data_path: resolve(base_dir, &config.data_path),
            extensions_path: resolve(base_dir, &config.extensions_path),
            whitelist_file: resolve(base_dir, &config.whitelist_file),
            blacklist_file: resolve(base_dir, &config.blacklist_file),
            preamble_file: resolve(base_dir, &config.preamble_file),
            host_filename: config.host_filename.clone(),
            source_data_filename: config.source_data_filename.clone(),
        }
    }

    /// Extension names that actually exist as directories, sorted.
    pub fn available_extensions(&self) -> Vec<String> {
        let mut names: Vec<String> = list_nonhidden_dirs(&self.extensions_path)
            .into_iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        names.sort();
        names
    }

    /// Requested extensions intersected with the available ones, sorted.
    ///
    /// Unknown names are dropped with a warning rather than failing the
    /// run.
    pub fn resolve_extensions(&self, requested: &[String]) -> Vec<String> {
        let available: BTreeSet<String> = self.available_extensions().into_iter().collect();
        let requested: BTreeSet<String> = requested.iter().cloned().collect();

        for unknown in requested.difference(&available) {
            warn!("Ignoring unknown extension '{}'", unknown);
        }

        requested.intersection(&available).cloned().collect()
    }

    /// Collect every source file to merge, in merge order.
    pub fn collect_source_files(&self, extensions: &[String]) -> Vec<PathBuf> {
        let mut files = find_named_files(&self.data_path, &self.host_filename);

        for extension in extensions {
            let root = self.extensions_path.join(extension);
            files.extend(find_named_files(&root, &self.host_filename));
        }

        if self.blacklist_file.is_file() {
            files.push(self.blacklist_file.clone());
        }

        files
    }

    /// Report every source directory under `data/` and, for the given
    /// extensions, under `extensions/`.
    pub fn source_reports(&self, extensions: &[String]) -> Vec<SourceReport> {
        let mut roots = list_nonhidden_dirs(&self.data_path);
        for extension in extensions {
            roots.extend(list_nonhidden_dirs(&self.extensions_path.join(extension)));
        }
        roots.sort();

        roots
            .into_iter()
            .map(|dir| {
                let name = dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let has_hosts = dir.join(&self.host_filename).is_file();
                let info = self.read_source_info(&dir);
                SourceReport {
                    name,
                    has_hosts,
                    info,
                }
            })
            .collect()
    }

    fn read_source_info(&self, dir: &Path) -> Option<SourceInfo> {
        let path = dir.join(&self.source_data_filename);
        let content = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(info) => Some(info),
            Err(e) => {
                warn!("Ignoring malformed {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// Concatenate source texts byte-for-byte, in order.
///
/// An unreadable file contributes nothing; the pass continues.
pub fn read_concatenated(files: &[PathBuf]) -> String {
    let mut merged = String::new();
    for file in files {
        match fs::read_to_string(file) {
            Ok(content) => merged.push_str(&content),
            Err(e) => warn!("Skipping unreadable source {}: {}", file.display(), e),
        }
    }
    merged
}

/// Load whitelist entries: trimmed, non-blank, non-comment lines.
///
/// A missing whitelist file means no exclusions, not an error.
pub fn load_whitelist(path: &Path) -> Vec<String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => {
            debug!("No whitelist file at {}", path.display());
            return Vec::new();
        }
    };

    content
        .lines()
        .map(|line| line.trim_matches([' ', '\t', '\r']).to_string())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// Read the optional preamble file verbatim.
pub fn load_preamble(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok()
}

fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Non-hidden subdirectories of `root`, unsorted.
fn list_nonhidden_dirs(root: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(root) else {
        return Vec::new();
    };

    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .filter(|path| !is_hidden(path))
        .collect()
}

/// Recursively find files named `name` under `root`, in sorted path
/// order, skipping hidden entries.
fn find_named_files(root: &Path, name: &str) -> Vec<PathBuf> {
    let mut found = Vec::new();
    walk(root, name, &mut found);
    found.sort();
    found
}

fn walk(dir: &Path, name: &str, found: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.filter_map(|entry| entry.ok()) {
        let path = entry.path();
        if is_hidden(&path) {
            continue;
        }
        if path.is_dir() {
            walk(&path, name, found);
        } else if path.file_name().is_some_and(|n| n == name) {
            found.push(path);
        }
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}
