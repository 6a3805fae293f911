//! Output boundary: writing, backing up and installing the hosts file.
//!
//! The merge pipeline is a pure sequence transformation; everything that
//! touches the filesystem on the way out lives here.

use anyhow::{Context, Result};
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::info;

/// System hosts file location on Unix.
const SYSTEM_HOSTS: &str = "/etc/hosts";

/// Write the rendered hosts file atomically.
///
/// Parent directories are created as needed. Uses tempfile + rename so a
/// crash mid-write never leaves a truncated hosts file behind.
pub fn write_hosts(path: &Path, content: &str) -> Result<()> {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    std::fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;

    let mut temp_file = NamedTempFile::new_in(parent)
        .context("Failed to create temporary file for hosts output")?;

    temp_file.write_all(content.as_bytes())?;
    temp_file.as_file().sync_all()?;

    temp_file
        .persist(path)
        .with_context(|| format!("Failed to persist hosts file: {}", path.display()))?;

    Ok(())
}

/// Copy an existing hosts file aside before it is overwritten.
///
/// The backup lands beside the original as `<name>-YYYY-MM-DD-HH-MM-SS`.
/// Returns the backup path, or `None` when there was nothing to back up.
pub fn backup_existing(path: &Path) -> Result<Option<PathBuf>> {
    if !path.is_file() {
        return Ok(None);
    }

    let stamp = Local::now().format("%Y-%m-%d-%H-%M-%S");
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "hosts".to_string());
    let backup = path.with_file_name(format!("{}-{}", file_name, stamp));

    std::fs::copy(path, &backup)
        .with_context(|| format!("Failed to back up {} to {}", path.display(), backup.display()))?;
    info!("Backed up previous hosts file to {}", backup.display());

    Ok(Some(backup))
}

/// Install the generated file as the system hosts file.
///
/// Requires root; the generated file is copied, not moved, so the output
/// tree keeps its artifact.
#[cfg(unix)]
pub fn replace_system_hosts(path: &Path) -> Result<()> {
    check_root()?;

    std::fs::copy(path, SYSTEM_HOSTS)
        .with_context(|| format!("Failed to copy {} to {}", path.display(), SYSTEM_HOSTS))?;
    info!("Replaced {} with {}", SYSTEM_HOSTS, path.display());

    Ok(())
}

#[cfg(not(unix))]
pub fn replace_system_hosts(_path: &Path) -> Result<()> {
    anyhow::bail!("Replacing the system hosts file is only supported on Unix")
}

/// Verify the process is running with root privileges.
#[cfg(unix)]
pub fn check_root() -> Result<()> {
    // SAFETY: geteuid() is a simple syscall that reads the effective user ID.
    // It has no preconditions, never fails, and doesn't modify any state.
    let euid = unsafe { libc::geteuid() };

    if euid != 0 {
        anyhow::bail!("Replacing the system hosts file requires root privileges. Please run with sudo.")
    }
    Ok(())
}
