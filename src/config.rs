//! Configuration management for Unihosts.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
///
/// All paths are interpreted relative to the base directory unless
/// absolute. CLI flags override file values; the file itself is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory of source subdirectories, each holding a hosts file
    pub data_path: PathBuf,

    /// Directory of extension subdirectories
    pub extensions_path: PathBuf,

    /// Whitelist file: literal substrings excluded from the output
    pub whitelist_file: PathBuf,

    /// Blacklist file: extra records merged after all sources
    pub blacklist_file: PathBuf,

    /// Optional preamble file copied verbatim after the static entries
    pub preamble_file: PathBuf,

    /// Name of the hosts file inside each source directory
    pub host_filename: String,

    /// Name of the per-source metadata sidecar
    pub source_data_filename: String,

    /// IP address substituted into every generated record.
    /// Treated as an opaque string; never parsed or validated.
    pub target_ip: String,

    /// Preserve trailing rule text as comments
    pub keep_domain_comments: bool,

    /// Skip the static localhost entries in the final file
    pub skip_static_hosts: bool,

    /// Subfolder the generated hosts file is written into
    pub output_subfolder: String,

    /// Extensions merged in by default
    pub extensions: Vec<String>,

    /// Domains excluded from the output (suffix-pattern matching)
    pub exclusions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data"),
            extensions_path: PathBuf::from("extensions"),
            whitelist_file: PathBuf::from("whitelist"),
            blacklist_file: PathBuf::from("blacklist"),
            preamble_file: PathBuf::from("myhosts"),
            host_filename: "hosts".to_string(),
            source_data_filename: "update.json".to_string(),
            target_ip: "0.0.0.0".to_string(),
            keep_domain_comments: false,
            skip_static_hosts: false,
            output_subfolder: String::new(),
            extensions: Vec::new(),
            exclusions: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file does
    /// not exist. A file that exists but fails to parse is still an
    /// error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    ///
    /// The target IP is deliberately not validated: it is substituted
    /// verbatim into output records, and the original tool accepted any
    /// string there.
    pub fn validate(&self) -> Result<()> {
        if self.host_filename.is_empty() {
            anyhow::bail!("host_filename must not be empty");
        }
        if self.host_filename.contains('/') {
            anyhow::bail!(
                "host_filename must be a bare file name, got '{}'",
                self.host_filename
            );
        }
        if self.source_data_filename.is_empty() {
            anyhow::bail!("source_data_filename must not be empty");
        }
        if self.source_data_filename.contains('/') {
            anyhow::bail!(
                "source_data_filename must be a bare file name, got '{}'",
                self.source_data_filename
            );
        }
        if Path::new(&self.output_subfolder).is_absolute() {
            anyhow::bail!(
                "output_subfolder must be relative to the base directory, got '{}'",
                self.output_subfolder
            );
        }
        Ok(())
    }
}
