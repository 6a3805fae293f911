//! # Unihosts - Unified Hosts File Generator
//!
//! Merges many plain-text hosts sources (domain blocklists) into one
//! deduplicated, normalized hosts file with a generated header.
//!
//! ## Features
//!
//! - **Single-Pass Merge** - Streaming fold over all sources, first occurrence wins
//! - **Normalization** - Every record rewritten to `<target ip> <hostname>`, lowercased
//! - **Exclusions** - Whitelist literals plus subdomain-tolerant domain patterns
//! - **Extensions** - Optional topical source sets merged after the base sources
//! - **Deterministic** - Fixed source order, reproducible output for fixed inputs
//! - **Safe Output** - Atomic writes, optional timestamped backups
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Unihosts                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CLI (clap)                                                 │
//! │    └── Commands: build, sources, version                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Config (serde_yaml)                                        │
//! │    └── Paths, target IP, flags; CLI overrides               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Sources (std::fs)                                          │
//! │    ├── data/<source>/hosts + update.json metadata           │
//! │    └── extensions/<name>/hosts, blacklist, whitelist        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Merge pipeline (regex)                                     │
//! │    ├── Parser: classify lines, extract (ip, host, suffix)   │
//! │    ├── Exclusion: literal + suffix-pattern drops            │
//! │    ├── Normalizer: canonical output records                 │
//! │    └── Driver: dedupe on seen hostnames, count uniques      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (chrono date, banner, static entries, preamble)     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Output (tempfile atomic write, backup, /etc/hosts install) │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use unihosts::exclusion::ExclusionSet;
//! use unihosts::merge::{merge, MergeOptions};
//!
//! fn main() -> anyhow::Result<()> {
//!     let sources = "0.0.0.0 ads.example.com\n127.0.0.1 ads.example.com\n";
//!
//!     let mut exclusions = ExclusionSet::new();
//!     exclusions.exclude_domain("hulu.com")?;
//!
//!     let result = merge(sources.lines(), &exclusions, &MergeOptions::default());
//!     assert_eq!(result.unique_count, 1);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface definitions
//! - [`commands`] - CLI command implementations
//! - [`config`] - Configuration parsing and validation
//! - [`error`] - Typed pipeline errors
//! - [`exclusion`] - Whitelist literals and domain suffix patterns
//! - [`header`] - Banner, static entries and final assembly
//! - [`lock`] - File locking for concurrent build prevention
//! - [`merge`] - The merge/dedupe driver
//! - [`normalizer`] - Canonical output line rendering
//! - [`output`] - Atomic writes, backups, system hosts installation
//! - [`parser`] - Rule line classification and extraction
//! - [`sources`] - Source discovery and concatenation
//! - [`utils`] - Common utility functions (count formatting)

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod header;
pub mod lock;
pub mod merge;
pub mod normalizer;
pub mod output;
pub mod parser;
pub mod sources;
pub mod utils;

pub use cli::{Cli, Commands, SourcesAction};
pub use config::Config;
