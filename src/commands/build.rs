//! Build command implementation.

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;
use tracing::{info, warn};

use crate::cli::BuildArgs;
use crate::config::Config;
use crate::exclusion::{is_valid_domain_format, ExclusionSet};
use crate::header::{self, HeaderMeta};
use crate::lock::LockGuard;
use crate::merge::{merge, MergeOptions};
use crate::output;
use crate::sources::{self, SourceLayout};
use crate::utils::{format_count, format_count_with_separator};

/// Name of the lock file guarding a base directory.
const LOCK_FILENAME: &str = ".unihosts.lock";

/// Run the build command.
pub fn run(args: BuildArgs, config_path: &Path, base_dir: &Path) -> Result<()> {
    let config = apply_overrides(Config::load_or_default(config_path)?, &args);
    config.validate()?;

    // One build per base directory at a time
    let _lock = LockGuard::acquire(&base_dir.join(LOCK_FILENAME))?;

    let layout = SourceLayout::new(base_dir, &config);
    let extensions = layout.resolve_extensions(&config.extensions);

    let files = layout.collect_source_files(&extensions);
    if files.is_empty() {
        warn!(
            "No source files found under {}; the output will only contain static entries",
            layout.data_path.display()
        );
    }
    info!("Merging {} source files", files.len());
    let merged = sources::read_concatenated(&files);
    info!("Read {} lines", format_count(merged.lines().count()));

    let exclusions = build_exclusions(&layout, &config.exclusions)?;
    if !exclusions.is_empty() {
        info!("Applying {} exclusion rules", exclusions.len());
    }

    let options = MergeOptions {
        target_ip: config.target_ip.clone(),
        keep_domain_comments: config.keep_domain_comments,
    };
    let result = merge(merged.lines(), &exclusions, &options);

    let meta = HeaderMeta {
        date: Utc::now().format("%B %d %Y").to_string(),
        extensions,
        unique_count: result.unique_count,
        output_subfolder: config.output_subfolder.clone(),
        skip_static_hosts: config.skip_static_hosts,
        is_linux_host: cfg!(target_os = "linux"),
        local_hostname: sys_info::hostname().ok(),
        preamble: sources::load_preamble(&layout.preamble_file),
    };
    let rendered = header::render(&result.lines, &meta);

    let hosts_path = base_dir
        .join(&config.output_subfolder)
        .join(&config.host_filename);
    if args.backup {
        output::backup_existing(&hosts_path)?;
    }
    output::write_hosts(&hosts_path, &rendered)
        .with_context(|| format!("Failed to write {}", hosts_path.display()))?;

    println!(
        "[OK] Hosts file saved to {} ({} unique entries)",
        hosts_path.display(),
        format_count_with_separator(result.unique_count)
    );

    if args.replace {
        output::replace_system_hosts(&hosts_path)?;
        println!("[OK] System hosts file replaced");
    }

    Ok(())
}

/// Fold CLI flags over the loaded configuration.
fn apply_overrides(mut config: Config, args: &BuildArgs) -> Config {
    if let Some(ref ip) = args.target_ip {
        config.target_ip = ip.clone();
    }
    if args.keep_domain_comments {
        config.keep_domain_comments = true;
    }
    if args.skip_static_hosts {
        config.skip_static_hosts = true;
    }
    if let Some(ref output) = args.output {
        config.output_subfolder = output.clone();
    }
    if !args.extensions.is_empty() {
        config.extensions = args.extensions.clone();
    }
    config.exclusions.extend(args.exclusions.iter().cloned());
    config
}

/// Assemble the exclusion set from the whitelist file and the configured
/// exclusion domains.
fn build_exclusions(layout: &SourceLayout, domains: &[String]) -> Result<ExclusionSet> {
    let mut exclusions = ExclusionSet::from_whitelist(sources::load_whitelist(&layout.whitelist_file));

    for domain in domains {
        if !is_valid_domain_format(domain) {
            warn!(
                "Ignoring invalid exclusion domain '{}': use a bare domain like example.com",
                domain
            );
            continue;
        }
        exclusions.exclude_domain(domain)?;
    }

    Ok(exclusions)
}
