//! Sources inspection command implementation.

use anyhow::Result;
use std::path::Path;

use crate::cli::SourcesAction;
use crate::config::Config;
use crate::sources::SourceLayout;

/// Run the sources command.
pub fn run(action: SourcesAction, config_path: &Path, base_dir: &Path) -> Result<()> {
    match action {
        SourcesAction::List { extensions } => list_sources(&extensions, config_path, base_dir),
    }
}

/// List discovered source directories with their sidecar metadata.
fn list_sources(extensions: &[String], config_path: &Path, base_dir: &Path) -> Result<()> {
    let config = Config::load_or_default(config_path)?;
    let layout = SourceLayout::new(base_dir, &config);

    let extensions = layout.resolve_extensions(extensions);
    let reports = layout.source_reports(&extensions);

    if reports.is_empty() {
        println!("No sources found under {}", layout.data_path.display());
        println!("Each source is a subdirectory holding a '{}' file.", config.host_filename);
        return Ok(());
    }

    println!("Sources ({}):", reports.len());
    for report in &reports {
        let status = if report.has_hosts { "" } else { " [no hosts file]" };
        let display_name = report
            .info
            .as_ref()
            .and_then(|i| i.name.as_deref())
            .unwrap_or(&report.name);
        match report.info.as_ref().and_then(|i| i.url.as_deref()) {
            Some(url) => println!("  {:<24} {}{}", display_name, url, status),
            None => println!("  {:<24}{}", display_name, status),
        }
    }

    Ok(())
}
