//! CLI argument parsing with clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "unihosts")]
#[command(author, version, about = "Unified hosts file generator")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "unihosts.yaml", global = true)]
    pub config: PathBuf,

    /// Base directory containing the data sources and output
    #[arg(long, default_value = ".", global = true)]
    pub base_dir: PathBuf,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge all configured sources into a unified hosts file
    Build(BuildArgs),

    /// Inspect the configured data sources
    Sources {
        #[command(subcommand)]
        action: SourcesAction,
    },

    /// Show version
    Version,
}

#[derive(Args)]
pub struct BuildArgs {
    /// Host extensions to include in the final hosts file
    #[arg(short, long, num_args = 0..)]
    pub extensions: Vec<String>,

    /// Target IP address for generated records
    #[arg(short = 'i', long = "ip")]
    pub target_ip: Option<String>,

    /// Keep domain line comments
    #[arg(short, long)]
    pub keep_domain_comments: bool,

    /// Skip the static localhost entries in the final hosts file
    #[arg(short, long)]
    pub skip_static_hosts: bool,

    /// Output subfolder for the generated hosts file
    #[arg(short, long)]
    pub output: Option<String>,

    /// Domains to exclude from the final hosts file
    #[arg(short = 'x', long = "exclude", value_name = "DOMAIN")]
    pub exclusions: Vec<String>,

    /// Back up the previous hosts file before it is overwritten
    #[arg(short, long)]
    pub backup: bool,

    /// Replace the system hosts file with the generated file
    #[arg(short, long)]
    pub replace: bool,
}

#[derive(Subcommand)]
pub enum SourcesAction {
    /// List all discovered sources and their metadata
    List {
        /// Include sources from these extensions
        #[arg(short, long, num_args = 0..)]
        extensions: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses_help() {
        // Verify the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_version_command() {
        let cli = Cli::try_parse_from(["unihosts", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_cli_build_defaults() {
        let cli = Cli::try_parse_from(["unihosts", "build"]).unwrap();
        match cli.command {
            Commands::Build(args) => {
                assert!(args.extensions.is_empty());
                assert!(args.target_ip.is_none());
                assert!(!args.keep_domain_comments);
                assert!(!args.skip_static_hosts);
                assert!(args.output.is_none());
                assert!(args.exclusions.is_empty());
                assert!(!args.backup);
                assert!(!args.replace);
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_with_extensions() {
        let cli =
            Cli::try_parse_from(["unihosts", "build", "--extensions", "gambling", "social"])
                .unwrap();
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.extensions, vec!["gambling", "social"]);
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_with_target_ip() {
        let cli = Cli::try_parse_from(["unihosts", "build", "--ip", "127.0.0.1"]).unwrap();
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.target_ip, Some("127.0.0.1".to_string()));
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_flags() {
        let cli = Cli::try_parse_from([
            "unihosts",
            "build",
            "-k",
            "-s",
            "--backup",
            "--replace",
            "--output",
            "alternates/gambling",
        ])
        .unwrap();
        match cli.command {
            Commands::Build(args) => {
                assert!(args.keep_domain_comments);
                assert!(args.skip_static_hosts);
                assert!(args.backup);
                assert!(args.replace);
                assert_eq!(args.output, Some("alternates/gambling".to_string()));
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_excludes() {
        let cli = Cli::try_parse_from([
            "unihosts",
            "build",
            "--exclude",
            "hulu.com",
            "--exclude",
            "example.com",
        ])
        .unwrap();
        match cli.command {
            Commands::Build(args) => {
                assert_eq!(args.exclusions, vec!["hulu.com", "example.com"]);
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_sources_list() {
        let cli = Cli::try_parse_from(["unihosts", "sources", "list"]).unwrap();
        match cli.command {
            Commands::Sources {
                action: SourcesAction::List { extensions },
            } => {
                assert!(extensions.is_empty());
            }
            _ => panic!("Expected Sources List command"),
        }
    }

    #[test]
    fn test_cli_global_options() {
        let cli = Cli::try_parse_from([
            "unihosts",
            "-q",
            "-v",
            "--config",
            "/custom/path.yaml",
            "--base-dir",
            "/srv/hosts",
            "build",
        ])
        .unwrap();
        assert!(cli.quiet);
        assert!(cli.verbose);
        assert_eq!(cli.config.to_str().unwrap(), "/custom/path.yaml");
        assert_eq!(cli.base_dir.to_str().unwrap(), "/srv/hosts");
    }
}
