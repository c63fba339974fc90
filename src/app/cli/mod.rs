//! CLI Adapter.

mod add;
mod components;
mod init;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::domain::AppError;

/// Environment variable holding an `EnvFilter` directive that overrides `-v`.
const LOG_ENV: &str = "ZEN_LOG";

#[derive(Parser)]
#[command(name = "zen")]
#[command(version)]
#[command(about = "Install source components from JSON manifests into your project", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize zen in a new or existing project
    Init {
        /// Create the project in a new directory with this name
        project_name: Option<String>,
        /// Overwrite an existing project
        #[arg(short, long)]
        force: bool,
        /// Minimal setup (just the .zen config)
        #[arg(short, long)]
        minimal: bool,
    },
    /// Install a component from a manifest URL, repository URL, or local path
    Add {
        /// Manifest location
        component_url: String,
        /// Custom installation directory
        #[arg(short, long)]
        path: Option<std::path::PathBuf>,
        /// Overwrite existing files
        #[arg(short, long)]
        overwrite: bool,
        /// Show what would be done without doing it
        #[arg(short, long)]
        dry_run: bool,
        /// Initialize zen here first if needed
        #[arg(short, long)]
        yes: bool,
    },
    /// List installed components
    List,
    /// Show details about an installed component
    Info {
        component_name: String,
    },
    /// Remove an installed component's record
    Remove {
        component_name: String,
        /// Skip the partial-removal notice
        #[arg(short, long)]
        force: bool,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    initialize_tracing(cli.verbose);

    let result: Result<(), AppError> = match cli.command {
        Commands::Init { project_name, force, minimal } => {
            init::run_init(project_name.as_deref(), force, minimal)
        }
        Commands::Add { component_url, path, overwrite, dry_run, yes } => add::run_add(
            crate::app::api::AddOptions { source: component_url, path, overwrite, dry_run, yes },
            cli.verbose,
        ),
        Commands::List => components::run_list(),
        Commands::Info { component_name } => components::run_info(&component_name),
        Commands::Remove { component_name, force } => {
            components::run_remove(&component_name, force)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if e.is_configuration() {
            eprintln!("Run 'zen init' first, or 'zen init --force' to regenerate .zen/config.yaml.");
        }
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr so stdout carries only command output.
fn initialize_tracing(verbose: bool) {
    let default_directive = if verbose { "zen=debug" } else { "zen=warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn add_accepts_short_flags() {
        let cli = Cli::try_parse_from([
            "zen", "add", "https://example.com/c.json", "-p", "lib", "-o", "-d", "-y", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Add { path, overwrite, dry_run, yes, .. } => {
                assert_eq!(path, Some(std::path::PathBuf::from("lib")));
                assert!(overwrite && dry_run && yes);
            }
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn init_accepts_optional_name() {
        let cli = Cli::try_parse_from(["zen", "init", "-m", "-f"]).unwrap();
        match cli.command {
            Commands::Init { project_name, force, minimal } => {
                assert_eq!(project_name, None);
                assert!(force && minimal);
            }
            _ => panic!("expected init"),
        }
    }
}
