pub mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::exit;

use crate::common::result::ScmSyncResult;
use crate::common::templates::DEFAULT_CONFIG_FILE;
use commands::{InitCommand, ReconcileCommand};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_DATE"),
    ", ",
    env!("BUILD_TARGET"),
    ")"
);

/// scmsync - keep scanner SCM configs in step with GitLab groups
#[derive(Debug, Parser)]
#[command(name = "scmsync")]
#[command(about = "Reconcile GitLab group namespaces with a security scanner's SCM configs")]
#[command(version, long_version = LONG_VERSION)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, env = "SCMSYNC_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Compute and log the changes without calling the create/delete APIs
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Without a subcommand a single reconciliation run is performed
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a starter configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
}

impl CliApp {
    pub fn from_cli(cli: Cli) -> Self {
        Self { cli }
    }

    pub fn verbose(&self) -> bool {
        self.cli.verbose
    }

    pub async fn run(self) -> anyhow::Result<()> {
        colored::control::set_override(!self.cli.no_color);

        match self.handle_command().await {
            Ok(()) => Ok(()),
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                let mut source = std::error::Error::source(&e);
                while let Some(cause) = source {
                    eprintln!("  caused by: {}", cause);
                    source = cause.source();
                }
                exit(1);
            }
        }
    }

    async fn handle_command(&self) -> ScmSyncResult<()> {
        match &self.cli.command {
            Some(Commands::Init { force }) => {
                InitCommand::new(self.cli.config.clone(), *force)
                    .execute()
                    .await
            }
            None => {
                ReconcileCommand::new(self.cli.config.clone(), self.cli.dry_run, self.cli.verbose)
                    .execute()
                    .await
                    .map(|_| ())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_long_version_carries_build_metadata() {
        let rendered = Cli::command().render_long_version();
        assert!(rendered.contains(env!("CARGO_PKG_VERSION")));
        assert!(rendered.contains(env!("GIT_HASH")));
        assert!(rendered.contains(env!("BUILD_TARGET")));
    }

    #[test]
    fn test_no_arguments_runs_with_default_config() {
        let cli = Cli::try_parse_from(["scmsync"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.dry_run);
        // SCMSYNC_CONFIG may be set in the environment running the tests
        if std::env::var_os("SCMSYNC_CONFIG").is_none() {
            assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));
        }
    }

    #[test]
    fn test_init_subcommand() {
        let cli = Cli::try_parse_from(["scmsync", "--config", "/tmp/x.yaml", "init", "--force"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Init { force: true })));
        assert_eq!(cli.config, PathBuf::from("/tmp/x.yaml"));
    }
}
