//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::commands::{BuildCommand, Execute, WatchCommand};
use crate::error::CliError;
use assetforge_config::{Settings, SettingsLoader};
use assetforge_pipeline::{run_task, PipelineContext, TaskKind};

/// Assetforge - front-end asset build pipeline
///
/// Compiles styles, bundles scripts, optimizes images, and copies
/// vendor libraries into a dist directory.
#[derive(Debug, Parser)]
#[command(
    name = "assetforge",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv)
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase verbosity level"
    )]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Path to settings file
    #[arg(
        short,
        long,
        global = true,
        env = "ASSETFORGE_CONFIG",
        value_hint = ValueHint::FilePath,
        help = "Path to settings file (default: config.yml)"
    )]
    pub config: Option<PathBuf>,

    /// Build for production: minified output, no source maps
    #[arg(long, global = true, help = "Minify output and drop source maps")]
    pub production: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full build: clean, then all tasks in parallel
    Build(BuildCommand),

    /// Build once, then rebuild the affected task on change
    #[command(visible_alias = "default")]
    Watch(WatchCommand),

    /// Delete the dist directory
    Clean,

    /// Copy static assets into dist/assets
    Copy,

    /// Compile the style entry point into dist/assets/css
    Styles,

    /// Concatenate scripts into dist/assets/js
    Scripts,

    /// Copy (and in production, optimize) images into dist/assets/img
    Images,

    /// Copy vendor library files into dist/libs
    Vendor,
}

impl Cli {
    /// Load settings from the configured file or default locations
    pub fn load_settings(&self) -> Result<Settings, CliError> {
        match &self.config {
            Some(path) => {
                // If a specific settings path is provided, use its parent
                // directory as project root
                let project_dir = path.parent().unwrap_or_else(|| std::path::Path::new("."));
                let loader = SettingsLoader::new(project_dir);
                loader.load_file(path).map_err(CliError::from)
            }
            None => {
                // Use current directory as project root
                let loader = SettingsLoader::default();
                loader.load().map_err(CliError::from)
            }
        }
    }

    /// The project root the pipeline runs in.
    fn project_root(&self) -> PathBuf {
        match &self.config {
            Some(path) => path
                .parent()
                .map(PathBuf::from)
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| PathBuf::from(".")),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Execute the selected command
    pub async fn execute(self, settings: Settings) -> Result<(), CliError> {
        let ctx = CommandContext {
            pipeline: PipelineContext::new(self.project_root(), settings, self.production),
        };

        match self.command {
            Command::Build(cmd) => cmd.execute(&ctx).await,
            Command::Watch(cmd) => cmd.execute(&ctx).await,
            Command::Clean => run_single(&ctx, TaskKind::Clean).await,
            Command::Copy => run_single(&ctx, TaskKind::Copy).await,
            Command::Styles => run_single(&ctx, TaskKind::Styles).await,
            Command::Scripts => run_single(&ctx, TaskKind::Scripts).await,
            Command::Images => run_single(&ctx, TaskKind::Images).await,
            Command::Vendor => run_single(&ctx, TaskKind::Vendor).await,
        }
    }
}

async fn run_single(ctx: &CommandContext, kind: TaskKind) -> Result<(), CliError> {
    run_task(&ctx.pipeline, kind)
        .await
        .map_err(|e| CliError::task(kind.name(), e))
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub pipeline: PipelineContext,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_production_flag_is_global() {
        let cli = Cli::parse_from(["assetforge", "build", "--production"]);
        assert!(cli.production);
        assert!(matches!(cli.command, Command::Build(_)));
    }

    #[test]
    fn test_watch_alias() {
        let cli = Cli::parse_from(["assetforge", "default"]);
        assert!(matches!(cli.command, Command::Watch(_)));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["assetforge", "-q", "-v", "build"]);
        assert!(result.is_err());
    }
}
