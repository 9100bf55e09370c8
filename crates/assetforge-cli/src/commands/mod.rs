//! Command implementations.

mod build;
mod watch;

pub use build::BuildCommand;
pub use watch::WatchCommand;

use async_trait::async_trait;

use crate::cli::CommandContext;
use crate::error::CliError;

/// Executable subcommand.
#[async_trait]
pub trait Execute {
    async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError>;
}
