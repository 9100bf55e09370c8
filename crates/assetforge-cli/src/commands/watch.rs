//! Watch command implementation.

use async_trait::async_trait;
use clap::Parser;

use crate::cli::CommandContext;
use crate::commands::Execute;
use crate::error::CliError;

/// Build once, then watch for changes
#[derive(Debug, Parser)]
pub struct WatchCommand {}

#[async_trait]
impl Execute for WatchCommand {
    async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        assetforge_pipeline::watch(&ctx.pipeline)
            .await
            .map_err(CliError::from)
    }
}
