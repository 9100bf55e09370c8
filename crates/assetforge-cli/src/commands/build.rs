//! Build command implementation.

use async_trait::async_trait;
use clap::Parser;
use tracing::info;

use crate::cli::CommandContext;
use crate::commands::Execute;
use crate::error::CliError;

/// Run the full build
#[derive(Debug, Parser)]
pub struct BuildCommand {}

#[async_trait]
impl Execute for BuildCommand {
    async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let summary = assetforge_pipeline::build(&ctx.pipeline).await?;

        if !summary.is_success() {
            return Err(CliError::Build {
                failed: summary.failures.len(),
            });
        }

        info!(
            tasks = summary.succeeded.len(),
            production = ctx.pipeline.production,
            "build complete"
        );
        Ok(())
    }
}
