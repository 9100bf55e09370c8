//! Delete the dist directory. Runs first in every build.

use assetforge_common_core::Result;
use assetforge_common_fs::clean_dir;
use tracing::info;

use crate::context::PipelineContext;

pub async fn clean(ctx: &PipelineContext) -> Result<()> {
    let dist = ctx.dist();
    let removed = clean_dir(&dist)?;
    if removed {
        info!(path = %dist.display(), "removed dist directory");
    }
    Ok(())
}
