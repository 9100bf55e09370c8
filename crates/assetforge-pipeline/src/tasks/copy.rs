//! Copy static assets into `dist/assets`.
//!
//! The asset globs skip the `img`, `js`, and `less` subtrees, which are
//! handled by their own tasks; the exclusions live in the settings as
//! `!` patterns.

use assetforge_common_core::Result;
use assetforge_common_fs::{copy_file, expand_globs, glob_base, relative_to};
use tracing::{debug, info};

use crate::context::PipelineContext;

pub async fn copy(ctx: &PipelineContext) -> Result<()> {
    let dest = ctx.dist_join("assets");
    let patterns = &ctx.settings.paths.assets;
    let mut copied = 0;

    // Expand one include pattern at a time so each file keeps its
    // layout relative to that pattern's static base.
    for pattern in patterns.iter().filter(|p| !p.starts_with('!')) {
        let base = ctx.root.join(glob_base(pattern));

        let mut selection: Vec<String> = vec![pattern.clone()];
        selection.extend(
            patterns
                .iter()
                .filter(|p| p.starts_with('!'))
                .cloned(),
        );

        for file in expand_globs(&ctx.root, &selection)? {
            let rel = relative_to(&file, &base);
            debug!(file = %file.display(), "copying asset");
            copy_file(&file, dest.join(rel))?;
            copied += 1;
        }
    }

    info!(copied, "copy task finished");
    Ok(())
}
