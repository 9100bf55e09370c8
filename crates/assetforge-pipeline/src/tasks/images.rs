//! Copy images into `dist/assets/img`, optimized in production.
//!
//! Development copies files as-is. Production runs the optimizer
//! configured for each extension in file-to-file mode, falling back to
//! a plain copy when no optimizer is configured.

use assetforge_common_core::Result;
use assetforge_common_fs::{copy_file, extension, relative_to, walk_files};
use tracing::{debug, info};

use crate::context::PipelineContext;
use crate::filter::run_file;

pub async fn images(ctx: &PipelineContext) -> Result<()> {
    let src_root = ctx.root.join(&ctx.settings.paths.images);
    if !src_root.is_dir() {
        info!("no image source tree, skipping");
        return Ok(());
    }

    let dest_root = ctx.dist_join("assets/img");
    let mut processed = 0;

    for file in walk_files(&src_root)? {
        let rel = relative_to(&file, &src_root);
        let dest = dest_root.join(&rel);

        let optimizer = if ctx.production {
            extension(&file).and_then(|ext| ctx.settings.tools.images.get(&ext))
        } else {
            None
        };

        match optimizer {
            Some(tool) => {
                debug!(file = %file.display(), "optimizing image");
                run_file(tool, "image-optimizer", &file, &dest, ctx.production).await?;
            }
            None => {
                debug!(file = %file.display(), "copying image");
                copy_file(&file, &dest)?;
            }
        }
        processed += 1;
    }

    info!(processed, "images task finished");
    Ok(())
}
