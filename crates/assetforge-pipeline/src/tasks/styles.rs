//! Compile the style entry point into `dist/assets/css`.
//!
//! The sheet goes through the style compiler, then the autoprefixer
//! with the configured browser targets. Production adds the CSS
//! minifier and drops source maps; development keeps the compiler's
//! inline map.

use std::path::PathBuf;

use assetforge_common_core::{Error, Result};
use assetforge_common_fs::{read_bytes, write_atomic};
use tracing::info;

use crate::context::PipelineContext;
use crate::filter::{run_filter, Placeholders};

pub async fn styles(ctx: &PipelineContext) -> Result<()> {
    let entry = ctx.root.join(&ctx.settings.paths.styles_entry);
    if !entry.is_file() {
        return Err(Error::file_not_found(entry));
    }

    let source = read_bytes(&entry)?;
    let browsers = ctx.browsers();
    let vars = Placeholders {
        browsers: Some(&browsers),
        min: ctx.min_suffix(),
        ..Placeholders::default()
    };

    let tools = &ctx.settings.tools;
    let compiled = run_filter(&tools.styles, "styles", &source, ctx.production, &vars).await?;
    let prefixed =
        run_filter(&tools.autoprefixer, "autoprefixer", &compiled, ctx.production, &vars).await?;

    let css = if ctx.production {
        run_filter(&tools.css_minifier, "css-minifier", &prefixed, ctx.production, &vars).await?
    } else {
        prefixed
    };

    let output = output_path(ctx);
    write_atomic(&output, &css)?;
    info!(output = %output.display(), "styles task finished");
    Ok(())
}

fn output_path(ctx: &PipelineContext) -> PathBuf {
    let entry = ctx.root.join(&ctx.settings.paths.styles_entry);
    let stem = entry
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "style".to_string());
    ctx.dist_join("assets/css").join(format!("{stem}.css"))
}
