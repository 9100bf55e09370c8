//! Copy vendor library files into `dist/libs`.
//!
//! Each package under the vendor directory contributes the files its
//! manifest names in `main` (`bower.json`, falling back to
//! `package.json`). Settings overrides replace the manifest selection
//! per package; override globs may carry the `{min}` placeholder so
//! production picks the prebuilt minified variants.

use std::path::{Path, PathBuf};

use assetforge_common_core::{Error, Result};
use assetforge_common_fs::{copy_file, expand_globs, read_to_string, relative_to};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::context::PipelineContext;

pub async fn vendor(ctx: &PipelineContext) -> Result<()> {
    let vendor_root = ctx.root.join(&ctx.settings.paths.bower);
    if !vendor_root.is_dir() {
        warn!(path = %vendor_root.display(), "vendor directory missing, skipping");
        return Ok(());
    }

    let dest_root = ctx.dist_join("libs");
    let mut copied = 0;

    let mut packages: Vec<PathBuf> = std::fs::read_dir(&vendor_root)
        .map_err(Error::Io)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    packages.sort();

    for package_dir in packages {
        let name = package_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let files = match ctx.settings.overrides.for_package(&name) {
            Some(globs) => resolve_override(ctx, &package_dir, globs)?,
            None => match resolve_manifest(&package_dir)? {
                Some(files) => files,
                None => {
                    warn!(package = %name, "no manifest and no override, skipping");
                    continue;
                }
            },
        };

        for file in files {
            let rel = relative_to(&file, &vendor_root);
            debug!(package = %name, file = %file.display(), "copying vendor file");
            copy_file(&file, dest_root.join(rel))?;
            copied += 1;
        }
    }

    info!(copied, "vendor task finished");
    Ok(())
}

/// Expand override globs inside the package directory, with `{min}`
/// resolved for the current mode.
fn resolve_override(
    ctx: &PipelineContext,
    package_dir: &Path,
    globs: &[String],
) -> Result<Vec<PathBuf>> {
    let patterns: Vec<String> = globs
        .iter()
        .map(|g| g.replace("{min}", ctx.min_suffix()))
        .collect();
    expand_globs(package_dir, &patterns)
}

/// Read the package manifest and return the files its `main` field
/// names. Returns `Ok(None)` when neither manifest exists.
fn resolve_manifest(package_dir: &Path) -> Result<Option<Vec<PathBuf>>> {
    let manifest_path = ["bower.json", "package.json"]
        .iter()
        .map(|m| package_dir.join(m))
        .find(|p| p.is_file());

    let Some(manifest_path) = manifest_path else {
        return Ok(None);
    };

    let raw = read_to_string(&manifest_path)?;
    let manifest: Value = serde_json::from_str(&raw).map_err(|e| {
        Error::Serialization(format!(
            "invalid manifest {}: {e}",
            manifest_path.display()
        ))
    })?;

    let mains: Vec<String> = match manifest.get("main") {
        Some(Value::String(s)) => vec![s.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    };

    let mut files = Vec::new();
    for main in mains {
        let path = package_dir.join(&main);
        if path.is_file() {
            files.push(path);
        } else {
            warn!(
                manifest = %manifest_path.display(),
                main,
                "manifest names a missing file"
            );
        }
    }

    Ok(Some(files))
}
