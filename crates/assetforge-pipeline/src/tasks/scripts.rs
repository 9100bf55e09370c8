//! Concatenate scripts into one bundle in `dist/assets/js`.
//!
//! Sources are concatenated in the order the settings globs list them.
//! A configured transpiler runs per file, before concatenation, so the
//! map line offsets track what actually lands in the bundle. Production
//! pipes the bundle through the JS minifier; development writes a
//! `js.js.map` and appends the `sourceMappingURL` comment.

use assetforge_common_core::Result;
use assetforge_common_fs::{expand_globs_ordered, read_to_string, relative_to, write_atomic, write_string_atomic};
use tracing::{debug, info, warn};

use crate::context::PipelineContext;
use crate::filter::{run_filter, Placeholders};
use crate::sourcemap::ConcatSourceMap;

const BUNDLE_NAME: &str = "js.js";

pub async fn scripts(ctx: &PipelineContext) -> Result<()> {
    let files = expand_globs_ordered(&ctx.root, &ctx.settings.paths.javascript)?;
    if files.is_empty() {
        warn!("scripts task found no sources");
    }

    let vars = Placeholders {
        min: ctx.min_suffix(),
        ..Placeholders::default()
    };

    let mut bundle = String::new();
    let mut map = ConcatSourceMap::new();

    for file in &files {
        debug!(file = %file.display(), "concatenating script");
        let mut content = read_to_string(file)?;
        if let Some(transpiler) = &ctx.settings.tools.transpiler {
            let out =
                run_filter(transpiler, "transpiler", content.as_bytes(), ctx.production, &vars)
                    .await?;
            content = String::from_utf8_lossy(&out).into_owned();
        }

        let name = relative_to(file, &ctx.root).to_string_lossy().to_string();
        if !bundle.is_empty() && !bundle.ends_with('\n') {
            bundle.push('\n');
        }
        map.add_source(name, content.clone());
        bundle.push_str(&content);
    }

    let bundle = bundle.into_bytes();

    let out_dir = ctx.dist_join("assets/js");
    let out_path = out_dir.join(BUNDLE_NAME);

    if ctx.production {
        let minified = run_filter(
            &ctx.settings.tools.js_minifier,
            "js-minifier",
            &bundle,
            ctx.production,
            &vars,
        )
        .await?;
        write_atomic(&out_path, &minified)?;
    } else {
        let map_name = format!("{BUNDLE_NAME}.map");
        let mut with_map = bundle;
        if !with_map.ends_with(b"\n") {
            with_map.push(b'\n');
        }
        with_map.extend_from_slice(format!("//# sourceMappingURL={map_name}\n").as_bytes());
        write_atomic(&out_path, &with_map)?;
        write_string_atomic(out_dir.join(map_name), &map.to_json(BUNDLE_NAME))?;
    }

    info!(sources = files.len(), output = %out_path.display(), "scripts task finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetforge_config::{Settings, ToolCommand};
    use std::fs;
    use tempfile::tempdir;

    fn write_sources(root: &std::path::Path) {
        fs::create_dir_all(root.join("src/assets/js")).unwrap();
        fs::write(root.join("src/assets/js/alpha.js"), "var a = 1;\n").unwrap();
        fs::write(root.join("src/assets/js/beta.js"), "var b = 2;\n").unwrap();
    }

    #[tokio::test]
    async fn test_scripts_dev_writes_bundle_and_map() {
        let dir = tempdir().unwrap();
        write_sources(dir.path());

        let ctx = PipelineContext::new(dir.path(), Settings::default(), false);
        scripts(&ctx).await.unwrap();

        let out_dir = ctx.dist_join("assets/js");
        let bundle = fs::read_to_string(out_dir.join("js.js")).unwrap();
        assert!(bundle.contains("var a = 1;"));
        assert!(bundle.contains("var b = 2;"));
        assert!(bundle.contains("//# sourceMappingURL=js.js.map"));

        let map: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out_dir.join("js.js.map")).unwrap()).unwrap();
        assert_eq!(map["version"], 3);
        assert_eq!(map["sources"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_scripts_production_minifies_without_map() {
        let dir = tempdir().unwrap();
        write_sources(dir.path());

        let mut settings = Settings::default();
        settings.tools.js_minifier = ToolCommand::new("sh", &["-c", "tr -d ' \\n'"]);
        let ctx = PipelineContext::new(dir.path(), settings, true);

        scripts(&ctx).await.unwrap();

        let out_dir = ctx.dist_join("assets/js");
        let bundle = fs::read_to_string(out_dir.join("js.js")).unwrap();
        assert!(bundle.contains("vara=1;"));
        assert!(!bundle.contains("sourceMappingURL"));
        assert!(!out_dir.join("js.js.map").exists());
    }

    #[tokio::test]
    async fn test_scripts_concat_order_follows_settings() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/assets/js")).unwrap();
        fs::write(root.join("src/assets/js/aaa.js"), "// aaa\n").unwrap();
        fs::write(root.join("src/assets/js/init.js"), "// init\n").unwrap();

        let mut settings = Settings::default();
        settings.paths.javascript = vec![
            "src/assets/js/init.js".to_string(),
            "src/assets/js/**/*.js".to_string(),
        ];
        let ctx = PipelineContext::new(root, settings, false);

        scripts(&ctx).await.unwrap();

        let bundle = fs::read_to_string(ctx.dist_join("assets/js/js.js")).unwrap();
        let init_pos = bundle.find("// init").unwrap();
        let aaa_pos = bundle.find("// aaa").unwrap();
        assert!(init_pos < aaa_pos);
    }

    #[tokio::test]
    async fn test_scripts_transpiler_applied_when_configured() {
        let dir = tempdir().unwrap();
        write_sources(dir.path());

        let mut settings = Settings::default();
        settings.tools.transpiler = Some(ToolCommand::new("sh", &["-c", "sed s/var/let/g"]));
        let ctx = PipelineContext::new(dir.path(), settings, false);

        scripts(&ctx).await.unwrap();

        let bundle = fs::read_to_string(ctx.dist_join("assets/js/js.js")).unwrap();
        assert!(bundle.contains("let a = 1;"));
        assert!(!bundle.contains("var a = 1;"));
    }

    #[tokio::test]
    async fn test_dev_map_built_from_transpiled_sources() {
        let dir = tempdir().unwrap();
        write_sources(dir.path());

        let mut settings = Settings::default();
        // Transpiler that prepends a line to every file
        settings.tools.transpiler =
            Some(ToolCommand::new("sh", &["-c", "printf '\"use strict\";\\n'; cat"]));
        let ctx = PipelineContext::new(dir.path(), settings, false);

        scripts(&ctx).await.unwrap();

        let out_dir = ctx.dist_join("assets/js");
        let map: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out_dir.join("js.js.map")).unwrap()).unwrap();

        // Map content is what landed in the bundle, not the raw sources
        let first = map["sourcesContent"][0].as_str().unwrap();
        assert!(first.starts_with("\"use strict\";"));
        assert!(first.contains("var a = 1;"));

        // Two sources of two lines each: one mapping segment per line
        assert_eq!(map["mappings"].as_str().unwrap().split(';').count(), 4);
    }
}
