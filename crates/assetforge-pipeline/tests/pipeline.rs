//! End-to-end pipeline tests using fake shell filter tools, so no real
//! style compiler or minifier needs to be installed.

use std::fs;
use std::path::Path;

use assetforge_config::{Settings, ToolCommand};
use assetforge_pipeline::{build, PipelineContext, TaskClassifier, TaskKind};

/// Lay down a small project tree and wire every filter to a shell fake.
fn project(root: &Path) -> Settings {
    fs::create_dir_all(root.join("src/assets/less")).unwrap();
    fs::create_dir_all(root.join("src/assets/js")).unwrap();
    fs::create_dir_all(root.join("src/assets/img")).unwrap();
    fs::create_dir_all(root.join("src/assets/fonts")).unwrap();
    fs::create_dir_all(root.join("bower_components/jquery/dist")).unwrap();

    fs::write(
        root.join("src/assets/less/style.less"),
        "body {\n  color: red;\n}\n",
    )
    .unwrap();
    fs::write(root.join("src/assets/js/app.js"), "var app = {};\n").unwrap();
    fs::write(root.join("src/assets/img/logo.png"), "png-bytes").unwrap();
    fs::write(root.join("src/assets/fonts/icons.woff"), "woff-bytes").unwrap();
    fs::write(
        root.join("bower_components/jquery/bower.json"),
        r#"{"main": "dist/jquery.js"}"#,
    )
    .unwrap();
    fs::write(
        root.join("bower_components/jquery/dist/jquery.js"),
        "window.$ = {};\n",
    )
    .unwrap();

    let mut settings = Settings::default();
    settings.tools.styles = ToolCommand {
        program: "sh".to_string(),
        args: vec!["-c".to_string(), "cat".to_string()],
        // Stands in for the compiler's inline source-map flag
        dev_args: vec![],
    };
    settings.tools.autoprefixer = ToolCommand::new("sh", &["-c", "cat"]);
    settings.tools.css_minifier = ToolCommand::new("sh", &["-c", "tr -d ' \\n'"]);
    settings.tools.js_minifier = ToolCommand::new("sh", &["-c", "tr -d ' \\n'"]);
    settings
}

#[tokio::test]
async fn development_build_keeps_source_maps() {
    let dir = tempfile::tempdir().unwrap();
    let settings = project(dir.path());
    let ctx = PipelineContext::new(dir.path(), settings, false);

    let summary = build(&ctx).await.unwrap();
    assert!(summary.is_success(), "failures: {:?}", summary.failures);

    // Unminified bundle with an external map
    let bundle = fs::read_to_string(ctx.dist_join("assets/js/js.js")).unwrap();
    assert!(bundle.contains("var app = {};"));
    assert!(bundle.contains("//# sourceMappingURL=js.js.map"));
    assert!(ctx.dist_join("assets/js/js.js.map").is_file());

    // Unminified styles keep their formatting
    let css = fs::read_to_string(ctx.dist_join("assets/css/style.css")).unwrap();
    assert!(css.contains("color: red"));
}

#[tokio::test]
async fn production_build_minifies_and_drops_maps() {
    let dir = tempfile::tempdir().unwrap();
    let settings = project(dir.path());
    let ctx = PipelineContext::new(dir.path(), settings, true);

    let summary = build(&ctx).await.unwrap();
    assert!(summary.is_success(), "failures: {:?}", summary.failures);

    let bundle = fs::read_to_string(ctx.dist_join("assets/js/js.js")).unwrap();
    assert!(bundle.contains("varapp={};"));
    assert!(!bundle.contains("sourceMappingURL"));
    assert!(!ctx.dist_join("assets/js/js.js.map").exists());

    let css = fs::read_to_string(ctx.dist_join("assets/css/style.css")).unwrap();
    assert!(!css.contains(' '));
    assert!(!css.contains('\n'));
}

#[tokio::test]
async fn clean_removes_previous_output_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let settings = project(dir.path());
    let ctx = PipelineContext::new(dir.path(), settings, false);

    fs::create_dir_all(ctx.dist_join("assets/js")).unwrap();
    fs::write(ctx.dist_join("assets/js/leftover.js"), "stale").unwrap();
    fs::write(ctx.dist_join("orphan.txt"), "stale").unwrap();

    build(&ctx).await.unwrap();

    assert!(!ctx.dist_join("assets/js/leftover.js").exists());
    assert!(!ctx.dist_join("orphan.txt").exists());
    assert!(ctx.dist_join("assets/js/js.js").is_file());
}

#[tokio::test]
async fn style_change_maps_to_styles_task_only() {
    let dir = tempfile::tempdir().unwrap();
    let settings = project(dir.path());
    let ctx = PipelineContext::new(dir.path(), settings, false);

    let classifier = TaskClassifier::new(&ctx).unwrap();
    let changed = ctx.root.join("src/assets/less/buttons.less");

    assert_eq!(classifier.classify(&changed), Some(TaskKind::Styles));
    assert_ne!(classifier.classify(&changed), Some(TaskKind::Scripts));
    assert_ne!(classifier.classify(&changed), Some(TaskKind::Images));
}

#[tokio::test]
async fn full_build_copies_assets_and_vendor_files() {
    let dir = tempfile::tempdir().unwrap();
    let settings = project(dir.path());
    let ctx = PipelineContext::new(dir.path(), settings, false);

    build(&ctx).await.unwrap();

    assert!(ctx.dist_join("assets/fonts/icons.woff").is_file());
    assert!(ctx.dist_join("assets/img/logo.png").is_file());
    assert!(ctx.dist_join("libs/jquery/dist/jquery.js").is_file());
    // Style sources are excluded from the plain copy
    assert!(!ctx.dist_join("assets/less").exists());
}

#[tokio::test]
async fn failed_transform_is_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = project(dir.path());
    settings.tools.styles =
        ToolCommand::new("sh", &["-c", "echo 'ParseError: bad nesting' >&2; exit 1"]);
    let ctx = PipelineContext::new(dir.path(), settings, false);

    let summary = build(&ctx).await.unwrap();
    assert!(!summary.is_success());
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].0, TaskKind::Styles);

    // The failed stage produced no output; the rest of the build did
    assert!(!ctx.dist_join("assets/css/style.css").exists());
    assert!(ctx.dist_join("assets/js/js.js").is_file());
}
