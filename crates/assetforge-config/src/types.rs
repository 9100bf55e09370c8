//! Settings types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root settings, loaded from `config.yml`.
///
/// The top-level keys keep the upper-case spelling of the original
/// settings file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Browser compatibility targets, forwarded to the autoprefixer.
    #[serde(rename = "COMPATIBILITY")]
    pub compatibility: Vec<String>,
    /// Path globs for each task.
    #[serde(rename = "PATHS")]
    pub paths: Paths,
    /// External filter tool command lines.
    #[serde(rename = "TOOLS")]
    pub tools: Tools,
    /// Vendor package main-file overrides.
    #[serde(rename = "OVERRIDES")]
    pub overrides: Overrides,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            compatibility: vec!["last 2 versions".to_string(), "ie >= 9".to_string()],
            paths: Paths::default(),
            tools: Tools::default(),
            overrides: Overrides::default(),
        }
    }
}

/// Source and destination paths.
///
/// The asset globs skip the `img`, `js`, and `less` subtrees, which are
/// handled by their own tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Paths {
    /// Output directory root, removed by the clean task.
    pub dist: String,
    /// Globs for static assets copied as-is; `!` entries exclude.
    pub assets: Vec<String>,
    /// Vendor components directory (bower-style layout).
    pub bower: String,
    /// Ordered script source globs; order defines concatenation order.
    pub javascript: Vec<String>,
    /// Style sheet entry point.
    pub styles_entry: String,
    /// Glob of style sources to watch.
    pub styles_watch: String,
    /// Image source tree root.
    pub images: String,
}

impl Default for Paths {
    fn default() -> Self {
        Self {
            dist: "dist".to_string(),
            assets: vec![
                "src/assets/**/*".to_string(),
                "!src/assets/img/**/*".to_string(),
                "!src/assets/js/**/*".to_string(),
                "!src/assets/less/**/*".to_string(),
            ],
            bower: "bower_components".to_string(),
            javascript: vec!["src/assets/js/**/*.js".to_string()],
            styles_entry: "src/assets/less/style.less".to_string(),
            styles_watch: "src/assets/less/**/*.less".to_string(),
            images: "src/assets/img".to_string(),
        }
    }
}

/// One external filter tool invocation.
///
/// `args` may carry `{input}`, `{output}`, `{browsers}`, and `{min}`
/// placeholders. `dev_args` are appended only in development builds
/// (source-map flags live here).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCommand {
    /// Program to execute.
    pub program: String,
    /// Arguments passed on every invocation.
    #[serde(default)]
    pub args: Vec<String>,
    /// Extra arguments appended in development mode.
    #[serde(default)]
    pub dev_args: Vec<String>,
}

impl ToolCommand {
    /// Shorthand for a tool without dev-only arguments.
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|s| s.to_string()).collect(),
            dev_args: Vec::new(),
        }
    }
}

/// The external tools each transformation delegates to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tools {
    /// Style compiler (stdin to stdout).
    pub styles: ToolCommand,
    /// Autoprefixer; receives `{browsers}`.
    pub autoprefixer: ToolCommand,
    /// CSS minifier, production only.
    pub css_minifier: ToolCommand,
    /// JS minifier, production only.
    pub js_minifier: ToolCommand,
    /// Optional transpiler applied to each script source before
    /// concatenation.
    pub transpiler: Option<ToolCommand>,
    /// Image optimizers by lowercase file extension, production only.
    pub images: HashMap<String, ToolCommand>,
}

impl Default for Tools {
    fn default() -> Self {
        let mut images = HashMap::new();
        images.insert(
            "jpg".to_string(),
            ToolCommand::new("jpegtran", &["-progressive", "-outfile", "{output}", "{input}"]),
        );
        images.insert(
            "jpeg".to_string(),
            ToolCommand::new("jpegtran", &["-progressive", "-outfile", "{output}", "{input}"]),
        );
        images.insert(
            "png".to_string(),
            ToolCommand::new("optipng", &["-quiet", "-out", "{output}", "{input}"]),
        );
        images.insert(
            "gif".to_string(),
            ToolCommand::new("gifsicle", &["-O2", "-o", "{output}", "{input}"]),
        );
        images.insert(
            "svg".to_string(),
            ToolCommand::new("svgo", &["-i", "{input}", "-o", "{output}"]),
        );

        Self {
            styles: ToolCommand {
                program: "lessc".to_string(),
                args: vec!["-".to_string()],
                dev_args: vec!["--source-map-inline".to_string()],
            },
            autoprefixer: ToolCommand::new("autoprefixer-cli", &["-b", "{browsers}"]),
            css_minifier: ToolCommand::new("cssnano", &[]),
            js_minifier: ToolCommand::new("uglifyjs", &["--compress", "--mangle"]),
            transpiler: None,
            images,
        }
    }
}

/// Vendor main-file overrides by package name.
///
/// Override globs are relative to the package directory and may use the
/// `{min}` placeholder, expanded to `.min` in production and to nothing
/// otherwise.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Overrides(pub HashMap<String, Vec<String>>);

impl Overrides {
    /// Override globs for a package, if configured.
    pub fn for_package(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_layout() {
        let settings = Settings::default();
        assert_eq!(settings.paths.dist, "dist");
        assert_eq!(settings.paths.bower, "bower_components");
        assert_eq!(settings.paths.styles_entry, "src/assets/less/style.less");
        assert!(settings.compatibility.iter().any(|c| c.contains("last 2")));
        assert!(settings.tools.transpiler.is_none());
    }

    #[test]
    fn test_uppercase_keys_deserialize() {
        let yaml = r#"
COMPATIBILITY:
  - "last 2 versions"
PATHS:
  dist: "public"
  javascript:
    - "src/assets/js/plugins/*.js"
    - "src/assets/js/app.js"
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.paths.dist, "public");
        assert_eq!(settings.paths.javascript.len(), 2);
        // Unspecified sections keep their defaults
        assert_eq!(settings.paths.bower, "bower_components");
        assert_eq!(settings.tools.styles.program, "lessc");
    }

    #[test]
    fn test_tool_command_from_yaml() {
        let yaml = r#"
TOOLS:
  styles:
    program: "sassc"
    args: ["--stdin"]
  js_minifier:
    program: "terser"
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.tools.styles.program, "sassc");
        assert_eq!(settings.tools.styles.args, vec!["--stdin"]);
        assert!(settings.tools.styles.dev_args.is_empty());
        assert_eq!(settings.tools.js_minifier.program, "terser");
        assert!(settings.tools.js_minifier.args.is_empty());
    }

    #[test]
    fn test_overrides_lookup() {
        let yaml = r#"
OVERRIDES:
  bootstrap:
    - "dist/js/*{min}.js"
    - "dist/css/*{min}.css"
    - "dist/fonts/*.*"
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        let globs = settings.overrides.for_package("bootstrap").unwrap();
        assert_eq!(globs.len(), 3);
        assert!(settings.overrides.for_package("jquery").is_none());
    }
}
