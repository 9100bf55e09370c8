//! Shared state for one pipeline run.

use std::path::{Path, PathBuf};

use assetforge_config::Settings;

/// Everything a task needs: the project root, the settings loaded at
/// startup, and the production flag. Read-only for the whole run.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    /// Project root; all settings paths are relative to it.
    pub root: PathBuf,
    /// Settings loaded from `config.yml`.
    pub settings: Settings,
    /// Production mode: minified output, no source maps.
    pub production: bool,
}

impl PipelineContext {
    pub fn new(root: impl Into<PathBuf>, settings: Settings, production: bool) -> Self {
        Self {
            root: root.into(),
            settings,
            production,
        }
    }

    /// The dist directory root.
    pub fn dist(&self) -> PathBuf {
        self.root.join(&self.settings.paths.dist)
    }

    /// A path under the dist directory.
    pub fn dist_join(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.dist().join(rel)
    }

    /// `{min}` placeholder value: `.min` in production, empty otherwise.
    pub fn min_suffix(&self) -> &'static str {
        if self.production {
            ".min"
        } else {
            ""
        }
    }

    /// `{browsers}` placeholder value for the autoprefixer.
    pub fn browsers(&self) -> String {
        self.settings.compatibility.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dist_join() {
        let ctx = PipelineContext::new("/project", Settings::default(), false);
        assert_eq!(
            ctx.dist_join("assets/css"),
            PathBuf::from("/project/dist/assets/css")
        );
    }

    #[test]
    fn test_min_suffix_tracks_production() {
        let dev = PipelineContext::new("/p", Settings::default(), false);
        let prod = PipelineContext::new("/p", Settings::default(), true);
        assert_eq!(dev.min_suffix(), "");
        assert_eq!(prod.min_suffix(), ".min");
    }

    #[test]
    fn test_browsers_joined() {
        let ctx = PipelineContext::new("/p", Settings::default(), false);
        assert_eq!(ctx.browsers(), "last 2 versions, ie >= 9");
    }
}
