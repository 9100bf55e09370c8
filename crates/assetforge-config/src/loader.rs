//! Settings file loading and parsing.

use crate::types::Settings;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Settings loading errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read settings: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

/// Settings loader.
pub struct SettingsLoader {
    base_path: PathBuf,
}

impl SettingsLoader {
    /// Create a loader for the given project directory.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            base_path: project_dir.as_ref().to_path_buf(),
        }
    }

    /// The project directory this loader reads from.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Load settings from `config.yml` in the project directory. A
    /// project without a settings file gets the defaults.
    pub fn load(&self) -> Result<Settings, SettingsError> {
        let path = self.base_path.join("config.yml");
        if !path.exists() {
            return Ok(Settings::default());
        }
        self.load_file(&path)
    }

    /// Load settings from an explicit file path. Unlike `load`, a
    /// missing file is an error: the caller named it.
    pub fn load_file(&self, settings_path: &Path) -> Result<Settings, SettingsError> {
        if !settings_path.exists() {
            return Err(SettingsError::NotFound {
                path: settings_path.to_path_buf(),
            });
        }

        let contents = std::fs::read_to_string(settings_path)?;
        let expanded = self.expand_env_vars(&contents)?;

        let settings: Settings =
            serde_yaml::from_str(&expanded).map_err(|e| SettingsError::ParseError {
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        self.validate(&settings)?;
        Ok(settings)
    }

    /// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
    fn expand_env_vars(&self, content: &str) -> Result<String, SettingsError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").unwrap();

        for cap in re.captures_iter(content) {
            let full_match = cap.get(0).unwrap().as_str();
            let var_name = &cap[1];
            let default = cap.get(2).map(|m| m.as_str());

            let value = match std::env::var(var_name) {
                Ok(v) => v,
                Err(_) => match default {
                    Some(d) => d.to_string(),
                    None => {
                        return Err(SettingsError::EnvVarNotFound {
                            var: var_name.to_string(),
                        })
                    }
                },
            };

            result = result.replace(full_match, &value);
        }

        Ok(result)
    }

    /// Validate settings values.
    fn validate(&self, settings: &Settings) -> Result<(), SettingsError> {
        let dist = settings.paths.dist.trim();
        if dist.is_empty() {
            return Err(SettingsError::ValidationError {
                message: "PATHS.dist must not be empty".to_string(),
            });
        }
        // The clean task removes this tree recursively
        if dist == "/" || dist == "." || dist == ".." {
            return Err(SettingsError::ValidationError {
                message: format!("PATHS.dist must not be `{dist}`"),
            });
        }

        if settings.paths.javascript.is_empty() {
            return Err(SettingsError::ValidationError {
                message: "PATHS.javascript must list at least one glob".to_string(),
            });
        }

        if settings.paths.styles_entry.trim().is_empty() {
            return Err(SettingsError::ValidationError {
                message: "PATHS.styles_entry must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_default())
    }
}
