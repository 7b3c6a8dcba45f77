//! User settings: logging and the theme applied to navigation bars.
//!
//! ```toml
//! [logging]
//! enabled = true
//! level = "debug"
//! max-files = 5
//! directory = "logs"
//!
//! [theme."herald.ui.navigation.NavigationBar"]
//! text-transform = "uppercase"
//! border = "bottom"
//! ```

use crate::view::style::Theme;
use anyhow::{Context, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub logging: LoggingSettings,
    pub theme: Theme,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LoggingSettings {
    pub enabled: bool,
    pub level: String,
    pub max_files: usize,
    pub directory: PathBuf,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            enabled: false,
            level: "info".to_string(),
            max_files: 3,
            directory: PathBuf::from("logs"),
        }
    }
}

impl LoggingSettings {
    /// Log directory, with a relative `directory` taken from `base`.
    pub fn log_dir(&self, base: &Path) -> PathBuf {
        base.join(&self.directory)
    }
}

impl Settings {
    /// Loads settings from `path`, falling back to defaults when the file
    /// doesn't exist. A file that exists but doesn't parse is an error.
    pub fn load(path: &Path) -> Result<Settings, Error> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        crate::helpers::load_toml(path)
    }

    pub fn from_toml_str(s: &str) -> Result<Settings, Error> {
        toml::from_str(s).context("can't parse settings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use crate::view::style::NAVIGATION_BAR_STYLE_NAME;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();

        let settings = Settings::load(&temp_dir.path().join("Settings.toml")).unwrap();

        assert_eq!(settings, Settings::default());
        assert!(!settings.logging.enabled);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings = Settings::from_toml_str(
            r#"
            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.max_files, 3);
        assert!(settings.theme.is_empty());
    }

    #[test]
    fn loads_theme_and_logging_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Settings.toml");
        fs::write(
            &path,
            r#"
            [logging]
            enabled = true
            max-files = 5

            [theme."herald.ui.navigation.NavigationBar"]
            text-transform = "uppercase"
            "#,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();

        assert!(settings.logging.enabled);
        assert_eq!(settings.logging.max_files, 5);
        assert_eq!(
            settings.theme.style(NAVIGATION_BAR_STYLE_NAME).unwrap()["text-transform"],
            Value::from("uppercase")
        );
    }

    #[test]
    fn log_dir_is_relative_to_base() {
        let settings = Settings::from_toml_str("[logging]\ndirectory = \"run-logs\"\n").unwrap();
        let absolute = std::env::temp_dir().join("herald-logs");
        let pinned = LoggingSettings {
            directory: absolute.clone(),
            ..LoggingSettings::default()
        };

        assert_eq!(
            settings.logging.log_dir(Path::new("conf")),
            Path::new("conf").join("run-logs")
        );
        assert_eq!(pinned.log_dir(Path::new("conf")), absolute);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("Settings.toml");
        fs::write(&path, "[logging\nenabled = ").unwrap();

        assert!(Settings::load(&path).is_err());
    }
}
