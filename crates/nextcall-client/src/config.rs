//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/nextcall/config.toml` by default:
//!
//! ```toml
//! [engine]
//! hours_ahead = 9
//! max_events = 5
//! joinable_window_minutes = 3
//! domain_marker = "zoom.us"
//! client_scheme = "zoommtg"
//!
//! [display]
//! default_icon = "icon.png"
//! one_on_one_icon = "one.png"
//! standup_icon = "standup.png"
//! ```

use std::path::{Path, PathBuf};

use nextcall_core::EngineConfig;
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::error::{ClientError, ClientResult};

/// Configuration for the nextcall client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Meeting resolution settings.
    pub engine: EngineConfig,

    /// Display settings.
    pub display: DisplaySettings,
}

/// Display settings for launcher output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Icon for meetings without a more specific icon.
    pub default_icon: String,

    /// Icon for one-on-one meetings (title contains "1:1").
    pub one_on_one_icon: String,

    /// Icon for standups (title contains "Standup").
    pub standup_icon: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            default_icon: "icon.png".to_string(),
            one_on_one_icon: "one.png".to_string(),
            standup_icon: "standup.png".to_string(),
        }
    }
}

impl DisplaySettings {
    /// Picks the icon for a meeting title.
    pub fn icon_for(&self, title: &str) -> &str {
        if title.contains("1:1") {
            &self.one_on_one_icon
        } else if title.contains("Standup") {
            &self.standup_icon
        } else {
            &self.default_icon
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default path, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> ClientResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| ClientError::Config(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Applies command-line overrides.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(minutes) = cli.joinable_window {
            self.engine.joinable_window_minutes = minutes;
        }
        if let Some(ref domain) = cli.domain {
            self.engine.domain_marker = domain.clone();
        }
        self
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nextcall")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn empty_file_uses_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.engine.joinable_window_minutes, 3);
    }

    #[test]
    fn partial_engine_section() {
        let config: ClientConfig = toml::from_str(
            r#"
[engine]
joinable_window_minutes = 5
domain_marker = "acme.zoom.us"
"#,
        )
        .unwrap();
        assert_eq!(config.engine.joinable_window_minutes, 5);
        assert_eq!(config.engine.domain_marker, "acme.zoom.us");
        assert_eq!(config.engine.hours_ahead, 9);
        assert_eq!(config.display, DisplaySettings::default());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\nstandup_icon = \"daily.png\"").unwrap();

        let config = ClientConfig::load_from(file.path()).unwrap();
        assert_eq!(config.display.standup_icon, "daily.png");
        assert_eq!(config.display.default_icon, "icon.png");
    }

    #[test]
    fn load_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[engine]\njoinable_window_minutes = \"soon\"").unwrap();

        let err = ClientConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn cli_overrides_file_values() {
        let cli = Cli::try_parse_from([
            "nextcall",
            "--joinable-window",
            "10",
            "--domain",
            "zoomgov.com",
            "list",
        ])
        .unwrap();
        let config = ClientConfig::default().with_overrides(&cli);
        assert_eq!(config.engine.joinable_window_minutes, 10);
        assert_eq!(config.engine.domain_marker, "zoomgov.com");
    }

    #[test]
    fn toml_roundtrip() {
        let config = ClientConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: ClientConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    mod icons {
        use super::*;

        #[test]
        fn picks_icon_by_title() {
            let display = DisplaySettings::default();
            assert_eq!(display.icon_for("Alice / Bob 1:1"), "one.png");
            assert_eq!(display.icon_for("Team Standup"), "standup.png");
            assert_eq!(display.icon_for("Quarterly review"), "icon.png");
        }

        #[test]
        fn one_on_one_takes_precedence() {
            let display = DisplaySettings::default();
            assert_eq!(display.icon_for("Standup 1:1"), "one.png");
        }
    }
}
