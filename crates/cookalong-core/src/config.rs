//! Configuration loaded from a TOML file.
//!
//! The file is looked up at `$XDG_CONFIG_HOME/cookalong/config.toml` unless a
//! path is given. A missing file yields the defaults; a malformed one is a
//! `Configuration` error. The assistant API key can also come from the
//! `COOKALONG_API_KEY` environment variable, which wins over the file.
//!
//! ```toml
//! database_file = "/home/me/.local/share/cookalong/cookalong.db"
//!
//! [assistant]
//! endpoint = "https://api.openai.com/v1/chat/completions"
//! model = "gpt-4o-mini"
//! timeout_secs = 20
//!
//! [voice]
//! listen_seconds = 30
//! goodbye = "Happy cooking!"
//! hands_free = true
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{CookAlongError, Result},
    voice::ListenOptions,
};

/// Environment variable overriding [`AssistantConfig::api_key`].
pub const API_KEY_ENV: &str = "COOKALONG_API_KEY";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookAlongConfig {
    /// SQLite database location; the XDG data directory when unset
    pub database_file: Option<PathBuf>,
    pub assistant: AssistantConfig,
    pub voice: VoiceConfig,
}

/// Chat-completion endpoint used to answer cooking questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// OpenAI-compatible `chat/completions` URL
    pub endpoint: String,
    pub model: String,
    /// Empty means the assistant is not configured
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: String::new(),
            timeout_secs: 20,
        }
    }
}

impl AssistantConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Voice-mode behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Upper bound on a single listen
    pub listen_seconds: u64,
    /// Spoken when the cook exits in voice mode; empty disables it
    pub goodbye: String,
    /// Start listening continuously as soon as voice mode is on
    pub hands_free: bool,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            listen_seconds: 30,
            goodbye: "Goodbye, and enjoy your meal!".to_string(),
            hands_free: true,
        }
    }
}

impl VoiceConfig {
    pub fn listen_options(&self) -> ListenOptions {
        ListenOptions {
            max_duration: Duration::from_secs(self.listen_seconds.max(1)),
            continuous: self.hands_free,
        }
    }
}

impl CookAlongConfig {
    /// Loads the configuration from `path`, or from the XDG config directory
    /// when `path` is `None`, then applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns `CookAlongError::FileSystem` if an explicit path cannot be read
    /// and `CookAlongError::Configuration` if the TOML is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parses a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| CookAlongError::Configuration {
            message: format!("Invalid configuration: {e}"),
        })
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| CookAlongError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&contents)
    }

    /// Existing config file in the XDG config directories, if any.
    fn default_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix("cookalong").find_config_file("config.toml")
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.assistant.api_key = key;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = CookAlongConfig::from_toml("").unwrap();
        assert_eq!(config, CookAlongConfig::default());
        assert!(!config.assistant.is_configured());
        assert!(config.voice.hands_free);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = CookAlongConfig::from_toml(
            r#"
            database_file = "/tmp/recipes.db"

            [assistant]
            model = "local-model"

            [voice]
            listen_seconds = 12
            "#,
        )
        .unwrap();

        assert_eq!(config.database_file, Some(PathBuf::from("/tmp/recipes.db")));
        assert_eq!(config.assistant.model, "local-model");
        assert_eq!(config.assistant.timeout_secs, 20);
        assert_eq!(
            config.voice.listen_options().max_duration,
            Duration::from_secs(12)
        );
        assert_eq!(config.voice.goodbye, VoiceConfig::default().goodbye);
    }

    #[test]
    fn test_invalid_toml_is_configuration_error() {
        let err = CookAlongConfig::from_toml("voice = 3").unwrap_err();
        assert!(matches!(err, CookAlongError::Configuration { .. }));
    }

    #[test]
    fn test_missing_explicit_file_is_filesystem_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = CookAlongConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, CookAlongError::FileSystem { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[voice]\ngoodbye = \"Bye\"\nhands_free = false\n").unwrap();

        let config = CookAlongConfig::load(Some(&path)).unwrap();
        assert_eq!(config.voice.goodbye, "Bye");
        assert!(!config.voice.listen_options().continuous);
    }
}
