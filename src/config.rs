//! Match configuration: seat presets, limits and API-key lookup.

use crate::agent::LlmAgent;
use crate::catalog::{DEFAULT_O_PRESET, DEFAULT_X_PRESET, ModelCatalog, ModelPreset};
use crate::games::tictactoe::Mark;
use crate::llm_client::{LlmClient, LlmConfig};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Default location of the match configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "tictactoe.toml";

/// Settings for a series of games between two model seats.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Preset key playing X.
    x: String,

    /// Preset key playing O.
    o: String,

    /// Maximum tokens for each model reply.
    max_tokens: u32,

    /// Seconds to wait for a reply; 0 disables the limit.
    turn_timeout_secs: u64,

    /// Proposals allowed per turn before the game stalls.
    max_attempts_per_turn: u32,

    /// Games to play in a row.
    games: u32,

    /// Extra presets added to the built-in catalog.
    models: Vec<ModelPreset>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            x: DEFAULT_X_PRESET.to_string(),
            o: DEFAULT_O_PRESET.to_string(),
            max_tokens: 150,
            turn_timeout_secs: 60,
            max_attempts_per_turn: 3,
            games: 1,
            models: Vec::new(),
        }
    }
}

impl MatchConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(x = %config.x, o = %config.o, games = config.games, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts_per_turn == 0 {
            return Err(ConfigError::new("max_attempts_per_turn must be at least 1"));
        }
        if self.games == 0 {
            return Err(ConfigError::new("games must be at least 1"));
        }
        Ok(())
    }

    /// Replaces the preset for `mark`.
    pub fn set_seat(&mut self, mark: Mark, key: impl Into<String>) {
        match mark {
            Mark::X => self.x = key.into(),
            Mark::O => self.o = key.into(),
        }
    }

    /// Replaces the number of games, applying the same check as a file.
    pub fn set_games(&mut self, games: u32) -> Result<(), ConfigError> {
        let previous = std::mem::replace(&mut self.games, games);
        self.validate().inspect_err(|_| self.games = previous)
    }

    /// Preset key seated at `mark`.
    pub fn seat(&self, mark: Mark) -> &str {
        match mark {
            Mark::X => &self.x,
            Mark::O => &self.o,
        }
    }

    /// Per-turn reply limit, `None` when disabled.
    pub fn turn_timeout(&self) -> Option<Duration> {
        (self.turn_timeout_secs > 0).then(|| Duration::from_secs(self.turn_timeout_secs))
    }

    /// Built-in presets extended with the configured ones.
    pub fn catalog(&self) -> ModelCatalog {
        let mut catalog = ModelCatalog::builtin();
        catalog.extend(self.models.iter().cloned());
        catalog
    }

    /// Builds the LLM configuration for the preset seated at `mark`.
    ///
    /// `lookup` resolves environment variable names; pass
    /// `|var| std::env::var(var).ok()` for the process environment.
    #[instrument(skip(self, catalog, lookup))]
    pub fn llm_config(
        &self,
        mark: Mark,
        catalog: &ModelCatalog,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<LlmConfig, ConfigError> {
        let key = self.seat(mark);
        let preset = catalog
            .get(key)
            .ok_or_else(|| ConfigError::new(format!("Unknown model preset: {}", key)))?;

        let var = preset.provider().api_key_var();
        let api_key = lookup(var)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ConfigError::new(format!("{} environment variable not set", var)))?;

        Ok(LlmConfig::new(
            *preset.provider(),
            api_key,
            preset.model_id().clone(),
            self.max_tokens,
        ))
    }

    /// Builds the agent for `mark`, named "Player X" or "Player O".
    #[instrument(skip(self, catalog, lookup))]
    pub fn seat_agent(
        &self,
        mark: Mark,
        catalog: &ModelCatalog,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<LlmAgent, ConfigError> {
        let config = self.llm_config(mark, catalog, lookup)?;
        Ok(LlmAgent::new(
            format!("Player {}", mark),
            mark,
            LlmClient::new(config),
        ))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        let message = message.into();
        error!(error_message = %message, "Config error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmProvider;

    #[test]
    fn test_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.seat(Mark::X), "llama-3.3-70b");
        assert_eq!(config.seat(Mark::O), "llama-3.1-8b");
        assert_eq!(config.turn_timeout(), Some(Duration::from_secs(60)));
        assert_eq!(*config.max_attempts_per_turn(), 3);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: MatchConfig = toml::from_str("o = \"groq-gemma2-9b\"\nturn_timeout_secs = 0")
            .expect("parse");
        assert_eq!(config.seat(Mark::X), DEFAULT_X_PRESET);
        assert_eq!(config.seat(Mark::O), "groq-gemma2-9b");
        assert_eq!(config.turn_timeout(), None);
        assert_eq!(*config.games(), 1);
    }

    #[test]
    fn test_llm_config_uses_provider_key() {
        let mut config = MatchConfig::default();
        config.set_seat(Mark::O, "groq-llama-3.1-8b");
        let catalog = config.catalog();
        let lookup = |var: &str| (var == "GROQ_API_KEY").then(|| "gsk".to_string());

        let llm = config
            .llm_config(Mark::O, &catalog, lookup)
            .expect("groq key present");
        assert_eq!(*llm.provider(), LlmProvider::Groq);
        assert_eq!(llm.model(), "llama-3.1-8b-instant");
        assert_eq!(*llm.max_tokens(), 150);

        let err = config.llm_config(Mark::X, &catalog, lookup).unwrap_err();
        assert!(err.message.contains("NVIDIA_API_KEY"));
    }

    #[test]
    fn test_unknown_preset_is_an_error() {
        let mut config = MatchConfig::default();
        config.set_seat(Mark::X, "gpt-7");
        let err = config
            .llm_config(Mark::X, &config.catalog(), |_| Some("k".to_string()))
            .unwrap_err();
        assert!(err.message.contains("Unknown model preset: gpt-7"));
    }

    #[test]
    fn test_set_games_rejects_zero_like_the_file() {
        let mut config = MatchConfig::default();
        let err = config.set_games(0).unwrap_err();
        assert_eq!(err.message, "games must be at least 1");
        assert_eq!(*config.games(), 1);

        config.set_games(5).expect("positive count");
        assert_eq!(*config.games(), 5);
    }
}
