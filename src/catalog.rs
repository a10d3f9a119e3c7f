//! Model presets selectable for a seat.
//!
//! Presets are keyed by short names. Each names a provider from the closed
//! [`LlmProvider`] set, so no "provider:model" strings are parsed at run time.

use crate::llm_client::LlmProvider;
use derive_getters::Getters;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A selectable model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ModelPreset {
    /// Short key, e.g. `llama-3.3-70b`.
    key: String,
    /// Hosting provider.
    provider: LlmProvider,
    /// Provider-side model id.
    model_id: String,
    /// Parameter count or size class.
    #[serde(default = "unknown")]
    size: String,
    /// Rough latency class.
    #[serde(default = "unknown")]
    speed: String,
}

fn unknown() -> String {
    "N/A".to_string()
}

impl ModelPreset {
    /// Creates a preset.
    pub fn new(
        key: impl Into<String>,
        provider: LlmProvider,
        model_id: impl Into<String>,
        size: impl Into<String>,
        speed: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            provider,
            model_id: model_id.into(),
            size: size.into(),
            speed: speed.into(),
        }
    }
}

const BUILTIN: &[(&str, LlmProvider, &str, &str, &str)] = &[
    ("kimi-k2", LlmProvider::Nvidia, "moonshotai/kimi-k2-instruct-0905", "Large", "Fast"),
    ("gpt-oss-20b", LlmProvider::Nvidia, "openai/gpt-oss-20b", "20B", "Fast"),
    ("mistral-nemotron", LlmProvider::Nvidia, "mistralai/mistral-nemotron", "Large", "Very Fast"),
    ("nemotron-nano-vl", LlmProvider::Nvidia, "nvidia/llama-3.1-nemotron-nano-vl-8b-v1", "8B", "Very Fast"),
    ("llama3-70b", LlmProvider::Nvidia, "meta/llama3-70b-instruct", "70B", "Fast"),
    ("llama-3.1-8b", LlmProvider::Nvidia, "meta/llama-3.1-8b-instruct", "8B", "Very Fast"),
    ("llama-3.3-70b", LlmProvider::Nvidia, "meta/llama-3.3-70b-instruct", "70B", "Fast"),
    ("llama-3.2-3b", LlmProvider::Nvidia, "meta/llama-3.2-3b-instruct", "3B", "Ultra Fast"),
    ("groq-llama-3.3-70b", LlmProvider::Groq, "llama-3.3-70b-versatile", "70B", "Ultra Fast"),
    ("groq-llama-3.1-70b", LlmProvider::Groq, "llama-3.1-70b-versatile", "70B", "Ultra Fast"),
    ("groq-llama-3.1-8b", LlmProvider::Groq, "llama-3.1-8b-instant", "8B", "Lightning"),
    ("groq-mixtral-8x7b", LlmProvider::Groq, "mixtral-8x7b-32768", "8x7B", "Ultra Fast"),
    ("groq-gemma2-9b", LlmProvider::Groq, "gemma2-9b-it", "9B", "Ultra Fast"),
];

/// Default preset for X.
pub const DEFAULT_X_PRESET: &str = "llama-3.3-70b";

/// Default preset for O.
pub const DEFAULT_O_PRESET: &str = "llama-3.1-8b";

/// Ordered collection of presets: built-ins followed by user additions.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    presets: Vec<ModelPreset>,
}

impl ModelCatalog {
    /// Catalog of built-in presets.
    #[instrument]
    pub fn builtin() -> Self {
        let presets = BUILTIN
            .iter()
            .map(|&(key, provider, model_id, size, speed)| {
                ModelPreset::new(key, provider, model_id, size, speed)
            })
            .collect();
        Self { presets }
    }

    /// Adds presets, replacing built-ins that share a key.
    #[instrument(skip(self, extra))]
    pub fn extend(&mut self, extra: impl IntoIterator<Item = ModelPreset>) {
        for preset in extra {
            debug!(key = %preset.key, "Registering model preset");
            match self.presets.iter_mut().find(|p| p.key == preset.key) {
                Some(existing) => *existing = preset,
                None => self.presets.push(preset),
            }
        }
    }

    /// All presets in order.
    pub fn presets(&self) -> &[ModelPreset] {
        &self.presets
    }

    /// Looks up a preset by key.
    pub fn get(&self, key: &str) -> Option<&ModelPreset> {
        self.presets.iter().find(|p| p.key == key)
    }

    /// Picks a random preset.
    pub fn random(&self) -> Option<&ModelPreset> {
        self.presets.choose(&mut rand::rng())
    }

    /// Lists `"<key> requires <VAR>"` for every preset whose provider key
    /// is not available according to `lookup`.
    ///
    /// Unknown keys are ignored here; they fail later at seat construction.
    pub fn missing_keys<'a>(
        &self,
        keys: impl IntoIterator<Item = &'a str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Vec<String> {
        keys.into_iter()
            .filter_map(|key| self.get(key))
            .filter_map(|preset| {
                let var = preset.provider.api_key_var();
                match lookup(var) {
                    Some(value) if !value.is_empty() => None,
                    _ => Some(format!("{} requires {}", preset.key, var)),
                }
            })
            .collect()
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_contains_defaults() {
        let catalog = ModelCatalog::builtin();
        assert_eq!(catalog.presets().len(), 13);
        let x = catalog.get(DEFAULT_X_PRESET).expect("default X preset");
        assert_eq!(*x.provider(), LlmProvider::Nvidia);
        assert_eq!(x.model_id(), "meta/llama-3.3-70b-instruct");
        assert!(catalog.get(DEFAULT_O_PRESET).is_some());
        assert!(catalog.get("nope").is_none());
    }

    #[test]
    fn test_extend_overrides_and_appends() {
        let mut catalog = ModelCatalog::builtin();
        catalog.extend([
            ModelPreset::new("kimi-k2", LlmProvider::Groq, "kimi", "?", "?"),
            ModelPreset::new("claude", LlmProvider::Anthropic, "claude-3-5-haiku-20241022", "?", "?"),
        ]);
        assert_eq!(catalog.presets().len(), 14);
        assert_eq!(*catalog.get("kimi-k2").expect("kept").provider(), LlmProvider::Groq);
        assert_eq!(catalog.presets().last().map(|p| p.key().as_str()), Some("claude"));
    }

    #[test]
    fn test_missing_keys_by_provider() {
        let catalog = ModelCatalog::builtin();
        let lookup = |var: &str| (var == "GROQ_API_KEY").then(|| "secret".to_string());

        let missing = catalog.missing_keys(["groq-gemma2-9b", "llama-3.1-8b", "unknown"], lookup);
        assert_eq!(missing, vec!["llama-3.1-8b requires NVIDIA_API_KEY".to_string()]);
    }

    #[test]
    fn test_random_is_member() {
        let catalog = ModelCatalog::builtin();
        let pick = catalog.random().expect("non-empty catalog");
        assert!(catalog.get(pick.key()).is_some());
    }
}
