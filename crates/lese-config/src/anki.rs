use std::env;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnkiConfig {
    /// Enable Anki integration
    pub enabled: bool,
    /// AnkiConnect URL
    pub url: String,
    /// Deck receiving new vocabulary notes
    pub deck: String,
    /// Note type name
    pub model: String,
}

impl AnkiConfig {
    pub fn new() -> Self {
        let defaults = Self::default();
        Self {
            enabled: env::var("ANKI_ENABLED")
                .map(|v| v != "0" && v != "false")
                .unwrap_or(defaults.enabled),
            url: env::var("ANKI_URL").unwrap_or(defaults.url),
            deck: env::var("ANKI_DECK").unwrap_or(defaults.deck),
            model: defaults.model,
        }
    }
}

impl Default for AnkiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: "http://localhost:8765".to_string(),
            deck: "Norwegian".to_string(),
            model: "Basic".to_string(),
        }
    }
}
