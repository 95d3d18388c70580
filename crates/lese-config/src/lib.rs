use std::env;

use serde::{Deserialize, Serialize};

use self::anki::AnkiConfig;
use self::language::LanguageConfig;
use self::speech::SpeechConfig;
use self::tooltip::TooltipConfig;
use self::translator::TranslatorConfig;

pub mod anki;
pub mod language;
pub mod speech;
pub mod tooltip;
pub mod translator;

/// Where raw text blocks come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Stdin,
    Clipboard,
    Websocket,
}

impl SourceKind {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "stdin" => Some(SourceKind::Stdin),
            "clipboard" => Some(SourceKind::Clipboard),
            "ws" | "websocket" => Some(SourceKind::Websocket),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub language: LanguageConfig,
    pub tooltip: TooltipConfig,
    pub translator: TranslatorConfig,
    pub anki: AnkiConfig,
    pub speech: SpeechConfig,

    /// Text source for the watch loop
    pub source: SourceKind,
    /// Clipboard polling interval
    pub poll_interval_ms: u64,
    /// WebSocket URL to connect to
    pub ws_url: String,
}

impl Config {
    pub fn new() -> Self {
        let poll_interval_ms = env::var("POLL_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(500); // clipboard poll

        let source = env::var("TEXT_SOURCE")
            .ok()
            .and_then(|v| SourceKind::parse(&v))
            .unwrap_or_default();

        let ws_url = env::var("WS_URL").unwrap_or_else(|_| "ws://localhost:8080".to_string());

        Config {
            language: LanguageConfig::default(),
            tooltip: TooltipConfig::default(),
            translator: TranslatorConfig::from_env(),
            anki: AnkiConfig::new(),
            speech: SpeechConfig::default(),

            source,
            poll_interval_ms,
            ws_url,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            language: LanguageConfig::default(),
            tooltip: TooltipConfig::default(),
            translator: TranslatorConfig::default(),
            anki: AnkiConfig::default(),
            speech: SpeechConfig::default(),
            source: SourceKind::default(),
            poll_interval_ms: 500,
            ws_url: "ws://localhost:8080".to_string(),
        }
    }
}
