use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_program() -> String {
    "espeak-ng".to_string()
}

fn default_args() -> Vec<String> {
    vec!["-v".to_string(), "{lang}".to_string(), "{text}".to_string()]
}

/// External text-to-speech program; `{lang}` and `{text}` are substituted per call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_args")]
    pub args: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            program: default_program(),
            args: default_args(),
        }
    }
}
