use serde::{Deserialize, Serialize};

fn default_code() -> String {
    "nb".to_string()
}

fn default_speech_tag() -> String {
    "nb-NO".to_string()
}

fn default_max_indexed_blocks() -> usize {
    32
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Target language (ISO 639-1)
    #[serde(default = "default_code")]
    pub code: String,
    /// BCP 47 tag handed to the pronunciation backend
    #[serde(default = "default_speech_tag")]
    pub speech_tag: String,
    /// Text blocks kept for example sentence lookup
    #[serde(default = "default_max_indexed_blocks")]
    pub max_indexed_blocks: usize,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            code: default_code(),
            speech_tag: default_speech_tag(),
            max_indexed_blocks: default_max_indexed_blocks(),
        }
    }
}
