use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Point, Rect, Size};

#[derive(Debug, Clone)]
pub enum AppEvent {
    ConfigUpdate {
        field: String,
        value: String,
    },
    UiEvent(UiEvent),
    TextInput(String),
    RawTextInput {
        text: String,
        source: TextSource,
    },
    /// Annotated block ready for the host to render; `words[i]` is the surface of span `i`
    ShowAnnotated {
        block_id: Uuid,
        markup: String,
        words: Vec<String>,
    },
    OverlayChanged(OverlayView),
    StatusUpdate {
        status: String,
        speaking: bool,
    },
    BackendReady,
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSource {
    Clipboard,
    Websocket,
    Stdin,
    Manual,
}

impl TextSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextSource::Clipboard => "Clipboard",
            TextSource::Websocket => "WebSocket",
            TextSource::Stdin => "Stdin",
            TextSource::Manual => "Manual",
        }
    }
}

/// Interaction on one rendered word, addressed by its span index in the current block
#[derive(Debug, Clone)]
pub enum UiEvent {
    PointerEnter {
        span: usize,
        anchor: Rect,
        viewport: Size,
    },
    PointerLeave {
        span: usize,
    },
    TouchStart {
        span: usize,
        anchor: Rect,
        viewport: Size,
    },
    TouchEnd {
        span: usize,
    },
    Dismiss {
        span: usize,
    },
    OverlayMeasured {
        span: usize,
        size: Size,
    },
    Listen {
        span: usize,
    },
    AddToVocabulary {
        span: usize,
    },
    Close,
}

/// Render-ready snapshot of one word overlay
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    pub block_id: Uuid,
    pub span: usize,
    pub word: String,
    pub visible: bool,
    pub position: Point,
    pub below: bool,
    pub loading: bool,
    pub translation: Option<String>,
    pub example: Option<String>,
    /// Transient control status: speaking, playback failure, added to vocabulary
    pub notice: Option<String>,
}

/// Translation and example for one word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordInfo {
    pub word: String,
    pub translation: String,
    pub example: String,
    pub success: bool,
}

impl WordInfo {
    pub fn found(word: impl Into<String>, translation: impl Into<String>, example: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            translation: translation.into(),
            example: example.into(),
            success: true,
        }
    }

    /// Degraded result shown when no translation could be obtained
    pub fn fallback(word: &str) -> Self {
        Self {
            word: word.to_string(),
            translation: format!("word: {word}"),
            example: String::new(),
            success: false,
        }
    }
}
