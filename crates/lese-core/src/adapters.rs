use async_trait::async_trait;
use lese_types::WordInfo;

use crate::error::{SpeechError, VocabularyError};

/// Translation and example lookup for a single word
#[async_trait]
pub trait WordInfoProvider: Send + Sync {
    /// Never fails: on any internal error the result has `success: false` and fallback strings
    async fn word_info(&self, word: &str) -> WordInfo;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakOutcome {
    Played,
    /// Another playback held the slot; nothing was spoken
    Skipped,
}

/// Spoken form of a word or sentence, at most one at a time process-wide
#[async_trait]
pub trait PronunciationAdapter: Send + Sync {
    /// Resolves when playback ends or was skipped; errors only on real I/O failure
    async fn speak(&self, text: &str, language_tag: &str) -> Result<SpeakOutcome, SpeechError>;

    /// Drives a "speaking…" indicator
    fn is_speaking(&self) -> bool;
}

/// Raw audio output without any concurrency guard
#[async_trait]
pub trait SpeechBackend: Send + Sync {
    async fn play(&self, text: &str, language_tag: &str) -> Result<(), SpeechError>;
}

/// Personal vocabulary store. Repeated adds of the same word must be safe; de-duplication is
/// the store's job.
#[async_trait]
pub trait VocabularyAdapter: Send + Sync {
    async fn add_word(
        &self,
        norwegian: &str,
        english: &str,
        example: Option<&str>,
    ) -> Result<(), VocabularyError>;
}
