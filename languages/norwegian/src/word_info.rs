use std::sync::Arc;

use async_trait::async_trait;
use lese_core::{SentenceIndex, WordInfoProvider};
use lese_translator::{LanguageCode, Translator};
use lese_types::WordInfo;

/// Translation from a [`Translator`], example sentence from recently read text
pub struct NorwegianWordInfo<T> {
    translator: T,
    sentences: Arc<SentenceIndex>,
    from: LanguageCode,
    to: LanguageCode,
}

impl<T: Translator> NorwegianWordInfo<T> {
    pub fn new(translator: T, sentences: Arc<SentenceIndex>) -> Self {
        Self::with_languages(translator, sentences, "nb".to_string(), "en".to_string())
    }

    pub fn with_languages(
        translator: T,
        sentences: Arc<SentenceIndex>,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Self {
        Self {
            translator,
            sentences,
            from,
            to,
        }
    }
}

#[async_trait]
impl<T: Translator> WordInfoProvider for NorwegianWordInfo<T> {
    async fn word_info(&self, word: &str) -> WordInfo {
        let key = word.trim().to_lowercase();

        match self
            .translator
            .translate(&key, self.from.clone(), self.to.clone())
            .await
        {
            Ok(translation) => {
                let example = self.sentences.example_for(&key).await.unwrap_or_default();
                tracing::debug!("'{}' -> '{}'", key, translation.text);
                WordInfo::found(key, translation.text, example)
            }
            Err(e) => {
                tracing::warn!("Translation of '{}' failed: {}", word, e);
                WordInfo::fallback(word)
            }
        }
    }
}
