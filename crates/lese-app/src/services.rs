use std::sync::Arc;

use async_trait::async_trait;
use lese_anki::AnkiVocabulary;
use lese_config::Config;
use lese_core::{
    AnnotationEngine, GuardedPronouncer, LexicalClassifier, PlaybackSlot, PronunciationAdapter, SentenceIndex,
    TooltipServices, TooltipTiming, VocabularyAdapter, WordInfoProvider,
};
use lese_lang_norwegian::{NorwegianTranslator, NorwegianWordInfo, bokmal};
use lese_speech::CommandSpeech;
use lese_types::WordInfo;

/// Collaborators built once from the config
#[derive(Clone)]
pub struct Services {
    pub engine: Arc<AnnotationEngine>,
    pub word_info: Arc<dyn WordInfoProvider>,
    pub pronunciation: Arc<dyn PronunciationAdapter>,
    pub vocabulary: Option<Arc<dyn VocabularyAdapter>>,
    pub playback: Arc<PlaybackSlot>,
    pub language_tag: String,
}

impl Services {
    pub fn from_config(config: &Config, sentences: Arc<SentenceIndex>) -> Self {
        let pronouncer = GuardedPronouncer::new(CommandSpeech::from_config(&config.speech));
        let playback = pronouncer.slot().clone();

        Self {
            engine: Arc::new(annotation_engine()),
            word_info: word_info_provider(config, sentences),
            pronunciation: Arc::new(pronouncer),
            vocabulary: vocabulary(config),
            playback,
            language_tag: config.language.speech_tag.clone(),
        }
    }

    pub fn tooltip_services(&self, timing: TooltipTiming) -> TooltipServices {
        TooltipServices {
            word_info: self.word_info.clone(),
            pronunciation: self.pronunciation.clone(),
            vocabulary: self.vocabulary.clone(),
            timing,
            language_tag: self.language_tag.clone(),
        }
    }
}

pub fn annotation_engine() -> AnnotationEngine {
    AnnotationEngine::new(LexicalClassifier::new(Arc::new(bokmal())))
}

fn word_info_provider(config: &Config, sentences: Arc<SentenceIndex>) -> Arc<dyn WordInfoProvider> {
    let translator = &config.translator;
    if translator.is_usable() {
        tracing::info!("Translating {} -> {} with {}", translator.from_lang, translator.to_lang, translator.provider);
        Arc::new(NorwegianWordInfo::with_languages(
            NorwegianTranslator::new(translator.api_key.clone(), translator.api_url.clone()),
            sentences,
            translator.from_lang.clone(),
            translator.to_lang.clone(),
        ))
    } else {
        tracing::warn!("Translator disabled or DEEPL_API_KEY missing, overlays show examples only");
        Arc::new(OfflineWordInfo { sentences })
    }
}

fn vocabulary(config: &Config) -> Option<Arc<dyn VocabularyAdapter>> {
    if config.anki.enabled {
        Some(Arc::new(AnkiVocabulary::from_config(&config.anki)))
    } else {
        tracing::warn!("Anki integration disabled");
        None
    }
}

/// Word info without a translator: fallback text plus an example from recent reading
pub struct OfflineWordInfo {
    pub sentences: Arc<SentenceIndex>,
}

#[async_trait]
impl WordInfoProvider for OfflineWordInfo {
    async fn word_info(&self, word: &str) -> WordInfo {
        let mut info = WordInfo::fallback(word);
        info.example = self.sentences.example_for(word).await.unwrap_or_default();
        info
    }
}
