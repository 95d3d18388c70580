use std::sync::Arc;

use crate::language::Lexicon;
use crate::preprocess::normalize_word;

/// Characters that would make a wrapped word carry markup
const MARKUP_CHARS: [char; 4] = ['<', '>', '&', '"'];

/// Outcome of classifying one token, in rule order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    TooShort,
    Markup,
    EnglishStopWord,
    FunctionWord,
    SpecialLetter,
    CommonWord,
    Suffix,
    Alphabetic,
    Supplementary,
    Unrecognized,
}

impl Verdict {
    pub fn is_candidate(&self) -> bool {
        matches!(
            self,
            Verdict::SpecialLetter
                | Verdict::CommonWord
                | Verdict::Suffix
                | Verdict::Alphabetic
                | Verdict::Supplementary
        )
    }
}

/// Cheap heuristic deciding whether a token is a target-language word worth annotating
#[derive(Debug, Clone)]
pub struct LexicalClassifier {
    lexicon: Arc<Lexicon>,
}

impl LexicalClassifier {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn is_annotation_candidate(&self, token: &str) -> bool {
        self.classify(token).is_candidate()
    }

    /// Rejection rules run before acceptance rules, so a listed stop word never gets annotated
    pub fn classify(&self, token: &str) -> Verdict {
        let lexicon = &self.lexicon;
        let normalized = normalize_word(token);

        if normalized.chars().count() < lexicon.min_len {
            return Verdict::TooShort;
        }
        if normalized.contains(MARKUP_CHARS) {
            return Verdict::Markup;
        }
        if lexicon.english_stop_words.contains(&normalized) {
            return Verdict::EnglishStopWord;
        }
        if lexicon.function_words.contains(&normalized) {
            return Verdict::FunctionWord;
        }

        if lexicon.has_special_letter(&normalized) {
            return Verdict::SpecialLetter;
        }
        if lexicon.common_words.contains(&normalized) {
            return Verdict::CommonWord;
        }
        if lexicon.inflectional_suffix(&normalized).is_some() {
            return Verdict::Suffix;
        }
        if normalized.chars().count() >= lexicon.min_alphabetic_len && lexicon.is_alphabetic(&normalized) {
            return Verdict::Alphabetic;
        }
        if lexicon.supplementary_words.contains(&normalized) {
            return Verdict::Supplementary;
        }

        Verdict::Unrecognized
    }
}
