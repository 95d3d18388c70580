use std::collections::HashSet;

use crate::preprocess::normalize_word;

/// Static word tables for one target language
///
/// Language crates expose these as `static` data; [`Lexicon::from_tables`] turns them into the
/// normalized lookup sets the classifier works on.
#[derive(Debug, Clone, Copy)]
pub struct LexiconTables {
    /// Language identifier (ISO 639-1 code: "nb", "nn", "sv", ...)
    pub code: &'static str,
    /// Letters that mark a token as target-language on sight
    pub special_letters: &'static [char],
    /// Letters a native word may consist of (lowercase)
    pub alphabet: &'static [char],
    pub english_stop_words: &'static [&'static str],
    /// Closed-class target words: pronouns, determiners, question words, auxiliaries
    pub function_words: &'static [&'static str],
    pub common_words: &'static [&'static str],
    pub suffixes: &'static [&'static str],
    pub supplementary_words: &'static [&'static str],
}

/// Normalized, case-insensitive view of [`LexiconTables`]
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub code: String,
    pub special_letters: HashSet<char>,
    pub alphabet: HashSet<char>,
    pub english_stop_words: HashSet<String>,
    pub function_words: HashSet<String>,
    pub common_words: HashSet<String>,
    /// Longest first
    pub suffixes: Vec<String>,
    pub supplementary_words: HashSet<String>,
    /// Tokens shorter than this are never annotated
    pub min_len: usize,
    /// Minimum length for the alphabet-only acceptance rule
    pub min_alphabetic_len: usize,
}

impl Lexicon {
    pub fn from_tables(tables: &LexiconTables) -> Self {
        let set = |words: &[&str]| words.iter().map(|w| normalize_word(w)).collect::<HashSet<_>>();

        let mut suffixes: Vec<String> = tables.suffixes.iter().map(|s| normalize_word(s)).collect();
        suffixes.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));
        suffixes.dedup();

        Self {
            code: tables.code.to_string(),
            special_letters: tables
                .special_letters
                .iter()
                .flat_map(|c| c.to_lowercase())
                .collect(),
            alphabet: tables.alphabet.iter().flat_map(|c| c.to_lowercase()).collect(),
            english_stop_words: set(tables.english_stop_words),
            function_words: set(tables.function_words),
            common_words: set(tables.common_words),
            suffixes,
            supplementary_words: set(tables.supplementary_words),
            min_len: 3,
            min_alphabetic_len: 4,
        }
    }

    /// Characters kept when trimming punctuation off a token
    pub fn is_word_char(&self, c: char) -> bool {
        c.is_alphanumeric() || c == '_' || self.special_letters.contains(&c.to_lowercase().next().unwrap_or(c))
    }

    pub fn has_special_letter(&self, normalized: &str) -> bool {
        normalized.chars().any(|c| self.special_letters.contains(&c))
    }

    pub fn is_alphabetic(&self, normalized: &str) -> bool {
        !normalized.is_empty() && normalized.chars().all(|c| self.alphabet.contains(&c))
    }

    pub fn inflectional_suffix(&self, normalized: &str) -> Option<&str> {
        self.suffixes
            .iter()
            .find(|suffix| normalized.ends_with(suffix.as_str()))
            .map(String::as_str)
    }
}

/// Whitespace-delimited word with surrounding punctuation removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub surface: String,
    pub normalized: String,
    /// Byte offset of `surface` in the source text
    pub position: usize,
}
