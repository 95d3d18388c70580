use std::collections::{BTreeMap, HashSet};
use std::ops::Range;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::classifier::LexicalClassifier;
use crate::language::Token;
use crate::preprocess::{normalize_word, trim_token};

/// Class attribute carried by every engine span
pub const SPAN_CLASS: &str = "lese-word";

static SPAN_MARKUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<span class="lese-word" data-word="[^"]*" data-span="\d+">([^<]*)</span>"#)
        .expect("span markup pattern is valid")
});

/// A token accepted by the classifier, deduplicated by normalized form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateWord {
    pub surface: String,
    pub normalized: String,
}

/// One wrapped occurrence of a candidate word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedSpan {
    /// Position of the span inside its block; identity for overlay attachment
    pub index: usize,
    /// Occurrence text exactly as it appears in the source
    pub surface: String,
    /// Cross-reference key
    pub normalized: String,
    /// Byte range in the source text
    pub range: Range<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(Range<usize>),
    Word(AnnotatedSpan),
}

/// Source text split into literal runs and annotated words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedText {
    text: String,
    segments: Vec<Segment>,
}

impl AnnotatedText {
    pub fn spans(&self) -> impl Iterator<Item = &AnnotatedSpan> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Word(span) => Some(span),
            Segment::Literal(_) => None,
        })
    }

    pub fn span(&self, index: usize) -> Option<&AnnotatedSpan> {
        self.spans().find(|span| span.index == index)
    }

    pub fn span_count(&self) -> usize {
        self.spans().count()
    }

    /// Concatenation of every segment; always equal to the source
    pub fn plain(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(range) => &self.text[range.clone()],
                Segment::Word(span) => &self.text[span.range.clone()],
            })
            .collect()
    }

    /// Source text with every candidate wrapped; literal text is copied unchanged
    pub fn to_markup(&self) -> String {
        self.render(|s| s.to_string())
    }

    /// Like [`AnnotatedText::to_markup`], with literal text escaped for direct HTML embedding
    pub fn to_escaped_markup(&self) -> String {
        self.render(escape_html)
    }

    fn render(&self, literal: impl Fn(&str) -> String) -> String {
        let mut out = String::with_capacity(self.text.len() * 2);
        for segment in &self.segments {
            match segment {
                Segment::Literal(range) => out.push_str(&literal(&self.text[range.clone()])),
                Segment::Word(span) => {
                    out.push_str(&format!(
                        r#"<span class="{SPAN_CLASS}" data-word="{}" data-span="{}">{}</span>"#,
                        escape_html(&span.normalized),
                        span.index,
                        span.surface
                    ));
                }
            }
        }
        out
    }
}

/// Remove engine spans, leaving their text in place
///
/// Lossy when the raw text already contained engine-shaped spans: those are stripped too. Use
/// [`AnnotatedText::plain`] to recover the source exactly.
pub fn strip_markup(markup: &str) -> String {
    SPAN_MARKUP.replace_all(markup, "$1").into_owned()
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Rewrites raw prose into annotated segments
///
/// Every call is independent: the engine holds no per-call state and can be shared freely.
#[derive(Debug, Clone)]
pub struct AnnotationEngine {
    classifier: LexicalClassifier,
}

impl AnnotationEngine {
    pub fn new(classifier: LexicalClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &LexicalClassifier {
        &self.classifier
    }

    /// Annotated markup for raw text. Passing already annotated markup is not supported.
    pub fn annotate(&self, text: &str) -> String {
        self.annotate_spans(text).to_markup()
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let lexicon = self.classifier.lexicon();
        let base = text.as_ptr() as usize;

        text.split_whitespace()
            .filter_map(|raw| {
                let (offset, word) = trim_token(raw, |c| lexicon.is_word_char(c));
                if word.is_empty() {
                    return None;
                }
                Some(Token {
                    surface: word.to_string(),
                    normalized: normalize_word(word),
                    position: raw.as_ptr() as usize - base + offset,
                })
            })
            .collect()
    }

    /// Accepted tokens, one per normalized form, longest surface first
    pub fn candidates(&self, text: &str) -> Vec<CandidateWord> {
        let mut seen = HashSet::new();
        let mut candidates: Vec<CandidateWord> = self
            .tokenize(text)
            .into_iter()
            .filter(|token| self.classifier.is_annotation_candidate(&token.surface))
            .filter(|token| seen.insert(token.normalized.clone()))
            .map(|token| CandidateWord {
                surface: token.surface,
                normalized: token.normalized,
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.surface
                .chars()
                .count()
                .cmp(&a.surface.chars().count())
                .then_with(|| a.normalized.cmp(&b.normalized))
        });
        candidates
    }

    /// Two passes over the source: claim match ranges longest candidate first, then emit
    /// segments in text order. Matches are always taken from the untouched source, so no
    /// inserted markup can be matched again.
    pub fn annotate_spans(&self, text: &str) -> AnnotatedText {
        let candidates = self.candidates(text);
        tracing::debug!("Annotating {} bytes, {} candidates", text.len(), candidates.len());

        // start -> (end, candidate index)
        let mut claimed: BTreeMap<usize, (usize, usize)> = BTreeMap::new();

        for (idx, candidate) in candidates.iter().enumerate() {
            let Some(pattern) = word_pattern(&candidate.surface) else {
                continue;
            };
            for found in pattern.find_iter(text) {
                let range = found.range();
                if overlaps(&claimed, &range) {
                    continue;
                }
                claimed.insert(range.start, (range.end, idx));
            }
        }

        let mut segments = Vec::with_capacity(claimed.len() * 2 + 1);
        let mut cursor = 0;
        for (index, (start, (end, idx))) in claimed.into_iter().enumerate() {
            if start > cursor {
                segments.push(Segment::Literal(cursor..start));
            }
            segments.push(Segment::Word(AnnotatedSpan {
                index,
                surface: text[start..end].to_string(),
                normalized: candidates[idx].normalized.clone(),
                range: start..end,
            }));
            cursor = end;
        }
        if cursor < text.len() {
            segments.push(Segment::Literal(cursor..text.len()));
        }

        AnnotatedText {
            text: text.to_string(),
            segments,
        }
    }
}

/// Case-insensitive, boundary-anchored matcher for one word
fn word_pattern(word: &str) -> Option<Regex> {
    match RegexBuilder::new(&format!(r"\b{}\b", regex::escape(word)))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            tracing::warn!("Skipping candidate '{}': {}", word, e);
            None
        }
    }
}

fn overlaps(claimed: &BTreeMap<usize, (usize, usize)>, range: &Range<usize>) -> bool {
    if let Some((_, (end, _))) = claimed.range(..=range.start).next_back()
        && *end > range.start
    {
        return true;
    }
    claimed.range(range.start..range.end).next().is_some()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::language::{Lexicon, LexiconTables};

    const TABLES: LexiconTables = LexiconTables {
        code: "nb",
        special_letters: &['æ', 'ø', 'å'],
        alphabet: &[
            'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
            's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'æ', 'ø', 'å',
        ],
        english_stop_words: &["the", "and", "this"],
        function_words: &["jeg", "du", "han", "hun", "det", "er", "liker", "har", "på", "og"],
        common_words: &["bok"],
        suffixes: &["en", "er", "et", "ene"],
        supplementary_words: &[],
    };

    fn engine() -> AnnotationEngine {
        let lexicon = Arc::new(Lexicon::from_tables(&TABLES));
        AnnotationEngine::new(LexicalClassifier::new(lexicon))
    }

    fn wrapped(text: &str) -> Vec<String> {
        engine().annotate_spans(text).spans().map(|s| s.surface.clone()).collect()
    }

    #[test]
    fn wraps_hunden_but_not_stop_words() {
        let markup = engine().annotate("Jeg liker hunden.");
        assert_eq!(
            markup,
            r#"Jeg liker <span class="lese-word" data-word="hunden" data-span="0">hunden</span>."#
        );
    }

    #[test]
    fn stripping_markup_restores_the_source() {
        let texts = [
            "Jeg liker hunden.",
            "  Hunden   løper\tover\nbroen!  ",
            "«Bøkene» er på bordet, og BOK er et ord.",
            "Ingen kandidater her? Nei.",
            "a < b && \"quoted\" hunden's <b>tag</b>",
            "",
        ];
        let engine = engine();
        for text in texts {
            let annotated = engine.annotate_spans(text);
            assert_eq!(annotated.plain(), text);
            assert_eq!(strip_markup(&annotated.to_markup()), text);
        }
    }

    #[test]
    fn source_with_engine_shaped_spans_is_kept_verbatim() {
        let text = r#"see <span class="lese-word" data-word="x" data-span="0">abc</span> hunden"#;
        let annotated = engine().annotate_spans(text);

        assert_eq!(annotated.plain(), text);
        assert!(annotated.spans().any(|span| span.surface == "hunden"));
        assert!(annotated.to_escaped_markup().starts_with("see &lt;"));
    }

    #[test]
    fn longer_word_is_not_split_by_shorter_candidate() {
        // "snakk" is a candidate of its own and a prefix of "snakker"
        let annotated = engine().annotate_spans("Han snakker, snakk!");
        let spans: Vec<_> = annotated.spans().map(|s| (s.surface.as_str(), s.range.clone())).collect();
        assert_eq!(spans, vec![("snakker", 4..11), ("snakk", 13..18)]);

        let annotated = engine().annotate_spans("snakker");
        assert_eq!(annotated.span_count(), 1);
        assert_eq!(annotated.span(0).map(|s| s.surface.as_str()), Some("snakker"));
    }

    #[test]
    fn compound_claims_its_parts_first() {
        let spans = wrapped("norsk-engelsken og engelsken");
        assert_eq!(spans, vec!["norsk-engelsken".to_string(), "engelsken".to_string()]);
    }

    #[test]
    fn matches_every_casing_of_a_candidate() {
        let annotated = engine().annotate_spans("Hunden ser HUNDEN og hunden.");
        let surfaces: Vec<_> = annotated.spans().map(|s| s.surface.as_str()).collect();
        assert_eq!(surfaces, vec!["Hunden", "ser", "HUNDEN", "hunden"]);
        assert!(annotated.spans().filter(|s| s.surface.eq_ignore_ascii_case("hunden")).all(|s| s.normalized == "hunden"));
    }

    #[test]
    fn does_not_match_inside_other_words() {
        // "bok" is a candidate; "bok2" is not, and must not get a partial span
        let annotated = engine().annotate_spans("bok bok2");
        let ranges: Vec<_> = annotated.spans().map(|s| s.range.clone()).collect();
        assert_eq!(ranges, vec![0..3]);
    }

    #[test]
    fn every_span_is_a_candidate() {
        let engine = engine();
        let text = "Det er en fin dag på hytta, og vi spiser vafler med brunost.";
        for span in engine.annotate_spans(text).spans() {
            assert!(engine.classifier().is_annotation_candidate(&span.surface), "{}", span.surface);
        }
        for token in engine.tokenize(text) {
            if !engine.classifier().is_annotation_candidate(&token.surface) {
                let annotated = engine.annotate_spans(text);
                assert!(annotated.spans().all(|s| s.range.start != token.position));
            }
        }
    }

    #[test]
    fn span_indices_follow_text_order() {
        let annotated = engine().annotate_spans("blå hunden grønn");
        let indices: Vec<_> = annotated.spans().map(|s| (s.index, s.surface.as_str())).collect();
        assert_eq!(indices, vec![(0, "blå"), (1, "hunden"), (2, "grønn")]);
    }

    #[test]
    fn tokens_report_source_offsets() {
        let tokens = engine().tokenize("  «Hunden» løper.");
        assert_eq!(tokens[0].surface, "Hunden");
        assert_eq!(tokens[0].position, 4);
        assert_eq!(tokens[1].surface, "løper");
        assert_eq!(&"  «Hunden» løper."[tokens[1].position..], "løper.");
    }

    #[test]
    fn escaped_markup_neutralizes_literal_html() {
        let markup = engine().annotate_spans("<b> hunden </b>").to_escaped_markup();
        assert!(markup.starts_with("&lt;b&gt;"));
        assert!(markup.contains(r#"data-word="hunden""#));
    }
}
