use std::collections::VecDeque;

use tokio::sync::RwLock;

use crate::preprocess::{normalize_word, trim_token};

const SENTENCE_END: [char; 3] = ['.', '!', '?'];

/// Recently read sentences, searchable by word
///
/// Feeds example sentences to word lookups: a learner sees the word used in the text they are
/// actually reading.
pub struct SentenceIndex {
    blocks: RwLock<VecDeque<Vec<String>>>,
    max_blocks: usize,
}

impl SentenceIndex {
    pub fn new(max_blocks: usize) -> Self {
        Self {
            blocks: RwLock::new(VecDeque::new()),
            max_blocks: max_blocks.max(1),
        }
    }

    /// Remember a text block, evicting the oldest past capacity
    pub async fn ingest(&self, text: &str) {
        let sentences = split_sentences(text);
        if sentences.is_empty() {
            return;
        }

        let mut blocks = self.blocks.write().await;
        blocks.push_front(sentences);
        blocks.truncate(self.max_blocks);
    }

    /// Newest sentence containing `word` as a whole word
    pub async fn example_for(&self, word: &str) -> Option<String> {
        let key = normalize_word(word);
        let blocks = self.blocks.read().await;

        blocks
            .iter()
            .flat_map(|sentences| sentences.iter())
            .find(|sentence| {
                sentence.split_whitespace().any(|raw| {
                    let (_, token) = trim_token(raw, char::is_alphanumeric);
                    normalize_word(token) == key
                })
            })
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.blocks.read().await.len()
    }
}

fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    let mut push = |current: &mut String| {
        let sentence = current.split_whitespace().collect::<Vec<_>>().join(" ");
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        current.clear();
    };

    for c in text.chars() {
        if c == '\n' {
            push(&mut current);
            continue;
        }
        current.push(c);
        if SENTENCE_END.contains(&c) {
            push(&mut current);
        }
    }
    push(&mut current);

    sentences
}
