use unicode_normalization::UnicodeNormalization;

/// Matching key for a word: NFC, lowercased
pub fn normalize_word(word: &str) -> String {
    word.nfc().collect::<String>().to_lowercase()
}

/// Strip leading and trailing non-word characters, returning the byte offset of what remains
pub fn trim_token(raw: &str, is_word_char: impl Fn(char) -> bool) -> (usize, &str) {
    let start = raw
        .char_indices()
        .find(|(_, c)| is_word_char(*c))
        .map(|(i, _)| i)
        .unwrap_or(raw.len());
    let end = raw
        .char_indices()
        .rev()
        .find(|(_, c)| is_word_char(*c))
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(start);

    if end <= start {
        return (start, "");
    }
    (start, &raw[start..end])
}
