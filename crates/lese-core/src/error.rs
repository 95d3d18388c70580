#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("Speech output disabled")]
    Disabled,

    #[error("Failed to start speech program: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("Speech program exited with {0}")]
    Exit(String),

    #[error("Speech backend error: {0}")]
    Backend(String),
}

#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    #[error("Vocabulary store disabled")]
    Disabled,

    #[error("Vocabulary store error: {0}")]
    Store(String),
}
