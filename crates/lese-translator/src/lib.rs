pub type LanguageCode = String;

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` between two language codes (ISO 639-1, lowercase)
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError>;

    /// Language pairs this provider accepts
    fn supported_languages(&self) -> Vec<(LanguageCode, LanguageCode)>;

    fn supports(&self, from: &str, to: &str) -> bool {
        self.supported_languages()
            .iter()
            .any(|(f, t)| f == from && t == to)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Translation {
    pub text: String,
    pub from: LanguageCode,
    pub to: LanguageCode,
    pub provider: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Unsupported language pair: {from} -> {to}")]
    UnsupportedLanguagePair { from: String, to: String },

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,

    #[error("Nothing to translate")]
    EmptyText,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    #[async_trait::async_trait]
    impl Translator for Fixed {
        async fn translate(
            &self,
            text: &str,
            from: LanguageCode,
            to: LanguageCode,
        ) -> Result<Translation, TranslateError> {
            Ok(Translation {
                text: text.to_uppercase(),
                from,
                to,
                provider: "fixed".to_string(),
            })
        }

        fn supported_languages(&self) -> Vec<(LanguageCode, LanguageCode)> {
            vec![("nb".to_string(), "en".to_string())]
        }
    }

    #[test]
    fn supports_checks_the_pair_direction() {
        assert!(Fixed.supports("nb", "en"));
        assert!(!Fixed.supports("en", "nb"));
    }

    #[test]
    fn errors_describe_the_pair() {
        let e = TranslateError::UnsupportedLanguagePair {
            from: "ja".to_string(),
            to: "en".to_string(),
        };
        assert_eq!(e.to_string(), "Unsupported language pair: ja -> en");
    }
}
