use async_trait::async_trait;
use lese_translator::{LanguageCode, TranslateError, Translation, Translator};

/// DeepL client for Norwegian text
#[derive(Clone)]
pub struct NorwegianTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl NorwegianTranslator {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_url,
        }
    }
}

/// DeepL language codes; every Norwegian variant goes through Bokmål
fn deepl_code(code: &str) -> String {
    match code.to_lowercase().as_str() {
        "no" | "nb" | "nn" => "NB".to_string(),
        other => other.to_uppercase(),
    }
}

fn first_translation(json: &serde_json::Value) -> Result<String, TranslateError> {
    json["translations"]
        .get(0)
        .and_then(|t| t["text"].as_str())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))
}

#[async_trait]
impl Translator for NorwegianTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }
        if text.trim().is_empty() {
            return Err(TranslateError::EmptyText);
        }
        if !self.supports(&from, &to) {
            return Err(TranslateError::UnsupportedLanguagePair { from, to });
        }

        let source = deepl_code(&from);
        let target = deepl_code(&to);
        let params = [
            ("text", text),
            ("source_lang", source.as_str()),
            ("target_lang", target.as_str()),
        ];

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&params)
            .send()
            .await?;

        if response.status() == 429 {
            return Err(TranslateError::RateLimitExceeded);
        }

        if response.status() == 403 {
            return Err(TranslateError::AuthenticationError);
        }

        if !response.status().is_success() {
            return Err(TranslateError::ApiError(format!("HTTP {}", response.status())));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| TranslateError::ApiError(format!("Failed to parse response: {}", e)))?;

        Ok(Translation {
            text: first_translation(&json)?,
            from,
            to,
            provider: "deepl".to_string(),
        })
    }

    fn supported_languages(&self) -> Vec<(LanguageCode, LanguageCode)> {
        ["nb", "no", "nn"]
            .into_iter()
            .flat_map(|from| {
                ["en", "de", "fr", "es"]
                    .into_iter()
                    .map(move |to| (from.to_string(), to.to_string()))
            })
            .chain([("en".to_string(), "nb".to_string())])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn norwegian_variants_map_to_bokmal() {
        assert_eq!(deepl_code("no"), "NB");
        assert_eq!(deepl_code("nn"), "NB");
        assert_eq!(deepl_code("en"), "EN");
    }

    #[test]
    fn reads_the_first_translation() {
        let json = json!({ "translations": [{ "detected_source_language": "NB", "text": " the dog " }] });
        assert_eq!(first_translation(&json).unwrap(), "the dog");

        assert!(first_translation(&json!({ "translations": [] })).is_err());
        assert!(first_translation(&json!({ "translations": [{ "text": "" }] })).is_err());
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let translator = NorwegianTranslator::new(String::new(), "http://127.0.0.1:9".to_string());
        let result = translator.translate("hunden", "nb".into(), "en".into()).await;
        assert!(matches!(result, Err(TranslateError::AuthenticationError)));
    }

    #[tokio::test]
    async fn unsupported_pair_is_rejected_locally() {
        let translator = NorwegianTranslator::new("key".to_string(), "http://127.0.0.1:9".to_string());
        let result = translator.translate("hunden", "ja".into(), "en".into()).await;
        assert!(matches!(result, Err(TranslateError::UnsupportedLanguagePair { .. })));
    }
}
