use std::process::Stdio;

use async_trait::async_trait;
use lese_config::speech::SpeechConfig;
use lese_core::{SpeechBackend, SpeechError};
use tokio::process::Command;

/// Text-to-speech through an external program such as `espeak-ng`
///
/// Each argument may contain `{lang}` (primary language subtag) and `{text}`; the text is passed
/// as a single argument, never through a shell.
#[derive(Debug, Clone)]
pub struct CommandSpeech {
    program: String,
    args: Vec<String>,
    enabled: bool,
}

impl CommandSpeech {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            enabled: true,
        }
    }

    pub fn from_config(config: &SpeechConfig) -> Self {
        Self {
            enabled: config.enabled,
            ..Self::new(config.program.clone(), config.args.clone())
        }
    }

    fn command_args(&self, text: &str, language_tag: &str) -> Vec<String> {
        let lang = primary_subtag(language_tag);
        self.args
            .iter()
            .map(|arg| arg.replace("{lang}", lang).replace("{text}", text))
            .collect()
    }
}

/// "nb-NO" -> "nb"
fn primary_subtag(language_tag: &str) -> &str {
    language_tag
        .split(['-', '_'])
        .next()
        .filter(|subtag| !subtag.is_empty())
        .unwrap_or(language_tag)
}

#[async_trait]
impl SpeechBackend for CommandSpeech {
    async fn play(&self, text: &str, language_tag: &str) -> Result<(), SpeechError> {
        if !self.enabled {
            return Err(SpeechError::Disabled);
        }

        let args = self.command_args(text, language_tag);
        tracing::debug!(">>> {} {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SpeechError::Exit(format!("{} {}", output.status, stderr.trim())));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_language_and_text() {
        let speech = CommandSpeech::from_config(&SpeechConfig::default());
        assert_eq!(
            speech.command_args("god morgen", "nb-NO"),
            vec!["-v", "nb", "god morgen"]
        );
    }

    #[test]
    fn bare_language_tags_pass_through() {
        assert_eq!(primary_subtag("nb"), "nb");
        assert_eq!(primary_subtag("nn_NO"), "nn");
        assert_eq!(primary_subtag(""), "");
    }

    #[tokio::test]
    async fn disabled_backend_never_spawns() {
        let config = SpeechConfig {
            enabled: false,
            program: "/nonexistent/tts".to_string(),
            ..SpeechConfig::default()
        };
        let result = CommandSpeech::from_config(&config).play("hei", "nb-NO").await;
        assert!(matches!(result, Err(SpeechError::Disabled)));
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let speech = CommandSpeech::new("/nonexistent/tts", vec!["{text}".to_string()]);
        let result = speech.play("hei", "nb-NO").await;
        assert!(matches!(result, Err(SpeechError::Spawn(_))));
    }
}
