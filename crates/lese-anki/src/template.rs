use serde::{Deserialize, Serialize};

/// Card layout; `{word}`, `{translation}` and `{example}` are substituted HTML-escaped
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardTemplate {
    pub deck: String,
    pub model: String,
    pub front_template: String,
    pub back_template: String,
}

impl CardTemplate {
    pub fn default_norwegian() -> Self {
        Self {
            deck: "Norwegian".to_string(),
            model: "Basic".to_string(),
            front_template: "{word}".to_string(),
            back_template: "{translation}<br><i>{example}</i>".to_string(),
        }
    }

    pub fn new(deck: String, model: String, front: String, back: String) -> Self {
        Self {
            deck,
            model,
            front_template: front,
            back_template: back,
        }
    }

    pub fn format_front(&self, word: &str, translation: &str, example: Option<&str>) -> String {
        fill(&self.front_template, word, translation, example)
    }

    /// An absent example drops the whole `<br><i>{example}</i>` tail of the default layout
    pub fn format_back(&self, word: &str, translation: &str, example: Option<&str>) -> String {
        let template = match example {
            Some(example) if !example.trim().is_empty() => self.back_template.clone(),
            _ => self.back_template.replace("<br><i>{example}</i>", ""),
        };
        fill(&template, word, translation, example)
    }
}

fn fill(template: &str, word: &str, translation: &str, example: Option<&str>) -> String {
    template
        .replace("{word}", &escape(word))
        .replace("{translation}", &escape(translation))
        .replace("{example}", &escape(example.unwrap_or_default()))
}

fn escape(field: &str) -> String {
    field
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_carries_translation_and_example() {
        let template = CardTemplate::default_norwegian();
        assert_eq!(template.format_front("hunden", "the dog", None), "hunden");
        assert_eq!(
            template.format_back("hunden", "the dog", Some("Jeg liker hunden.")),
            "the dog<br><i>Jeg liker hunden.</i>"
        );
    }

    #[test]
    fn missing_example_leaves_no_empty_markup() {
        let template = CardTemplate::default_norwegian();
        assert_eq!(template.format_back("hunden", "the dog", None), "the dog");
        assert_eq!(template.format_back("hunden", "the dog", Some(" ")), "the dog");
    }

    #[test]
    fn fields_are_escaped() {
        let template = CardTemplate::default_norwegian();
        assert_eq!(template.format_back("x", "a <b> & c", None), "a &lt;b&gt; &amp; c");
    }
}
