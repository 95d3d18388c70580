mod client;
mod template;

pub use client::{AnkiConnectClient, NoteAdded};
pub use template::CardTemplate;

use async_trait::async_trait;
use lese_config::anki::AnkiConfig;
use lese_core::{VocabularyAdapter, VocabularyError};
use tokio::sync::OnceCell;

/// Vocabulary store backed by an Anki deck through AnkiConnect
pub struct AnkiVocabulary {
    client: AnkiConnectClient,
    template: CardTemplate,
    enabled: bool,
    /// Set once the deck is known to exist
    deck_ready: OnceCell<()>,
}

impl AnkiVocabulary {
    pub fn new(client: AnkiConnectClient, template: CardTemplate) -> Self {
        Self {
            client,
            template,
            enabled: true,
            deck_ready: OnceCell::new(),
        }
    }

    pub fn from_config(config: &AnkiConfig) -> Self {
        let template = CardTemplate {
            deck: config.deck.clone(),
            model: config.model.clone(),
            ..CardTemplate::default_norwegian()
        };
        Self {
            client: AnkiConnectClient::new(config.url.clone()),
            template,
            enabled: config.enabled,
            deck_ready: OnceCell::new(),
        }
    }

    pub fn template(&self) -> &CardTemplate {
        &self.template
    }
}

#[async_trait]
impl VocabularyAdapter for AnkiVocabulary {
    async fn add_word(
        &self,
        norwegian: &str,
        english: &str,
        example: Option<&str>,
    ) -> Result<(), VocabularyError> {
        if !self.enabled {
            return Err(VocabularyError::Disabled);
        }

        // createDeck is a no-op for an existing deck; retried until it succeeds once
        self.deck_ready
            .get_or_try_init(|| async {
                let id = self.client.create_deck(&self.template.deck).await?;
                tracing::debug!("Deck {} ready ({})", self.template.deck, id);
                anyhow::Ok(())
            })
            .await
            .map_err(|e| VocabularyError::Store(format!("{:#}", e)))?;

        let front = self.template.format_front(norwegian, english, example);
        let back = self.template.format_back(norwegian, english, example);

        match self
            .client
            .add_note(&self.template.deck, &self.template.model, &front, &back)
            .await
        {
            Ok(NoteAdded::Created(id)) => {
                tracing::info!("Created Anki note {} for '{}'", id, norwegian);
                Ok(())
            }
            Ok(NoteAdded::Duplicate) => {
                tracing::debug!("'{}' is already in deck {}", norwegian, self.template.deck);
                Ok(())
            }
            Err(e) => Err(VocabularyError::Store(format!("{:#}", e))),
        }
    }
}
