use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;

const DUPLICATE_NOTE: &str = "duplicate";

/// Outcome of adding a note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteAdded {
    Created(u64),
    /// Anki already holds an identical note
    Duplicate,
}

#[derive(Clone)]
pub struct AnkiConnectClient {
    base_url: String,
    client: reqwest::Client,
}

impl AnkiConnectClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Create the deck if missing; returns its id
    pub async fn create_deck(&self, deck: &str) -> Result<u64> {
        let response: AnkiResponse<u64> = self.invoke("createDeck", json!({ "deck": deck })).await?;
        response.into_result()
    }

    pub async fn add_note(&self, deck: &str, model: &str, front: &str, back: &str) -> Result<NoteAdded> {
        let response: AnkiResponse<u64> = self.invoke("addNote", note_params(deck, model, front, back)).await?;
        if response.is_duplicate() {
            return Ok(NoteAdded::Duplicate);
        }
        response.into_result().map(NoteAdded::Created)
    }

    async fn invoke<T>(&self, action: &str, params: serde_json::Value) -> Result<AnkiResponse<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let request = AnkiRequest {
            action: action.to_string(),
            version: 6,
            params,
        };

        let response = self
            .client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to AnkiConnect")?;

        response
            .json::<AnkiResponse<T>>()
            .await
            .context("Failed to parse AnkiConnect response")
    }
}

fn note_params(deck: &str, model: &str, front: &str, back: &str) -> serde_json::Value {
    json!({
        "note": {
            "deckName": deck,
            "modelName": model,
            "fields": {
                "Front": front,
                "Back": back
            },
            "options": {
                "allowDuplicate": false,
                "duplicateScope": "deck"
            },
            "tags": ["lese"]
        }
    })
}

#[derive(Serialize)]
struct AnkiRequest {
    action: String,
    version: u32,
    params: serde_json::Value,
}

#[derive(Deserialize)]
struct AnkiResponse<T> {
    result: Option<T>,
    error: Option<String>,
}

impl<T> AnkiResponse<T> {
    fn is_duplicate(&self) -> bool {
        self.error
            .as_deref()
            .is_some_and(|error| error.contains(DUPLICATE_NOTE))
    }

    fn into_result(self) -> Result<T> {
        if let Some(error) = self.error {
            anyhow::bail!("AnkiConnect error: {}", error);
        }

        self.result.context("AnkiConnect returned null result")
    }
}
