use kanal::AsyncSender;
use lese_types::{AppEvent, TextSource};

use crate::session::ReadingSession;
use crate::state::AppState;

pub async fn handle_text_input(
    state: &AppState,
    session: &mut ReadingSession,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    text: &str,
    source: TextSource,
) -> anyhow::Result<()> {
    let text = text.trim();
    if text.is_empty() {
        tracing::debug!("Ignoring blank text from {}", source.as_str());
        return Ok(());
    }

    // index first so overlays of this block find their own sentences
    state.sentences.ingest(text).await;

    let event = session.show(text, app_to_ui_tx);
    if let AppEvent::ShowAnnotated { words, .. } = &event {
        tracing::info!("{} text: {} chars, {} words annotated", source.as_str(), text.len(), words.len());
    }

    app_to_ui_tx.send(event).await?;
    Ok(())
}
