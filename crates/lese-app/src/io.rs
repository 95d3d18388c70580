use std::sync::Arc;
use std::time::Duration;

use kanal::AsyncSender;
use lese_config::SourceKind;
use lese_types::{AppEvent, TextSource};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Feed text blocks from the configured source until cancelled
pub async fn watcher_io(
    state: Arc<AppState>,
    cancel: CancellationToken,
    ui_to_app_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let (source, poll_interval, ws_url) = {
        let config = state.config.read().await;
        (
            config.source,
            Duration::from_millis(config.poll_interval_ms),
            config.ws_url.clone(),
        )
    };

    match source {
        SourceKind::Stdin => {
            tracing::info!("Reading text from the console");
            cancel.cancelled().await;
        }
        SourceKind::Clipboard => {
            tracing::info!("Starting clipboard watcher");

            let tx = ui_to_app_tx.clone();
            tokio::select! {
                result = lese_io::clipboard::watch_clipboard(poll_interval, move |text| {
                    forward(&tx, text, TextSource::Clipboard);
                }) => {
                    if let Err(e) = result {
                        tracing::error!("Clipboard watcher error: {}", e);
                    }
                }
                _ = cancel.cancelled() => {
                    tracing::info!("Clipboard watcher stopping");
                }
            }
        }
        SourceKind::Websocket => {
            tracing::info!("Starting WebSocket listener on {}", ws_url);

            let tx = ui_to_app_tx.clone();
            let mut listener = lese_io::ws::start_ws_listener(&ws_url, move |text| {
                forward(&tx, text, TextSource::Websocket);
            })
            .await?;

            tokio::select! {
                _ = cancel.cancelled() => {
                    listener.abort();
                    tracing::info!("WebSocket listener stopping");
                }
                _ = &mut listener => {
                    tracing::warn!("WebSocket listener ended");
                }
            }
        }
    }

    Ok(())
}

fn forward(tx: &AsyncSender<AppEvent>, text: String, source: TextSource) {
    match tx.try_send(AppEvent::RawTextInput { text, source }) {
        Ok(true) => {}
        Ok(false) => tracing::warn!("Dropping {} text, app is busy", source.as_str()),
        Err(e) => tracing::error!("Failed to send {} text to app: {}", source.as_str(), e),
    }
}
