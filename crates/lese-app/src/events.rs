use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lese_core::TooltipTiming;
use lese_types::{AppEvent, TextSource};
use tokio_util::sync::CancellationToken;

use crate::services::Services;
use crate::session::ReadingSession;
use crate::state::AppState;

pub mod config_update;
pub mod interaction;
pub mod text_input;

use config_update::handle_config_update;
use interaction::handle_ui_event;
use text_input::handle_text_input;

/// App's main loop; cancels `cancel` itself when asked to shut down
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    services: Services,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let timing = {
        let config = state.config.read().await;
        TooltipTiming::from_config(&config.tooltip)
    };
    let mut session = ReadingSession::new(&services, timing);

    app_to_ui_tx.send(AppEvent::BackendReady).await?;
    tracing::info!("[EVENT_LOOP] Waiting for events");

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = ui_to_app_rx.recv() => event?,
        };

        if !handle_events(&state, &mut session, &app_to_ui_tx, event).await? {
            tracing::info!("Shutdown requested");
            cancel.cancel();
            break;
        }
    }

    session.close();
    Ok(())
}

/// False once the app should stop
pub async fn handle_events(
    state: &AppState,
    session: &mut ReadingSession,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<bool> {
    match event {
        AppEvent::TextInput(text) => {
            handle_text_input(state, session, app_to_ui_tx, &text, TextSource::Manual).await?;
        }
        AppEvent::RawTextInput { text, source } => {
            handle_text_input(state, session, app_to_ui_tx, &text, source).await?;
        }
        AppEvent::UiEvent(event) => {
            return handle_ui_event(session, app_to_ui_tx, event).await;
        }
        AppEvent::ConfigUpdate { field, value } => {
            let status = match handle_config_update(state, session, &field, &value).await {
                Ok(()) => format!("{field} = {value} (from the next text on)"),
                Err(e) => {
                    tracing::warn!("Config update rejected: {:#}", e);
                    format!("{e:#}")
                }
            };
            app_to_ui_tx
                .send(AppEvent::StatusUpdate {
                    status,
                    speaking: false,
                })
                .await?;
        }
        AppEvent::Shutdown => return Ok(false),
        AppEvent::ShowAnnotated { .. }
        | AppEvent::OverlayChanged(_)
        | AppEvent::StatusUpdate { .. }
        | AppEvent::BackendReady => {
            // UI-only events
        }
    }

    Ok(true)
}
