use kanal::AsyncSender;
use lese_core::TooltipInput;
use lese_types::{AppEvent, UiEvent};

use crate::session::ReadingSession;

/// Span and overlay input for a word interaction; `None` for [`UiEvent::Close`]
pub fn tooltip_input(event: UiEvent) -> Option<(usize, TooltipInput)> {
    let routed = match event {
        UiEvent::PointerEnter { span, anchor, viewport } => (span, TooltipInput::PointerEnter { anchor, viewport }),
        UiEvent::PointerLeave { span } => (span, TooltipInput::PointerLeave),
        UiEvent::TouchStart { span, anchor, viewport } => (span, TooltipInput::TouchStart { anchor, viewport }),
        UiEvent::TouchEnd { span } => (span, TooltipInput::TouchEnd),
        UiEvent::Dismiss { span } => (span, TooltipInput::Dismiss),
        UiEvent::OverlayMeasured { span, size } => (span, TooltipInput::OverlayMeasured(size)),
        UiEvent::Listen { span } => (span, TooltipInput::Listen),
        UiEvent::AddToVocabulary { span } => (span, TooltipInput::AddToVocabulary),
        UiEvent::Close => return None,
    };
    Some(routed)
}

/// False when the host closed
pub async fn handle_ui_event(
    session: &ReadingSession,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: UiEvent,
) -> anyhow::Result<bool> {
    let Some((span, input)) = tooltip_input(event) else {
        return Ok(false);
    };

    if !session.dispatch(span, input) {
        tracing::debug!("Span {} not in block {:?}", span, session.block_id());
        let status = match session.current() {
            Some(text) => format!("no word {} (this text has {})", span, text.span_count()),
            None => "no text yet".to_string(),
        };
        app_to_ui_tx
            .send(AppEvent::StatusUpdate {
                status,
                speaking: false,
            })
            .await?;
    }

    Ok(true)
}
