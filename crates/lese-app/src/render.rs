use std::collections::HashMap;

use kanal::AsyncReceiver;
use lese_core::{ListenState, LoadState, TooltipState};
use lese_types::{AppEvent, OverlayView};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

pub fn overlay_view(block_id: Uuid, span: usize, word: &str, state: &TooltipState) -> OverlayView {
    let notice = match state.listen {
        ListenState::Speaking => Some("speaking..."),
        ListenState::Failed => Some("could not play"),
        ListenState::Idle => state.added.then_some("added to vocabulary"),
    };

    OverlayView {
        block_id,
        span,
        word: word.to_string(),
        visible: state.is_visible(),
        position: state.position,
        below: state.below,
        loading: state.load == LoadState::Loading,
        translation: state.word_info.as_ref().map(|info| info.translation.clone()),
        example: state
            .word_info
            .as_ref()
            .map(|info| info.example.clone())
            .filter(|example| !example.is_empty()),
        notice: notice.map(str::to_string),
    }
}

/// Console rendering of the current block and its open overlays
#[derive(Default)]
pub struct Renderer {
    block: Option<Uuid>,
    shown: HashMap<usize, OverlayView>,
}

impl Renderer {
    /// Text to print for `event`, if anything changed on screen
    pub fn render(&mut self, event: AppEvent) -> Option<String> {
        match event {
            AppEvent::BackendReady => Some("ready: type Norwegian text, or 'help'".to_string()),
            AppEvent::ShowAnnotated {
                block_id,
                markup,
                words,
            } => {
                self.block = Some(block_id);
                self.shown.clear();
                if words.is_empty() {
                    return Some(format!("{markup}\n(no words to look up)"));
                }
                Some(format!("{markup}\n{}", legend(&words)))
            }
            AppEvent::OverlayChanged(view) => {
                if self.block != Some(view.block_id) {
                    return None;
                }
                if !view.visible {
                    return self
                        .shown
                        .remove(&view.span)
                        .map(|closed| format!("[{}] {} closed", closed.span, closed.word));
                }
                if self.shown.get(&view.span) == Some(&view) {
                    return None;
                }
                let line = describe(&view);
                self.shown.insert(view.span, view);
                Some(line)
            }
            AppEvent::StatusUpdate { status, speaking } => {
                Some(format!("{} {}", if speaking { "*" } else { "-" }, status))
            }
            _ => None,
        }
    }
}

fn legend(words: &[String]) -> String {
    words
        .iter()
        .enumerate()
        .map(|(span, word)| format!("[{span}] {word}"))
        .collect::<Vec<_>>()
        .join("  ")
}

fn describe(view: &OverlayView) -> String {
    let translation = if view.loading {
        "...".to_string()
    } else {
        view.translation.clone().unwrap_or_default()
    };

    let mut line = format!(
        "[{}] {} = {} @ ({:.0}, {:.0}){}",
        view.span,
        view.word,
        translation,
        view.position.x,
        view.position.y,
        if view.below { " below" } else { "" }
    );
    if let Some(notice) = &view.notice {
        line.push_str(&format!(" ({notice})"));
    }
    if let Some(example) = &view.example {
        line.push_str(&format!("\n    \"{example}\""));
    }
    line
}

pub async fn render_loop(app_to_ui_rx: AsyncReceiver<AppEvent>, cancel: CancellationToken) -> anyhow::Result<()> {
    let mut renderer = Renderer::default();

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = app_to_ui_rx.recv() => event?,
        };
        if let Some(output) = renderer.render(event) {
            println!("{output}");
        }
    }

    tracing::debug!("Renderer stopped");
    Ok(())
}
