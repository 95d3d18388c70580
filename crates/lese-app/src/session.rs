use std::sync::Arc;

use kanal::AsyncSender;
use lese_core::{AnnotatedText, AnnotationEngine, TooltipInput, TooltipLayer, TooltipTiming};
use lese_types::AppEvent;
use tokio::task::JoinSet;
use uuid::Uuid;

use crate::render::overlay_view;
use crate::services::Services;

/// The block currently on screen together with its overlays
pub struct ReadingSession {
    engine: Arc<AnnotationEngine>,
    layer: TooltipLayer,
    block: Option<(Uuid, AnnotatedText)>,
    /// Forward overlay state changes of the current block to the renderer
    watchers: JoinSet<()>,
}

impl ReadingSession {
    pub fn new(services: &Services, timing: TooltipTiming) -> Self {
        Self {
            engine: services.engine.clone(),
            layer: TooltipLayer::new(services.tooltip_services(timing)),
            block: None,
            watchers: JoinSet::new(),
        }
    }

    /// Annotate `text`, replace the current block and start forwarding its overlay states
    pub fn show(&mut self, text: &str, app_to_ui_tx: &AsyncSender<AppEvent>) -> AppEvent {
        // dropping the old set aborts the previous block's watchers
        self.watchers = JoinSet::new();

        let annotated = self.engine.annotate_spans(text);
        let block_id = Uuid::new_v4();
        self.layer.mount(&annotated);

        for span in annotated.spans() {
            let Some(overlay) = self.layer.overlay(span.index) else {
                continue;
            };
            let mut state_rx = overlay.subscribe();
            let tx = app_to_ui_tx.clone();
            let index = span.index;
            let word = span.surface.clone();

            self.watchers.spawn(async move {
                while state_rx.changed().await.is_ok() {
                    let view = {
                        let state = state_rx.borrow_and_update();
                        overlay_view(block_id, index, &word, &state)
                    };
                    if tx.send(AppEvent::OverlayChanged(view)).await.is_err() {
                        break;
                    }
                }
            });
        }

        let event = AppEvent::ShowAnnotated {
            block_id,
            markup: annotated.to_markup(),
            words: annotated.spans().map(|span| span.surface.clone()).collect(),
        };
        self.block = Some((block_id, annotated));
        event
    }

    pub fn dispatch(&self, span: usize, input: TooltipInput) -> bool {
        self.layer.dispatch(span, input)
    }

    pub fn set_timing(&mut self, timing: TooltipTiming) {
        self.layer.set_timing(timing);
    }

    pub fn current(&self) -> Option<&AnnotatedText> {
        self.block.as_ref().map(|(_, text)| text)
    }

    pub fn block_id(&self) -> Option<Uuid> {
        self.block.as_ref().map(|(id, _)| *id)
    }

    pub fn close(&mut self) {
        self.watchers = JoinSet::new();
        self.layer.unmount_all();
        self.block = None;
    }
}
