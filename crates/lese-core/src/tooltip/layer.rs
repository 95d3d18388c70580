use super::controller::TooltipHandle;
use super::state::TooltipState;
use super::{TooltipInput, TooltipServices, TooltipTiming};
use crate::annotate::AnnotatedText;

/// Overlays of the annotated block currently on screen, indexed by span
pub struct TooltipLayer {
    services: TooltipServices,
    overlays: Vec<TooltipHandle>,
}

impl TooltipLayer {
    pub fn new(services: TooltipServices) -> Self {
        Self {
            services,
            overlays: Vec::new(),
        }
    }

    /// Replace the current block; every previous overlay is unmounted first
    pub fn mount(&mut self, text: &AnnotatedText) {
        self.unmount_all();
        self.overlays = text
            .spans()
            .map(|span| TooltipHandle::mount(span.surface.clone(), self.services.clone()))
            .collect();
        tracing::debug!("Mounted {} overlays", self.overlays.len());
    }

    /// Takes effect from the next [`TooltipLayer::mount`]
    pub fn set_timing(&mut self, timing: TooltipTiming) {
        self.services.timing = timing;
    }

    pub fn unmount_all(&mut self) {
        self.overlays.clear();
    }

    /// False for an unknown span
    pub fn dispatch(&self, span: usize, input: TooltipInput) -> bool {
        match self.overlays.get(span) {
            Some(overlay) => overlay.send(input),
            None => {
                tracing::debug!("No overlay for span {}", span);
                false
            }
        }
    }

    pub fn overlay(&self, span: usize) -> Option<&TooltipHandle> {
        self.overlays.get(span)
    }

    /// Overlays currently on screen
    pub fn snapshot(&self) -> Vec<(usize, TooltipState)> {
        self.overlays
            .iter()
            .enumerate()
            .map(|(span, overlay)| (span, overlay.state()))
            .filter(|(_, state)| state.is_visible())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}
