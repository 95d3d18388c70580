use lese_types::{Point, WordInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Hidden,
    PendingShow,
    Shown,
    PendingHide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// Lookup failed; `word_info` holds the fallback text
    Error,
}

/// Status of the "listen" control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListenState {
    #[default]
    Idle,
    Speaking,
    /// Could not play; cleared by the next listen or when the overlay closes
    Failed,
}

/// Everything the host needs to draw one overlay
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TooltipState {
    pub visibility: Visibility,
    pub load: LoadState,
    pub position: Point,
    /// Placed under the anchor because there was no room above
    pub below: bool,
    pub word_info: Option<WordInfo>,
    pub listen: ListenState,
    /// Optimistic "added to vocabulary" notice
    pub added: bool,
}

impl TooltipState {
    /// The overlay is on screen (possibly about to close)
    pub fn is_visible(&self) -> bool {
        matches!(self.visibility, Visibility::Shown | Visibility::PendingHide)
    }

    pub fn translation(&self) -> Option<&str> {
        self.word_info.as_ref().map(|info| info.translation.as_str())
    }

    /// Drop everything tied to one show cycle
    pub(super) fn reset(&mut self) {
        *self = TooltipState::default();
    }
}
