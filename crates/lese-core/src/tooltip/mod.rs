//! Interactive overlay attached to one annotated word
//!
//! Each mounted span gets its own controller task. The host feeds it pointer/touch input through
//! a [`TooltipHandle`] and renders whatever [`TooltipState`] the handle publishes.

mod controller;
mod layer;
mod state;

use std::sync::Arc;
use std::time::Duration;

use lese_config::tooltip::TooltipConfig;
use lese_types::{Rect, Size};

use crate::adapters::{PronunciationAdapter, VocabularyAdapter, WordInfoProvider};

pub use controller::TooltipHandle;
pub use layer::TooltipLayer;
pub use state::{ListenState, LoadState, TooltipState, Visibility};

/// Host input for one overlay
#[derive(Debug, Clone, PartialEq)]
pub enum TooltipInput {
    PointerEnter { anchor: Rect, viewport: Size },
    PointerLeave,
    TouchStart { anchor: Rect, viewport: Size },
    TouchEnd,
    /// Outside click or close button
    Dismiss,
    /// Real overlay size after the host rendered it
    OverlayMeasured(Size),
    Listen,
    AddToVocabulary,
}

#[derive(Debug, Clone, Copy)]
pub struct TooltipTiming {
    pub show_delay: Duration,
    pub hide_delay: Duration,
    pub gap: f32,
    /// Assumed overlay size until the host measures it
    pub overlay: Size,
}

impl TooltipTiming {
    pub fn from_config(config: &TooltipConfig) -> Self {
        Self {
            show_delay: Duration::from_millis(config.show_delay_ms),
            hide_delay: Duration::from_millis(config.hide_delay_ms),
            gap: config.gap,
            overlay: Size::new(config.overlay_width, config.overlay_height),
        }
    }
}

impl Default for TooltipTiming {
    fn default() -> Self {
        Self::from_config(&TooltipConfig::default())
    }
}

/// Collaborators shared by every overlay
#[derive(Clone)]
pub struct TooltipServices {
    pub word_info: Arc<dyn WordInfoProvider>,
    pub pronunciation: Arc<dyn PronunciationAdapter>,
    pub vocabulary: Option<Arc<dyn VocabularyAdapter>>,
    pub timing: TooltipTiming,
    /// Tag passed to the pronunciation adapter
    pub language_tag: String,
}
