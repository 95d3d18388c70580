use serde::{Deserialize, Serialize};

fn default_show_delay_ms() -> u64 {
    300
}

fn default_hide_delay_ms() -> u64 {
    500
}

fn default_gap() -> f32 {
    8.0
}

fn default_overlay_width() -> f32 {
    260.0
}

fn default_overlay_height() -> f32 {
    150.0
}

fn default_viewport_width() -> f32 {
    1280.0
}

fn default_viewport_height() -> f32 {
    800.0
}

/// Overlay timing and geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    /// Hover time before an overlay opens
    #[serde(default = "default_show_delay_ms")]
    pub show_delay_ms: u64,
    /// Grace period after the pointer leaves before the overlay closes
    #[serde(default = "default_hide_delay_ms")]
    pub hide_delay_ms: u64,
    /// Distance kept between overlay, anchor and viewport edges
    #[serde(default = "default_gap")]
    pub gap: f32,
    /// Estimated overlay size, used until the host reports a measurement
    #[serde(default = "default_overlay_width")]
    pub overlay_width: f32,
    #[serde(default = "default_overlay_height")]
    pub overlay_height: f32,
    /// Viewport assumed by headless hosts
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f32,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f32,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            show_delay_ms: default_show_delay_ms(),
            hide_delay_ms: default_hide_delay_ms(),
            gap: default_gap(),
            overlay_width: default_overlay_width(),
            overlay_height: default_overlay_height(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
        }
    }
}
