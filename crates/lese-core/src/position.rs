use lese_types::{Point, Rect, Size};

/// Where an overlay goes, and whether it had to move below its anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Point,
    pub below: bool,
}

/// Viewport-clamped placement of an overlay next to its anchor word
#[derive(Debug, Clone, Copy)]
pub struct OverlayPositioner {
    gap: f32,
}

impl Default for OverlayPositioner {
    fn default() -> Self {
        Self { gap: 8.0 }
    }
}

impl OverlayPositioner {
    pub fn new(gap: f32) -> Self {
        Self { gap: gap.max(0.0) }
    }

    pub fn gap(&self) -> f32 {
        self.gap
    }

    /// Centered above the anchor; flipped below when it would leave the top of the viewport.
    /// An overlay larger than the viewport is pinned to the viewport edge on that axis.
    pub fn place(&self, anchor: Rect, overlay: Size, viewport: Size) -> Placement {
        let gap = self.gap;

        let x = if overlay.width + 2.0 * gap > viewport.width {
            0.0
        } else {
            let preferred = anchor.center_x() - overlay.width / 2.0;
            // max/min instead of clamp: never panics, even on NaN input
            preferred.max(gap).min(viewport.width - overlay.width - gap)
        };

        let (y, below) = if overlay.height > viewport.height {
            (0.0, false)
        } else {
            let above = anchor.top() - gap - overlay.height;
            if above < 0.0 {
                (anchor.bottom() + gap, true)
            } else {
                (above, false)
            }
        };

        Placement {
            position: Point::new(x, y),
            below,
        }
    }
}
