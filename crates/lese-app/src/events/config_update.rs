use anyhow::Context;
use lese_core::TooltipTiming;

use crate::session::ReadingSession;
use crate::state::AppState;

/// Runtime change of tooltip timing; applies to overlays mounted afterwards
pub async fn handle_config_update(
    state: &AppState,
    session: &mut ReadingSession,
    field: &str,
    value: &str,
) -> anyhow::Result<()> {
    let mut config = state.config.write().await;

    match field {
        "show_delay_ms" => {
            config.tooltip.show_delay_ms = value.parse().context("show_delay_ms expects milliseconds")?;
        }
        "hide_delay_ms" => {
            config.tooltip.hide_delay_ms = value.parse().context("hide_delay_ms expects milliseconds")?;
        }
        "gap" => {
            let gap: f32 = value.parse().context("gap expects a number")?;
            anyhow::ensure!(gap.is_finite() && gap >= 0.0, "gap must be a non-negative number");
            config.tooltip.gap = gap;
        }
        other => anyhow::bail!("unknown setting '{other}'"),
    }

    session.set_timing(TooltipTiming::from_config(&config.tooltip));
    tracing::info!("Config updated: {} = {}", field, value);
    Ok(())
}
