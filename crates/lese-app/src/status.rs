use std::sync::Arc;

use kanal::AsyncSender;
use lese_core::PlaybackSlot;
use lese_types::AppEvent;
use tokio_util::sync::CancellationToken;

/// Report playback busy/idle transitions so the host can show a "speaking" indicator
pub async fn playback_status_loop(
    playback: Arc<PlaybackSlot>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut busy = playback.subscribe();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            changed = busy.changed() => {
                if changed.is_err() {
                    break;
                }
                let speaking = *busy.borrow_and_update();
                let status = if speaking { "speaking..." } else { "ready" };
                app_to_ui_tx
                    .send(AppEvent::StatusUpdate {
                        status: status.to_string(),
                        speaking,
                    })
                    .await?;
            }
        }
    }

    Ok(())
}
