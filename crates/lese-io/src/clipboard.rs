use std::time::Duration;

use arboard::Clipboard;
use tokio::time;

/// Poll the clipboard and report every new non-blank text
pub async fn watch_clipboard<F>(poll_interval: Duration, mut on_text: F) -> Result<(), anyhow::Error>
where
    F: FnMut(String) + Send + 'static,
{
    let mut clipboard = Clipboard::new()?;
    let mut last_text = String::new();

    let mut interval = time::interval(poll_interval);
    interval.set_missed_tick_behavior(time::MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        if let Ok(text) = clipboard.get_text()
            && is_new_text(&text, &last_text)
        {
            last_text = text.clone();
            on_text(text);
        }
    }
}

fn is_new_text(text: &str, last_text: &str) -> bool {
    !text.trim().is_empty() && text != last_text
}
