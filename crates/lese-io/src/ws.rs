use futures_util::StreamExt;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

/// Connect to `url` and forward every text frame; the returned task ends with the connection
pub async fn start_ws_listener<F>(url: &str, mut on_text: F) -> Result<JoinHandle<()>, anyhow::Error>
where
    F: FnMut(String) + Send + 'static,
{
    let (ws_stream, _) = connect_async(url).await?;
    let (_, mut read) = ws_stream.split();
    let url = url.to_string();

    Ok(tokio::spawn(async move {
        while let Some(msg) = read.next().await {
            match msg {
                Ok(msg) => {
                    if let Some(text) = frame_text(msg) {
                        on_text(text);
                    }
                }
                Err(e) => {
                    tracing::warn!("WebSocket {} read error: {}", url, e);
                    break;
                }
            }
        }
        tracing::info!("WebSocket {} closed", url);
    }))
}

fn frame_text(msg: Message) -> Option<String> {
    match msg {
        Message::Text(text) if !text.as_str().trim().is_empty() => Some(text.as_str().to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_non_blank_text_frames_are_forwarded() {
        assert_eq!(frame_text(Message::text("Hei")), Some("Hei".to_string()));
        assert_eq!(frame_text(Message::text("  ")), None);
        assert_eq!(frame_text(Message::Ping(Vec::new().into())), None);
    }

    #[tokio::test]
    async fn unreachable_server_is_an_error() {
        assert!(start_ws_listener("ws://127.0.0.1:9", |_| {}).await.is_err());
    }
}
