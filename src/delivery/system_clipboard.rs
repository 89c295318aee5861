use async_trait::async_trait;

use super::capabilities::ClipboardWriter;

pub struct SystemClipboard;

#[async_trait]
impl ClipboardWriter for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<(), String> {
        let text = text.to_string();

        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new().map_err(|e| e.to_string())?;
            clipboard.set_text(text).map_err(|e| e.to_string())
        })
        .await
        .map_err(|e| e.to_string())?
    }
}
