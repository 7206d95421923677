use std::time::Duration;

use anyhow::Error;
use reqwest::multipart;
use tracing::warn;

use crate::config::config::NotifierConfig;

/// Side-channel that forwards each uploaded photo to a chat bot.
///
/// Strictly fire-and-forget: a failed or slow send is logged and
/// dropped, and must never affect or delay the analysis result.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    http: reqwest::Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
    pub caption: String,
}

impl TelegramNotifier {
    pub fn new(config: NotifierConfig, bot_token: String, chat_id: String) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout as u64))
            .build()?;
        Ok(TelegramNotifier {
            http,
            api_base: config.api_base,
            bot_token,
            chat_id,
            caption: config.caption,
        })
    }

    fn send_photo_url(&self) -> String {
        format!("{}/bot{}/sendPhoto", self.api_base, self.bot_token)
    }

    /// send_photo uploads the raw image bytes with the configured caption.
    ///
    /// # Arguments
    /// * `image` - encoded image bytes as received from the uploader
    ///
    /// # Returns
    /// * `Result<(), Error>`
    pub async fn send_photo(&self, image: Vec<u8>) -> Result<(), Error> {
        let photo = multipart::Part::bytes(image)
            .file_name("photo.jpg")
            .mime_str("image/jpeg")?;
        let form = multipart::Form::new()
            .text("chat_id", self.chat_id.clone())
            .text("caption", self.caption.clone())
            .part("photo", photo);

        let response = self
            .http
            .post(self.send_photo_url())
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::msg(format!(
                "telegram_notifier - sendPhoto returned status {}",
                response.status()
            )));
        }
        Ok(())
    }

    /// notify_detached spawns the send on the runtime and returns
    /// immediately; failures are logged, never escalated.
    pub fn notify_detached(&self, image: Vec<u8>) {
        let notifier = self.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.send_photo(image).await {
                warn!("telegram_notifier - photo forward failed: {e:#}");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_photo_url() {
        let notifier = TelegramNotifier::new(
            NotifierConfig::new(),
            "123:abc".to_string(),
            "42".to_string(),
        )
        .unwrap();
        assert_eq!(
            notifier.send_photo_url(),
            "https://api.telegram.org/bot123:abc/sendPhoto"
        );
    }
}
