use async_trait::async_trait;
use kanshi_core::notify::error::NotifyError;
use kanshi_core::notify::port::Notifier;
use serde::Serialize;

/// # Summary
/// Delivers alerts through the Telegram Bot API (`sendMessage`).
///
/// # Invariants
/// - The bot token is fixed at construction; the chat id is taken from
///   the threshold configuration and passed per call.
/// - The target chat must have interacted with the bot at least once,
///   otherwise the API rejects the delivery.
pub struct TelegramNotifier {
    /// Bot API token.
    bot_token: String,
    /// Reused HTTP client.
    client: reqwest::Client,
}

/// Request body for the `sendMessage` endpoint.
#[derive(Serialize)]
struct SendMessageBody<'a> {
    chat_id: &'a str,
    text: String,
    parse_mode: &'static str,
}

impl TelegramNotifier {
    /// # Summary
    /// Creates a notifier for the given bot token.
    pub fn new(bot_token: String) -> Self {
        Self {
            bot_token,
            client: reqwest::Client::new(),
        }
    }

    fn send_message_url(&self) -> String {
        format!("https://api.telegram.org/bot{}/sendMessage", self.bot_token)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    /// # Summary
    /// Posts one alert message to the chat named by `to`.
    ///
    /// # Logic
    /// 1. Renders the subject in bold Markdown, content on the next line.
    /// 2. POSTs to `sendMessage`; a non-success status is a platform
    ///    error carrying the API's response body.
    ///
    /// # Arguments
    /// * `to` - Target chat id.
    /// * `subject` - Alert subject, rendered bold.
    /// * `content` - Alert body.
    async fn notify(&self, to: &str, subject: &str, content: &str) -> Result<(), NotifyError> {
        let body = SendMessageBody {
            chat_id: to,
            text: format!("*{subject}*\n{content}"),
            parse_mode: "Markdown",
        };

        let response = self
            .client
            .post(self.send_message_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(NotifyError::Platform(format!("Telegram API: {detail}")));
        }

        Ok(())
    }
}
