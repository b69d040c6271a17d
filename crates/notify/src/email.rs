use async_trait::async_trait;
use kanshi_core::notify::error::NotifyError;
use kanshi_core::notify::port::Notifier;
use lettre::message::{Message, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

/// # Summary
/// Delivers alerts as plain-text email over authenticated SMTP.
///
/// # Invariants
/// - One transport per notifier, reused for every delivery.
/// - Only the sender address is fixed at construction; the recipient
///   comes from the threshold configuration and is passed per call.
pub struct EmailNotifier {
    /// Shared async SMTP transport (STARTTLS relay).
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    /// Fixed sender address, parsed lazily on each send.
    from: String,
}

impl EmailNotifier {
    /// # Summary
    /// Builds a notifier against an SMTP relay with username/password auth.
    ///
    /// # Arguments
    /// * `host` - SMTP relay host, e.g. "smtp.gmail.com".
    /// * `user` - SMTP account name.
    /// * `pass` - SMTP password or app password.
    /// * `from` - Sender address placed in the From header.
    ///
    /// # Returns
    /// * `Err(NotifyError::Config)` when the relay host is not usable as
    ///   an SMTP endpoint; otherwise a ready notifier.
    pub fn new(host: &str, user: &str, pass: &str, from: &str) -> Result<Self, NotifyError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
            .map_err(|e| NotifyError::Config(format!("SMTP relay '{host}' rejected: {e}")))?
            .credentials(Credentials::new(user.to_string(), pass.to_string()))
            .build();

        Ok(Self {
            mailer: transport,
            from: from.to_string(),
        })
    }

    /// Assembles the outgoing message; address parse failures are
    /// configuration errors, body failures are platform errors.
    fn build_message(
        &self,
        to: &str,
        subject: &str,
        content: &str,
    ) -> Result<Message, NotifyError> {
        let from = self
            .from
            .parse()
            .map_err(|e| NotifyError::Config(format!("Bad sender address '{}': {e}", self.from)))?;
        let to = to
            .parse()
            .map_err(|e| NotifyError::Config(format!("Bad recipient address '{to}': {e}")))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(content.to_string())
            .map_err(|e| NotifyError::Platform(format!("Message build failed: {e}")))
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    /// # Summary
    /// Sends one alert email to `to`.
    ///
    /// # Arguments
    /// * `to` - Recipient address from the threshold configuration.
    /// * `subject` - Alert subject line.
    /// * `content` - Alert body, plain text.
    ///
    /// # Returns
    /// * `Err(NotifyError::Network)` on SMTP transport failure.
    async fn notify(&self, to: &str, subject: &str, content: &str) -> Result<(), NotifyError> {
        let email = self.build_message(to, subject, content)?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| NotifyError::Network(format!("SMTP send failed: {e}")))?;

        Ok(())
    }
}
