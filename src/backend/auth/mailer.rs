//! Outgoing mail for password resets, over SMTP with STARTTLS.

use lettre::{
    message::{header::ContentType, Mailbox},
    Address,
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

use crate::backend::server::config::EmailConfig;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build mail: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Mail is not configured")]
    NotConfigured,
}

#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl Mailer {
    /// Builds a mailer when SMTP credentials are configured.
    ///
    /// Returns `Ok(None)` without `EMAIL_USER`/`EMAIL_PASS`.
    pub fn from_config(config: &EmailConfig) -> Result<Option<Self>, MailError> {
        let (Some(user), Some(password)) = (&config.user, &config.password) else {
            return Ok(None);
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(Credentials::new(user.clone(), password.clone()))
            .build();
        let from = Mailbox::new(Some(config.app_name.clone()), user.parse::<Address>()?);

        Ok(Some(Self { transport, from }))
    }

    pub async fn send_password_reset(
        &self,
        to_email: &str,
        username: &str,
        reset_url: &str,
    ) -> Result<(), MailError> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(to_email.parse::<Mailbox>()?)
            .subject("Password Reset Request")
            .header(ContentType::TEXT_HTML)
            .body(reset_email_body(username, reset_url))?;

        self.transport.send(email).await?;
        tracing::info!("[Auth] Password reset mail sent to {}", to_email);
        Ok(())
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn reset_email_body(username: &str, reset_url: &str) -> String {
    let url = escape_html(reset_url);
    format!(
        "<p>Hi {},</p>\n\
         <p>Click this link to reset your password: <a href=\"{url}\">{url}</a></p>\n\
         <p>This link expires in 1 hour.</p>",
        escape_html(username),
    )
}
