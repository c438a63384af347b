//! SMTP mail delivery
//!
//! Notification email is strictly best-effort everywhere in this server:
//! a failed send is logged and swallowed, never surfaced to the request.
//! An order placed while the mail provider is down is still a placed order.
//! Storage I/O, by contrast, always fails loud. Keep that split.

use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use shared::models::{ContactMessage, Order};

use crate::core::SmtpConfig;
use crate::services::mail_templates;

/// SMTP mailer, disabled when no host is configured.
#[derive(Clone)]
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Option<Mailbox>,
    admin: Option<Mailbox>,
}

impl Mailer {
    /// Build the mailer from config. Any missing/invalid piece disables
    /// delivery rather than failing startup.
    pub fn from_config(config: &SmtpConfig) -> Self {
        let from = config
            .from_address
            .as_deref()
            .and_then(|addr| parse_mailbox(addr, "SMTP_FROM"));
        let admin = config
            .admin_email
            .as_deref()
            .and_then(|addr| parse_mailbox(addr, "ADMIN_EMAIL"));

        let transport = match (&config.host, &from) {
            (Some(host), Some(_)) => {
                match AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host) {
                    Ok(builder) => {
                        let mut builder = builder.port(config.port);
                        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
                            builder =
                                builder.credentials(Credentials::new(user.clone(), pass.clone()));
                        }
                        tracing::info!(host = %host, port = config.port, "SMTP mailer enabled");
                        Some(builder.build())
                    }
                    Err(e) => {
                        tracing::warn!(host = %host, error = %e, "SMTP relay setup failed, mail disabled");
                        None
                    }
                }
            }
            _ => {
                tracing::debug!("SMTP not configured, mail disabled");
                None
            }
        };

        Self {
            transport,
            from,
            admin,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Confirmation to the customer after checkout.
    pub async fn send_order_confirmation(&self, order: &Order) {
        let Some(to) = parse_mailbox(&order.customer_email, "customer email") else {
            return;
        };
        let (subject, text, html) = mail_templates::order_confirmation(order);
        self.deliver(to, subject, text, html).await;
    }

    /// New-order notice to the shop inbox.
    pub async fn send_order_notification(&self, order: &Order) {
        let Some(to) = self.admin.clone() else {
            tracing::debug!("No ADMIN_EMAIL configured, skipping order notification");
            return;
        };
        let (subject, text, html) = mail_templates::order_notification(order);
        self.deliver(to, subject, text, html).await;
    }

    /// Contact-form relay to the shop inbox.
    pub async fn send_contact_notification(&self, message: &ContactMessage) {
        let Some(to) = self.admin.clone() else {
            tracing::debug!("No ADMIN_EMAIL configured, skipping contact notification");
            return;
        };
        let (subject, text, html) = mail_templates::contact_notification(message);
        self.deliver(to, subject, text, html).await;
    }

    async fn deliver(&self, to: Mailbox, subject: String, text: String, html: String) {
        let (Some(transport), Some(from)) = (&self.transport, &self.from) else {
            tracing::debug!(subject = %subject, "Mail disabled, dropping message");
            return;
        };

        let message = Message::builder()
            .from(from.clone())
            .to(to)
            .subject(&subject)
            .multipart(MultiPart::alternative_plain_html(text, html));

        let message = match message {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(subject = %subject, error = %e, "Failed to build email");
                return;
            }
        };

        if let Err(e) = transport.send(message).await {
            tracing::warn!(subject = %subject, error = %e, "Email send failed (swallowed)");
        }
    }
}

fn parse_mailbox(addr: &str, what: &str) -> Option<Mailbox> {
    match addr.parse::<Mailbox>() {
        Ok(mb) => Some(mb),
        Err(e) => {
            tracing::warn!(address = %addr, error = %e, "Unparseable {what}, skipping");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconfigured_mailer_is_disabled() {
        let mailer = Mailer::from_config(&SmtpConfig::default());
        assert!(!mailer.is_enabled());
    }

    #[test]
    fn mailbox_parsing_tolerates_garbage() {
        assert!(parse_mailbox("Bakehouse <orders@example.com>", "test").is_some());
        assert!(parse_mailbox("plain@example.com", "test").is_some());
        assert!(parse_mailbox("not an address", "test").is_none());
    }

    #[tokio::test]
    async fn disabled_mailer_send_is_a_quiet_no_op() {
        let mailer = Mailer::from_config(&SmtpConfig::default());
        let order = crate::services::mail_templates::tests::sample_order();
        // Must not panic or block; the order flow depends on this.
        mailer.send_order_confirmation(&order).await;
        mailer.send_order_notification(&order).await;
    }
}
