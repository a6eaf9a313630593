//! SMTP 메일 전송
//!
//! `MailTransport`는 HTML 메일 한 통을 보내는 계약입니다.
//! 운영에서는 lettre 기반 [`SmtpMailer`]를 `ServiceLocator`에 등록합니다.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use crate::config::MailConfig;
use crate::errors::errors::{AppError, AppResult};

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send_html(&self, to: &str, subject: &str, html: &str) -> AppResult<()>;
}

fn mail_error(e: impl std::fmt::Display) -> AppError {
    AppError::MailError(format!("Failed to send email: {}", e))
}

/// UTF-8 HTML 메시지를 만듭니다.
pub fn build_message(from: &Mailbox, to: &str, subject: &str, html: &str) -> AppResult<Message> {
    let to: Mailbox = to.parse().map_err(mail_error)?;

    Message::builder()
        .from(from.clone())
        .to(to)
        .subject(subject)
        .header(ContentType::TEXT_HTML)
        .body(html.to_string())
        .map_err(mail_error)
}

pub fn sender_mailbox(address: &str, name: &str) -> AppResult<Mailbox> {
    let address = address
        .parse()
        .map_err(|e| AppError::ValidationError(format!("Invalid MAIL_FROM_ADDRESS: {}", e)))?;
    Ok(Mailbox::new(Some(name.to_string()), address))
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// 연결은 첫 발송 시점에 맺어집니다.
    pub fn from_env() -> AppResult<Self> {
        let host = MailConfig::smtp_host();

        let builder = if MailConfig::starttls() {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&host)
                .map_err(|e| AppError::MailError(format!("Invalid SMTP relay {}: {}", host, e)))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&host)
        };

        let mut builder = builder.port(MailConfig::smtp_port());
        if let (Some(username), Some(password)) =
            (MailConfig::smtp_username(), MailConfig::smtp_password())
        {
            builder = builder.credentials(Credentials::new(username, password));
        }

        let from = sender_mailbox(&MailConfig::from_address(), &MailConfig::from_name())?;

        log::info!("✅ SMTP 메일러 구성: {}:{}", host, MailConfig::smtp_port());

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send_html(&self, to: &str, subject: &str, html: &str) -> AppResult<()> {
        let message = build_message(&self.from, to, subject, html)?;
        self.transport.send(message).await.map_err(mail_error)?;
        Ok(())
    }
}

/// 보낸 메일을 기록하는 테스트용 전송기
#[cfg(test)]
#[derive(Default)]
pub struct RecordingMailTransport {
    pub fail: bool,
    pub sent: std::sync::Mutex<Vec<(String, String, String)>>,
}

#[cfg(test)]
#[async_trait]
impl MailTransport for RecordingMailTransport {
    async fn send_html(&self, to: &str, subject: &str, html: &str) -> AppResult<()> {
        if self.fail {
            return Err(mail_error("connection refused"));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), html.to_string()));
        Ok(())
    }
}
