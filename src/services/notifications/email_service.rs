//! 이메일 발송 서비스
//!
//! | 메서드 | 방식 |
//! |--------|------|
//! | `send_email`, `send_html_email` | SMTP 즉시 발송 |
//! | `send_email_async` | `email.queue`로 발행, 컨슈머가 발송 |
//! | `send_welcome_email`, `send_password_reset_email` | 템플릿 렌더링 후 큐로 발행 |

use std::sync::Arc;

use crate::config::MailConfig;
use crate::core::registry::{Component, ComponentKind, ServiceLocator};
use crate::errors::errors::AppResult;
use crate::mail::templates;
use crate::mail::{MailTransport, SmtpMailer};
use crate::messaging::messages::EmailMessage;
use crate::messaging::producer::MessageProducer;
use crate::register_component;

pub struct EmailService {
    mailer: Arc<dyn MailTransport>,
    producer: Arc<MessageProducer>,
}

impl Component for EmailService {
    fn build() -> AppResult<Self> {
        Ok(Self::new(
            ServiceLocator::require::<SmtpMailer>()?,
            ServiceLocator::resolve::<MessageProducer>()?,
        ))
    }
}

register_component!(EmailService, "email_service", ComponentKind::Service);

impl EmailService {
    pub fn new(mailer: Arc<dyn MailTransport>, producer: Arc<MessageProducer>) -> Self {
        Self { mailer, producer }
    }

    /// HTML 메일을 즉시 발송합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::MailError` - `Failed to send email: …`
    pub async fn send_email(&self, to: &str, subject: &str, content: &str) -> AppResult<()> {
        self.mailer.send_html(to, subject, content).await.map_err(|e| {
            log::error!("❌ 이메일 발송 실패 ({}): {}", to, e);
            e
        })?;

        log::info!("📧 이메일 발송 완료: {}", to);
        Ok(())
    }

    pub async fn send_html_email(&self, to: &str, subject: &str, html: &str) -> AppResult<()> {
        self.send_email(to, subject, html).await
    }

    /// 큐에 넣고 바로 반환합니다. 브로커가 없으면 `MessagingError`.
    pub async fn send_email_async(&self, to: &str, subject: &str, content: &str) -> AppResult<()> {
        self.producer
            .send_email_message(&EmailMessage::html(to, subject, content))
            .await
    }

    pub async fn send_welcome_email(&self, to: &str, name: &str) -> AppResult<()> {
        let html = templates::welcome_email(name, &MailConfig::from_name());
        self.send_email_async(to, &templates::welcome_subject(name), &html).await
    }

    pub async fn send_password_reset_email(&self, to: &str, reset_token: &str) -> AppResult<()> {
        let html = templates::password_reset_email(reset_token);
        self.send_email_async(to, templates::PASSWORD_RESET_SUBJECT, &html).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::errors::AppError;
    use crate::mail::mailer::RecordingMailTransport;
    use crate::messaging::producer::RecordingPublisher;

    #[actix_web::test]
    async fn test_send_email_uses_transport() {
        let mailer = Arc::new(RecordingMailTransport::default());
        let service = EmailService::new(mailer.clone(), Arc::new(MessageProducer::new(None)));

        service
            .send_html_email("user@example.com", "제목", "<p>본문</p>")
            .await
            .unwrap();

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "user@example.com");
        assert_eq!(sent[0].2, "<p>본문</p>");
    }

    #[actix_web::test]
    async fn test_transport_failure_is_mail_error() {
        let mailer = Arc::new(RecordingMailTransport {
            fail: true,
            ..RecordingMailTransport::default()
        });
        let service = EmailService::new(mailer, Arc::new(MessageProducer::new(None)));

        match service.send_email("user@example.com", "s", "c").await {
            Err(AppError::MailError(msg)) => assert!(msg.starts_with("Failed to send email")),
            _ => panic!("expected MailError"),
        }
    }

    #[actix_web::test]
    async fn test_welcome_and_reset_mails_are_queued() {
        let recorder = Arc::new(RecordingPublisher::new());
        let mailer = Arc::new(RecordingMailTransport::default());
        let service = EmailService::new(
            mailer.clone(),
            Arc::new(MessageProducer::new(Some(recorder.clone()))),
        );

        service.send_welcome_email("kim@example.com", "김철수").await.unwrap();
        service
            .send_password_reset_email("kim@example.com", "reset-123")
            .await
            .unwrap();

        let messages = recorder.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].1["subject"], "환영합니다! 김철수님");
        assert!(messages[0].1["content"].as_str().unwrap().contains(templates::APP_URL));
        assert_eq!(messages[1].1["subject"], "비밀번호 재설정 요청");
        assert!(
            messages[1].1["content"]
                .as_str()
                .unwrap()
                .contains("https://example.com/reset-password?token=reset-123")
        );
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_async_without_broker_is_messaging_error() {
        let service = EmailService::new(
            Arc::new(RecordingMailTransport::default()),
            Arc::new(MessageProducer::new(None)),
        );

        let result = service.send_email_async("kim@example.com", "s", "c").await;
        assert!(matches!(result, Err(AppError::MessagingError(_))));
    }
}
