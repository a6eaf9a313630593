//! 메시지 프로듀서
//!
//! 서비스는 [`MessageProducer`]로 큐에 메시지를 보냅니다.
//! 실제 전송은 [`MessagePublisher`] 구현체(운영: `AmqpBroker`)가 맡습니다.
//! 브로커가 설정되지 않았으면 모든 전송이 `MessagingError`(503)로 실패합니다.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::{QueueBinding, RabbitMqConfig};
use crate::core::registry::{Component, ComponentKind, ServiceLocator};
use crate::errors::errors::{AppError, AppResult};
use crate::messaging::broker::AmqpBroker;
use crate::messaging::messages::{EmailMessage, KakaoQueueMessage};
use crate::register_component;

#[async_trait]
pub trait MessagePublisher: Send + Sync {
    /// publisher confirm까지 기다립니다.
    async fn publish(&self, exchange: &str, routing_key: &str, payload: &[u8]) -> AppResult<()>;
}

pub struct MessageProducer {
    publisher: Option<Arc<dyn MessagePublisher>>,
    exchange: String,
    email: QueueBinding,
    notification: QueueBinding,
    kakao: QueueBinding,
}

impl Component for MessageProducer {
    fn build() -> AppResult<Self> {
        let publisher = ServiceLocator::try_get::<AmqpBroker>()
            .map(|broker| broker as Arc<dyn MessagePublisher>);

        if publisher.is_none() {
            log::warn!("⚠️ RabbitMQ가 설정되지 않았습니다. 비동기 발송이 비활성화됩니다");
        }

        Ok(Self::new(publisher))
    }
}

register_component!(MessageProducer, "message_producer", ComponentKind::Service);

impl MessageProducer {
    pub fn new(publisher: Option<Arc<dyn MessagePublisher>>) -> Self {
        Self {
            publisher,
            exchange: RabbitMqConfig::exchange(),
            email: RabbitMqConfig::email(),
            notification: RabbitMqConfig::notification(),
            kakao: RabbitMqConfig::kakao(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.publisher.is_some()
    }

    async fn send<T: Serialize + Sync>(&self, routing_key: &str, message: &T) -> AppResult<()> {
        let publisher = self.publisher.as_ref().ok_or_else(|| {
            AppError::MessagingError("Message broker is not configured".to_string())
        })?;

        let payload = serde_json::to_vec(message)
            .map_err(|e| AppError::MessagingError(format!("Failed to serialize message: {}", e)))?;

        publisher.publish(&self.exchange, routing_key, &payload).await
    }

    pub async fn send_email_message(&self, message: &EmailMessage) -> AppResult<()> {
        log::info!("📤 이메일 메시지 발행: {}", message.recipient);
        self.send(&self.email.routing_key, message).await
    }

    pub async fn send_notification_message(&self, message: &str) -> AppResult<()> {
        log::info!("📤 알림 메시지 발행: {}", message);
        self.send(&self.notification.routing_key, &message).await
    }

    pub async fn send_kakao_message(&self, message: &KakaoQueueMessage) -> AppResult<()> {
        log::info!("📤 카카오 메시지 발행: {}", message.message_type);
        self.send(&self.kakao.routing_key, message).await
    }
}

/// 발행된 메시지를 기록하는 테스트용 퍼블리셔
#[cfg(test)]
#[derive(Default)]
pub struct RecordingPublisher {
    published: std::sync::Mutex<Vec<(String, String, Vec<u8>)>>,
}

#[cfg(test)]
impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// (routing key, payload JSON) 목록
    pub fn messages(&self) -> Vec<(String, serde_json::Value)> {
        self.published
            .lock()
            .map(|published| {
                published
                    .iter()
                    .map(|(_, key, payload)| {
                        (key.clone(), serde_json::from_slice(payload).unwrap_or_default())
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[async_trait]
impl MessagePublisher for RecordingPublisher {
    async fn publish(&self, exchange: &str, routing_key: &str, payload: &[u8]) -> AppResult<()> {
        self.published
            .lock()
            .map_err(|_| AppError::InternalError("publisher lock poisoned".to_string()))?
            .push((exchange.to_string(), routing_key.to_string(), payload.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_disabled_producer_fails_with_messaging_error() {
        let producer = MessageProducer::new(None);

        let result = producer
            .send_email_message(&EmailMessage::html("a@b.com", "s", "c"))
            .await;

        assert!(matches!(result, Err(AppError::MessagingError(_))));
        assert!(!producer.is_enabled());
    }

    #[actix_web::test]
    async fn test_messages_go_to_their_routing_keys() {
        let recorder = Arc::new(RecordingPublisher::new());
        let producer = MessageProducer::new(Some(recorder.clone()));

        producer
            .send_email_message(&EmailMessage::html("a@b.com", "제목", "<p>본문</p>"))
            .await
            .unwrap();
        producer.send_notification_message("hello").await.unwrap();

        let messages = recorder.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].0, RabbitMqConfig::email().routing_key);
        assert_eq!(messages[0].1["recipient"], "a@b.com");
        assert_eq!(messages[1].0, RabbitMqConfig::notification().routing_key);
        assert_eq!(messages[1].1, "hello");
    }
}
