//! 큐 컨슈머
//!
//! | 큐 | 처리 |
//! |----|------|
//! | `email.queue` | `EmailService::send_email` (HTML) |
//! | `notification.queue` | 로그만 남김 |
//! | `kakao.queue` | `messageType`에 따라 알림톡/친구톡 즉시 발송 |
//!
//! 처리 중 오류는 로그를 남기고 ack합니다 (재시도 없음).
//! JSON으로 해석할 수 없는 메시지는 requeue 없이 reject합니다.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::StreamExt;
use lapin::options::{BasicAckOptions, BasicRejectOptions};

use crate::core::registry::{Component, ComponentKind, ServiceLocator};
use crate::errors::errors::AppResult;
use crate::messaging::broker::AmqpBroker;
use crate::messaging::messages::{EmailMessage, KakaoQueueMessage, MESSAGE_TYPE_ALIMTALK, MESSAGE_TYPE_FRIENDTALK};
use crate::register_component;
use crate::services::notifications::{EmailService, KakaoService};

/// 메시지 처리 후 브로커에 돌려줄 응답
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Ack,
    /// requeue 없이 reject
    Reject,
}

pub struct MessageConsumer {
    email_service: Arc<EmailService>,
    kakao_service: Arc<KakaoService>,
}

impl Component for MessageConsumer {
    fn build() -> AppResult<Self> {
        Ok(Self::new(
            ServiceLocator::resolve::<EmailService>()?,
            ServiceLocator::resolve::<KakaoService>()?,
        ))
    }
}

register_component!(MessageConsumer, "message_consumer", ComponentKind::Service);

fn decode<T: serde::de::DeserializeOwned>(queue: &str, payload: &[u8]) -> Option<T> {
    match serde_json::from_slice(payload) {
        Ok(message) => Some(message),
        Err(e) => {
            log::error!(
                "❌ {} 메시지 해석 실패: {} ({})",
                queue,
                e,
                String::from_utf8_lossy(payload)
            );
            None
        }
    }
}

impl MessageConsumer {
    pub fn new(email_service: Arc<EmailService>, kakao_service: Arc<KakaoService>) -> Self {
        Self {
            email_service,
            kakao_service,
        }
    }

    pub async fn handle_email(&self, payload: &[u8]) -> Disposition {
        let Some(message) = decode::<EmailMessage>("email", payload) else {
            return Disposition::Reject;
        };

        log::info!("📥 이메일 메시지 수신: {}", message.recipient);

        if let Err(e) = self
            .email_service
            .send_email(&message.recipient, &message.subject, &message.content)
            .await
        {
            log::error!("❌ 이메일 메시지 처리 실패 ({}): {}", message.recipient, e);
        }

        Disposition::Ack
    }

    pub async fn handle_notification(&self, payload: &[u8]) -> Disposition {
        let Some(message) = decode::<String>("notification", payload) else {
            return Disposition::Reject;
        };

        log::info!("📥 알림 메시지 수신: {}", message);
        Disposition::Ack
    }

    pub async fn handle_kakao(&self, payload: &[u8]) -> Disposition {
        let Some(message) = decode::<KakaoQueueMessage>("kakao", payload) else {
            return Disposition::Reject;
        };

        log::info!("📥 카카오 메시지 수신: {}", message.message_type);

        let result = match message.message_type.as_str() {
            MESSAGE_TYPE_ALIMTALK => {
                let recipient = message.recipient.unwrap_or_default();
                self.kakao_service
                    .send_alimtalk(
                        &recipient,
                        message.template_code.as_deref().unwrap_or_default(),
                        message.variables.unwrap_or_else(HashMap::new),
                        message.buttons.unwrap_or_default(),
                    )
                    .await
                    .map(|_| ())
            }
            MESSAGE_TYPE_FRIENDTALK => self
                .kakao_service
                .send_friendtalk(
                    message.receiver_uuids.unwrap_or_default(),
                    message.content.as_deref().unwrap_or_default(),
                    message.button_title,
                    message.web_url,
                )
                .await
                .map(|_| ()),
            other => {
                log::warn!("⚠️ 알 수 없는 카카오 메시지 타입: {}", other);
                Ok(())
            }
        };

        if let Err(e) = result {
            log::error!("❌ 카카오 메시지 처리 실패: {}", e);
        }

        Disposition::Ack
    }
}

/// 세 큐의 컨슈머를 각각 백그라운드 태스크로 시작합니다.
pub async fn start_consumers(broker: &AmqpBroker, consumer: Arc<MessageConsumer>) -> AppResult<()> {
    let [email, notification, kakao] = AmqpBroker::bindings();

    spawn_queue(broker, &email.queue, consumer.clone(), |consumer, payload| async move {
        consumer.handle_email(&payload).await
    })
    .await?;

    spawn_queue(broker, &notification.queue, consumer.clone(), |consumer, payload| async move {
        consumer.handle_notification(&payload).await
    })
    .await?;

    spawn_queue(broker, &kakao.queue, consumer, |consumer, payload| async move {
        consumer.handle_kakao(&payload).await
    })
    .await?;

    Ok(())
}

async fn spawn_queue<F, Fut>(
    broker: &AmqpBroker,
    queue: &str,
    consumer: Arc<MessageConsumer>,
    handler: F,
) -> AppResult<()>
where
    F: Fn(Arc<MessageConsumer>, Vec<u8>) -> Fut + 'static,
    Fut: std::future::Future<Output = Disposition> + 'static,
{
    let tag = format!("{}-consumer", queue);
    let mut deliveries = broker.consumer(queue, &tag).await?;
    let queue = queue.to_string();

    log::info!("👂 컨슈머 시작: {}", queue);

    actix_web::rt::spawn(async move {
        while let Some(delivery) = deliveries.next().await {
            let delivery = match delivery {
                Ok(delivery) => delivery,
                Err(e) => {
                    log::error!("❌ {} 메시지 수신 오류: {}", queue, e);
                    continue;
                }
            };

            let outcome = match handler(consumer.clone(), delivery.data.clone()).await {
                Disposition::Ack => delivery.ack(BasicAckOptions::default()).await,
                Disposition::Reject => {
                    delivery
                        .reject(BasicRejectOptions { requeue: false })
                        .await
                }
            };

            if let Err(e) = outcome {
                log::error!("❌ {} 메시지 응답 실패: {}", queue, e);
            }
        }

        log::warn!("⚠️ 컨슈머 종료: {}", queue);
    });

    Ok(())
}
