//! RabbitMQ 연결과 토폴로지
//!
//! ```text
//! app.exchange (topic, durable)
//!   ├── email.routing.key        → email.queue
//!   ├── notification.routing.key → notification.queue
//!   └── kakao.routing.key        → kakao.queue
//! ```

use async_trait::async_trait;
use lapin::{
    BasicProperties, Channel, Connection, ConnectionProperties, Consumer, ExchangeKind,
    options::{
        BasicConsumeOptions, BasicPublishOptions, BasicQosOptions, ConfirmSelectOptions,
        ExchangeDeclareOptions,
        QueueBindOptions, QueueDeclareOptions,
    },
    types::FieldTable,
};

use crate::config::{QueueBinding, RabbitMqConfig};
use crate::errors::errors::{AppError, AppResult};
use crate::messaging::producer::MessagePublisher;

pub struct AmqpBroker {
    connection: Connection,
    channel: Channel,
    exchange: String,
}

impl AmqpBroker {
    pub async fn connect(uri: &str) -> AppResult<Self> {
        let connection = Connection::connect(uri, ConnectionProperties::default()).await?;
        let channel = connection.create_channel().await?;
        channel.confirm_select(ConfirmSelectOptions::default()).await?;

        log::info!("✅ RabbitMQ 연결 성공");

        Ok(Self {
            connection,
            channel,
            exchange: RabbitMqConfig::exchange(),
        })
    }

    pub fn bindings() -> [QueueBinding; 3] {
        [
            RabbitMqConfig::email(),
            RabbitMqConfig::notification(),
            RabbitMqConfig::kakao(),
        ]
    }

    /// exchange, 큐, 바인딩을 선언합니다. 이미 있으면 그대로 둡니다.
    pub async fn declare_topology(&self) -> AppResult<()> {
        self.channel
            .exchange_declare(
                &self.exchange,
                ExchangeKind::Topic,
                ExchangeDeclareOptions {
                    durable: true,
                    ..ExchangeDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await?;

        for binding in Self::bindings() {
            self.channel
                .queue_declare(
                    &binding.queue,
                    QueueDeclareOptions {
                        durable: true,
                        ..QueueDeclareOptions::default()
                    },
                    FieldTable::default(),
                )
                .await?;

            self.channel
                .queue_bind(
                    &binding.queue,
                    &self.exchange,
                    &binding.routing_key,
                    QueueBindOptions::default(),
                    FieldTable::default(),
                )
                .await?;

            log::info!("📮 큐 바인딩: {} ← {} ({})", binding.queue, self.exchange, binding.routing_key);
        }

        Ok(())
    }

    /// 큐마다 별도 채널로 컨슈머를 만듭니다.
    pub async fn consumer(&self, queue: &str, tag: &str) -> AppResult<Consumer> {
        let channel = self.connection.create_channel().await?;
        channel
            .basic_qos(RabbitMqConfig::prefetch_count(), BasicQosOptions::default())
            .await?;

        Ok(channel
            .basic_consume(queue, tag, BasicConsumeOptions::default(), FieldTable::default())
            .await?)
    }
}

#[async_trait]
impl MessagePublisher for AmqpBroker {
    async fn publish(&self, exchange: &str, routing_key: &str, payload: &[u8]) -> AppResult<()> {
        let confirm = self
            .channel
            .basic_publish(
                exchange,
                routing_key,
                BasicPublishOptions::default(),
                payload,
                BasicProperties::default().with_content_type("application/json".into()),
            )
            .await?
            .await?;

        if confirm.is_nack() {
            return Err(AppError::MessagingError(format!(
                "Broker rejected message for {}",
                routing_key
            )));
        }

        Ok(())
    }
}
