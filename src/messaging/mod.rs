//! # RabbitMQ 메시징
//!
//! Spring AMQP의 `RabbitTemplate` / `@RabbitListener` 구성을 lapin으로 옮긴 모듈입니다.
//!
//! | Spring | 이 시스템 |
//! |--------|-----------|
//! | `TopicExchange`, `Queue`, `Binding` 빈 | `AmqpBroker::declare_topology` |
//! | `RabbitTemplate.convertAndSend` | `MessageProducer` → `MessagePublisher` |
//! | `@RabbitListener(queues = …)` | `consumer::start_consumers` |
//! | `Jackson2JsonMessageConverter` | serde_json (`application/json`) |
//!
//! `RABBITMQ_HOST`(또는 `RABBITMQ_URL`)가 없으면 브로커를 만들지 않습니다.
//! 이때 컨슈머는 시작되지 않고 `*_async` 작업은 `MessagingError`(503)로 실패합니다.

pub mod broker;
pub mod consumer;
pub mod messages;
pub mod producer;

pub use broker::AmqpBroker;
pub use consumer::MessageConsumer;
pub use messages::{EmailMessage, KakaoQueueMessage};
pub use producer::{MessageProducer, MessagePublisher};
