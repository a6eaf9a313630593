//! 메시지 발송 이력 엔티티

pub mod kakao_message_log;

pub use kakao_message_log::*;
