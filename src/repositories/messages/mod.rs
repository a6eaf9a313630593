//! 메시지 발송 이력 리포지토리

pub mod kakao_log_repo;

pub use kakao_log_repo::{InMemoryKakaoLogStore, KakaoLogStore, KakaoMessageRepository};
