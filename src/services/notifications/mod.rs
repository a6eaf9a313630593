//! 알림 서비스 모듈 (이메일, 카카오 알림톡/친구톡)

pub mod email_service;
pub mod kakao_service;

pub use email_service::EmailService;
pub use kakao_service::KakaoService;
