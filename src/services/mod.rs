//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 모든 서비스는 `Component`로 레지스트리에 등록되어 싱글톤으로 관리됩니다.
//! 의존성은 trait 객체(`UserStore`, `CacheStore`, `MailTransport`, `KakaoGateway` …)로
//! 받으므로 테스트에서는 메모리 구현으로 바꿔 끼울 수 있습니다.
//!
//! # Features
//!
//! - 사용자 생명주기 관리 (생성, 조회, 수정, 삭제)
//! - JWT 토큰, OAuth 2.0 소셜 로그인, 서버 측 세션
//! - 이메일과 카카오 알림 발송 (즉시 또는 큐)
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{users::UserService, auth::TokenService};
//!
//! let user_service = UserService::instance();
//! let token_service = TokenService::instance();
//! ```

pub mod users;
pub mod auth;
pub mod notifications;
