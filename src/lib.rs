//! API 서버 백엔드
//!
//! 인증된 REST API, 배치 잡, 메시지 큐 기반 알림 발송을 하나의 서비스로 묶습니다.
//!
//! # Features
//!
//! - **인증**: HS256 JWT 액세스/리프레시 토큰, Google/GitHub/Kakao OAuth2 로그인, Redis 세션
//! - **사용자 관리**: 회원가입, 조회, 부분 수정, 삭제 (MongoDB + Redis 캐시)
//! - **알림**: SMTP 이메일, 카카오 알림톡/친구톡, RabbitMQ 비동기 발송
//! - **배치**: 청크/태스클릿 스텝, 사용자 정규화 잡, 일일 리포트 잡, cron 스케줄러
//! - **의존성 관리**: `inventory` 기반 컴포넌트 레지스트리
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← AuthMiddleware (Bearer / admin)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐      ┌──────────────────┐
//! │    Handlers     │      │ MessageConsumer  │ ← RabbitMQ
//! └─────────────────┘      └──────────────────┘
//!          │                        │
//!          ▼                        ▼
//! ┌──────────────────────────────────────────┐
//! │ Services / JobLauncher / MessageProducer │
//! └──────────────────────────────────────────┘
//!          │
//!          ▼
//! ┌──────────────────────────────────────────┐
//! │ MongoDB · Redis · SMTP · Kakao/Solapi    │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use api_server_backend::services::users::UserService;
//! use api_server_backend::services::auth::TokenService;
//!
//! let user = UserService::instance()
//!     .verify_credentials("kim", "password1")
//!     .await?;
//! let tokens = TokenService::instance().generate_token_pair(&user)?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod messaging;
pub mod mail;
pub mod kakao;
pub mod batch;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;

#[cfg(test)]
pub(crate) mod testing;
