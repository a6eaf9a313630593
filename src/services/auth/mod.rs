//! 인증 및 보안 서비스 모듈
//!
//! # Features
//!
//! - JWT 액세스/리프레시 토큰 발급과 검증 (HS256)
//! - OAuth 2.0 소셜 로그인 (Google, GitHub, Kakao)
//! - Redis 기반 서버 측 세션
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::{TokenService, OAuth2Service};
//!
//! let token_service = TokenService::instance();
//! let tokens = token_service.generate_token_pair(&user)?;
//!
//! let oauth2 = OAuth2Service::instance();
//! let authorize = oauth2.authorize("kakao").await?;
//! ```

pub mod token_service;
pub mod oauth2_service;
pub mod session_service;

pub use token_service::TokenService;
pub use oauth2_service::OAuth2Service;
pub use session_service::SessionService;
