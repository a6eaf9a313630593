//! Users Entity Module
//!
//! 로컬 인증과 OAuth2 인증을 모두 지원하는 [`User`](user::User) 엔티티를 포함합니다.
//!
//! ```rust,ignore
//! use crate::domain::entities::users::User;
//!
//! // 로컬 사용자
//! let user = User::new_local("kim".into(), "kim@example.com".into(), hash, None, None);
//!
//! // OAuth2 사용자 (username = "kakao_123456")
//! let oauth_user = User::new_oauth(AuthProvider::Kakao, "123456".into(), None, Some("춘식".into()));
//! ```

pub mod user;

pub use user::*;
