//! # 사용자 관련 응답 DTO 모듈
//!
//! 비즈니스 로직 처리 결과를 camelCase JSON으로 전달합니다.
//! 비밀번호 해시 같은 민감한 필드는 응답 타입에 존재하지 않습니다.
//!
//! ```json
//! {
//!   "id": "507f1f77bcf86cd799439011",
//!   "username": "kim",
//!   "email": "kim@example.com",
//!   "phone": null,
//!   "name": "김철수",
//!   "provider": "local",
//!   "status": "ACTIVE",
//!   "createdAt": "2024-06-01T10:00:00+00:00",
//!   "updatedAt": "2024-06-07T12:00:00+00:00"
//! }
//! ```

pub mod user_response;
pub mod auth_response;

pub use user_response::UserResponse;
pub use auth_response::{LoginResponse, OAuthAuthorizeResponse, TokenResponse};
