//! # 사용자 관련 요청 DTO 모듈
//!
//! 클라이언트로부터 받은 JSON/form 데이터를 구조화된 Rust 타입으로 변환하고
//! `validator`로 검증합니다. Spring Boot의 `@Valid @RequestBody`와 같은 역할입니다.
//!
//! | DTO | 엔드포인트 | 형식 |
//! |-----|-----------|------|
//! | `CreateUserRequest` | `POST /api/auth/register` | JSON |
//! | `LoginRequest` | `POST /api/auth/login` | form / query |
//! | `RefreshTokenRequest` | `POST /api/auth/refresh` | JSON |
//! | `OAuthCallbackQuery` | `GET /api/auth/oauth2/{provider}/callback` | query |
//! | `UpdateUserRequest` | `PUT /api/users/{id}` | JSON |
//!
//! 검증 실패 시 `validator::ValidationErrors`가 `AppError::ValidationError`(400)로 변환됩니다.

pub mod create_user_request;
pub mod update_user_request;
pub mod auth_request;

pub use create_user_request::CreateUserRequest;
pub use update_user_request::UpdateUserRequest;
pub use auth_request::{LoginRequest, OAuthCallbackQuery, RefreshTokenRequest};
