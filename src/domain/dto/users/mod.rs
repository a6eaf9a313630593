//! # User Data Transfer Objects Module
//!
//! 사용자/인증 API의 요청·응답 계약을 정의합니다.
//!
//! | Spring | 이 시스템 |
//! |--------|-----------|
//! | `@Valid @RequestBody UserCreateRequest` | `web::Json<CreateUserRequest>` + `validate()` |
//! | `@RequestParam username, password` | `web::Form<LoginRequest>` |
//! | `UserResponse.from(user)` | `UserResponse::from(user)` |
//! | `AuthResponse` | `LoginResponse` / `TokenResponse` |

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
