//! 인증 컨텍스트 모델 (요청 단위 사용자 정보와 접근 규칙)

pub mod authenticated_user;
pub mod authentication_request;

pub use authenticated_user::*;
pub use authentication_request::*;
