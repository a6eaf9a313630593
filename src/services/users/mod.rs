//! 사용자 관리 서비스 모듈
//!
//! 사용자 등록, 조회, 수정, 삭제와 로그인 자격 증명 검증을 담당합니다.
//!
//! # Security
//!
//! - bcrypt 비밀번호 해싱 (환경별 cost)
//! - 이메일/사용자명 중복 방지
//! - 비활성/정지 계정과 OAuth2 계정의 비밀번호 로그인 차단
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let user_service = UserService::instance();
//! let user = user_service.create(request).await?;
//! ```

pub mod user_service;

pub use user_service::UserService;
