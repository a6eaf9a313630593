//! # Domain Models
//!
//! 영속되지 않는 도메인 모델입니다.
//!
//! | 모듈 | 내용 |
//! |------|------|
//! | `auth` | 요청에 붙는 `AuthenticatedUser`, 인증 모드와 역할 요구사항 |
//! | `token` | JWT 클레임과 토큰 쌍 |
//! | `oauth` | 프로바이더별 user-info 응답에서 추출한 사용자 정보 |
//! | `session` | Redis에 저장되는 서버 측 세션 |

pub mod auth;
pub mod token;
pub mod oauth;
pub mod session;

pub use auth::*;
pub use token::*;
pub use oauth::*;
pub use session::*;
