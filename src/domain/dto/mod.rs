//! # Data Transfer Objects
//!
//! API 경계에서 주고받는 요청/응답 타입입니다.
//! Spring의 `@RequestBody`/`@ResponseBody` DTO와 같은 역할을 합니다.
//!
//! ```text
//! dto/
//! ├── users/           ← 회원가입, 로그인, 토큰, 사용자 CRUD
//! ├── notifications/   ← 카카오 알림톡/친구톡, 이메일, 멀티 채널
//! └── batch/           ← 배치 실행 결과
//! ```

pub mod users;
pub mod notifications;
pub mod batch;

pub use users::*;
pub use notifications::*;
pub use batch::*;
