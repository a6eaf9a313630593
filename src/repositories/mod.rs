//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 각 리포지토리는 저장소 계약(trait)과 MongoDB 구현체, 테스트용 메모리 구현체로 구성됩니다.
//! MongoDB 구현체는 `register_component!`로 등록되어 `instance()`로 접근합니다.
//!
//! ```rust,ignore
//! use crate::repositories::users::{UserRepository, UserStore};
//!
//! let user_repo = UserRepository::instance();
//! let user = user_repo.find_by_email("user@example.com").await?;
//! ```

pub mod users;
pub mod messages;
