//! 사용자 데이터 액세스 계층
//!
//! [`UserStore`](user_repo::UserStore) 계약과 두 구현체를 제공합니다.
//!
//! | 구현 | 저장소 | 용도 |
//! |------|--------|------|
//! | `UserRepository` | MongoDB `users` + Redis 캐시 | 운영 |
//! | `InMemoryUserStore` | `RwLock<Vec<User>>` | 테스트 |

pub mod user_repo;
pub mod memory;

pub use user_repo::{UserRepository, UserStore};
pub use memory::InMemoryUserStore;
