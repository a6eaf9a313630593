//! # Domain Entities Module
//!
//! MongoDB 컬렉션과 1:1로 매핑되는 영속 엔티티를 정의합니다.
//! Spring Data의 `@Document` 클래스와 같은 역할입니다.
//!
//! ## Spring Framework와의 비교
//!
//! | Spring | Rust |
//! |--------|------|
//! | `@Document("users")` | `User` + `UserRepository`의 컬렉션 이름 |
//! | `@Id` | `#[serde(rename = "_id")] id: Option<ObjectId>` |
//! | `@Enumerated(STRING)` | `#[serde(rename_all = "SCREAMING_SNAKE_CASE")]` |
//! | `@CreatedDate` / `@LastModifiedDate` | `created_at` / `updated_at` (`bson::DateTime`) |
//!
//! ## 모듈 구조
//!
//! ```text
//! entities/
//! ├── users/
//! │   └── user.rs               ← User, UserStatus
//! └── messages/
//!     └── kakao_message_log.rs  ← 카카오 발송 이력
//! ```

pub mod users;
pub mod messages;

pub use users::*;
pub use messages::*;
