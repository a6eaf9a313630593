//! # Domain Layer Module
//!
//! 도메인 계층은 영속 엔티티, API 계약(DTO), 비영속 모델로 나뉩니다.
//! Spring Framework의 Domain Layer와 동일한 역할을 수행합니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities   - MongoDB 문서 (User, KakaoMessageLog)
//! ├── dto        - 요청/응답 데이터 (users, notifications, batch)
//! └── models     - JWT 클레임, 인증 컨텍스트, OAuth2 사용자 정보, 세션
//!      │
//!      ▼
//! Application Layer (services, batch, messaging)
//!      │
//!      ▼
//! Infrastructure Layer (repositories, db, caching)
//! ```
//!
//! ## Spring Framework와의 비교
//!
//! | Spring | 이 시스템 | 역할 |
//! |--------|-----------|------|
//! | `@Document` | `entities` 모듈 | 영속 객체 |
//! | `@RequestBody` / `@ResponseBody` | `dto` 모듈 | API 계약 정의 |
//! | `OAuth2User`, `Jwt` | `models` 모듈 | 인증/외부 시스템 모델 |
//! | `@Valid` | `validator::Validate` | 데이터 유효성 검사 |

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use dto::*;
pub use models::*;
