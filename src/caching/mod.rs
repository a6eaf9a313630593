//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 캐시/세션 저장소와 JSON 기반 객체 직렬화를 제공합니다.
//!
//! # 사용하는 키
//!
//! | 키 | TTL | 용도 |
//! |----|-----|------|
//! | `user:id:{id}` / `user:email:{email}` | 600초 | 사용자 조회 캐시 |
//! | `session:{id}` | 1800초 (접근 시 갱신) | 서버 측 세션 |
//! | `oauth2:state:{state}` | 10분 | OAuth2 CSRF state |
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
pub mod store;

pub use store::{CacheStore, InMemoryCacheStore};
