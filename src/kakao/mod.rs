//! # 카카오 메시징 연동
//!
//! | 모듈 | 역할 |
//! |------|------|
//! | `client` | `KakaoGateway` 계약과 reqwest 기반 `KakaoApiClient` |
//! | `dto` | 친구톡/알림톡 요청, 공통 응답 |
//! | `template` | 알림톡 템플릿 이름 → 등록 코드 |
//! | `signature` | Solapi HMAC-SHA256 인증 헤더 |
//!
//! Spring의 `WebClient` 빈 대신 `reqwest::Client` 하나를 재사용합니다.
//! 연결과 요청 모두 `KAKAO_API_TIMEOUT_MS`(기본 5000ms) 타임아웃이 적용됩니다.

pub mod client;
pub mod dto;
pub mod signature;
pub mod template;

pub use client::{KakaoApiClient, KakaoGateway};
pub use dto::*;
pub use template::KakaoTemplateCode;
