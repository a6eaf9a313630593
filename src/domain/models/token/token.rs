//! JWT 인증 토큰 구조체 및 페어링 된 세트
//!
//! RFC 7519 표준 클레임과 용도별 토큰 2개를 묶은 정보를 표시합니다.
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;

/// 토큰 용도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT 토큰의 클레임(Payload) 구조체
///
/// ## 클레임 구성
///
/// - `sub`: 토큰의 주체 (username)
/// - `uid`: 사용자 ID (ObjectId hex)
/// - `roles`: 사용자 권한 목록
/// - `provider`: 인증 방식
/// - `token_type`: `access` / `refresh`
/// - `iat` / `exp`: 발급/만료 시간 (Unix timestamp, 초)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub uid: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub provider: AuthProvider,
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
}

/// JWT 토큰 쌍 구조체
///
/// OAuth 2.0 표준의 토큰 응답 형식을 따릅니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    /// 액세스 토큰 (API 접근용 단기 토큰)
    pub access_token: String,
    /// 리프레시 토큰 (토큰 갱신용 장기 토큰)
    pub refresh_token: String,
    /// 항상 `Bearer`
    pub token_type: String,
    /// 액세스 토큰 만료 시간 (초)
    pub expires_in: i64,
}
