//! 인증 요청관련 DTO
//!
//! 인증을 요청하는 사용자들의 요청 정보를 매핑합니다.
use serde::Deserialize;
use validator::Validate;

/// 로컬 로그인 요청 (form 또는 query 파라미터)
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "사용자명을 입력해주세요"))]
    pub username: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 리프레시 토큰 요청 구조체
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "리프레시 토큰이 필요합니다"))]
    pub refresh_token: String,
}

/// OAuth2 콜백 쿼리 파라미터
///
/// 사용자가 동의를 거부하면 `code` 대신 `error`가 전달됩니다.
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}
