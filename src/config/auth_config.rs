//! 인증 관련 설정 (JWT, OAuth2, 세션)
//!
//! Spring Security 설정의 `jwt.*`, `spring.security.oauth2.client.*`,
//! `spring.session.*` 프로퍼티에 대응하는 값들을 환경 변수로 제공합니다.
//!
//! ## OAuth2 등록 환경 변수
//!
//! 프로바이더 접두사(`GOOGLE`, `GITHUB`, `KAKAO`)를 붙여 사용합니다.
//!
//! | 변수 | 필수 | 설명 |
//! |------|------|------|
//! | `{P}_CLIENT_ID` | ✅ | 클라이언트 ID |
//! | `{P}_CLIENT_SECRET` | | 클라이언트 시크릿 |
//! | `{P}_REDIRECT_URI` | | 기본값 `http://localhost:8080/api/auth/oauth2/{p}/callback` |
//! | `{P}_AUTH_URI` / `{P}_TOKEN_URI` / `{P}_USER_INFO_URI` | | 프로바이더 기본 엔드포인트 |
//! | `{P}_SCOPES` | | 공백 구분 스코프 |

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::Environment;
use crate::errors::errors::AppError;

const DEV_JWT_SECRET: &str = "local-development-jwt-secret-change-me-0123456789";

/// JWT 설정
pub struct JwtConfig;

impl JwtConfig {
    /// HS256 서명 키. 운영 환경에서는 반드시 `JWT_SECRET`을 설정해야 합니다.
    pub fn secret() -> String {
        env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, using default (not secure for production!)");
            DEV_JWT_SECRET.to_string()
        })
    }

    pub fn is_default_secret(secret: &str) -> bool {
        secret == DEV_JWT_SECRET
    }

    /// 액세스 토큰 유효 시간 (밀리초)
    pub fn expiration_ms() -> i64 {
        env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(86_400_000)
    }

    /// 리프레시 토큰 유효 시간 (밀리초)
    pub fn refresh_expiration_ms() -> i64 {
        env::var("JWT_REFRESH_EXPIRATION")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(604_800_000)
    }
}

/// 서버 측 세션 설정
pub struct SessionConfig;

impl SessionConfig {
    pub const COOKIE_NAME: &'static str = "SESSION";

    /// 마지막 접근 이후 세션이 유지되는 시간 (초)
    pub fn max_inactive_seconds() -> u64 {
        env::var("SESSION_MAX_INACTIVE_SECONDS")
            .ok()
            .and_then(|value| value.parse().ok())
            .filter(|seconds: &u64| *seconds > 0)
            .unwrap_or(1800)
    }

    pub fn secure_cookie() -> bool {
        Environment::current().is_production()
    }
}

/// OAuth2 공통 설정
pub struct OAuthConfig;

impl OAuthConfig {
    /// `state` 값이 Redis에 보관되는 시간 (분)
    pub fn state_ttl_minutes() -> u64 {
        env::var("OAUTH_STATE_TTL_MINUTES")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(10)
    }

    /// 로그인 성공 후 토큰을 전달할 프론트엔드 주소
    pub fn success_redirect_uri() -> String {
        env::var("OAUTH2_SUCCESS_REDIRECT")
            .unwrap_or_else(|_| "http://localhost:3000/auth/callback".to_string())
    }

    /// 프로바이더별 클라이언트 등록 정보
    pub fn registration(provider: &AuthProvider) -> Result<OAuthRegistration, AppError> {
        let defaults = ProviderDefaults::for_provider(provider).ok_or_else(|| {
            AppError::ValidationError(format!("{} is not an OAuth2 provider", provider.as_str()))
        })?;

        let prefix = provider.as_str().to_uppercase();
        let var = |suffix: &str| env::var(format!("{}_{}", prefix, suffix)).ok();

        let client_id = var("CLIENT_ID").filter(|id| !id.trim().is_empty()).ok_or_else(|| {
            AppError::ValidationError(format!(
                "OAuth2 provider '{}' is not configured ({}_CLIENT_ID is missing)",
                provider.as_str(),
                prefix
            ))
        })?;

        Ok(OAuthRegistration {
            provider: provider.clone(),
            client_id,
            client_secret: var("CLIENT_SECRET").unwrap_or_default(),
            redirect_uri: var("REDIRECT_URI").unwrap_or_else(|| {
                format!("http://localhost:8080/api/auth/oauth2/{}/callback", provider.as_str())
            }),
            authorization_uri: var("AUTH_URI").unwrap_or_else(|| defaults.authorization_uri.to_string()),
            token_uri: var("TOKEN_URI").unwrap_or_else(|| defaults.token_uri.to_string()),
            user_info_uri: var("USER_INFO_URI").unwrap_or_else(|| defaults.user_info_uri.to_string()),
            scopes: var("SCOPES")
                .unwrap_or_else(|| defaults.scopes.to_string())
                .split_whitespace()
                .map(str::to_string)
                .collect(),
            user_name_attribute: defaults.user_name_attribute.to_string(),
        })
    }
}

/// OAuth2 클라이언트 등록 정보 (Spring의 `ClientRegistration`)
#[derive(Debug, Clone)]
pub struct OAuthRegistration {
    pub provider: AuthProvider,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub authorization_uri: String,
    pub token_uri: String,
    pub user_info_uri: String,
    pub scopes: Vec<String>,
    /// 사용자 정보 응답에서 프로바이더 사용자 ID를 담은 속성 이름
    pub user_name_attribute: String,
}

struct ProviderDefaults {
    authorization_uri: &'static str,
    token_uri: &'static str,
    user_info_uri: &'static str,
    scopes: &'static str,
    user_name_attribute: &'static str,
}

impl ProviderDefaults {
    fn for_provider(provider: &AuthProvider) -> Option<Self> {
        match provider {
            AuthProvider::Google => Some(Self {
                authorization_uri: "https://accounts.google.com/o/oauth2/v2/auth",
                token_uri: "https://oauth2.googleapis.com/token",
                user_info_uri: "https://www.googleapis.com/oauth2/v3/userinfo",
                scopes: "openid profile email",
                user_name_attribute: "sub",
            }),
            AuthProvider::GitHub => Some(Self {
                authorization_uri: "https://github.com/login/oauth/authorize",
                token_uri: "https://github.com/login/oauth/access_token",
                user_info_uri: "https://api.github.com/user",
                scopes: "read:user user:email",
                user_name_attribute: "id",
            }),
            AuthProvider::Kakao => Some(Self {
                authorization_uri: "https://kauth.kakao.com/oauth/authorize",
                token_uri: "https://kauth.kakao.com/oauth/token",
                user_info_uri: "https://kapi.kakao.com/v2/user/me",
                scopes: "profile_nickname account_email",
                user_name_attribute: "id",
            }),
            AuthProvider::Local => None,
        }
    }
}

/// 사용자 인증 제공자
///
/// 저장/직렬화 시 OAuth2 registration id와 같은 소문자 문자열을 사용합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    #[default]
    Local,
    Google,
    GitHub,
    Kakao,
}

impl FromStr for AuthProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(AuthProvider::Local),
            "google" => Ok(AuthProvider::Google),
            "github" => Ok(AuthProvider::GitHub),
            "kakao" => Ok(AuthProvider::Kakao),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }
}

impl AuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Local => "local",
            AuthProvider::Google => "google",
            AuthProvider::GitHub => "github",
            AuthProvider::Kakao => "kakao",
        }
    }

    pub fn is_oauth(&self) -> bool {
        !matches!(self, AuthProvider::Local)
    }
}
