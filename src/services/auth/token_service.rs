//! JWT 토큰 서비스 구현
//!
//! HS256(HMAC-SHA256)으로 서명된 액세스/리프레시 토큰을 발급하고 검증합니다.
//! 서명 키는 `JWT_SECRET` 환경 변수이며 32바이트 이상이어야 합니다.
//!
//! | 토큰 | 만료 설정 | 기본값 |
//! |------|-----------|--------|
//! | 액세스 | `JWT_EXPIRATION` (ms) | 86 400 000 (1일) |
//! | 리프레시 | `JWT_REFRESH_EXPIRATION` (ms) | 604 800 000 (7일) |

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::config::{Environment, JwtConfig};
use crate::core::registry::{Component, ComponentKind};
use crate::domain::entities::users::user::User;
use crate::domain::models::token::token::{TokenClaims, TokenPair, TokenType};
use crate::errors::errors::{AppError, AppResult};
use crate::register_component;

/// HMAC-SHA256 키 최소 길이 (바이트)
pub const MIN_SECRET_BYTES: usize = 32;

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_ms: i64,
    refresh_expiration_ms: i64,
}

impl Component for TokenService {
    fn build() -> AppResult<Self> {
        let secret = JwtConfig::secret();

        if JwtConfig::is_default_secret(&secret) && Environment::current().is_production() {
            return Err(AppError::InternalError(
                "JWT_SECRET must be set in production".to_string(),
            ));
        }

        Self::with_secret(
            &secret,
            JwtConfig::expiration_ms(),
            JwtConfig::refresh_expiration_ms(),
        )
    }
}

register_component!(TokenService, "token_service", ComponentKind::Service);

impl TokenService {
    /// 지정한 키와 만료 시간으로 서비스를 만듭니다.
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 키가 32바이트보다 짧은 경우
    pub fn with_secret(secret: &str, expiration_ms: i64, refresh_expiration_ms: i64) -> AppResult<Self> {
        if secret.len() < MIN_SECRET_BYTES {
            return Err(AppError::InternalError(format!(
                "JWT secret must be at least {} bytes (got {})",
                MIN_SECRET_BYTES,
                secret.len()
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiration_ms,
            refresh_expiration_ms,
        })
    }

    /// 액세스 토큰 유효 시간 (초)
    pub fn expires_in_seconds(&self) -> i64 {
        self.expiration_ms / 1000
    }

    fn issue(&self, user: &User, token_type: TokenType, lifetime_ms: i64) -> AppResult<String> {
        let user_id = user
            .id_string()
            .ok_or_else(|| AppError::InternalError("Cannot issue a token for an unsaved user".to_string()))?;

        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: user.username.clone(),
            uid: user_id,
            roles: user.roles.clone(),
            provider: user.provider.clone(),
            token_type,
            iat: now,
            exp: now + lifetime_ms / 1000,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("토큰 생성 실패: {}", e)))
    }

    /// 액세스 토큰 생성
    ///
    /// # Arguments
    ///
    /// * `user` - 저장된 사용자 (`id`가 있어야 함)
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 저장되지 않은 사용자이거나 서명 실패
    pub fn generate_token(&self, user: &User) -> AppResult<String> {
        self.issue(user, TokenType::Access, self.expiration_ms)
    }

    /// 리프레시 토큰 생성
    pub fn generate_refresh_token(&self, user: &User) -> AppResult<String> {
        self.issue(user, TokenType::Refresh, self.refresh_expiration_ms)
    }

    /// 액세스 토큰과 리프레시 토큰을 함께 발급합니다.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let pair = token_service.generate_token_pair(&user)?;
    /// assert_eq!(pair.token_type, "Bearer");
    /// ```
    pub fn generate_token_pair(&self, user: &User) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.generate_token(user)?,
            refresh_token: self.generate_refresh_token(user)?,
            token_type: "Bearer".to_string(),
            expires_in: self.expires_in_seconds(),
        })
    }

    /// JWT 토큰 검증 및 클레임 추출
    ///
    /// 서명과 만료 시간을 확인합니다. 토큰 용도는 확인하지 않습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 토큰 만료, 잘못된 형식/서명
    pub fn verify_token(&self, token: &str) -> AppResult<TokenClaims> {
        decode::<TokenClaims>(token, &self.decoding_key, &Validation::default())
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
                }
                _ => AppError::AuthenticationError(format!("유효하지 않은 토큰입니다: {}", e)),
            })
    }

    /// 액세스 토큰만 허용합니다.
    pub fn verify_access_token(&self, token: &str) -> AppResult<TokenClaims> {
        self.verify_typed(token, TokenType::Access)
    }

    /// 리프레시 토큰만 허용합니다.
    pub fn verify_refresh_token(&self, token: &str) -> AppResult<TokenClaims> {
        self.verify_typed(token, TokenType::Refresh)
    }

    fn verify_typed(&self, token: &str, expected: TokenType) -> AppResult<TokenClaims> {
        let claims = self.verify_token(token)?;

        if claims.token_type != expected {
            return Err(AppError::AuthenticationError(format!(
                "{:?} 토큰이 필요합니다",
                expected
            )));
        }

        Ok(claims)
    }

    /// 토큰의 `sub` (username)
    pub fn get_username_from_token(&self, token: &str) -> AppResult<String> {
        Ok(self.verify_token(token)?.sub)
    }

    /// 서명과 만료만 확인합니다. 실패 사유는 로그로 남깁니다.
    pub fn validate_token(&self, token: &str) -> bool {
        match self.verify_token(token) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("Invalid JWT token: {}", e);
                false
            }
        }
    }

    /// Bearer 토큰에서 실제 토큰 부분 추출
    ///
    /// HTTP Authorization 헤더의 "Bearer {token}" 형식에서 토큰 부분만을 추출합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 잘못된 헤더 형식이거나 토큰이 비어 있는 경우
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> AppResult<&'a str> {
        match auth_header.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim()),
            _ => Err(AppError::AuthenticationError(
                "유효하지 않은 인증 헤더 형식입니다".to_string(),
            )),
        }
    }
}

/// 테스트용 키로 만든 서비스를 레지스트리에 등록합니다.
#[cfg(test)]
pub(crate) fn install_for_tests() -> std::sync::Arc<TokenService> {
    use crate::core::registry::ServiceLocator;

    if let Some(service) = ServiceLocator::try_get::<TokenService>() {
        return service;
    }

    let service = std::sync::Arc::new(
        TokenService::with_secret("route-test-secret-key-that-is-long-enough", 3_600_000, 7_200_000)
            .expect("test secret is long enough"),
    );
    ServiceLocator::set(service.clone());
    service
}
