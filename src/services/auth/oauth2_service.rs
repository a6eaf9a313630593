//! # OAuth2 소셜 로그인 서비스
//!
//! Google, GitHub, Kakao에 대한 Authorization Code Flow를 처리합니다.
//! Spring Security의 `oauth2Login()` + `OAuth2UserService` + 성공 핸들러 역할입니다.
//!
//! ```text
//! 클라이언트              API 서버                       프로바이더
//!    │ GET .../authorize     │                               │
//!    ├──────────────────────►│ state 생성 → Redis 저장         │
//!    │◄──────────────────────┤ {authorizationUrl, state}     │
//!    │        (사용자 동의)                                   │
//!    │ GET .../callback?code&state                            │
//!    ├──────────────────────►│ state 소비 (1회용)              │
//!    │                       ├── code → access token ───────►│
//!    │                       ├── user-info ─────────────────►│
//!    │                       │ 사용자 조회/생성, JWT 발급      │
//!    │◄──────────────────────┤ 302 → OAUTH2_SUCCESS_REDIRECT?token=…
//! ```
//!
//! `state`는 `oauth2:state:{state}` 키에 `OAUTH_STATE_TTL_MINUTES`(기본 10분) 동안 보관되며
//! 어떤 프로바이더를 위해 발급되었는지 함께 기록합니다.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::caching::redis::RedisClient;
use crate::caching::store::CacheStore;
use crate::config::{AuthProvider, OAuthConfig, OAuthRegistration};
use crate::core::registry::{Component, ComponentKind, ServiceLocator};
use crate::domain::dto::users::response::OAuthAuthorizeResponse;
use crate::domain::entities::users::user::User;
use crate::domain::models::oauth::OAuth2UserInfo;
use crate::errors::errors::{AppError, AppResult};
use crate::register_component;
use crate::services::auth::token_service::TokenService;
use crate::services::users::user_service::UserService;

const STATE_KEY_PREFIX: &str = "oauth2:state:";

/// 발급된 `state`에 묶인 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AuthorizationState {
    provider: AuthProvider,
    issued_at: i64,
}

#[derive(Debug, Deserialize)]
struct ProviderTokenResponse {
    access_token: String,
}

/// 프로바이더와의 HTTP 통신 계약
#[async_trait]
pub trait OAuthProviderClient: Send + Sync {
    /// authorization code를 프로바이더 액세스 토큰으로 교환합니다.
    async fn exchange_code(&self, registration: &OAuthRegistration, code: &str) -> AppResult<String>;

    /// user-info 엔드포인트의 JSON 속성
    async fn fetch_user_attributes(
        &self,
        registration: &OAuthRegistration,
        access_token: &str,
    ) -> AppResult<Value>;
}

/// reqwest 기반 구현
pub struct HttpOAuthClient {
    http_client: reqwest::Client,
}

impl HttpOAuthClient {
    pub fn new() -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::InternalError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl OAuthProviderClient for HttpOAuthClient {
    async fn exchange_code(&self, registration: &OAuthRegistration, code: &str) -> AppResult<String> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", registration.client_id.as_str()),
            ("client_secret", registration.client_secret.as_str()),
            ("redirect_uri", registration.redirect_uri.as_str()),
        ];

        let response = self
            .http_client
            .post(&registration.token_uri)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!(
                    "{} 토큰 요청 실패: {}",
                    registration.provider.as_str(),
                    e
                ))
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::AuthenticationError(format!(
                "{} 토큰 교환 실패: {}",
                registration.provider.as_str(),
                error_text
            )));
        }

        let token = response.json::<ProviderTokenResponse>().await.map_err(|e| {
            AppError::ExternalServiceError(format!(
                "{} 토큰 응답 파싱 실패: {}",
                registration.provider.as_str(),
                e
            ))
        })?;

        Ok(token.access_token)
    }

    async fn fetch_user_attributes(
        &self,
        registration: &OAuthRegistration,
        access_token: &str,
    ) -> AppResult<Value> {
        let response = self
            .http_client
            .get(&registration.user_info_uri)
            .bearer_auth(access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!(
                    "{} 사용자 정보 요청 실패: {}",
                    registration.provider.as_str(),
                    e
                ))
            })?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::AuthenticationError(format!(
                "{} 사용자 정보 조회 실패: {}",
                registration.provider.as_str(),
                error_text
            )));
        }

        response.json::<Value>().await.map_err(|e| {
            AppError::ExternalServiceError(format!(
                "{} 사용자 정보 파싱 실패: {}",
                registration.provider.as_str(),
                e
            ))
        })
    }
}

pub struct OAuth2Service {
    cache: Arc<dyn CacheStore>,
    client: Arc<dyn OAuthProviderClient>,
    user_service: Arc<UserService>,
    token_service: Arc<TokenService>,
    registrations: Vec<OAuthRegistration>,
    state_ttl_seconds: u64,
}

impl Component for OAuth2Service {
    fn build() -> AppResult<Self> {
        Ok(Self::new(
            ServiceLocator::require::<RedisClient>()?,
            Arc::new(HttpOAuthClient::new()?),
            ServiceLocator::resolve::<UserService>()?,
            ServiceLocator::resolve::<TokenService>()?,
        ))
    }
}

register_component!(OAuth2Service, "oauth2_service", ComponentKind::Service);

impl OAuth2Service {
    pub fn new(
        cache: Arc<dyn CacheStore>,
        client: Arc<dyn OAuthProviderClient>,
        user_service: Arc<UserService>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            cache,
            client,
            user_service,
            token_service,
            registrations: Vec::new(),
            state_ttl_seconds: OAuthConfig::state_ttl_minutes() * 60,
        }
    }

    /// 환경 변수 대신 사용할 등록 정보를 지정합니다.
    pub fn with_registration(mut self, registration: OAuthRegistration) -> Self {
        self.registrations.retain(|r| r.provider != registration.provider);
        self.registrations.push(registration);
        self
    }

    /// 경로의 `{provider}` 값으로 등록 정보를 찾습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 지원하지 않는 프로바이더 (`local` 포함)
    /// * `AppError::ValidationError` - 클라이언트 ID가 설정되지 않은 프로바이더
    pub fn registration(&self, provider: &str) -> AppResult<OAuthRegistration> {
        let provider = provider
            .parse::<AuthProvider>()
            .ok()
            .filter(AuthProvider::is_oauth)
            .ok_or_else(|| AppError::NotFound(format!("Unknown OAuth2 provider: {}", provider)))?;

        match self.registrations.iter().find(|r| r.provider == provider) {
            Some(registration) => Ok(registration.clone()),
            None => OAuthConfig::registration(&provider),
        }
    }

    pub async fn authorize(&self, provider: &str) -> AppResult<OAuthAuthorizeResponse> {
        let registration = self.registration(provider)?;
        self.authorize_with(&registration).await
    }

    /// 새 `state`를 저장하고 프로바이더 인증 URL을 만듭니다.
    pub async fn authorize_with(&self, registration: &OAuthRegistration) -> AppResult<OAuthAuthorizeResponse> {
        let state = Uuid::new_v4().simple().to_string();

        self.cache
            .set_with_expiry(
                &format!("{}{}", STATE_KEY_PREFIX, state),
                &AuthorizationState {
                    provider: registration.provider.clone(),
                    issued_at: Utc::now().timestamp(),
                },
                self.state_ttl_seconds,
            )
            .await?;

        let scope = registration.scopes.join(" ");
        let params = [
            ("response_type", "code"),
            ("client_id", registration.client_id.as_str()),
            ("scope", scope.as_str()),
            ("state", state.as_str()),
            ("redirect_uri", registration.redirect_uri.as_str()),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        log::info!("🔑 OAuth2 인증 요청: {}", registration.provider.as_str());

        Ok(OAuthAuthorizeResponse {
            authorization_url: format!("{}?{}", registration.authorization_uri, query_string),
            state,
        })
    }

    pub async fn callback(&self, provider: &str, code: &str, state: &str) -> AppResult<User> {
        let registration = self.registration(provider)?;
        self.callback_with(&registration, code, state).await
    }

    /// 콜백 처리: state 소비 → 토큰 교환 → 사용자 정보 → 사용자 조회/생성
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - state가 없거나 만료됨, 다른 프로바이더의 state,
    ///   토큰 교환 실패, 사용자 ID가 없는 응답
    pub async fn callback_with(
        &self,
        registration: &OAuthRegistration,
        code: &str,
        state: &str,
    ) -> AppResult<User> {
        let stored: Option<AuthorizationState> = self
            .cache
            .take(&format!("{}{}", STATE_KEY_PREFIX, state))
            .await?;

        let stored = stored.ok_or_else(|| {
            log::warn!("🔒 OAuth2 state 불일치 또는 만료: {}", state);
            AppError::AuthenticationError("Invalid or expired OAuth2 state".to_string())
        })?;

        if stored.provider != registration.provider {
            log::warn!(
                "🔒 OAuth2 state 프로바이더 불일치: {} != {}",
                stored.provider.as_str(),
                registration.provider.as_str()
            );
            return Err(AppError::AuthenticationError(
                "OAuth2 state was issued for a different provider".to_string(),
            ));
        }

        let access_token = self.client.exchange_code(registration, code).await?;
        let attributes = self
            .client
            .fetch_user_attributes(registration, &access_token)
            .await?;

        let info = OAuth2UserInfo::from_attributes(
            registration.provider.as_str(),
            &attributes,
            &registration.user_name_attribute,
        )?;

        log::info!(
            "🔑 OAuth2 로그인: {} ({})",
            registration.provider.as_str(),
            info.provider_id
        );

        self.user_service
            .find_or_create_oauth2_user(&registration.provider, &info.provider_id, info.email, info.name)
            .await
    }

    /// 로그인 성공 후 프론트엔드로 보낼 주소 (`?token=<jwt>`)
    pub fn success_redirect(&self, user: &User) -> AppResult<String> {
        let token = self.token_service.generate_token(user)?;
        let base = OAuthConfig::success_redirect_uri();
        let separator = if base.contains('?') { '&' } else { '?' };

        Ok(format!("{}{}token={}", base, separator, urlencoding::encode(&token)))
    }
}
