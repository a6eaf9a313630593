//! 카카오 API 클라이언트
//!
//! | 메시지 | 엔드포인트 | 인증 |
//! |--------|-----------|------|
//! | 친구톡 | `{KAKAO_API_BASE_URL}/v1/api/talk/friends/message/default/send` | `KakaoAK {admin key}` |
//! | 알림톡 | `{SOLAPI_BASE_URL}/kakao/v1/alimtalk/send` | Solapi HMAC-SHA256 |
//!
//! 4xx/5xx 응답은 본문을 담은 `KakaoApiError`가 됩니다.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::config::KakaoConfig;
use crate::errors::errors::{AppError, AppResult};
use crate::kakao::dto::{AlimtalkRequest, FriendtalkRequest, KakaoResponse};
use crate::kakao::signature;

const FRIENDTALK_PATH: &str = "/v1/api/talk/friends/message/default/send";
const ALIMTALK_PATH: &str = "/kakao/v1/alimtalk/send";

#[async_trait]
pub trait KakaoGateway: Send + Sync {
    async fn send_friendtalk(&self, request: &FriendtalkRequest) -> AppResult<KakaoResponse>;

    async fn send_alimtalk(&self, request: &AlimtalkRequest) -> AppResult<KakaoResponse>;
}

pub struct KakaoApiClient {
    http_client: Client,
    base_url: String,
    solapi_base_url: String,
    admin_key: String,
    biz_api_key: String,
    biz_api_secret: String,
}

impl KakaoApiClient {
    pub fn from_env() -> AppResult<Self> {
        Self::new(
            KakaoConfig::base_url(),
            KakaoConfig::solapi_base_url(),
            KakaoConfig::admin_key(),
            KakaoConfig::biz_api_key(),
            KakaoConfig::biz_api_secret(),
            KakaoConfig::timeout(),
        )
    }

    pub fn new(
        base_url: String,
        solapi_base_url: String,
        admin_key: String,
        biz_api_key: String,
        biz_api_secret: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            solapi_base_url: solapi_base_url.trim_end_matches('/').to_string(),
            admin_key,
            biz_api_key,
            biz_api_secret,
        })
    }

    async fn post<T: Serialize + Sync>(
        &self,
        kind: &str,
        url: &str,
        authorization: &str,
        body: &T,
    ) -> AppResult<KakaoResponse> {
        log::debug!("➡️ {} 요청: POST {}", kind, url);

        let response = self
            .http_client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::KakaoApiError(format!("Failed to send {}: {}", kind, e)))?;

        let status = response.status();
        log::debug!("⬅️ {} 응답 상태: {}", kind, status);

        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            log::error!("{} API Error: {}", kind, body);
            return Err(AppError::KakaoApiError(format!("Failed to send {}: {}", kind, body)));
        }

        let parsed = response
            .json::<KakaoResponse>()
            .await
            .map_err(|e| AppError::KakaoApiError(format!("Failed to send {}: {}", kind, e)))?;

        log::info!("✅ {} 발송 성공: {:?}", kind, parsed.request_id);
        Ok(parsed)
    }
}

#[async_trait]
impl KakaoGateway for KakaoApiClient {
    async fn send_friendtalk(&self, request: &FriendtalkRequest) -> AppResult<KakaoResponse> {
        let url = format!("{}{}", self.base_url, FRIENDTALK_PATH);
        let authorization = format!("KakaoAK {}", self.admin_key);

        self.post("friendtalk", &url, &authorization, request).await
    }

    async fn send_alimtalk(&self, request: &AlimtalkRequest) -> AppResult<KakaoResponse> {
        let url = format!("{}{}", self.solapi_base_url, ALIMTALK_PATH);
        let authorization = signature::auth_header(&self.biz_api_key, &self.biz_api_secret)?;

        self.post("alimtalk", &url, &authorization, request).await
    }
}

/// 요청을 기록하고 미리 정한 결과를 돌려주는 테스트용 게이트웨이
#[cfg(test)]
#[derive(Default)]
pub struct FakeKakaoGateway {
    pub fail_with: Option<String>,
    pub alimtalks: std::sync::Mutex<Vec<AlimtalkRequest>>,
    pub friendtalks: std::sync::Mutex<Vec<FriendtalkRequest>>,
}

#[cfg(test)]
impl FakeKakaoGateway {
    pub fn failing(body: &str) -> Self {
        Self {
            fail_with: Some(body.to_string()),
            ..Self::default()
        }
    }

    fn result(&self, kind: &str) -> AppResult<KakaoResponse> {
        match &self.fail_with {
            Some(body) => Err(AppError::KakaoApiError(format!("Failed to send {}: {}", kind, body))),
            None => Ok(KakaoResponse {
                request_id: Some(format!("{}-request", kind)),
                ..KakaoResponse::default()
            }),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl KakaoGateway for FakeKakaoGateway {
    async fn send_friendtalk(&self, request: &FriendtalkRequest) -> AppResult<KakaoResponse> {
        self.friendtalks.lock().unwrap().push(request.clone());
        self.result("friendtalk")
    }

    async fn send_alimtalk(&self, request: &AlimtalkRequest) -> AppResult<KakaoResponse> {
        self.alimtalks.lock().unwrap().push(request.clone());
        self.result("alimtalk")
    }
}
