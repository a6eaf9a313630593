//! HTTP 핸들러 테스트용 레지스트리 구성
//!
//! MongoDB, Redis, RabbitMQ, SMTP, 외부 API 없이 전체 라우트를 띄울 수 있도록
//! 메모리 저장소와 가짜 게이트웨이로 만든 서비스를 `ServiceLocator`에 한 번만 등록합니다.
//!
//! | 컴포넌트 | 테스트 구성 |
//! |----------|-------------|
//! | `UserService` | `InMemoryUserStore` |
//! | `SessionService`, `OAuth2Service` | `InMemoryCacheStore`, GitHub 고정 응답 |
//! | `MessageProducer` | 브로커 없음 (비동기 발송은 503) |
//! | `EmailService` | `RecordingMailTransport` |
//! | `KakaoService` | `FakeKakaoGateway` |
//! | `JobLauncher` | 기본 잡 + [`SLOW_JOB`] |
//!
//! 테스트는 병렬로 실행되며 저장소를 공유하므로 사용자 이름은 테스트마다 달라야 합니다.

use std::sync::{Arc, Once};
use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::{Value, json};

use crate::batch::JobLauncher;
use crate::batch::core::{RepeatStatus, StepExecution, Tasklet, TaskletStep};
use crate::batch::job::Job;
use crate::batch::jobs::{daily_report, user_migration};
use crate::caching::{CacheStore, InMemoryCacheStore};
use crate::config::{AuthProvider, OAuthRegistration};
use crate::core::registry::ServiceLocator;
use crate::domain::dto::users::request::CreateUserRequest;
use crate::domain::entities::users::user::User;
use crate::errors::errors::AppResult;
use crate::kakao::client::FakeKakaoGateway;
use crate::mail::mailer::RecordingMailTransport;
use crate::messaging::producer::MessageProducer;
use crate::repositories::messages::InMemoryKakaoLogStore;
use crate::repositories::users::{InMemoryUserStore, UserStore};
use crate::services::auth::token_service::install_for_tests;
use crate::services::auth::{OAuth2Service, SessionService};
use crate::services::notifications::{EmailService, KakaoService};
use crate::services::users::UserService;

/// 실행에 시간이 걸려 동시 실행 충돌을 재현할 수 있는 잡
pub(crate) const SLOW_JOB: &str = "slowTestJob";

/// 고정 응답을 돌려주는 GitHub 계정 ID
pub(crate) const GITHUB_USER_ID: u64 = 7_000_001;

pub(crate) const SUCCESS_REDIRECT: &str = "http://localhost:3000/auth/callback";

static INSTALL: Once = Once::new();

struct SlowTasklet;

#[async_trait]
impl Tasklet for SlowTasklet {
    async fn execute(&self, _contribution: &mut StepExecution) -> AppResult<RepeatStatus> {
        actix_web::rt::time::sleep(Duration::from_millis(100)).await;
        Ok(RepeatStatus::Finished)
    }
}

struct StaticGitHub;

#[async_trait]
impl crate::services::auth::oauth2_service::OAuthProviderClient for StaticGitHub {
    async fn exchange_code(&self, _registration: &OAuthRegistration, _code: &str) -> AppResult<String> {
        Ok("github-access-token".to_string())
    }

    async fn fetch_user_attributes(
        &self,
        _registration: &OAuthRegistration,
        _access_token: &str,
    ) -> AppResult<Value> {
        Ok(json!({"id": GITHUB_USER_ID, "login": "octo", "name": "Octo"}))
    }
}

fn github_registration() -> OAuthRegistration {
    OAuthRegistration {
        provider: AuthProvider::GitHub,
        client_id: "test-client".to_string(),
        client_secret: "test-secret".to_string(),
        redirect_uri: "http://localhost:8080/api/auth/oauth2/github/callback".to_string(),
        authorization_uri: "https://github.com/login/oauth/authorize".to_string(),
        token_uri: "https://github.com/login/oauth/access_token".to_string(),
        user_info_uri: "https://api.github.com/user".to_string(),
        scopes: vec!["read:user".to_string()],
        user_name_attribute: "id".to_string(),
    }
}

/// 모든 HTTP 경로가 쓰는 서비스를 등록합니다. 여러 번 호출해도 한 번만 등록됩니다.
pub(crate) fn install_services() {
    INSTALL.call_once(|| {
        let token_service = install_for_tests();

        let store: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
        let users = Arc::new(UserService::new(store));
        let cache: Arc<dyn CacheStore> = Arc::new(InMemoryCacheStore::new());
        let producer = Arc::new(MessageProducer::new(None));

        ServiceLocator::set(users.clone());
        ServiceLocator::set(Arc::new(SessionService::new(cache.clone(), 1800)));
        ServiceLocator::set(Arc::new(
            OAuth2Service::new(cache, Arc::new(StaticGitHub), users, token_service)
                .with_registration(github_registration()),
        ));
        ServiceLocator::set(producer.clone());
        ServiceLocator::set(Arc::new(EmailService::new(
            Arc::new(RecordingMailTransport::default()),
            producer.clone(),
        )));
        ServiceLocator::set(Arc::new(KakaoService::new(
            Arc::new(FakeKakaoGateway::default()),
            Arc::new(InMemoryKakaoLogStore::new()),
            producer,
            "PF_TEST".to_string(),
            None,
        )));
        // 배치 잡은 HTTP 테스트가 만든 사용자를 건드리지 않도록 별도 저장소를 씁니다.
        let batch_store: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
        ServiceLocator::set(Arc::new(
            JobLauncher::new()
                .register(user_migration::build(batch_store.clone(), 10))
                .register(daily_report::build(batch_store))
                .register(Job::new(SLOW_JOB).step(TaskletStep::new("slowStep", Arc::new(SlowTasklet)))),
        ));
    });
}

/// 주어진 역할을 가진 사용자의 `Authorization` 헤더 값
pub(crate) fn bearer_for(roles: &[&str]) -> String {
    let mut user = User::new_local(
        "tester".to_string(),
        "tester@example.com".to_string(),
        "hash".to_string(),
        None,
        None,
    );
    user.id = Some(ObjectId::new());
    user.roles = roles.iter().map(|r| r.to_string()).collect();

    let token = install_for_tests().generate_token(&user).unwrap();
    format!("Bearer {}", token)
}

/// 비밀번호 `password1`로 로컬 사용자를 가입시킵니다.
pub(crate) async fn register_user(username: &str) -> User {
    install_services();

    UserService::instance()
        .create(CreateUserRequest {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: "password1".to_string(),
            phone: None,
            name: None,
        })
        .await
        .unwrap()
}
