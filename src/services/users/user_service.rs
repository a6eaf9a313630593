//! # 사용자 관리 서비스 구현
//!
//! 사용자 계정의 전체 생명주기를 관리하는 핵심 비즈니스 로직입니다.
//! Spring의 `UserService` + `UserDetailsService` 역할을 함께 수행합니다.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       UserService                        │
//! │  등록 (bcrypt) · 조회 · 부분 수정 · 삭제 · 로그인 검증     │
//! │  OAuth2 사용자 조회/생성 · 상태별 집계                     │
//! └──────────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  dyn UserStore  (UserRepository: MongoDB + Redis 캐시)    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 에러 규칙
//!
//! | 상황 | 에러 | HTTP |
//! |------|------|------|
//! | 없는 사용자 | `NotFound("User not found with id: …")` | 404 |
//! | 중복 username/email | `ConflictError("Username already exists: …")` | 409 |
//! | 알 수 없는 상태 값 | `ValidationError` | 400 |
//! | 로그인 실패 | `AuthenticationError` | 401 |

use std::sync::Arc;

use bcrypt::{hash, verify};

use crate::config::{AuthProvider, PasswordConfig};
use crate::core::registry::{Component, ComponentKind, ServiceLocator};
use crate::domain::dto::users::request::{CreateUserRequest, UpdateUserRequest};
use crate::domain::entities::users::user::{User, UserStatus};
use crate::errors::errors::{AppError, AppResult};
use crate::register_component;
use crate::repositories::users::{UserRepository, UserStore};
use crate::utils::string_utils::clean_optional_string;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// 사용자 관리 비즈니스 로직 서비스
///
/// 저장소는 [`UserStore`] trait 객체로 주입됩니다.
/// 레지스트리에서 생성될 때는 [`UserRepository`]가 사용됩니다.
///
/// ```rust,ignore
/// let user_service = UserService::instance();
/// let user = user_service.find_by_username("kim").await?;
/// ```
pub struct UserService {
    store: Arc<dyn UserStore>,
    bcrypt_cost: u32,
}

impl Component for UserService {
    fn build() -> AppResult<Self> {
        let repository = ServiceLocator::resolve::<UserRepository>()?;
        Ok(Self::new(repository))
    }
}

register_component!(UserService, "user_service", ComponentKind::Service);

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            bcrypt_cost: PasswordConfig::bcrypt_cost(),
        }
    }

    pub fn store(&self) -> Arc<dyn UserStore> {
        self.store.clone()
    }

    /// ID로 사용자 조회
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 잘못된 ObjectId 형식
    /// * `AppError::NotFound` - 해당 ID의 사용자가 없음
    pub async fn find_by_id(&self, id: &str) -> AppResult<User> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User not found with id: {}", id)))
    }

    pub async fn find_by_username(&self, username: &str) -> AppResult<User> {
        self.store
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User not found with username: {}", username)))
    }

    pub async fn find_all(&self) -> AppResult<Vec<User>> {
        self.store.find_all().await
    }

    /// 새 로컬 사용자 계정 생성
    ///
    /// 중복 검사 후 비밀번호를 bcrypt로 해싱하여 저장합니다.
    /// 검사와 저장 사이에 끼어든 중복은 유니크 인덱스가 `ConflictError`로 막습니다.
    ///
    /// # Arguments
    ///
    /// * `request` - 검증을 마친 회원가입 요청
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - ID가 할당된 사용자 (`ACTIVE`, 역할 `user`)
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 사용자명 또는 이메일 중복
    /// * `AppError::InternalError` - 비밀번호 해싱 실패
    pub async fn create(&self, request: CreateUserRequest) -> AppResult<User> {
        let start_time = std::time::Instant::now();

        let username = request.username.trim().to_string();
        let email = request.email.trim().to_string();

        if self.store.find_by_username(&username).await?.is_some() {
            return Err(AppError::ConflictError(format!("Username already exists: {}", username)));
        }

        if self.store.find_by_email(&email).await?.is_some() {
            return Err(AppError::ConflictError(format!("Email already exists: {}", email)));
        }

        let hash_start = std::time::Instant::now();
        let password_hash = hash(&request.password, self.bcrypt_cost)
            .map_err(|e| AppError::InternalError(format!("비밀번호 해싱 실패: {}", e)))?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        let user = User::new_local(
            username,
            email,
            password_hash,
            clean_optional_string(request.phone),
            clean_optional_string(request.name),
        );

        let created = self.store.insert(user).await?;

        log::info!(
            "✅ 사용자 생성: {} ({:?})",
            created.username,
            start_time.elapsed()
        );

        Ok(created)
    }

    /// 사용자 정보 부분 수정
    ///
    /// 요청에 값이 있는 필드만 바뀌고 `updated_at`이 갱신됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 사용자가 없음
    /// * `AppError::ValidationError` - 알 수 없는 상태 값
    /// * `AppError::ConflictError` - 다른 사용자가 이미 쓰는 이메일
    pub async fn update(&self, id: &str, request: UpdateUserRequest) -> AppResult<User> {
        let mut user = self.find_by_id(id).await?;

        if let Some(status) = request.status.as_deref() {
            user.status = status.parse::<UserStatus>().map_err(AppError::ValidationError)?;
        }

        if let Some(email) = request.email {
            let email = email.trim().to_string();
            if user.email.as_deref() != Some(email.as_str()) {
                if let Some(owner) = self.store.find_by_email(&email).await? {
                    if owner.id != user.id {
                        return Err(AppError::ConflictError(format!("Email already exists: {}", email)));
                    }
                }
            }
            user.email = Some(email);
        }

        if let Some(phone) = request.phone {
            user.phone = Some(phone);
        }

        if let Some(name) = request.name {
            user.name = Some(name);
        }

        user.touch();

        let updated = self.store.update(&user).await?;
        log::info!("✏️ 사용자 수정: {}", updated.username);

        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.store.delete(id).await? {
            return Err(AppError::NotFound(format!("User not found with id: {}", id)));
        }

        log::info!("🗑️ 사용자 삭제: {}", id);
        Ok(())
    }

    /// 로그인 자격 증명 검증
    ///
    /// 비밀번호가 있는 로컬 계정이면서 `ACTIVE` 상태인 사용자만 통과합니다.
    /// 실패 사유와 관계없이 같은 메시지를 돌려줍니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 사용자 없음, OAuth2 계정, 비활성 계정, 비밀번호 불일치
    pub async fn verify_credentials(&self, username: &str, password: &str) -> AppResult<User> {
        let user = match self.store.find_by_username(username.trim()).await? {
            Some(user) => user,
            None => {
                log::warn!("🔒 로그인 실패 (사용자 없음): {}", username);
                return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
            }
        };

        let password_hash = match user.password_hash.as_deref() {
            Some(password_hash) if user.can_authenticate_with_password() => password_hash,
            _ => {
                log::warn!("🔒 로그인 실패 ({} 계정): {}", user.provider.as_str(), username);
                return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
            }
        };

        if !user.is_active() {
            log::warn!("🔒 로그인 실패 ({} 상태): {}", user.status.as_str(), username);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        let matches = verify(password, password_hash)
            .map_err(|e| AppError::InternalError(format!("비밀번호 검증 실패: {}", e)))?;

        if !matches {
            log::warn!("🔒 로그인 실패 (비밀번호 불일치): {}", username);
            return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
        }

        Ok(user)
    }

    /// OAuth2 로그인 사용자 조회 또는 생성
    ///
    /// (provider, provider_id)로 찾고, 없으면 `{provider}_{providerId}` 사용자명으로
    /// 비밀번호 없는 `ACTIVE` 계정을 만듭니다.
    /// 이메일이 이미 다른 계정에 쓰이고 있으면 이메일 없이 생성합니다.
    pub async fn find_or_create_oauth2_user(
        &self,
        provider: &AuthProvider,
        provider_id: &str,
        email: Option<String>,
        name: Option<String>,
    ) -> AppResult<User> {
        if let Some(existing) = self
            .store
            .find_by_provider_and_provider_id(provider, provider_id)
            .await?
        {
            log::debug!("OAuth2 사용자 재방문: {}", existing.username);
            return Ok(existing);
        }

        let mut email = clean_optional_string(email);
        if let Some(address) = email.as_deref() {
            if self.store.find_by_email(address).await?.is_some() {
                log::warn!(
                    "⚠️ OAuth2 이메일 {}이(가) 이미 사용 중입니다. 이메일 없이 {} 계정을 생성합니다",
                    address,
                    provider.as_str()
                );
                email = None;
            }
        }

        let user = User::new_oauth(
            provider.clone(),
            provider_id.to_string(),
            email,
            clean_optional_string(name),
        );

        let created = self.store.insert(user).await?;
        log::info!("✅ OAuth2 사용자 생성: {}", created.username);

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::users::InMemoryUserStore;

    fn service() -> UserService {
        UserService {
            store: Arc::new(InMemoryUserStore::new()),
            bcrypt_cost: 4,
        }
    }

    fn register_request(username: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: "password123".to_string(),
            phone: Some("010-1234-5678".to_string()),
            name: Some("김철수".to_string()),
        }
    }

    #[actix_web::test]
    async fn test_create_hashes_password_and_rejects_duplicates() {
        let service = service();

        let user = service.create(register_request("kim", "kim@example.com")).await.unwrap();
        assert!(user.id.is_some());
        assert_ne!(user.password_hash.as_deref(), Some("password123"));
        assert_eq!(user.status, UserStatus::Active);

        match service.create(register_request("kim", "other@example.com")).await {
            Err(AppError::ConflictError(msg)) => assert_eq!(msg, "Username already exists: kim"),
            _ => panic!("expected username conflict"),
        }

        match service.create(register_request("lee", "kim@example.com")).await {
            Err(AppError::ConflictError(msg)) => assert_eq!(msg, "Email already exists: kim@example.com"),
            _ => panic!("expected email conflict"),
        }
    }

    #[actix_web::test]
    async fn test_find_missing_user_messages() {
        let service = service();

        match service.find_by_username("ghost").await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "User not found with username: ghost"),
            _ => panic!("expected not found"),
        }

        let id = mongodb::bson::oid::ObjectId::new().to_hex();
        match service.find_by_id(&id).await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, format!("User not found with id: {}", id)),
            _ => panic!("expected not found"),
        }

        assert!(matches!(
            service.find_by_id("not-an-id").await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[actix_web::test]
    async fn test_partial_update() {
        let service = service();
        let user = service.create(register_request("kim", "kim@example.com")).await.unwrap();
        let id = user.id_string().unwrap();

        let updated = service
            .update(
                &id,
                UpdateUserRequest {
                    name: Some("김영희".to_string()),
                    status: Some("suspended".to_string()),
                    ..UpdateUserRequest::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name.as_deref(), Some("김영희"));
        assert_eq!(updated.status, UserStatus::Suspended);
        assert_eq!(updated.email.as_deref(), Some("kim@example.com"));
        assert_eq!(updated.phone.as_deref(), Some("010-1234-5678"));

        let invalid = service
            .update(
                &id,
                UpdateUserRequest {
                    status: Some("DELETED".to_string()),
                    ..UpdateUserRequest::default()
                },
            )
            .await;
        assert!(matches!(invalid, Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn test_delete_missing_user_is_not_found() {
        let service = service();
        let user = service.create(register_request("kim", "kim@example.com")).await.unwrap();
        let id = user.id_string().unwrap();

        service.delete(&id).await.unwrap();
        assert!(matches!(service.delete(&id).await, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_verify_credentials() {
        let service = service();
        let user = service.create(register_request("kim", "kim@example.com")).await.unwrap();

        let verified = service.verify_credentials("kim", "password123").await.unwrap();
        assert_eq!(verified.id, user.id);

        assert!(matches!(
            service.verify_credentials("kim", "wrong-password").await,
            Err(AppError::AuthenticationError(_))
        ));
        assert!(matches!(
            service.verify_credentials("nobody", "password123").await,
            Err(AppError::AuthenticationError(_))
        ));

        service
            .update(
                &user.id_string().unwrap(),
                UpdateUserRequest {
                    status: Some("INACTIVE".to_string()),
                    ..UpdateUserRequest::default()
                },
            )
            .await
            .unwrap();

        assert!(matches!(
            service.verify_credentials("kim", "password123").await,
            Err(AppError::AuthenticationError(_))
        ));
    }

    #[actix_web::test]
    async fn test_oauth2_user_is_created_once() {
        let service = service();

        let first = service
            .find_or_create_oauth2_user(
                &AuthProvider::GitHub,
                "583231",
                Some("octo@example.com".to_string()),
                Some("Octocat".to_string()),
            )
            .await
            .unwrap();
        assert_eq!(first.username, "github_583231");
        assert!(first.password_hash.is_none());

        let second = service
            .find_or_create_oauth2_user(&AuthProvider::GitHub, "583231", None, None)
            .await
            .unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(service.store().count().await.unwrap(), 1);

        assert!(matches!(
            service.verify_credentials("github_583231", "anything").await,
            Err(AppError::AuthenticationError(_))
        ));
    }

    #[actix_web::test]
    async fn test_oauth2_user_with_taken_email_is_created_without_email() {
        let service = service();
        service.create(register_request("kim", "kim@example.com")).await.unwrap();

        let user = service
            .find_or_create_oauth2_user(
                &AuthProvider::Google,
                "1029",
                Some("kim@example.com".to_string()),
                None,
            )
            .await
            .unwrap();

        assert_eq!(user.username, "google_1029");
        assert!(user.email.is_none());
        assert_eq!(service.store().count_by_status(UserStatus::Active).await.unwrap(), 2);
    }
}
