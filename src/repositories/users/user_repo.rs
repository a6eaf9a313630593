//! # 사용자 리포지토리 구현
//!
//! 사용자 엔티티의 데이터 액세스 계층입니다.
//! MongoDB를 주 저장소로 사용하고 Redis 캐시로 단건 조회를 가속합니다.
//!
//! ## 캐싱 전략
//!
//! | 키 | TTL | 무효화 시점 |
//! |----|-----|-------------|
//! | `user:id:{id}` | `USER_CACHE_TTL_SECONDS` (600초) | update, delete |
//! | `user:email:{email}` | 동일 | update(이전/새 이메일 모두), delete |
//!
//! 캐시 오류는 조회를 실패시키지 않습니다. 로그만 남기고 MongoDB 결과를 사용합니다.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, IndexModel,
    bson::{Document, doc, oid::ObjectId},
    error::{ErrorKind, WriteFailure},
    options::{IndexOptions, ReturnDocument},
};

use crate::caching::redis::RedisClient;
use crate::caching::store::CacheStore;
use crate::config::{AuthProvider, RedisConfig};
use crate::core::registry::{Component, ComponentKind, ServiceLocator};
use crate::db::Database;
use crate::domain::entities::users::user::{User, UserStatus};
use crate::errors::errors::{AppError, AppResult};
use crate::register_component;

pub const USER_COLLECTION: &str = "users";

/// 사용자 저장소 계약
///
/// 서비스와 배치 작업은 이 trait에만 의존합니다.
/// 운영에서는 [`UserRepository`], 테스트에서는
/// [`InMemoryUserStore`](crate::repositories::users::memory::InMemoryUserStore)를 사용합니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// ObjectId 형식이 아니면 `ValidationError`
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_by_provider_and_provider_id(
        &self,
        provider: &AuthProvider,
        provider_id: &str,
    ) -> AppResult<Option<User>>;

    async fn find_all(&self) -> AppResult<Vec<User>>;

    async fn find_by_status(&self, status: UserStatus) -> AppResult<Vec<User>>;

    /// 새 사용자를 저장하고 ID가 할당된 엔티티를 반환합니다.
    /// username/email 유니크 제약 위반은 `ConflictError`입니다.
    async fn insert(&self, user: User) -> AppResult<User>;

    /// ID 기준으로 문서 전체를 교체합니다. 없으면 `NotFound`.
    async fn update(&self, user: &User) -> AppResult<User>;

    async fn delete(&self, id: &str) -> AppResult<bool>;

    async fn count(&self) -> AppResult<u64>;

    async fn count_by_status(&self, status: UserStatus) -> AppResult<u64>;
}

pub fn parse_object_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::ValidationError(format!("Invalid user id: {}", id)))
}

fn id_cache_key(id: &str) -> String {
    format!("user:id:{}", id)
}

fn email_cache_key(email: &str) -> String {
    format!("user:email:{}", email)
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        _ => false,
    }
}

/// 사용자 데이터 액세스 리포지토리 (MongoDB + Redis)
pub struct UserRepository {
    db: Arc<Database>,
    cache: Arc<dyn CacheStore>,
    cache_ttl_seconds: u64,
}

impl Component for UserRepository {
    fn build() -> AppResult<Self> {
        let db = ServiceLocator::require::<Database>()?;
        let redis: Arc<dyn CacheStore> = ServiceLocator::require::<RedisClient>()?;

        Ok(Self::new(db, redis))
    }
}

register_component!(UserRepository, "user_repository", ComponentKind::Repository);

impl UserRepository {
    pub fn new(db: Arc<Database>, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            db,
            cache,
            cache_ttl_seconds: RedisConfig::user_cache_ttl_seconds(),
        }
    }

    fn collection(&self) -> Collection<User> {
        self.db.collection::<User>(USER_COLLECTION)
    }

    async fn find_one(&self, filter: Document) -> AppResult<Option<User>> {
        Ok(self.collection().find_one(filter).await?)
    }

    async fn find_many(&self, filter: Document) -> AppResult<Vec<User>> {
        let cursor = self
            .collection()
            .find(filter)
            .sort(doc! { "created_at": 1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn cache_user(&self, key: &str, user: &User) {
        if let Err(e) = self.cache.set_with_expiry(key, user, self.cache_ttl_seconds).await {
            log::warn!("사용자 캐시 저장 실패 ({}): {}", key, e);
        }
    }

    async fn cached_user(&self, key: &str) -> Option<User> {
        match self.cache.get::<User>(key).await {
            Ok(user) => user,
            Err(e) => {
                log::warn!("사용자 캐시 조회 실패 ({}): {}", key, e);
                None
            }
        }
    }

    async fn evict(&self, user: &User) {
        let mut keys = Vec::with_capacity(2);
        if let Some(id) = user.id_string() {
            keys.push(id_cache_key(&id));
        }
        if let Some(email) = &user.email {
            keys.push(email_cache_key(email));
        }

        for key in keys {
            if let Err(e) = self.cache.del(&key).await {
                log::warn!("사용자 캐시 무효화 실패 ({}): {}", key, e);
            }
        }
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// | 이름 | 키 | 속성 |
    /// |------|----|------|
    /// | `username_unique` | `username` | unique |
    /// | `email_unique` | `email` | unique, 문자열인 문서만 |
    /// | `provider_provider_id` | `provider`, `provider_id` | unique, `provider_id`가 문자열인 문서만 |
    ///
    /// 이메일이 없는 OAuth2 사용자가 여러 명일 수 있으므로 부분 인덱스를 사용합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("username_unique".to_string())
                .build())
            .build();

        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .partial_filter_expression(doc! { "email": { "$type": "string" } })
                .build())
            .build();

        let provider_index = IndexModel::builder()
            .keys(doc! { "provider": 1, "provider_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("provider_provider_id".to_string())
                .partial_filter_expression(doc! { "provider_id": { "$type": "string" } })
                .build())
            .build();

        self.collection()
            .create_indexes([username_index, email_index, provider_index])
            .await?;

        log::info!("✅ users 컬렉션 인덱스 생성 완료");
        Ok(())
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let object_id = parse_object_id(id)?;
        let cache_key = id_cache_key(id);

        if let Some(cached) = self.cached_user(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.find_one(doc! { "_id": object_id }).await?;

        if let Some(ref user) = user {
            self.cache_user(&cache_key, user).await;
        }

        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.find_one(doc! { "username": username }).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let cache_key = email_cache_key(email);

        if let Some(cached) = self.cached_user(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.find_one(doc! { "email": email }).await?;

        if let Some(ref user) = user {
            self.cache_user(&cache_key, user).await;
        }

        Ok(user)
    }

    async fn find_by_provider_and_provider_id(
        &self,
        provider: &AuthProvider,
        provider_id: &str,
    ) -> AppResult<Option<User>> {
        self.find_one(doc! { "provider": provider.as_str(), "provider_id": provider_id })
            .await
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        self.find_many(doc! {}).await
    }

    async fn find_by_status(&self, status: UserStatus) -> AppResult<Vec<User>> {
        self.find_many(doc! { "status": status.as_str() }).await
    }

    async fn insert(&self, mut user: User) -> AppResult<User> {
        let result = self.collection().insert_one(&user).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::ConflictError(format!("User already exists: {}", user.username))
            } else {
                AppError::from(e)
            }
        })?;

        let id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::DatabaseError("inserted_id is not an ObjectId".to_string())
        })?;
        user.id = Some(id);

        Ok(user)
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let object_id = user
            .id
            .ok_or_else(|| AppError::ValidationError("User id is required for update".to_string()))?;

        let previous = self
            .collection()
            .find_one_and_replace(doc! { "_id": object_id }, user)
            .return_document(ReturnDocument::Before)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError(format!("Duplicate value for user: {}", user.username))
                } else {
                    AppError::from(e)
                }
            })?
            .ok_or_else(|| {
                AppError::NotFound(format!("User not found with id: {}", object_id.to_hex()))
            })?;

        self.evict(&previous).await;
        self.evict(user).await;

        Ok(user.clone())
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let object_id = parse_object_id(id)?;

        let deleted = self
            .collection()
            .find_one_and_delete(doc! { "_id": object_id })
            .await?;

        match deleted {
            Some(user) => {
                self.evict(&user).await;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.collection().count_documents(doc! {}).await?)
    }

    async fn count_by_status(&self, status: UserStatus) -> AppResult<u64> {
        Ok(self
            .collection()
            .count_documents(doc! { "status": status.as_str() })
            .await?)
    }
}
