//! 서버 측 세션 서비스
//!
//! Spring Session(Redis)과 같은 방식으로 로그인 세션을 `session:{id}` 키에 보관합니다.
//! 세션에 접근할 때마다 `last_accessed_at`과 TTL이 갱신됩니다 (sliding expiry).

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::caching::redis::RedisClient;
use crate::caching::store::CacheStore;
use crate::config::SessionConfig;
use crate::core::registry::{Component, ComponentKind, ServiceLocator};
use crate::domain::models::session::Session;
use crate::errors::errors::AppResult;
use crate::register_component;

const SESSION_KEY_PREFIX: &str = "session:";

pub struct SessionService {
    cache: Arc<dyn CacheStore>,
    max_inactive_seconds: u64,
}

impl Component for SessionService {
    fn build() -> AppResult<Self> {
        let redis = ServiceLocator::require::<RedisClient>()?;
        Ok(Self::new(redis, SessionConfig::max_inactive_seconds()))
    }
}

register_component!(SessionService, "session_service", ComponentKind::Service);

impl SessionService {
    /// 비활성 허용 시간은 최소 1초입니다.
    pub fn new(cache: Arc<dyn CacheStore>, max_inactive_seconds: u64) -> Self {
        if max_inactive_seconds == 0 {
            log::warn!("⚠️ 세션 비활성 허용 시간이 0초입니다. 1초로 조정합니다");
        }

        Self {
            cache,
            max_inactive_seconds: max_inactive_seconds.max(1),
        }
    }

    fn key(session_id: &str) -> String {
        format!("{}{}", SESSION_KEY_PREFIX, session_id)
    }

    pub fn max_inactive_seconds(&self) -> u64 {
        self.max_inactive_seconds
    }

    /// 새 세션을 만들고 저장합니다.
    pub async fn create(&self, user_id: &str, username: &str) -> AppResult<Session> {
        let now = Utc::now().timestamp_millis();
        let session = Session {
            id: Uuid::new_v4().simple().to_string(),
            user_id: user_id.to_string(),
            username: username.to_string(),
            created_at: now,
            last_accessed_at: now,
        };

        self.cache
            .set_with_expiry(&Self::key(&session.id), &session, self.max_inactive_seconds)
            .await?;

        log::debug!("세션 생성: {} ({})", session.id, username);

        Ok(session)
    }

    /// 세션을 조회하고 만료 시간을 연장합니다. 만료되었거나 없으면 `None`.
    pub async fn get(&self, session_id: &str) -> AppResult<Option<Session>> {
        let key = Self::key(session_id);

        let Some(mut session) = self.cache.get::<Session>(&key).await? else {
            return Ok(None);
        };

        session.last_accessed_at = Utc::now().timestamp_millis();
        self.cache
            .set_with_expiry(&key, &session, self.max_inactive_seconds)
            .await?;

        Ok(Some(session))
    }

    pub async fn invalidate(&self, session_id: &str) -> AppResult<()> {
        self.cache.del(&Self::key(session_id)).await?;
        log::debug!("세션 무효화: {}", session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caching::InMemoryCacheStore;

    #[actix_web::test]
    async fn test_session_lifecycle() {
        let cache = Arc::new(InMemoryCacheStore::new());
        let service = SessionService::new(cache.clone(), 1800);

        let session = service.create("507f1f77bcf86cd799439011", "kim").await.unwrap();
        assert_eq!(session.id.len(), 32);
        assert!(!session.id.contains('-'));

        let loaded = service.get(&session.id).await.unwrap().unwrap();
        assert_eq!(loaded.username, "kim");
        assert!(loaded.last_accessed_at >= session.last_accessed_at);
        assert_eq!(loaded.created_at, session.created_at);

        service.invalidate(&session.id).await.unwrap();
        assert!(service.get(&session.id).await.unwrap().is_none());
        assert!(cache.is_empty());
    }

    #[actix_web::test]
    async fn test_zero_inactive_interval_is_clamped() {
        let service = SessionService::new(Arc::new(InMemoryCacheStore::new()), 0);
        assert_eq!(service.max_inactive_seconds(), 1);

        let session = service.create("id", "kim").await.unwrap();
        assert!(service.get(&session.id).await.unwrap().is_some());

        actix_web::rt::time::sleep(std::time::Duration::from_millis(1100)).await;
        assert!(service.get(&session.id).await.unwrap().is_none());
    }
}
