//! Redis 클라이언트
//!
//! 사용자 조회 캐시, 서버 측 세션, OAuth2 `state` 저장에 사용됩니다.
//! 값은 JSON 문자열로 직렬화되어 [`CacheStore`] 계약을 통해 저장됩니다.
//!
//! `ConnectionManager`는 내부적으로 멀티플렉싱된 연결 하나를 공유하며
//! 연결이 끊기면 자동으로 재연결합니다. 복제 비용이 작아 요청마다 clone하여 사용합니다.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use crate::caching::store::CacheStore;
use crate::config::RedisConfig;
use crate::errors::errors::AppResult;

#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
}

impl RedisClient {
    pub async fn new() -> Result<Self, redis::RedisError> {
        Self::connect(&RedisConfig::url()).await
    }

    pub async fn connect(redis_url: &str) -> Result<Self, redis::RedisError> {
        let client = Client::open(redis_url)?;
        let mut manager = ConnectionManager::new(client).await?;

        redis::cmd("PING").query_async::<()>(&mut manager).await?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { manager })
    }
}

#[async_trait]
impl CacheStore for RedisClient {
    async fn get_raw(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.manager.clone();
        Ok(conn.get(key).await?)
    }

    async fn set_raw(&self, key: &str, value: String, ttl_seconds: u64) -> AppResult<()> {
        let mut conn = self.manager.clone();
        conn.set_ex::<_, _, ()>(key, value, ttl_seconds.max(1)).await?;
        Ok(())
    }

    async fn take_raw(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.manager.clone();
        let value: Option<String> = redis::cmd("GETDEL").arg(key).query_async(&mut conn).await?;
        Ok(value)
    }

    async fn del(&self, key: &str) -> AppResult<()> {
        let mut conn = self.manager.clone();
        conn.del::<_, ()>(key).await?;
        Ok(())
    }
}
