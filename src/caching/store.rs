//! 키-값 캐시 저장소 계약
//!
//! 운영 환경에서는 [`RedisClient`](crate::caching::redis::RedisClient)가,
//! 테스트에서는 [`InMemoryCacheStore`]가 이 trait을 구현합니다.
//! 구현체는 문자열만 다루고, JSON 변환은 `dyn CacheStore`의 헬퍼가 맡습니다.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::errors::errors::{AppError, AppResult};

#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get_raw(&self, key: &str) -> AppResult<Option<String>>;

    /// TTL은 최소 1초입니다 (Redis는 `EX 0`을 거부합니다).
    async fn set_raw(&self, key: &str, value: String, ttl_seconds: u64) -> AppResult<()>;

    /// 값을 읽으면서 삭제합니다 (일회용 값 소비).
    async fn take_raw(&self, key: &str) -> AppResult<Option<String>>;

    async fn del(&self, key: &str) -> AppResult<()>;
}

fn decode<T: DeserializeOwned>(raw: Option<String>) -> AppResult<Option<T>> {
    raw.map(|json| {
        serde_json::from_str(&json)
            .map_err(|e| AppError::RedisError(format!("JSON conversion failed: {}", e)))
    })
    .transpose()
}

impl dyn CacheStore {
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        decode(self.get_raw(key).await?)
    }

    pub async fn set_with_expiry<T: Serialize + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
    ) -> AppResult<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::RedisError(format!("JSON conversion failed: {}", e)))?;
        self.set_raw(key, json, ttl_seconds).await
    }

    pub async fn take<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        decode(self.take_raw(key).await?)
    }
}

/// 만료 시간을 지키는 메모리 저장소
#[derive(Default)]
pub struct InMemoryCacheStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .map(|entries| entries.values().filter(|(_, at)| *at > Instant::now()).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, HashMap<String, (String, Instant)>>> {
        self.entries
            .lock()
            .map_err(|_| AppError::InternalError("cache lock poisoned".to_string()))
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get_raw(&self, key: &str) -> AppResult<Option<String>> {
        let mut entries = self.lock()?;
        match entries.get(key) {
            Some((_, expires_at)) if *expires_at <= Instant::now() => {
                entries.remove(key);
                Ok(None)
            }
            Some((value, _)) => Ok(Some(value.clone())),
            None => Ok(None),
        }
    }

    async fn set_raw(&self, key: &str, value: String, ttl_seconds: u64) -> AppResult<()> {
        let expires_at = Instant::now() + Duration::from_secs(ttl_seconds.max(1));
        self.lock()?.insert(key.to_string(), (value, expires_at));
        Ok(())
    }

    async fn take_raw(&self, key: &str) -> AppResult<Option<String>> {
        let value = self.get_raw(key).await?;
        self.lock()?.remove(key);
        Ok(value)
    }

    async fn del(&self, key: &str) -> AppResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}
