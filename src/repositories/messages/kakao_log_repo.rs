//! 카카오 메시지 발송 이력 리포지토리 (`kakao_messages`)

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{Collection, bson::doc, bson::oid::ObjectId};

use crate::core::registry::{Component, ComponentKind, ServiceLocator};
use crate::db::Database;
use crate::domain::entities::messages::kakao_message_log::KakaoMessageLog;
use crate::errors::errors::{AppError, AppResult};
use crate::register_component;

pub const KAKAO_MESSAGE_COLLECTION: &str = "kakao_messages";

#[async_trait]
pub trait KakaoLogStore: Send + Sync {
    async fn save(&self, log: KakaoMessageLog) -> AppResult<KakaoMessageLog>;

    /// 최신 발송 이력부터 반환합니다.
    async fn find_by_recipient(&self, recipient: &str) -> AppResult<Vec<KakaoMessageLog>>;
}

pub struct KakaoMessageRepository {
    db: Arc<Database>,
}

impl Component for KakaoMessageRepository {
    fn build() -> AppResult<Self> {
        Ok(Self::new(ServiceLocator::require::<Database>()?))
    }
}

register_component!(KakaoMessageRepository, "kakao_message_repository", ComponentKind::Repository);

impl KakaoMessageRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<KakaoMessageLog> {
        self.db.collection::<KakaoMessageLog>(KAKAO_MESSAGE_COLLECTION)
    }
}

#[async_trait]
impl KakaoLogStore for KakaoMessageRepository {
    async fn save(&self, mut log: KakaoMessageLog) -> AppResult<KakaoMessageLog> {
        let result = self.collection().insert_one(&log).await?;
        log.id = result.inserted_id.as_object_id();
        Ok(log)
    }

    async fn find_by_recipient(&self, recipient: &str) -> AppResult<Vec<KakaoMessageLog>> {
        let cursor = self
            .collection()
            .find(doc! { "recipient_phone": recipient })
            .sort(doc! { "created_at": -1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }
}

/// 테스트용 메모리 저장소
#[derive(Default)]
pub struct InMemoryKakaoLogStore {
    logs: RwLock<Vec<KakaoMessageLog>>,
}

impl InMemoryKakaoLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<KakaoMessageLog> {
        self.logs.read().map(|logs| logs.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl KakaoLogStore for InMemoryKakaoLogStore {
    async fn save(&self, mut log: KakaoMessageLog) -> AppResult<KakaoMessageLog> {
        log.id = Some(ObjectId::new());
        self.logs
            .write()
            .map_err(|_| AppError::InternalError("log store lock poisoned".to_string()))?
            .push(log.clone());
        Ok(log)
    }

    async fn find_by_recipient(&self, recipient: &str) -> AppResult<Vec<KakaoMessageLog>> {
        let logs = self
            .logs
            .read()
            .map_err(|_| AppError::InternalError("log store lock poisoned".to_string()))?;

        // 같은 밀리초에 저장된 항목은 나중에 저장된 것이 앞에 옵니다.
        Ok(logs
            .iter()
            .rev()
            .filter(|log| log.recipient_phone == recipient)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::messages::kakao_message_log::{KakaoMessageType, SendStatus};

    #[actix_web::test]
    async fn test_find_by_recipient_newest_first() {
        let store = InMemoryKakaoLogStore::new();

        store
            .save(KakaoMessageLog::success(KakaoMessageType::Alimtalk, "01012345678", None, Some("r1".into())))
            .await
            .unwrap();
        store
            .save(KakaoMessageLog::failed(KakaoMessageType::Alimtalk, "01012345678", None, "boom".into()))
            .await
            .unwrap();
        store
            .save(KakaoMessageLog::success(KakaoMessageType::Alimtalk, "01099999999", None, None))
            .await
            .unwrap();

        let logs = store.find_by_recipient("01012345678").await.unwrap();

        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].status, SendStatus::Failed);
        assert_eq!(logs[1].request_id.as_deref(), Some("r1"));
    }
}
