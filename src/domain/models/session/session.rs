//! 서버 측 세션 모델 (`session:{id}`)
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// 하이픈 없는 UUID
    pub id: String,
    pub user_id: String,
    pub username: String,
    /// Unix epoch 밀리초
    pub created_at: i64,
    pub last_accessed_at: i64,
}
