use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;
use crate::domain::entities::users::user::{User, UserStatus};

/// bson 시간을 RFC 3339 문자열로 변환합니다.
pub fn to_rfc3339(value: mongodb::bson::DateTime) -> String {
    DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis())
        .unwrap_or_default()
        .to_rfc3339()
}

/// 사용자 응답 DTO (비밀번호 해시 제외)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub name: Option<String>,
    pub provider: AuthProvider,
    pub status: UserStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            username,
            email,
            phone,
            name,
            provider,
            status,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            username,
            email,
            phone,
            name,
            provider,
            status,
            created_at: to_rfc3339(created_at),
            updated_at: to_rfc3339(updated_at),
        }
    }
}
