//! User Entity Implementation
//!
//! 로컬 계정(아이디/비밀번호)과 OAuth2 계정(google, github, kakao)을 함께 표현하는
//! 사용자 엔티티입니다. `users` 컬렉션의 문서와 1:1로 매핑됩니다.

use std::str::FromStr;

use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;

/// 사용자 계정 상태
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ACTIVE" => Ok(UserStatus::Active),
            "INACTIVE" => Ok(UserStatus::Inactive),
            "SUSPENDED" => Ok(UserStatus::Suspended),
            _ => Err(format!("Unknown user status: {}", s)),
        }
    }
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "ACTIVE",
            UserStatus::Inactive => "INACTIVE",
            UserStatus::Suspended => "SUSPENDED",
        }
    }

    pub fn all() -> [UserStatus; 3] {
        [UserStatus::Active, UserStatus::Inactive, UserStatus::Suspended]
    }
}

fn default_roles() -> Vec<String> {
    vec!["user".to_string()]
}

/// 사용자 엔티티
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 로그인 아이디 (unique). OAuth2 사용자는 `{provider}_{providerId}`
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// bcrypt 해시 (OAuth2 사용자는 None)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub provider: AuthProvider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default = "default_roles")]
    pub roles: Vec<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    pub fn new_local(
        username: String,
        email: String,
        password_hash: String,
        phone: Option<String>,
        name: Option<String>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            username,
            email: Some(email),
            phone,
            password_hash: Some(password_hash),
            name,
            provider: AuthProvider::Local,
            provider_id: None,
            status: UserStatus::Active,
            roles: default_roles(),
            created_at: now,
            updated_at: now,
        }
    }

    /// OAuth2 로그인으로 처음 들어온 사용자
    pub fn new_oauth(
        provider: AuthProvider,
        provider_id: String,
        email: Option<String>,
        name: Option<String>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            username: Self::oauth_username(&provider, &provider_id),
            email,
            phone: None,
            password_hash: None,
            name,
            provider,
            provider_id: Some(provider_id),
            status: UserStatus::Active,
            roles: default_roles(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn oauth_username(provider: &AuthProvider, provider_id: &str) -> String {
        format!("{}_{}", provider.as_str(), provider_id)
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    pub fn can_authenticate_with_password(&self) -> bool {
        !self.provider.is_oauth() && self.password_hash.is_some()
    }

    pub fn touch(&mut self) {
        self.updated_at = DateTime::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_oauth_user_username() {
        let user = User::new_oauth(
            AuthProvider::Kakao,
            "123456".to_string(),
            None,
            Some("춘식이".to_string()),
        );

        assert_eq!(user.username, "kakao_123456");
        assert_eq!(user.status, UserStatus::Active);
        assert!(!user.can_authenticate_with_password());
    }

    #[test]
    fn test_new_local_user() {
        let user = User::new_local(
            "kim".to_string(),
            "kim@example.com".to_string(),
            "$2b$04$hash".to_string(),
            None,
            None,
        );

        assert!(user.can_authenticate_with_password());
        assert_eq!(user.roles, vec!["user".to_string()]);
        assert!(user.id_string().is_none());
    }

    #[test]
    fn test_user_status_parsing() {
        assert_eq!(UserStatus::from_str("active").unwrap(), UserStatus::Active);
        assert_eq!(UserStatus::from_str(" SUSPENDED ").unwrap(), UserStatus::Suspended);
        assert!(UserStatus::from_str("DELETED").is_err());
        assert_eq!("inactive".parse::<UserStatus>(), Ok(UserStatus::Inactive));
        assert_eq!(serde_json::to_string(&UserStatus::Inactive).unwrap(), "\"INACTIVE\"");
    }
}
