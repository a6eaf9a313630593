//! 메모리 기반 `UserStore`
//!
//! MongoDB의 유니크 인덱스(username, email, provider+provider_id)와 같은 제약을 지킵니다.

use std::sync::RwLock;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::config::AuthProvider;
use crate::domain::entities::users::user::{User, UserStatus};
use crate::errors::errors::{AppError, AppResult};
use crate::repositories::users::user_repo::{UserStore, parse_object_id};

#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<std::sync::RwLockReadGuard<'_, Vec<User>>> {
        self.users
            .read()
            .map_err(|_| AppError::InternalError("user store lock poisoned".to_string()))
    }

    fn write(&self) -> AppResult<std::sync::RwLockWriteGuard<'_, Vec<User>>> {
        self.users
            .write()
            .map_err(|_| AppError::InternalError("user store lock poisoned".to_string()))
    }

    fn find<F>(&self, predicate: F) -> AppResult<Option<User>>
    where
        F: Fn(&User) -> bool,
    {
        Ok(self.read()?.iter().find(|u| predicate(u)).cloned())
    }

    fn conflicts(existing: &User, candidate: &User) -> bool {
        if existing.id == candidate.id && candidate.id.is_some() {
            return false;
        }
        existing.username == candidate.username
            || (candidate.email.is_some() && existing.email == candidate.email)
            || (candidate.provider_id.is_some()
                && existing.provider == candidate.provider
                && existing.provider_id == candidate.provider_id)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        let object_id = parse_object_id(id)?;
        self.find(|u| u.id == Some(object_id))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.find(|u| u.username == username)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.find(|u| u.email.as_deref() == Some(email))
    }

    async fn find_by_provider_and_provider_id(
        &self,
        provider: &AuthProvider,
        provider_id: &str,
    ) -> AppResult<Option<User>> {
        self.find(|u| &u.provider == provider && u.provider_id.as_deref() == Some(provider_id))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.read()?.clone())
    }

    async fn find_by_status(&self, status: UserStatus) -> AppResult<Vec<User>> {
        Ok(self.read()?.iter().filter(|u| u.status == status).cloned().collect())
    }

    async fn insert(&self, mut user: User) -> AppResult<User> {
        let mut users = self.write()?;

        if users.iter().any(|existing| Self::conflicts(existing, &user)) {
            return Err(AppError::ConflictError(format!("User already exists: {}", user.username)));
        }

        user.id = Some(ObjectId::new());
        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let mut users = self.write()?;

        if users.iter().any(|existing| Self::conflicts(existing, user)) {
            return Err(AppError::ConflictError(format!(
                "Duplicate value for user: {}",
                user.username
            )));
        }

        let slot = users
            .iter_mut()
            .find(|u| u.id.is_some() && u.id == user.id)
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "User not found with id: {}",
                    user.id_string().unwrap_or_default()
                ))
            })?;

        *slot = user.clone();
        Ok(user.clone())
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let object_id = parse_object_id(id)?;
        let mut users = self.write()?;
        let before = users.len();
        users.retain(|u| u.id != Some(object_id));
        Ok(users.len() != before)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.read()?.len() as u64)
    }

    async fn count_by_status(&self, status: UserStatus) -> AppResult<u64> {
        Ok(self.read()?.iter().filter(|u| u.status == status).count() as u64)
    }
}
