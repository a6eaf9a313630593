//! `userMigrationJob`: 사용자 데이터 정리
//!
//! `ACTIVE` 사용자의 username 앞뒤 공백을 없애고 email을 소문자로 정규화합니다.
//! 다른 상태의 사용자는 그대로 통과합니다.

use std::sync::Arc;

use async_trait::async_trait;

use crate::batch::core::{ChunkStep, ItemProcessor, ItemReader, ItemWriter};
use crate::batch::job::Job;
use crate::batch::listener::JobCompletionListener;
use crate::domain::entities::users::user::{User, UserStatus};
use crate::errors::errors::AppResult;
use crate::repositories::users::UserStore;

pub const JOB_NAME: &str = "userMigrationJob";
pub const STEP_NAME: &str = "userMigrationStep";

/// 실행마다 전체 사용자를 한 번 읽어 순서대로 내보냅니다.
pub struct UserItemReader {
    store: Arc<dyn UserStore>,
    users: Option<std::vec::IntoIter<User>>,
}

impl UserItemReader {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store, users: None }
    }
}

#[async_trait]
impl ItemReader<User> for UserItemReader {
    async fn read(&mut self) -> AppResult<Option<User>> {
        if self.users.is_none() {
            let users = self.store.find_all().await?;
            log::info!("UserItemReader initialized with {} users", users.len());
            self.users = Some(users.into_iter());
        }

        Ok(self.users.as_mut().and_then(Iterator::next))
    }
}

pub struct UserItemProcessor;

#[async_trait]
impl ItemProcessor<User, User> for UserItemProcessor {
    async fn process(&self, mut user: User) -> AppResult<Option<User>> {
        log::debug!("Processing user: {}", user.username);

        if user.status != UserStatus::Active {
            return Ok(Some(user));
        }

        let username = user.username.trim().to_string();
        let email = user.email.as_ref().map(|email| email.trim().to_lowercase());

        if username != user.username || email != user.email {
            user.username = username;
            user.email = email;
            user.touch();
        }

        Ok(Some(user))
    }
}

/// 저장된 값과 달라진 사용자만 갱신합니다.
pub struct UserItemWriter {
    store: Arc<dyn UserStore>,
}

impl UserItemWriter {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ItemWriter<User> for UserItemWriter {
    async fn write(&self, chunk: Vec<User>) -> AppResult<()> {
        log::info!("Writing {} users", chunk.len());

        for user in chunk {
            let Some(id) = user.id_string() else {
                continue;
            };

            let stored = self.store.find_by_id(&id).await?;
            if stored.as_ref() != Some(&user) {
                log::debug!("Writing user: {}", user.username);
                self.store.update(&user).await?;
            }
        }

        Ok(())
    }
}

pub fn build(store: Arc<dyn UserStore>, chunk_size: usize) -> Job {
    let reader_store = store.clone();

    let step = ChunkStep::new(
        STEP_NAME,
        chunk_size,
        Box::new(move || Box::new(UserItemReader::new(reader_store.clone())) as Box<dyn ItemReader<User>>),
        Arc::new(UserItemProcessor),
        Arc::new(UserItemWriter::new(store)),
    );

    Job::new(JOB_NAME)
        .step(step)
        .listener(Arc::new(JobCompletionListener))
}
