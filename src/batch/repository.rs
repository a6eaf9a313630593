//! 메모리 기반 잡 실행 저장소
//!
//! 실행 ID는 1부터 단조 증가하며, 잡마다 모든 실행 기록을 보관합니다.
//! 프로세스가 재시작되면 기록은 사라집니다.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::batch::job::JobExecution;
use crate::errors::errors::{AppError, AppResult};

#[derive(Default)]
pub struct JobRepository {
    next_id: AtomicU64,
    executions: RwLock<HashMap<String, Vec<JobExecution>>>,
}

impl JobRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_execution(&self, job_name: &str) -> AppResult<JobExecution> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let execution = JobExecution::new(id, job_name);

        self.executions
            .write()
            .map_err(|_| AppError::InternalError("job repository lock poisoned".to_string()))?
            .entry(job_name.to_string())
            .or_default()
            .push(execution.clone());

        Ok(execution)
    }

    /// 같은 ID의 기록을 교체합니다.
    pub fn update(&self, execution: &JobExecution) -> AppResult<()> {
        let mut executions = self
            .executions
            .write()
            .map_err(|_| AppError::InternalError("job repository lock poisoned".to_string()))?;

        let stored = executions
            .get_mut(&execution.job_name)
            .and_then(|list| list.iter_mut().find(|stored| stored.id == execution.id))
            .ok_or_else(|| AppError::NotFound(format!("Job execution not found: {}", execution.id)))?;

        *stored = execution.clone();
        Ok(())
    }

    pub fn last_execution(&self, job_name: &str) -> Option<JobExecution> {
        self.executions
            .read()
            .ok()?
            .get(job_name)
            .and_then(|list| list.last().cloned())
    }

    pub fn executions(&self, job_name: &str) -> Vec<JobExecution> {
        self.executions
            .read()
            .ok()
            .and_then(|executions| executions.get(job_name).cloned())
            .unwrap_or_default()
    }
}
