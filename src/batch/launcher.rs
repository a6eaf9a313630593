//! 잡 실행기
//!
//! 잡을 이름으로 등록하고 동기적으로 실행합니다.
//! 같은 잡이 이미 실행 중이면 새 실행을 거부합니다 (`ConflictError`, 409).

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::batch::job::{Job, JobExecution};
use crate::batch::jobs::{daily_report, user_migration};
use crate::batch::repository::JobRepository;
use crate::config::BatchConfig;
use crate::core::registry::{Component, ComponentKind, ServiceLocator};
use crate::errors::errors::{AppError, AppResult};
use crate::register_component;
use crate::services::users::UserService;
use crate::utils::display_terminal::print_key_values;

#[derive(Default)]
pub struct JobLauncher {
    jobs: HashMap<String, Arc<Job>>,
    repository: JobRepository,
    running: Mutex<HashSet<String>>,
}

impl Component for JobLauncher {
    fn build() -> AppResult<Self> {
        let store = ServiceLocator::resolve::<UserService>()?.store();

        let launcher = Self::new()
            .register(user_migration::build(store.clone(), BatchConfig::chunk_size()))
            .register(daily_report::build(store));

        let entries: Vec<(&str, String)> = launcher
            .jobs
            .values()
            .map(|job| (job.name(), format!("{} step(s)", job.step_count())))
            .collect();
        print_key_values("📋 BATCH JOBS", &entries);

        Ok(launcher)
    }
}

register_component!(JobLauncher, "job_launcher", ComponentKind::Service);

/// 실행 중 표시를 해제합니다 (실패/패닉 포함).
struct RunningGuard<'a> {
    running: &'a Mutex<HashSet<String>>,
    job_name: String,
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut running) = self.running.lock() {
            running.remove(&self.job_name);
        }
    }
}

impl JobLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, job: Job) -> Self {
        self.jobs.insert(job.name().to_string(), Arc::new(job));
        self
    }

    pub fn job_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.jobs.keys().cloned().collect();
        names.sort();
        names
    }

    fn job(&self, job_name: &str) -> AppResult<Arc<Job>> {
        self.jobs
            .get(job_name)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Job not found: {}", job_name)))
    }

    fn mark_running(&self, job_name: &str) -> AppResult<RunningGuard<'_>> {
        let mut running = self
            .running
            .lock()
            .map_err(|_| AppError::InternalError("job launcher lock poisoned".to_string()))?;

        if !running.insert(job_name.to_string()) {
            return Err(AppError::ConflictError(format!("Job is already running: {}", job_name)));
        }

        Ok(RunningGuard {
            running: &self.running,
            job_name: job_name.to_string(),
        })
    }

    /// 잡을 실행하고 완료된 실행 기록을 반환합니다.
    ///
    /// 잡 안의 실패는 `FAILED` 상태의 실행 기록으로 반환되며 에러가 아닙니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 등록되지 않은 잡
    /// * `AppError::ConflictError` - 같은 잡이 실행 중
    pub async fn run(&self, job_name: &str) -> AppResult<JobExecution> {
        let job = self.job(job_name)?;
        let _guard = self.mark_running(job_name)?;

        let mut execution = self.repository.create_execution(job_name)?;
        log::info!("🚀 배치 잡 실행: {} (#{})", job_name, execution.id);

        job.execute(&mut execution).await;
        self.repository.update(&execution)?;

        Ok(execution)
    }

    /// 가장 최근 실행 기록
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 등록되지 않은 잡이거나 실행된 적이 없음
    pub fn last_execution(&self, job_name: &str) -> AppResult<JobExecution> {
        self.job(job_name)?;

        self.repository
            .last_execution(job_name)
            .ok_or_else(|| AppError::NotFound(format!("No execution found for job: {}", job_name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::core::{BatchStatus, RepeatStatus, StepExecution, Tasklet, TaskletStep};
    use crate::repositories::users::InMemoryUserStore;
    use async_trait::async_trait;

    fn launcher() -> JobLauncher {
        let store = Arc::new(InMemoryUserStore::new());
        JobLauncher::new()
            .register(user_migration::build(store.clone(), 10))
            .register(daily_report::build(store))
    }

    #[actix_web::test]
    async fn test_run_records_execution() {
        let launcher = launcher();

        assert_eq!(launcher.job_names(), vec!["dailyReportJob", "userMigrationJob"]);
        assert!(matches!(launcher.last_execution("dailyReportJob"), Err(AppError::NotFound(_))));

        let first = launcher.run("dailyReportJob").await.unwrap();
        let second = launcher.run("dailyReportJob").await.unwrap();

        assert_eq!(first.status, BatchStatus::Completed);
        assert!(second.id > first.id);
        assert_eq!(launcher.last_execution("dailyReportJob").unwrap().id, second.id);
    }

    #[test]
    fn test_default_launcher_has_no_jobs() {
        assert!(JobLauncher::default().job_names().is_empty());
    }

    #[actix_web::test]
    async fn test_unknown_job_is_not_found() {
        let launcher = launcher();

        assert!(matches!(launcher.run("noSuchJob").await, Err(AppError::NotFound(_))));
        assert!(matches!(launcher.last_execution("noSuchJob"), Err(AppError::NotFound(_))));
    }

    struct Slow;

    #[async_trait]
    impl Tasklet for Slow {
        async fn execute(&self, _contribution: &mut StepExecution) -> AppResult<RepeatStatus> {
            actix_web::rt::time::sleep(std::time::Duration::from_millis(50)).await;
            Ok(RepeatStatus::Finished)
        }
    }

    #[actix_web::test]
    async fn test_concurrent_run_is_conflict() {
        let launcher = JobLauncher::new().register(
            Job::new("slowJob").step(TaskletStep::new("slowStep", Arc::new(Slow))),
        );

        let (first, second) = futures_util::join!(launcher.run("slowJob"), launcher.run("slowJob"));

        assert!(first.is_ok());
        assert!(matches!(second, Err(AppError::ConflictError(_))));

        assert!(launcher.run("slowJob").await.is_ok());
    }
}
