//! 잡과 잡 실행 기록

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::batch::core::{BatchStatus, Step, StepExecution};

/// 잡 한 번의 실행 기록
#[derive(Debug, Clone)]
pub struct JobExecution {
    pub id: u64,
    pub job_name: String,
    pub status: BatchStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub exit_description: String,
    pub steps: Vec<StepExecution>,
    pub failures: Vec<String>,
}

impl JobExecution {
    pub fn new(id: u64, job_name: &str) -> Self {
        Self {
            id,
            job_name: job_name.to_string(),
            status: BatchStatus::Starting,
            start_time: Utc::now(),
            end_time: None,
            exit_description: String::new(),
            steps: Vec::new(),
            failures: Vec::new(),
        }
    }
}

/// Spring Batch의 `JobExecutionListener`
#[async_trait]
pub trait JobExecutionListener: Send + Sync {
    async fn before_job(&self, execution: &JobExecution);

    async fn after_job(&self, execution: &JobExecution);
}

/// 순서대로 실행되는 스텝 묶음
pub struct Job {
    name: String,
    steps: Vec<Box<dyn Step>>,
    listeners: Vec<Arc<dyn JobExecutionListener>>,
}

impl Job {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            steps: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn step(mut self, step: impl Step + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn listener(mut self, listener: Arc<dyn JobExecutionListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// 스텝을 순서대로 실행하고 첫 실패에서 멈춥니다.
    pub async fn execute(&self, execution: &mut JobExecution) {
        execution.status = BatchStatus::Started;
        execution.start_time = Utc::now();

        for listener in &self.listeners {
            listener.before_job(execution).await;
        }

        for step in &self.steps {
            let step_execution = step.execute().await;
            let failure = step_execution.failure.clone();
            execution.steps.push(step_execution);

            if let Some(message) = failure {
                execution.failures.push(message);
                break;
            }
        }

        execution.end_time = Some(Utc::now());

        if execution.failures.is_empty() {
            execution.status = BatchStatus::Completed;
            execution.exit_description = execution
                .steps
                .iter()
                .map(|step| step.exit_description.as_str())
                .filter(|description| !description.is_empty())
                .collect::<Vec<_>>()
                .join("; ");
        } else {
            execution.status = BatchStatus::Failed;
            execution.exit_description = execution.failures.join("; ");
        }

        for listener in &self.listeners {
            listener.after_job(execution).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::core::{RepeatStatus, Tasklet, TaskletStep};
    use crate::errors::errors::{AppError, AppResult};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Describe(&'static str);

    #[async_trait]
    impl Tasklet for Describe {
        async fn execute(&self, contribution: &mut StepExecution) -> AppResult<RepeatStatus> {
            contribution.exit_description = self.0.to_string();
            Ok(RepeatStatus::Finished)
        }
    }

    struct Boom;

    #[async_trait]
    impl Tasklet for Boom {
        async fn execute(&self, _contribution: &mut StepExecution) -> AppResult<RepeatStatus> {
            Err(AppError::InternalError("boom".to_string()))
        }
    }

    struct Counting(Arc<AtomicUsize>);

    #[async_trait]
    impl Tasklet for Counting {
        async fn execute(&self, _contribution: &mut StepExecution) -> AppResult<RepeatStatus> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(RepeatStatus::Finished)
        }
    }

    #[derive(Default)]
    struct RecordingListener {
        events: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl JobExecutionListener for RecordingListener {
        async fn before_job(&self, execution: &JobExecution) {
            self.events.lock().unwrap().push(format!("before:{}", execution.status.as_str()));
        }

        async fn after_job(&self, execution: &JobExecution) {
            self.events.lock().unwrap().push(format!("after:{}", execution.status.as_str()));
        }
    }

    #[actix_web::test]
    async fn test_job_runs_steps_in_order_and_notifies_listeners() {
        let listener = Arc::new(RecordingListener::default());
        let job = Job::new("reportJob")
            .step(TaskletStep::new("first", Arc::new(Describe("one"))))
            .step(TaskletStep::new("second", Arc::new(Describe("two"))))
            .listener(listener.clone());

        let mut execution = JobExecution::new(1, job.name());
        job.execute(&mut execution).await;

        assert_eq!(execution.status, BatchStatus::Completed);
        assert_eq!(execution.exit_description, "one; two");
        assert_eq!(execution.steps[0].step_name, "first");
        assert_eq!(*listener.events.lock().unwrap(), vec!["before:STARTED", "after:COMPLETED"]);
    }

    #[actix_web::test]
    async fn test_job_stops_at_first_failed_step() {
        let runs = Arc::new(AtomicUsize::new(0));
        let job = Job::new("failingJob")
            .step(TaskletStep::new("explode", Arc::new(Boom)))
            .step(TaskletStep::new("never", Arc::new(Counting(runs.clone()))));

        let mut execution = JobExecution::new(2, job.name());
        job.execute(&mut execution).await;

        assert_eq!(execution.status, BatchStatus::Failed);
        assert_eq!(execution.steps.len(), 1);
        assert!(execution.exit_description.contains("boom"));
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }
}
