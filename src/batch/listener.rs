//! 잡 시작/종료 로그 리스너

use async_trait::async_trait;

use crate::batch::core::BatchStatus;
use crate::batch::job::{JobExecution, JobExecutionListener};

pub struct JobCompletionListener;

#[async_trait]
impl JobExecutionListener for JobCompletionListener {
    async fn before_job(&self, execution: &JobExecution) {
        log::info!("Job started: {}", execution.job_name);
        log::info!("Job ID: {}", execution.id);
        log::info!("Start time: {}", execution.start_time.to_rfc3339());
    }

    async fn after_job(&self, execution: &JobExecution) {
        log::info!("Job finished: {}", execution.job_name);
        log::info!("Job ID: {}", execution.id);
        log::info!("Status: {}", execution.status.as_str());
        if let Some(end_time) = execution.end_time {
            log::info!("End time: {}", end_time.to_rfc3339());
        }

        match execution.status {
            BatchStatus::Completed => log::info!("Job completed successfully!"),
            BatchStatus::Failed => {
                log::error!("Job failed!");
                for failure in &execution.failures {
                    log::error!("Failure: {}", failure);
                }
            }
            _ => {}
        }
    }
}
