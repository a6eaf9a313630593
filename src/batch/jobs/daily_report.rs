//! `dailyReportJob`: 사용자 현황 리포트

use std::sync::Arc;

use async_trait::async_trait;

use crate::batch::core::{RepeatStatus, StepExecution, Tasklet, TaskletStep};
use crate::batch::job::Job;
use crate::batch::listener::JobCompletionListener;
use crate::domain::entities::users::user::UserStatus;
use crate::errors::errors::AppResult;
use crate::repositories::users::UserStore;

pub const JOB_NAME: &str = "dailyReportJob";
pub const STEP_NAME: &str = "reportGenerationStep";

pub struct ReportTasklet {
    store: Arc<dyn UserStore>,
}

impl ReportTasklet {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tasklet for ReportTasklet {
    async fn execute(&self, contribution: &mut StepExecution) -> AppResult<RepeatStatus> {
        log::info!("Generating daily report...");

        let total = self.store.count().await?;
        let mut parts = vec![format!("total={}", total)];

        for status in UserStatus::all() {
            let count = self.store.count_by_status(status).await?;
            parts.push(format!("{}={}", status.as_str(), count));
        }

        contribution.read_count = total as usize;
        contribution.exit_description = format!("Daily user report: {}", parts.join(", "));

        log::info!("{}", contribution.exit_description);
        log::info!("Daily report generated successfully");

        Ok(RepeatStatus::Finished)
    }
}

pub fn build(store: Arc<dyn UserStore>) -> Job {
    Job::new(JOB_NAME)
        .step(TaskletStep::new(STEP_NAME, Arc::new(ReportTasklet::new(store))))
        .listener(Arc::new(JobCompletionListener))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::core::BatchStatus;
    use crate::batch::job::JobExecution;
    use crate::domain::entities::users::user::User;
    use crate::repositories::users::InMemoryUserStore;

    #[actix_web::test]
    async fn test_report_counts_users_per_status() {
        let store = Arc::new(InMemoryUserStore::new());
        for (i, status) in [UserStatus::Active, UserStatus::Active, UserStatus::Suspended]
            .into_iter()
            .enumerate()
        {
            let mut user = User::new_local(
                format!("user{}", i),
                format!("user{}@example.com", i),
                "hash".to_string(),
                None,
                None,
            );
            user.status = status;
            store.insert(user).await.unwrap();
        }

        let job = build(store);
        let mut execution = JobExecution::new(1, job.name());
        job.execute(&mut execution).await;

        assert_eq!(execution.status, BatchStatus::Completed);
        assert_eq!(execution.steps[0].step_name, STEP_NAME);
        assert_eq!(
            execution.steps[0].exit_description,
            "Daily user report: total=3, ACTIVE=2, INACTIVE=0, SUSPENDED=1"
        );
        assert_eq!(execution.exit_description, execution.steps[0].exit_description);
    }
}
