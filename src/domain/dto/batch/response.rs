use serde::{Deserialize, Serialize};

use crate::batch::{JobExecution, StepExecution};

/// 스텝 실행 결과
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepExecutionResponse {
    pub step_name: String,
    pub status: String,
    pub read_count: usize,
    pub write_count: usize,
    pub filter_count: usize,
    pub commit_count: usize,
    pub exit_description: String,
}

impl From<&StepExecution> for StepExecutionResponse {
    fn from(step: &StepExecution) -> Self {
        Self {
            step_name: step.step_name.clone(),
            status: step.status.as_str().to_string(),
            read_count: step.read_count,
            write_count: step.write_count,
            filter_count: step.filter_count,
            commit_count: step.commit_count,
            exit_description: step.exit_description.clone(),
        }
    }
}

/// `POST /api/batch/run/{jobName}`, `GET /api/batch/status/{jobName}` 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobExecutionResponse {
    pub job_name: String,
    pub execution_id: u64,
    pub status: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub exit_description: String,
    pub steps: Vec<StepExecutionResponse>,
}

impl From<&JobExecution> for JobExecutionResponse {
    fn from(execution: &JobExecution) -> Self {
        Self {
            job_name: execution.job_name.clone(),
            execution_id: execution.id,
            status: execution.status.as_str().to_string(),
            start_time: execution.start_time.to_rfc3339(),
            end_time: execution.end_time.map(|t| t.to_rfc3339()),
            exit_description: execution.exit_description.clone(),
            steps: execution.steps.iter().map(StepExecutionResponse::from).collect(),
        }
    }
}
