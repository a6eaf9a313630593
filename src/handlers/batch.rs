//! 배치 잡 HTTP 핸들러 (관리자 전용)
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `POST` | `/api/batch/run/{jobName}` | 잡을 동기 실행하고 결과 반환 |
//! | `GET` | `/api/batch/status/{jobName}` | 가장 최근 실행 결과 |
use actix_web::{HttpResponse, get, post, web};

use crate::batch::JobLauncher;
use crate::domain::dto::batch::JobExecutionResponse;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::errors::AppError;

/// 잡 실행
///
/// # Errors
///
/// * `AppError::NotFound` - 등록되지 않은 잡 (404)
/// * `AppError::ConflictError` - 이미 실행 중 (409)
#[post("/run/{job_name}")]
pub async fn run_job(
    job_name: web::Path<String>,
    current: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    log::info!("🗂️ 배치 실행 요청: {} (요청자: {})", job_name, current.username);

    let execution = JobLauncher::instance().run(&job_name).await?;

    Ok(HttpResponse::Ok().json(JobExecutionResponse::from(&execution)))
}

/// 최근 실행 결과 조회
#[get("/status/{job_name}")]
pub async fn job_status(job_name: web::Path<String>) -> Result<HttpResponse, AppError> {
    let execution = JobLauncher::instance().last_execution(&job_name)?;

    Ok(HttpResponse::Ok().json(JobExecutionResponse::from(&execution)))
}
