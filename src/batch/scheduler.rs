//! cron 기반 배치 스케줄러
//!
//! `BATCH_SCHEDULER_ENABLED=true`일 때만 `dailyReportJob`을
//! `BATCH_DAILY_REPORT_CRON`(초 포함 6자리, 기본 `0 0 1 * * *`)에 맞춰 실행합니다.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use cron::Schedule;

use crate::batch::jobs::daily_report;
use crate::batch::launcher::JobLauncher;
use crate::config::BatchConfig;
use crate::errors::errors::{AppError, AppResult};

pub fn parse_schedule(expression: &str) -> AppResult<Schedule> {
    Schedule::from_str(expression)
        .map_err(|e| AppError::ValidationError(format!("Invalid cron expression '{}': {}", expression, e)))
}

pub fn next_run_after(schedule: &Schedule, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
    schedule.after(&after).next()
}

/// 스케줄러를 시작합니다. 비활성화되어 있거나 cron 표현식이 잘못되면 `false`.
pub fn start(launcher: Arc<JobLauncher>) -> bool {
    if !BatchConfig::scheduler_enabled() {
        log::info!("⏸️ 배치 스케줄러 비활성화 (BATCH_SCHEDULER_ENABLED)");
        return false;
    }

    let expression = BatchConfig::daily_report_cron();
    let schedule = match parse_schedule(&expression) {
        Ok(schedule) => schedule,
        Err(e) => {
            log::error!("❌ 배치 스케줄러를 시작하지 않습니다: {}", e);
            return false;
        }
    };

    log::info!("⏰ 배치 스케줄러 시작: {} ({})", daily_report::JOB_NAME, expression);

    actix_web::rt::spawn(async move {
        loop {
            let Some(next) = next_run_after(&schedule, Utc::now()) else {
                log::warn!("⚠️ 더 이상 예정된 실행이 없습니다: {}", expression);
                break;
            };

            let wait = (next - Utc::now()).to_std().unwrap_or_default();
            log::debug!("다음 {} 실행: {}", daily_report::JOB_NAME, next.to_rfc3339());
            actix_web::rt::time::sleep(wait).await;

            match launcher.run(daily_report::JOB_NAME).await {
                Ok(execution) => log::info!(
                    "⏰ 예약 실행 완료: {} #{} {}",
                    execution.job_name,
                    execution.id,
                    execution.status.as_str()
                ),
                Err(e) => log::error!("❌ 예약 실행 실패: {}", e),
            }
        }
    });

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn test_default_cron_runs_daily_at_one() {
        let schedule = parse_schedule("0 0 1 * * *").unwrap();
        let after = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

        let next = next_run_after(&schedule, after).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 6, 2, 1, 0, 0).unwrap());
        assert_eq!(next.second(), 0);
    }

    #[test]
    fn test_invalid_cron_is_rejected() {
        assert!(matches!(parse_schedule("every day"), Err(AppError::ValidationError(_))));
    }
}
