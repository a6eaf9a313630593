//! 배치 설정
//!
//! 애플리케이션 시작 시 잡을 자동 실행하지 않습니다 (`spring.batch.job.enabled=false`).
//! 스케줄러를 켜면 일일 리포트 잡이 cron 표현식에 따라 실행됩니다.

use std::env;

pub struct BatchConfig;

impl BatchConfig {
    pub const DEFAULT_CHUNK_SIZE: usize = 10;

    pub fn scheduler_enabled() -> bool {
        env::var("BATCH_SCHEDULER_ENABLED")
            .map(|value| matches!(value.to_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false)
    }

    /// 초 단위 필드를 포함하는 6자리 cron 표현식
    pub fn daily_report_cron() -> String {
        env::var("BATCH_DAILY_REPORT_CRON").unwrap_or_else(|_| "0 0 1 * * *".to_string())
    }

    pub fn chunk_size() -> usize {
        env::var("BATCH_CHUNK_SIZE")
            .ok()
            .and_then(|value| value.parse().ok())
            .filter(|size| *size > 0)
            .unwrap_or(Self::DEFAULT_CHUNK_SIZE)
    }
}
