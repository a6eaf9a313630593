//! # 배치 처리
//!
//! Spring Batch 구성을 축소해 옮긴 모듈입니다. 잡 메타데이터는 메모리에만 보관합니다.
//!
//! | 잡 | 스텝 | 방식 |
//! |----|------|------|
//! | `userMigrationJob` | `userMigrationStep` | 청크 (10건), User → User |
//! | `dailyReportJob` | `reportGenerationStep` | 태스클릿 |
//!
//! 시작 시 잡을 자동 실행하지 않습니다. `POST /api/batch/run/{jobName}`으로 실행하거나
//! 스케줄러를 켭니다.

pub mod core;
pub mod job;
pub mod jobs;
pub mod launcher;
pub mod listener;
pub mod repository;
pub mod scheduler;

pub use self::core::{BatchStatus, StepExecution};
pub use job::{Job, JobExecution};
pub use launcher::JobLauncher;
