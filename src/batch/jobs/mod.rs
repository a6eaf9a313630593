//! 등록된 배치 잡

pub mod daily_report;
pub mod user_migration;
