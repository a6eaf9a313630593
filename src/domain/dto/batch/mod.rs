//! 배치 실행 결과 DTO

pub mod response;

pub use response::*;
