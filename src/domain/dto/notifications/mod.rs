//! 알림(카카오, 이메일) API DTO

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
