//! 환경 변수 기반 설정 모듈
//!
//! 각 설정은 값을 들고 있지 않는 unit struct의 연관 함수로 제공됩니다.
//! 호출 시점의 환경 변수를 읽으므로 `.env` 로드 이후 어디서든 사용할 수 있습니다.

pub mod data_config;
pub mod auth_config;
pub mod messaging_config;
pub mod notification_config;
pub mod batch_config;

pub use data_config::*;
pub use auth_config::*;
pub use messaging_config::*;
pub use notification_config::*;
pub use batch_config::*;
