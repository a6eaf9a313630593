//! OAuth2 프로바이더 통합 모델

pub mod oauth_user_info;

pub use oauth_user_info::OAuth2UserInfo;
