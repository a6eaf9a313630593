//! 알림 채널 설정 (SMTP 메일, 카카오 메시지)

use std::env;
use std::time::Duration;

/// SMTP 메일 설정 (`spring.mail.*`, `mail.from.*`)
pub struct MailConfig;

impl MailConfig {
    pub fn smtp_host() -> String {
        env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string())
    }

    pub fn smtp_port() -> u16 {
        env::var("SMTP_PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(587)
    }

    pub fn smtp_username() -> Option<String> {
        env::var("SMTP_USERNAME").ok().filter(|value| !value.is_empty())
    }

    pub fn smtp_password() -> Option<String> {
        env::var("SMTP_PASSWORD").ok().filter(|value| !value.is_empty())
    }

    pub fn starttls() -> bool {
        env::var("SMTP_STARTTLS")
            .map(|value| !matches!(value.to_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(true)
    }

    pub fn from_address() -> String {
        env::var("MAIL_FROM_ADDRESS").unwrap_or_else(|_| "noreply@example.com".to_string())
    }

    pub fn from_name() -> String {
        env::var("MAIL_FROM_NAME").unwrap_or_else(|_| "My API Server".to_string())
    }
}

/// 카카오 API 설정 (`kakao.api.*`, `kakao.bizmessage.*`)
pub struct KakaoConfig;

impl KakaoConfig {
    pub fn base_url() -> String {
        env::var("KAKAO_API_BASE_URL").unwrap_or_else(|_| "https://kapi.kakao.com".to_string())
    }

    /// 연결/응답 타임아웃
    pub fn timeout() -> Duration {
        let millis = env::var("KAKAO_API_TIMEOUT_MS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(5000);
        Duration::from_millis(millis)
    }

    pub fn admin_key() -> String {
        env::var("KAKAO_ADMIN_KEY").unwrap_or_default()
    }

    /// 알림톡 발신 프로필 키 (pfId)
    pub fn sender_key() -> String {
        env::var("KAKAO_SENDER_KEY").unwrap_or_default()
    }

    /// 알림톡 발신 번호 (`from`). 미설정 시 대행사 기본 발신 번호를 사용합니다.
    pub fn sender_phone() -> Option<String> {
        env::var("KAKAO_SENDER_PHONE").ok().filter(|value| !value.is_empty())
    }

    pub fn biz_api_key() -> String {
        env::var("KAKAO_BIZ_API_KEY").unwrap_or_default()
    }

    pub fn biz_api_secret() -> String {
        env::var("KAKAO_BIZ_API_SECRET").unwrap_or_default()
    }

    pub fn solapi_base_url() -> String {
        env::var("SOLAPI_BASE_URL").unwrap_or_else(|_| "https://api.solapi.com".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mail_defaults() {
        if env::var("SMTP_PORT").is_err() {
            assert_eq!(MailConfig::smtp_port(), 587);
        }
        if env::var("SMTP_STARTTLS").is_err() {
            assert!(MailConfig::starttls());
        }
    }

    #[test]
    fn test_kakao_defaults() {
        if env::var("KAKAO_API_TIMEOUT_MS").is_err() {
            assert_eq!(KakaoConfig::timeout(), Duration::from_millis(5000));
        }
        if env::var("SOLAPI_BASE_URL").is_err() {
            assert_eq!(KakaoConfig::solapi_base_url(), "https://api.solapi.com");
        }
    }
}
