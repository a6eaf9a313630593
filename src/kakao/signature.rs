//! Solapi HMAC-SHA256 인증 헤더
//!
//! ```text
//! Authorization: HMAC-SHA256 apiKey={key}, date={ISO-8601}, salt={salt}, signature={hex}
//! signature = hex(HMAC-SHA256(secret, date + salt))
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::errors::errors::{AppError, AppResult};

type HmacSha256 = Hmac<Sha256>;

pub fn sign(secret: &str, date: &str, salt: &str) -> AppResult<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| AppError::InternalError(format!("Failed to generate auth header: {}", e)))?;
    mac.update(date.as_bytes());
    mac.update(salt.as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}

pub fn auth_header_at(api_key: &str, secret: &str, now: DateTime<Utc>, salt: &str) -> AppResult<String> {
    let date = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let signature = sign(secret, &date, salt)?;

    Ok(format!(
        "HMAC-SHA256 apiKey={}, date={}, salt={}, signature={}",
        api_key, date, salt, signature
    ))
}

/// 현재 시각과 새 salt(하이픈 없는 UUID)로 헤더를 만듭니다.
pub fn auth_header(api_key: &str, secret: &str) -> AppResult<String> {
    let salt = uuid::Uuid::new_v4().simple().to_string();
    auth_header_at(api_key, secret, Utc::now(), &salt)
}
