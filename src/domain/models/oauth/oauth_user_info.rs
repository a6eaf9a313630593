//! OAuth2 사용자 정보 추출
//!
//! 프로바이더마다 user-info 응답의 모양이 다릅니다.
//!
//! | 프로바이더 | 이메일 | 이름 |
//! |-----------|--------|------|
//! | google, github | `email` | `name` |
//! | kakao | `kakao_account.email` | `properties.nickname` |
//!
//! 프로바이더 ID는 등록 정보의 user-name attribute 값을 문자열로 변환한 것입니다.
//! GitHub/Kakao의 `id`는 숫자이므로 숫자도 문자열로 받아들입니다.

use serde_json::Value;

use crate::errors::errors::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct OAuth2UserInfo {
    pub provider_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
}

fn as_plain_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_at(attributes: &Value, path: &[&str]) -> Option<String> {
    path.iter()
        .try_fold(attributes, |node, key| node.get(key))
        .and_then(Value::as_str)
        .map(str::to_string)
}

impl OAuth2UserInfo {
    pub fn from_attributes(
        registration_id: &str,
        attributes: &Value,
        user_name_attribute: &str,
    ) -> Result<Self, AppError> {
        let provider_id = attributes
            .get(user_name_attribute)
            .and_then(as_plain_string)
            .ok_or_else(|| {
                AppError::AuthenticationError(format!(
                    "OAuth2 user info is missing attribute '{}'",
                    user_name_attribute
                ))
            })?;

        let (email, name) = match registration_id {
            "google" | "github" => (
                string_at(attributes, &["email"]),
                string_at(attributes, &["name"]),
            ),
            "kakao" => (
                string_at(attributes, &["kakao_account", "email"]),
                string_at(attributes, &["properties", "nickname"]),
            ),
            _ => (None, None),
        };

        Ok(Self { provider_id, email, name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_google_attributes() {
        let attrs = json!({"sub": "1098", "email": "a@gmail.com", "name": "Alice"});
        let info = OAuth2UserInfo::from_attributes("google", &attrs, "sub").unwrap();

        assert_eq!(info.provider_id, "1098");
        assert_eq!(info.email.as_deref(), Some("a@gmail.com"));
        assert_eq!(info.name.as_deref(), Some("Alice"));
    }

    #[test]
    fn test_github_numeric_id_and_null_email() {
        let attrs = json!({"id": 583231, "email": null, "name": "Octocat"});
        let info = OAuth2UserInfo::from_attributes("github", &attrs, "id").unwrap();

        assert_eq!(info.provider_id, "583231");
        assert!(info.email.is_none());
        assert_eq!(info.name.as_deref(), Some("Octocat"));
    }

    #[test]
    fn test_kakao_nested_attributes() {
        let attrs = json!({
            "id": 123456789,
            "kakao_account": {"email": "choonsik@kakao.com"},
            "properties": {"nickname": "춘식이"}
        });
        let info = OAuth2UserInfo::from_attributes("kakao", &attrs, "id").unwrap();

        assert_eq!(info.provider_id, "123456789");
        assert_eq!(info.email.as_deref(), Some("choonsik@kakao.com"));
        assert_eq!(info.name.as_deref(), Some("춘식이"));
    }

    #[test]
    fn test_unknown_provider_has_only_id() {
        let attrs = json!({"id": "x1", "email": "ignored@example.com"});
        let info = OAuth2UserInfo::from_attributes("naver", &attrs, "id").unwrap();

        assert_eq!(info.provider_id, "x1");
        assert!(info.email.is_none());
        assert!(info.name.is_none());
    }

    #[test]
    fn test_missing_id_is_an_error() {
        let attrs = json!({"email": "a@gmail.com"});
        assert!(OAuth2UserInfo::from_attributes("google", &attrs, "sub").is_err());
    }
}
