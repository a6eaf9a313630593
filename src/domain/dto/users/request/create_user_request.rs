//! 회원가입 요청 DTO
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::string_utils::deserialize_optional_string;

/// `POST /api/auth/register` 요청 본문
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50, message = "사용자명은 3-50자 사이여야 합니다"))]
    pub username: String,

    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    pub password: String,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            phone: None,
            name: None,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("kim", "kim@example.com", "password1").validate().is_ok());
    }

    #[test]
    fn test_invalid_fields() {
        let errors = request("ab", "not-an-email", "short").validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_blank_optional_fields_become_none() {
        let json = r#"{"username":"kim","email":"kim@example.com","password":"password1","phone":"  ","name":"김철수"}"#;
        let request: CreateUserRequest = serde_json::from_str(json).unwrap();

        assert!(request.phone.is_none());
        assert_eq!(request.name.as_deref(), Some("김철수"));
    }
}
