//! 사용자 정보 부분 수정 요청 DTO
use serde::{Deserialize, Serialize};
use validator::Validate;

/// `PUT /api/users/{id}` 요청 본문
///
/// 값이 있는 필드만 반영됩니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub name: Option<String>,
    /// `ACTIVE` / `INACTIVE` / `SUSPENDED`
    pub status: Option<String>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.phone.is_none() && self.name.is_none() && self.status.is_none()
    }
}
