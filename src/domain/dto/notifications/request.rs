//! 알림 발송 요청 DTO
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 공백만 있는 문자열을 거부합니다.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("값이 비어 있습니다".into()));
    }
    Ok(())
}

/// 알림톡/친구톡 버튼
///
/// `type`은 카카오 버튼 타입 코드입니다 (`WL` 웹 링크, `DS` 배송 조회 등).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KakaoButton {
    #[serde(rename = "type")]
    pub button_type: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_pc: Option<String>,
}

impl KakaoButton {
    pub fn web_link(name: &str, link_mobile: &str, link_pc: &str) -> Self {
        Self {
            button_type: "WL".to_string(),
            name: name.to_string(),
            link_mobile: Some(link_mobile.to_string()),
            link_pc: Some(link_pc.to_string()),
        }
    }
}

/// `POST /api/notifications/kakao/alimtalk[/async]` 요청 본문
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct KakaoMessageRequest {
    #[validate(custom(function = "not_blank", message = "Recipient is required"))]
    pub recipient: String,

    #[validate(custom(function = "not_blank", message = "Message type is required"))]
    pub message_type: String,

    pub template_code: Option<String>,

    #[validate(custom(function = "not_blank", message = "Content is required"))]
    pub content: String,

    pub subject: Option<String>,
    pub variables: Option<HashMap<String, String>>,
    pub buttons: Option<Vec<KakaoButton>>,
}

/// `POST /api/notifications/email[/async]` 요청 본문
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmailRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    #[validate(custom(function = "not_blank", message = "Recipient is required"))]
    pub recipient: String,

    #[validate(custom(function = "not_blank", message = "Subject is required"))]
    pub subject: String,

    #[validate(custom(function = "not_blank", message = "Content is required"))]
    pub content: String,
}

/// `POST /api/notifications/kakao/friendtalk` form 파라미터
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FriendtalkForm {
    /// 쉼표로 구분된 수신자 UUID 목록
    #[validate(custom(function = "not_blank", message = "receiverUuids is required"))]
    pub receiver_uuids: String,

    #[validate(custom(function = "not_blank", message = "text is required"))]
    pub text: String,

    pub button_title: Option<String>,
    pub web_url: Option<String>,
}

/// `POST /api/notifications/multi-channel` form 파라미터
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MultiChannelForm {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(custom(function = "not_blank", message = "phone is required"))]
    pub phone: String,

    #[validate(custom(function = "not_blank", message = "name is required"))]
    pub name: String,

    #[validate(custom(function = "not_blank", message = "subject is required"))]
    pub subject: String,

    #[validate(custom(function = "not_blank", message = "content is required"))]
    pub content: String,
}
