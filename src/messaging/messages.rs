//! 큐 메시지 스키마 (JSON, `application/json`)
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::dto::notifications::request::KakaoButton;

/// `email.queue` 메시지
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub recipient: String,
    pub subject: String,
    pub content: String,
    #[serde(default = "default_html")]
    pub html: bool,
}

fn default_html() -> bool {
    true
}

impl EmailMessage {
    pub fn html(recipient: &str, subject: &str, content: &str) -> Self {
        Self {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            content: content.to_string(),
            html: true,
        }
    }
}

pub const MESSAGE_TYPE_ALIMTALK: &str = "ALIMTALK";
pub const MESSAGE_TYPE_FRIENDTALK: &str = "FRIENDTALK";

/// `kakao.queue` 메시지
///
/// `messageType`은 문자열로 받습니다. 알 수 없는 타입은 컨슈머가 경고 로그 후 무시합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KakaoQueueMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    pub message_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<HashMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<KakaoButton>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_uuids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_title: Option<String>,
}

impl KakaoQueueMessage {
    pub fn alimtalk(
        recipient: &str,
        template_code: &str,
        variables: HashMap<String, String>,
        buttons: Option<Vec<KakaoButton>>,
    ) -> Self {
        Self {
            recipient: Some(recipient.to_string()),
            message_type: MESSAGE_TYPE_ALIMTALK.to_string(),
            template_code: Some(template_code.to_string()),
            variables: Some(variables),
            buttons,
            ..Self::default()
        }
    }

    pub fn friendtalk(
        receiver_uuids: Vec<String>,
        text: &str,
        button_title: Option<String>,
        web_url: Option<String>,
    ) -> Self {
        Self {
            message_type: MESSAGE_TYPE_FRIENDTALK.to_string(),
            content: Some(text.to_string()),
            receiver_uuids: Some(receiver_uuids),
            button_title,
            web_url,
            ..Self::default()
        }
    }
}
