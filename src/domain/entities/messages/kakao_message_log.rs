//! 카카오 메시지 발송 로그 엔티티 (`kakao_messages` 컬렉션)

use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// 카카오 메시지 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KakaoMessageType {
    /// 사전 승인된 템플릿으로 보내는 알림톡
    Alimtalk,
    /// 채널 친구에게 보내는 친구톡
    Friendtalk,
}

impl KakaoMessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KakaoMessageType::Alimtalk => "ALIMTALK",
            KakaoMessageType::Friendtalk => "FRIENDTALK",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "ALIMTALK" => Some(KakaoMessageType::Alimtalk),
            "FRIENDTALK" => Some(KakaoMessageType::Friendtalk),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SendStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KakaoMessageLog {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub message_type: KakaoMessageType,
    /// 알림톡은 전화번호, 친구톡은 수신자 UUID
    pub recipient_phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// 버튼 정보 JSON
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_data: Option<String>,
    pub status: SendStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime>,
    pub created_at: DateTime,
}

impl KakaoMessageLog {
    pub fn success(
        message_type: KakaoMessageType,
        recipient: &str,
        template_code: Option<String>,
        request_id: Option<String>,
    ) -> Self {
        let now = DateTime::now();
        Self {
            status: SendStatus::Success,
            request_id,
            sent_at: Some(now),
            ..Self::base(message_type, recipient, template_code, now)
        }
    }

    pub fn failed(
        message_type: KakaoMessageType,
        recipient: &str,
        template_code: Option<String>,
        error_message: String,
    ) -> Self {
        let now = DateTime::now();
        Self {
            status: SendStatus::Failed,
            error_message: Some(error_message),
            ..Self::base(message_type, recipient, template_code, now)
        }
    }

    fn base(
        message_type: KakaoMessageType,
        recipient: &str,
        template_code: Option<String>,
        now: DateTime,
    ) -> Self {
        Self {
            id: None,
            user_id: None,
            message_type,
            recipient_phone: recipient.to_string(),
            template_code,
            subject: None,
            content: None,
            button_data: None,
            status: SendStatus::Failed,
            error_code: None,
            error_message: None,
            request_id: None,
            sent_at: None,
            created_at: now,
        }
    }
}
