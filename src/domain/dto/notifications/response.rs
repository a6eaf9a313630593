use serde::{Deserialize, Serialize};

/// 알림 API 공통 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl NotificationResponse {
    pub fn sent(request_id: Option<String>) -> Self {
        Self {
            success: true,
            request_id,
            message: None,
        }
    }

    pub fn message(message: &str) -> Self {
        Self {
            success: true,
            request_id: None,
            message: Some(message.to_string()),
        }
    }
}
