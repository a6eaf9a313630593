//! 카카오/Solapi API 요청·응답 본문
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::dto::notifications::request::KakaoButton;
use crate::kakao::template::KakaoTemplateCode;

/// 친구톡 요청 (`POST /v1/api/talk/friends/message/default/send`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendtalkRequest {
    pub receiver_uuids: Vec<String>,
    pub template_object: TemplateObject,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateObject {
    /// `text`, `list`, `commerce` 등
    pub object_type: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<FriendtalkLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<FriendtalkButton>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendtalkLink {
    pub web_url: Option<String>,
    pub mobile_web_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FriendtalkButton {
    pub title: String,
    pub link: FriendtalkLink,
}

impl FriendtalkRequest {
    /// 텍스트 친구톡. 링크는 PC와 모바일 모두 `web_url`을 사용합니다.
    pub fn text(
        receiver_uuids: Vec<String>,
        text: &str,
        button_title: Option<String>,
        web_url: Option<String>,
    ) -> Self {
        Self {
            receiver_uuids,
            template_object: TemplateObject {
                object_type: "text".to_string(),
                text: text.to_string(),
                link: Some(FriendtalkLink {
                    web_url: web_url.clone(),
                    mobile_web_url: web_url,
                }),
                button_title,
                buttons: None,
            },
        }
    }
}

/// 알림톡 요청 (Solapi `POST /kakao/v1/alimtalk/send`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlimtalkRequest {
    /// 수신자 전화번호 (01012345678 형식)
    #[serde(rename = "to")]
    pub recipient: String,
    /// 발신자 전화번호
    #[serde(rename = "from", skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(rename = "kakaoOptions")]
    pub kakao_options: KakaoOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KakaoOptions {
    /// 발신 프로필 키
    #[serde(rename = "pfId")]
    pub sender_key: String,
    #[serde(rename = "templateId")]
    pub template_code: String,
    #[serde(default)]
    pub variables: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<AlimtalkButton>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlimtalkButton {
    /// WL(웹링크), AL(앱링크), DS(배송조회), BK(봇키워드), MD(메시지전달)
    #[serde(rename = "buttonType")]
    pub button_type: String,
    #[serde(rename = "buttonName")]
    pub name: String,
    #[serde(rename = "linkMo", skip_serializing_if = "Option::is_none")]
    pub link_mobile: Option<String>,
    #[serde(rename = "linkPc", skip_serializing_if = "Option::is_none")]
    pub link_pc: Option<String>,
    #[serde(rename = "linkAnd", skip_serializing_if = "Option::is_none")]
    pub link_android: Option<String>,
    #[serde(rename = "linkIos", skip_serializing_if = "Option::is_none")]
    pub link_ios: Option<String>,
}

impl From<KakaoButton> for AlimtalkButton {
    fn from(button: KakaoButton) -> Self {
        Self {
            button_type: button.button_type,
            name: button.name,
            link_mobile: button.link_mobile,
            link_pc: button.link_pc,
            link_android: None,
            link_ios: None,
        }
    }
}

impl AlimtalkRequest {
    /// 템플릿 이름(`WELCOME_TEMPLATE` 등)은 등록 코드로 변환됩니다.
    pub fn new(
        recipient: &str,
        sender: Option<String>,
        sender_key: &str,
        template: &str,
        variables: HashMap<String, String>,
        buttons: Vec<KakaoButton>,
    ) -> Self {
        Self {
            recipient: recipient.to_string(),
            sender,
            kakao_options: KakaoOptions {
                sender_key: sender_key.to_string(),
                template_code: KakaoTemplateCode::resolve(template),
                variables,
                buttons: buttons.into_iter().map(AlimtalkButton::from).collect(),
            },
        }
    }
}

/// 카카오/Solapi 공통 응답
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KakaoResponse {
    #[serde(default)]
    pub successful_receiver_uuids: Option<Vec<String>>,
    #[serde(rename = "groupId", default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub count: Option<i64>,
    #[serde(rename = "statusCode", default)]
    pub status_code: Option<String>,
    #[serde(rename = "statusMessage", default)]
    pub status_message: Option<String>,
    #[serde(rename = "requestId", default)]
    pub request_id: Option<String>,
    #[serde(rename = "accountId", default)]
    pub account_id: Option<String>,
}
