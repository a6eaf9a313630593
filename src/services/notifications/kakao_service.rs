//! # 카카오 메시지 서비스
//!
//! 알림톡(템플릿 기반)과 친구톡(채널 친구 대상)을 발송하고 결과를 `kakao_messages`에 기록합니다.
//!
//! | 메서드 | 방식 | 발송 이력 |
//! |--------|------|-----------|
//! | `send_alimtalk` | 즉시 (Solapi) | 1건 (SUCCESS/FAILED) |
//! | `send_friendtalk` | 즉시 (Kakao) | 수신자 UUID마다 1건 |
//! | `*_async`, `send_welcome_alimtalk`, `send_order_confirmation_alimtalk` | `kakao.queue` 발행 | 컨슈머가 발송할 때 기록 |
//!
//! 이력 저장 실패는 발송 결과를 바꾸지 않고 경고 로그만 남깁니다.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Local;

use crate::config::KakaoConfig;
use crate::core::registry::{Component, ComponentKind, ServiceLocator};
use crate::domain::dto::notifications::request::KakaoButton;
use crate::domain::entities::messages::kakao_message_log::{KakaoMessageLog, KakaoMessageType};
use crate::errors::errors::AppResult;
use crate::kakao::{AlimtalkRequest, FriendtalkRequest, KakaoApiClient, KakaoGateway, KakaoResponse, KakaoTemplateCode};
use crate::messaging::messages::KakaoQueueMessage;
use crate::messaging::producer::MessageProducer;
use crate::register_component;
use crate::repositories::messages::kakao_log_repo::{KakaoLogStore, KakaoMessageRepository};
use crate::utils::string_utils::{format_thousands, mask_phone};

const APP_MOBILE_URL: &str = "https://example.com/app";
const APP_WEB_URL: &str = "https://example.com/web";
const ORDER_URL: &str = "https://example.com/order";

pub struct KakaoService {
    gateway: Arc<dyn KakaoGateway>,
    logs: Arc<dyn KakaoLogStore>,
    producer: Arc<MessageProducer>,
    sender_key: String,
    sender_phone: Option<String>,
}

impl Component for KakaoService {
    fn build() -> AppResult<Self> {
        Ok(Self::new(
            Arc::new(KakaoApiClient::from_env()?),
            ServiceLocator::resolve::<KakaoMessageRepository>()?,
            ServiceLocator::resolve::<MessageProducer>()?,
            KakaoConfig::sender_key(),
            KakaoConfig::sender_phone(),
        ))
    }
}

register_component!(KakaoService, "kakao_service", ComponentKind::Service);

impl KakaoService {
    pub fn new(
        gateway: Arc<dyn KakaoGateway>,
        logs: Arc<dyn KakaoLogStore>,
        producer: Arc<MessageProducer>,
        sender_key: String,
        sender_phone: Option<String>,
    ) -> Self {
        Self {
            gateway,
            logs,
            producer,
            sender_key,
            sender_phone,
        }
    }

    async fn record(&self, log: KakaoMessageLog) {
        if let Err(e) = self.logs.save(log).await {
            log::warn!("⚠️ 카카오 발송 이력 저장 실패: {}", e);
        }
    }

    /// 알림톡 즉시 발송
    ///
    /// 템플릿 이름(`WELCOME_TEMPLATE`)과 등록 코드(`WELCOME_001`) 모두 받을 수 있습니다.
    ///
    /// # Errors
    ///
    /// * `AppError::KakaoApiError` - API 호출 실패 (실패 이력은 저장됨)
    pub async fn send_alimtalk(
        &self,
        recipient: &str,
        template: &str,
        variables: HashMap<String, String>,
        buttons: Vec<KakaoButton>,
    ) -> AppResult<KakaoResponse> {
        let button_data = serde_json::to_string(&buttons).ok();
        let request = AlimtalkRequest::new(
            recipient,
            self.sender_phone.clone(),
            &self.sender_key,
            template,
            variables,
            buttons,
        );
        let template_code = Some(request.kakao_options.template_code.clone());

        log::info!(
            "💬 알림톡 발송: {} ({})",
            mask_phone(recipient),
            request.kakao_options.template_code
        );

        match self.gateway.send_alimtalk(&request).await {
            Ok(response) => {
                let mut entry = KakaoMessageLog::success(
                    KakaoMessageType::Alimtalk,
                    recipient,
                    template_code,
                    response.request_id.clone().or_else(|| response.group_id.clone()),
                );
                entry.button_data = button_data;
                self.record(entry).await;
                Ok(response)
            }
            Err(e) => {
                let mut entry = KakaoMessageLog::failed(
                    KakaoMessageType::Alimtalk,
                    recipient,
                    template_code,
                    e.to_string(),
                );
                entry.button_data = button_data;
                self.record(entry).await;
                Err(e)
            }
        }
    }

    pub async fn send_alimtalk_async(
        &self,
        recipient: &str,
        template: &str,
        variables: HashMap<String, String>,
        buttons: Vec<KakaoButton>,
    ) -> AppResult<()> {
        let buttons = if buttons.is_empty() { None } else { Some(buttons) };
        self.producer
            .send_kakao_message(&KakaoQueueMessage::alimtalk(recipient, template, variables, buttons))
            .await
    }

    /// 친구톡 즉시 발송. 수신자마다 발송 이력을 남깁니다.
    pub async fn send_friendtalk(
        &self,
        receiver_uuids: Vec<String>,
        text: &str,
        button_title: Option<String>,
        web_url: Option<String>,
    ) -> AppResult<KakaoResponse> {
        let request = FriendtalkRequest::text(receiver_uuids, text, button_title, web_url);

        log::info!("💬 친구톡 발송: {}명", request.receiver_uuids.len());

        let result = self.gateway.send_friendtalk(&request).await;

        for uuid in &request.receiver_uuids {
            let mut entry = match &result {
                Ok(response) => KakaoMessageLog::success(
                    KakaoMessageType::Friendtalk,
                    uuid,
                    None,
                    response.request_id.clone(),
                ),
                Err(e) => KakaoMessageLog::failed(KakaoMessageType::Friendtalk, uuid, None, e.to_string()),
            };
            entry.content = Some(text.to_string());
            self.record(entry).await;
        }

        result
    }

    pub async fn send_friendtalk_async(
        &self,
        receiver_uuids: Vec<String>,
        text: &str,
        button_title: Option<String>,
        web_url: Option<String>,
    ) -> AppResult<()> {
        self.producer
            .send_kakao_message(&KakaoQueueMessage::friendtalk(receiver_uuids, text, button_title, web_url))
            .await
    }

    /// 회원가입 환영 알림톡 (큐 발행)
    pub async fn send_welcome_alimtalk(&self, phone: &str, name: &str) -> AppResult<()> {
        let mut variables = HashMap::new();
        variables.insert("name".to_string(), name.to_string());
        variables.insert("date".to_string(), Local::now().format("%Y년 %m월 %d일").to_string());

        let buttons = vec![KakaoButton::web_link("서비스 시작하기", APP_MOBILE_URL, APP_WEB_URL)];

        self.send_alimtalk_async(phone, KakaoTemplateCode::Welcome.name(), variables, buttons)
            .await
    }

    /// 주문 확인 알림톡 (큐 발행)
    pub async fn send_order_confirmation_alimtalk(
        &self,
        phone: &str,
        order_number: &str,
        product_name: &str,
        amount: i64,
    ) -> AppResult<()> {
        let mut variables = HashMap::new();
        variables.insert("orderNumber".to_string(), order_number.to_string());
        variables.insert("productName".to_string(), product_name.to_string());
        variables.insert("amount".to_string(), format_thousands(amount));

        let order_url = format!("{}/{}", ORDER_URL, order_number);
        let buttons = vec![
            KakaoButton::web_link("주문 상세보기", &order_url, &order_url),
            KakaoButton {
                button_type: "DS".to_string(),
                name: "배송 조회".to_string(),
                link_mobile: None,
                link_pc: None,
            },
        ];

        self.send_alimtalk_async(
            phone,
            KakaoTemplateCode::OrderConfirmation.name(),
            variables,
            buttons,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::messages::kakao_message_log::SendStatus;
    use crate::errors::errors::AppError;
    use crate::kakao::client::FakeKakaoGateway;
    use crate::messaging::producer::RecordingPublisher;
    use crate::repositories::messages::kakao_log_repo::InMemoryKakaoLogStore;

    struct Fixture {
        gateway: Arc<FakeKakaoGateway>,
        logs: Arc<InMemoryKakaoLogStore>,
        recorder: Arc<RecordingPublisher>,
        service: KakaoService,
    }

    fn fixture(gateway: FakeKakaoGateway) -> Fixture {
        let gateway = Arc::new(gateway);
        let logs = Arc::new(InMemoryKakaoLogStore::new());
        let recorder = Arc::new(RecordingPublisher::new());
        let service = KakaoService::new(
            gateway.clone(),
            logs.clone(),
            Arc::new(MessageProducer::new(Some(recorder.clone()))),
            "PF_KEY".to_string(),
            Some("0212345678".to_string()),
        );

        Fixture {
            gateway,
            logs,
            recorder,
            service,
        }
    }

    #[actix_web::test]
    async fn test_send_alimtalk_resolves_template_and_logs_success() {
        let f = fixture(FakeKakaoGateway::default());

        let response = f
            .service
            .send_alimtalk("01012345678", "WELCOME_TEMPLATE", HashMap::new(), vec![])
            .await
            .unwrap();
        assert_eq!(response.request_id.as_deref(), Some("alimtalk-request"));

        let sent = f.gateway.alimtalks.lock().unwrap();
        assert_eq!(sent[0].kakao_options.template_code, "WELCOME_001");
        assert_eq!(sent[0].kakao_options.sender_key, "PF_KEY");
        assert_eq!(sent[0].sender.as_deref(), Some("0212345678"));

        let logs = f.logs.all();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status, SendStatus::Success);
        assert_eq!(logs[0].template_code.as_deref(), Some("WELCOME_001"));
        assert_eq!(logs[0].request_id.as_deref(), Some("alimtalk-request"));
    }

    #[actix_web::test]
    async fn test_send_alimtalk_failure_is_logged_and_returned() {
        let f = fixture(FakeKakaoGateway::failing("{\"errorCode\":\"InvalidTemplate\"}"));

        let result = f
            .service
            .send_alimtalk("01012345678", "UNKNOWN_CODE", HashMap::new(), vec![])
            .await;

        match result {
            Err(AppError::KakaoApiError(msg)) => assert!(msg.contains("InvalidTemplate")),
            _ => panic!("expected KakaoApiError"),
        }

        let logs = f.logs.all();
        assert_eq!(logs[0].status, SendStatus::Failed);
        assert_eq!(logs[0].template_code.as_deref(), Some("UNKNOWN_CODE"));
        assert!(logs[0].error_message.as_deref().unwrap().contains("InvalidTemplate"));
    }

    #[actix_web::test]
    async fn test_send_friendtalk_logs_each_receiver() {
        let f = fixture(FakeKakaoGateway::default());

        f.service
            .send_friendtalk(
                vec!["uuid-1".to_string(), "uuid-2".to_string()],
                "신상품 안내",
                Some("보러가기".to_string()),
                Some("https://example.com/new".to_string()),
            )
            .await
            .unwrap();

        let sent = f.gateway.friendtalks.lock().unwrap();
        let link = sent[0].template_object.link.as_ref().unwrap();
        assert_eq!(link.web_url.as_deref(), Some("https://example.com/new"));
        assert_eq!(link.mobile_web_url.as_deref(), Some("https://example.com/new"));

        let logs = f.logs.all();
        assert_eq!(logs.len(), 2);
        assert!(logs.iter().all(|log| log.message_type == KakaoMessageType::Friendtalk));
    }

    #[actix_web::test]
    async fn test_welcome_alimtalk_is_queued() {
        let f = fixture(FakeKakaoGateway::default());

        f.service.send_welcome_alimtalk("01012345678", "홍길동").await.unwrap();

        let messages = f.recorder.messages();
        assert_eq!(messages.len(), 1);
        let body = &messages[0].1;
        assert_eq!(body["messageType"], "ALIMTALK");
        assert_eq!(body["templateCode"], "WELCOME_TEMPLATE");
        assert_eq!(body["variables"]["name"], "홍길동");
        assert!(body["variables"]["date"].as_str().unwrap().ends_with('일'));
        assert_eq!(body["buttons"][0]["type"], "WL");
        assert_eq!(body["buttons"][0]["linkPc"], "https://example.com/web");
        assert!(f.gateway.alimtalks.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_order_confirmation_formats_amount() {
        let f = fixture(FakeKakaoGateway::default());

        f.service
            .send_order_confirmation_alimtalk("01012345678", "ORD-1", "키보드", 1_234_500)
            .await
            .unwrap();

        let body = &f.recorder.messages()[0].1;
        assert_eq!(body["templateCode"], "ORDER_CONFIRMATION_TEMPLATE");
        assert_eq!(body["variables"]["amount"], "1,234,500");
        assert_eq!(body["buttons"][0]["linkMobile"], "https://example.com/order/ORD-1");
        assert_eq!(body["buttons"][1]["type"], "DS");
    }
}
