//! 알림 발송 HTTP 핸들러
//!
//! 카카오 알림톡/친구톡과 이메일을 즉시 또는 큐를 통해 발송합니다.
//! `/async` 엔드포인트는 RabbitMQ에 발행만 하고 바로 응답합니다.
//! 브로커가 설정되지 않았으면 503을 반환합니다.
use std::collections::HashMap;

use actix_web::{Either, HttpResponse, post, web};
use validator::Validate;

use crate::domain::dto::notifications::{
    EmailRequest, FriendtalkForm, KakaoMessageRequest, MultiChannelForm, NotificationResponse,
};
use crate::errors::errors::AppError;
use crate::kakao::template::KakaoTemplateCode;
use crate::services::notifications::{EmailService, KakaoService};
use crate::utils::string_utils::{split_comma_separated, validate_required_string};

fn alimtalk_template(request: &KakaoMessageRequest) -> Result<String, AppError> {
    validate_required_string(request.template_code.as_deref().unwrap_or_default(), "templateCode")
}

fn into_params<T>(params: Either<web::Form<T>, web::Query<T>>) -> T {
    match params {
        Either::Left(form) => form.into_inner(),
        Either::Right(query) => query.into_inner(),
    }
}

/// 알림톡 즉시 발송
///
/// # Endpoint
/// `POST /api/notifications/kakao/alimtalk`
#[post("/kakao/alimtalk")]
pub async fn send_alimtalk(payload: web::Json<KakaoMessageRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;
    let template = alimtalk_template(&payload)?;
    let request = payload.into_inner();

    let response = KakaoService::instance()
        .send_alimtalk(
            &request.recipient,
            &template,
            request.variables.unwrap_or_default(),
            request.buttons.unwrap_or_default(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(NotificationResponse::sent(response.request_id)))
}

/// 알림톡 큐 발송
///
/// # Endpoint
/// `POST /api/notifications/kakao/alimtalk/async`
#[post("/kakao/alimtalk/async")]
pub async fn send_alimtalk_async(payload: web::Json<KakaoMessageRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;
    let template = alimtalk_template(&payload)?;
    let request = payload.into_inner();

    KakaoService::instance()
        .send_alimtalk_async(
            &request.recipient,
            &template,
            request.variables.unwrap_or_default(),
            request.buttons.unwrap_or_default(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(NotificationResponse::message("Alimtalk queued for sending")))
}

/// 친구톡 즉시 발송
///
/// # Endpoint
/// `POST /api/notifications/kakao/friendtalk`
#[post("/kakao/friendtalk")]
pub async fn send_friendtalk(
    params: Either<web::Form<FriendtalkForm>, web::Query<FriendtalkForm>>,
) -> Result<HttpResponse, AppError> {
    let params = into_params(params);
    params.validate()?;

    let receiver_uuids = split_comma_separated(&params.receiver_uuids);
    if receiver_uuids.is_empty() {
        return Err(AppError::ValidationError("receiverUuids is required".to_string()));
    }

    let response = KakaoService::instance()
        .send_friendtalk(receiver_uuids, &params.text, params.button_title, params.web_url)
        .await?;

    Ok(HttpResponse::Ok().json(NotificationResponse::sent(response.request_id)))
}

/// 이메일 즉시 발송
///
/// # Endpoint
/// `POST /api/notifications/email`
#[post("/email")]
pub async fn send_email(payload: web::Json<EmailRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    EmailService::instance()
        .send_email(&payload.recipient, &payload.subject, &payload.content)
        .await?;

    Ok(HttpResponse::Ok().json(NotificationResponse::message("Email sent")))
}

/// 이메일 큐 발송
///
/// # Endpoint
/// `POST /api/notifications/email/async`
#[post("/email/async")]
pub async fn send_email_async(payload: web::Json<EmailRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    EmailService::instance()
        .send_email_async(&payload.recipient, &payload.subject, &payload.content)
        .await?;

    Ok(HttpResponse::Ok().json(NotificationResponse::message("Email queued for sending")))
}

/// 이메일과 알림톡을 함께 큐에 발행합니다.
///
/// # Endpoint
/// `POST /api/notifications/multi-channel`
#[post("/multi-channel")]
pub async fn send_multi_channel(
    params: Either<web::Form<MultiChannelForm>, web::Query<MultiChannelForm>>,
) -> Result<HttpResponse, AppError> {
    let params = into_params(params);
    params.validate()?;

    EmailService::instance()
        .send_email_async(&params.email, &params.subject, &params.content)
        .await?;

    let mut variables = HashMap::new();
    variables.insert("name".to_string(), params.name.clone());
    variables.insert("content".to_string(), params.content.clone());

    KakaoService::instance()
        .send_alimtalk_async(
            &params.phone,
            KakaoTemplateCode::Notification.name(),
            variables,
            Vec::new(),
        )
        .await?;

    log::info!("📣 멀티 채널 알림 발행: {}", params.email);

    Ok(HttpResponse::Ok().json(NotificationResponse::message("Multi-channel notification queued")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::configure_all_routes;
    use crate::testing::{bearer_for, install_services};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::{Value, json};

    fn post(uri: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri(uri)
            .insert_header(("Authorization", bearer_for(&["user"])))
    }

    #[::core::prelude::v1::test]
    fn test_alimtalk_requires_template_code() {
        let json = r#"{"recipient":"01012345678","messageType":"ALIMTALK","content":"hi"}"#;
        let mut request: KakaoMessageRequest = serde_json::from_str(json).unwrap();
        assert!(matches!(alimtalk_template(&request), Err(AppError::ValidationError(_))));

        request.template_code = Some("WELCOME_TEMPLATE".to_string());
        assert_eq!(alimtalk_template(&request).unwrap(), "WELCOME_TEMPLATE");
    }

    #[actix_web::test]
    async fn test_send_email() {
        install_services();
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = post("/api/notifications/email")
            .set_json(json!({"recipient": "kim@example.com", "subject": "안녕하세요", "content": "<p>본문</p>"}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Email sent");
    }

    #[actix_web::test]
    async fn test_invalid_email_request_is_bad_request() {
        install_services();
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        for payload in [
            json!({"recipient": "not-an-email", "subject": "s", "content": "c"}),
            json!({"recipient": "kim@example.com", "subject": " ", "content": "c"}),
        ] {
            let req = post("/api/notifications/email").set_json(&payload).to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST, "{}", payload);
        }
    }

    #[actix_web::test]
    async fn test_async_send_without_broker_is_unavailable() {
        install_services();
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = post("/api/notifications/email/async")
            .set_json(json!({"recipient": "kim@example.com", "subject": "s", "content": "c"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::SERVICE_UNAVAILABLE);

        let req = post("/api/notifications/kakao/alimtalk/async")
            .set_json(json!({
                "recipient": "01012345678",
                "messageType": "ALIMTALK",
                "templateCode": "WELCOME_001",
                "content": "hi"
            }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn test_send_alimtalk_returns_request_id() {
        install_services();
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = post("/api/notifications/kakao/alimtalk")
            .set_json(json!({
                "recipient": "01012345678",
                "messageType": "ALIMTALK",
                "templateCode": "WELCOME_001",
                "content": "hi",
                "variables": {"name": "김철수"}
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["requestId"], "alimtalk-request");

        let req = post("/api/notifications/kakao/alimtalk")
            .set_json(json!({"recipient": "01012345678", "messageType": "ALIMTALK", "content": "hi"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_friendtalk_requires_receivers() {
        install_services();
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = post("/api/notifications/kakao/friendtalk")
            .set_form(&[("receiverUuids", " , "), ("text", "hello")][..])
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = post("/api/notifications/kakao/friendtalk")
            .set_form(&[("receiverUuids", "uuid-1,uuid-2"), ("text", "hello")][..])
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["requestId"], "friendtalk-request");
    }
}
