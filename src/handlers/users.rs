//! # User Management HTTP Handlers
//!
//! 인증된 사용자를 위한 사용자 CRUD 엔드포인트입니다. 생성은 `/api/auth/register`가 담당합니다.
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/api/users` | 전체 사용자 | 200 |
//! | `GET` | `/api/users/{id}` | ID로 조회 | 200 / 400 / 404 |
//! | `GET` | `/api/users/username/{username}` | 사용자명으로 조회 | 200 / 404 |
//! | `PUT` | `/api/users/{id}` | 부분 수정 | 200 / 400 / 404 / 409 |
//! | `DELETE` | `/api/users/{id}` | 삭제 | 204 / 404 |
//!
//! ## Spring Boot와의 비교
//!
//! ```java
//! @GetMapping("/{id}")
//! public ResponseEntity<UserResponse> getUserById(@PathVariable String id) {
//!     return ResponseEntity.ok(UserResponse.from(userService.findById(id)));
//! }
//! ```
//!
//! ```rust,ignore
//! #[get("/{user_id}")]
//! pub async fn get_user(user_id: web::Path<String>) -> Result<HttpResponse, AppError> {
//!     let user = UserService::instance().find_by_id(&user_id).await?;
//!     Ok(HttpResponse::Ok().json(UserResponse::from(user)))
//! }
//! ```
use actix_web::{HttpResponse, delete, get, put, web};
use validator::Validate;

use crate::domain::dto::users::request::UpdateUserRequest;
use crate::domain::dto::users::response::UserResponse;
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::errors::AppError;
use crate::services::users::UserService;

/// 전체 사용자 조회
///
/// # Endpoint
/// `GET /api/users`
#[get("")]
pub async fn get_users() -> Result<HttpResponse, AppError> {
    let users = UserService::instance().find_all().await?;
    let body: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// 사용자명으로 조회
///
/// `/{user_id}`보다 먼저 등록되어야 합니다.
#[get("/username/{username}")]
pub async fn get_user_by_username(username: web::Path<String>) -> Result<HttpResponse, AppError> {
    let user = UserService::instance().find_by_username(&username).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// ID로 조회
///
/// # Endpoint
/// `GET /api/users/{user_id}`
///
/// # Errors
///
/// * `AppError::ValidationError` - ObjectId 형식이 아님 (400)
/// * `AppError::NotFound` - 사용자 없음 (404)
#[get("/{user_id}")]
pub async fn get_user(user_id: web::Path<String>) -> Result<HttpResponse, AppError> {
    let user = UserService::instance().find_by_id(&user_id).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// 사용자 정보 부분 수정
///
/// 값이 있는 필드만 반영하고 `updatedAt`을 갱신합니다.
#[put("/{user_id}")]
pub async fn update_user(
    user_id: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
    current: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user = UserService::instance()
        .update(&user_id, payload.into_inner())
        .await?;

    log::info!("✏️ 사용자 수정: {} (요청자: {})", user.username, current.username);

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// 사용자 삭제
///
/// # Endpoint
/// `DELETE /api/users/{user_id}`
#[delete("/{user_id}")]
pub async fn delete_user(
    user_id: web::Path<String>,
    current: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    UserService::instance().delete(&user_id).await?;

    log::info!("🗑️ 사용자 삭제: {} (요청자: {})", user_id, current.username);

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use crate::routes::configure_all_routes;
    use crate::testing::{bearer_for, install_services, register_user};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use mongodb::bson::oid::ObjectId;
    use serde_json::{Value, json};

    #[actix_web::test]
    async fn test_get_user_by_id() {
        let user = register_user("http_get_user").await;
        let id = user.id_string().unwrap();
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/users/{}", id))
            .insert_header(("Authorization", bearer_for(&["user"])))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["id"], id.as_str());
        assert_eq!(body["username"], "http_get_user");
        assert_eq!(body["status"], "ACTIVE");

        let req = test::TestRequest::get()
            .uri("/api/users/username/http_get_user")
            .insert_header(("Authorization", bearer_for(&["user"])))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_malformed_id_is_bad_request() {
        install_services();
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get()
            .uri("/api/users/not-an-object-id")
            .insert_header(("Authorization", bearer_for(&["user"])))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::delete()
            .uri("/api/users/not-an-object-id")
            .insert_header(("Authorization", bearer_for(&["user"])))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_unknown_id_is_not_found() {
        install_services();
        let app = test::init_service(App::new().configure(configure_all_routes)).await;
        let missing = ObjectId::new().to_hex();

        let req = test::TestRequest::get()
            .uri(&format!("/api/users/{}", missing))
            .insert_header(("Authorization", bearer_for(&["user"])))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::put()
            .uri(&format!("/api/users/{}", missing))
            .insert_header(("Authorization", bearer_for(&["user"])))
            .set_json(json!({ "name": "없음" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri("/api/users/username/http_nobody_here")
            .insert_header(("Authorization", bearer_for(&["user"])))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_update_user_applies_present_fields() {
        let user = register_user("http_update_user").await;
        let id = user.id_string().unwrap();
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::put()
            .uri(&format!("/api/users/{}", id))
            .insert_header(("Authorization", bearer_for(&["user"])))
            .set_json(json!({ "name": "김철수", "status": "INACTIVE" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["name"], "김철수");
        assert_eq!(body["status"], "INACTIVE");
        assert_eq!(body["email"], "http_update_user@example.com");

        let req = test::TestRequest::put()
            .uri(&format!("/api/users/{}", id))
            .insert_header(("Authorization", bearer_for(&["user"])))
            .set_json(json!({ "email": "not-an-email" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_delete_user_then_not_found() {
        let user = register_user("http_delete_user").await;
        let id = user.id_string().unwrap();
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::delete()
            .uri(&format!("/api/users/{}", id))
            .insert_header(("Authorization", bearer_for(&["user"])))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        for req in [
            test::TestRequest::delete().uri(&format!("/api/users/{}", id)),
            test::TestRequest::get().uri(&format!("/api/users/{}", id)),
        ] {
            let req = req.insert_header(("Authorization", bearer_for(&["user"]))).to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
        }
    }
}
