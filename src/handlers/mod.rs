//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! Spring MVC의 `@RestController` 레이어와 같은 역할을 하며,
//! 요청 검증과 응답 변환만 담당하고 비즈니스 로직은 서비스에 위임합니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (Browser, Mobile App, API Client)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   AuthMiddleware - Bearer 토큰 검증, 역할 확인
//! ├─────────────────────────────────────────────┤
//!   Handlers (이 모듈)                          ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services / JobLauncher / MessageProducer    ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories, Redis, RabbitMQ, SMTP, Kakao  ← Infrastructure
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Spring Framework와의 비교
//!
//! | Spring | 이 모듈 |
//! |--------|---------|
//! | `@PostMapping("/login")` | `#[post("/login")]` |
//! | `@Valid @RequestBody T` | `web::Json<T>` + `validate()?` |
//! | `@RequestParam` | `Either<web::Form<T>, web::Query<T>>` |
//! | `@AuthenticationPrincipal` | [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser) 추출자 |
//! | `@ExceptionHandler` | `AppError: ResponseError` |
//!
//! 서비스 인스턴스는 레지스트리의 `instance()` 접근자로 가져옵니다.
//!
//! ```rust,ignore
//! #[get("/{user_id}")]
//! pub async fn get_user(user_id: web::Path<String>) -> Result<HttpResponse, AppError> {
//!     let user = UserService::instance().find_by_id(&user_id).await?;
//!     Ok(HttpResponse::Ok().json(UserResponse::from(user)))
//! }
//! ```
//!
//! ## 모듈
//!
//! - [`auth`] - 회원가입, 로그인, 토큰 갱신, 로그아웃, OAuth2
//! - [`users`] - 사용자 조회/수정/삭제
//! - [`notifications`] - 카카오, 이메일, 멀티 채널 알림
//! - [`batch`] - 배치 잡 실행과 상태 조회

pub mod users;
pub mod auth;
pub mod notifications;
pub mod batch;
