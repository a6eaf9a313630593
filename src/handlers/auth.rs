//! Authentication HTTP Handlers
//!
//! 회원가입, 로컬 로그인, 토큰 갱신, 로그아웃, OAuth2 로그인을 처리합니다.
//! `/api/auth/**`는 모두 공개 경로이므로 `/me`는 Bearer 토큰을 직접 확인합니다.
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `POST` | `/api/auth/register` | 회원가입 (JSON) |
//! | `POST` | `/api/auth/login` | 로그인 (form / query), `SESSION` 쿠키 발급 |
//! | `POST` | `/api/auth/refresh` | 리프레시 토큰으로 토큰 쌍 재발급 |
//! | `POST` | `/api/auth/logout` | 세션 무효화, 쿠키 삭제 |
//! | `GET` | `/api/auth/me` | 현재 사용자 |
//! | `GET` | `/api/auth/oauth2/{provider}/authorize` | 인증 URL 생성 |
//! | `GET` | `/api/auth/oauth2/{provider}/callback` | 콜백 처리 후 302 리다이렉트 |
use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::http::header;
use actix_web::{Either, HttpRequest, HttpResponse, get, post, web};
use serde_json::json;
use validator::Validate;

use crate::config::SessionConfig;
use crate::domain::dto::users::request::{CreateUserRequest, LoginRequest, OAuthCallbackQuery, RefreshTokenRequest};
use crate::domain::dto::users::response::{LoginResponse, TokenResponse, UserResponse};
use crate::errors::errors::AppError;
use crate::services::auth::{OAuth2Service, SessionService, TokenService};
use crate::services::users::UserService;

/// 세션 쿠키 이름
pub const SESSION_COOKIE: &str = "SESSION";

/// 로그인 세션 쿠키 (HttpOnly, SameSite=Lax, path `/`)
pub fn session_cookie(session_id: &str, max_age_seconds: u64) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, session_id.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(SessionConfig::secure_cookie())
        .max_age(Duration::seconds(max_age_seconds as i64))
        .finish()
}

/// 세션 쿠키를 지우는 만료 쿠키
pub fn expired_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();
    cookie.make_removal();
    cookie
}

/// 회원가입
///
/// # Endpoint
/// `POST /api/auth/register`
#[post("/register")]
pub async fn register(payload: web::Json<CreateUserRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user = UserService::instance().create(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// 로컬 로그인
///
/// form 본문과 query 파라미터를 모두 받습니다.
/// 성공하면 토큰 쌍을 반환하고 서버 측 세션을 만들어 `SESSION` 쿠키로 내려줍니다.
///
/// # Endpoint
/// `POST /api/auth/login`
#[post("/login")]
pub async fn login(
    params: Either<web::Form<LoginRequest>, web::Query<LoginRequest>>,
) -> Result<HttpResponse, AppError> {
    let params = match params {
        Either::Left(form) => form.into_inner(),
        Either::Right(query) => query.into_inner(),
    };
    params.validate()?;

    let user = UserService::instance()
        .verify_credentials(&params.username, &params.password)
        .await?;

    let token_service = TokenService::instance();
    let tokens = token_service.generate_token_pair(&user)?;

    let session_service = SessionService::instance();
    let session = session_service
        .create(&user.id_string().unwrap_or_default(), &user.username)
        .await?;

    log::info!("🔐 로그인 성공: {}", user.username);

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&session.id, session_service.max_inactive_seconds()))
        .json(LoginResponse::new(tokens, UserResponse::from(user))))
}

/// 토큰 갱신
///
/// # Endpoint
/// `POST /api/auth/refresh`
#[post("/refresh")]
pub async fn refresh(payload: web::Json<RefreshTokenRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let token_service = TokenService::instance();
    let claims = token_service.verify_refresh_token(&payload.refresh_token)?;

    let user = UserService::instance()
        .find_by_id(&claims.uid)
        .await
        .map_err(|_| AppError::AuthenticationError("사용자를 찾을 수 없습니다".to_string()))?;

    if !user.is_active() {
        log::warn!("비활성 사용자의 토큰 갱신 시도: {}", user.username);
        return Err(AppError::AuthenticationError("계정이 비활성화되었습니다".to_string()));
    }

    let tokens = token_service.generate_token_pair(&user)?;

    Ok(HttpResponse::Ok().json(TokenResponse::from(tokens)))
}

/// 로그아웃
///
/// # Endpoint
/// `POST /api/auth/logout`
#[post("/logout")]
pub async fn logout(req: HttpRequest) -> Result<HttpResponse, AppError> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        SessionService::instance().invalidate(cookie.value()).await?;
    }

    Ok(HttpResponse::Ok()
        .cookie(expired_session_cookie())
        .json(json!({ "message": "Logged out" })))
}

/// 현재 사용자 조회
///
/// # Endpoint
/// `GET /api/auth/me`
#[get("/me")]
pub async fn me(req: HttpRequest) -> Result<HttpResponse, AppError> {
    let token_service = TokenService::instance();

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    let token = token_service.extract_bearer_token(auth_header)?;
    let claims = token_service.verify_access_token(token)?;

    let user = UserService::instance()
        .find_by_id(&claims.uid)
        .await
        .map_err(|_| AppError::AuthenticationError("사용자를 찾을 수 없습니다".to_string()))?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// OAuth2 인증 URL 생성
///
/// # Endpoint
/// `GET /api/auth/oauth2/{provider}/authorize`
#[get("/oauth2/{provider}/authorize")]
pub async fn oauth2_authorize(provider: web::Path<String>) -> Result<HttpResponse, AppError> {
    let response = OAuth2Service::instance().authorize(&provider).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// OAuth2 콜백
///
/// 로그인에 성공하면 액세스 토큰을 붙여 프론트엔드로 302 리다이렉트합니다.
///
/// # Endpoint
/// `GET /api/auth/oauth2/{provider}/callback?code={code}&state={state}`
#[get("/oauth2/{provider}/callback")]
pub async fn oauth2_callback(
    provider: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    if let Some(error) = &query.error {
        let description = query
            .error_description
            .as_deref()
            .unwrap_or("OAuth 인증이 취소되었거나 실패했습니다");
        log::warn!("OAuth2 에러 ({}): {} - {}", provider, error, description);
        return Err(AppError::AuthenticationError(description.to_string()));
    }

    let (Some(code), Some(state)) = (query.code.as_deref(), query.state.as_deref()) else {
        return Err(AppError::ValidationError("code and state are required".to_string()));
    };

    let oauth2_service = OAuth2Service::instance();
    let user = oauth2_service.callback(&provider, code, state).await?;
    let location = oauth2_service.success_redirect(&user)?;

    log::info!("🔐 OAuth2 로그인 성공 ({}): {}", provider, user.username);

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish())
}
