//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 백엔드 서비스를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 타입 안전하고
//! 일관된 에러 처리를 제공합니다.
//!
//! ## Spring과의 비교
//!
//! | Spring | 이 시스템 |
//! |--------|-----------|
//! | `CustomException(message, errorCode, statusCode)` | `AppError::Custom { .. }` |
//! | `KakaoApiException` | `AppError::KakaoApiError` |
//! | `@ExceptionHandler` | `ResponseError::error_response()` |
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::errors::AppError;
//!
//! async fn find_user(&self, id: &str) -> Result<User, AppError> {
//!     self.user_store
//!         .find_by_id(id)
//!         .await?
//!         .ok_or_else(|| AppError::NotFound(format!("User not found with id: {}", id)))
//! }
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

/// 기본 에러 코드 (`Custom` 에러에서 별도 지정이 없을 때)
pub const DEFAULT_ERROR_CODE: &str = "INTERNAL_ERROR";

/// 애플리케이션 전역 에러 타입
///
/// 백엔드 서비스에서 발생할 수 있는 모든 종류의 에러를 포괄하는 열거형입니다.
/// 자동으로 HTTP 응답으로 변환되어 클라이언트에게 전달됩니다.
#[derive(Error, Debug)]
pub enum AppError {
    /// 데이터베이스 관련 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시/세션 저장소 관련 에러 (500 Internal Server Error)
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러 (409 Conflict)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러 (401 Unauthorized)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러 (403 Forbidden)
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 외부 서비스 에러 (502 Bad Gateway)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 카카오/Solapi API 호출 실패 (502 Bad Gateway)
    #[error("{0}")]
    KakaoApiError(String),

    /// 메시지 브로커(RabbitMQ) 에러 (503 Service Unavailable)
    #[error("Messaging error: {0}")]
    MessagingError(String),

    /// 메일 발송 에러 (500 Internal Server Error)
    #[error("Mail error: {0}")]
    MailError(String),

    /// 에러 코드와 상태 코드를 직접 지정하는 에러
    #[error("{message}")]
    Custom {
        message: String,
        error_code: String,
        status_code: u16,
    },

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// `INTERNAL_ERROR` / 500 기본값을 갖는 `Custom` 에러
    pub fn custom(message: impl Into<String>) -> Self {
        AppError::Custom {
            message: message.into(),
            error_code: DEFAULT_ERROR_CODE.to_string(),
            status_code: 500,
        }
    }

    pub fn custom_with_code(
        message: impl Into<String>,
        error_code: impl Into<String>,
        status_code: u16,
    ) -> Self {
        AppError::Custom {
            message: message.into(),
            error_code: error_code.into(),
            status_code,
        }
    }

    /// 응답 본문의 `code` 필드. `Custom` 에러만 갖습니다.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            AppError::Custom { error_code, .. } => Some(error_code),
            _ => None,
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::ExternalServiceError(_) | AppError::KakaoApiError(_) => StatusCode::BAD_GATEWAY,
            AppError::MessagingError(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Custom { status_code, .. } => {
                StatusCode::from_u16(*status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 각 에러 타입을 적절한 HTTP 상태 코드와 JSON 응답으로 변환합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let mut body = serde_json::json!({
            "error": self.to_string()
        });

        if let Some(code) = self.error_code() {
            body["code"] = serde_json::Value::String(code.to_string());
        }

        actix_web::HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(error: mongodb::error::Error) -> Self {
        AppError::DatabaseError(error.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(error: redis::RedisError) -> Self {
        AppError::RedisError(error.to_string())
    }
}

impl From<lapin::Error> for AppError {
    fn from(error: lapin::Error) -> Self {
        AppError::MessagingError(error.to_string())
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
