//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 Bearer 액세스 토큰을 검증하고
//! [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)를 요청 extensions에 저장합니다.
//!
//! | 상황 | 응답 |
//! |------|------|
//! | 토큰 없음 / 만료 / 위조 / 리프레시 토큰 | 401 `{"error":"authentication_required"}` |
//! | 역할 요구사항 불충족 | 403 `{"error":"insufficient_permissions"}` |

use std::future::{Ready, ready};
use std::rc::Rc;

use actix_web::{
    Error, Result,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
};

use crate::domain::models::auth::RequiredRole;
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어
pub struct AuthMiddleware {
    /// 접근에 필요한 역할 (선택사항)
    required_role: Option<RequiredRole>,
}

impl AuthMiddleware {
    /// 유효한 액세스 토큰 필요
    pub fn required() -> Self {
        Self { required_role: None }
    }

    /// 유효한 액세스 토큰과 특정 역할 필요
    pub fn required_with_role(role: &str) -> Self {
        Self {
            required_role: Some(RequiredRole::new(role)),
        }
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            required_role: self.required_role.clone(),
        }))
    }
}
