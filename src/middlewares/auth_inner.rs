//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, forward_ready};
use actix_web::http::header;
use actix_web::{Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;
use serde_json::json;

use crate::domain::models::auth::{AuthenticatedUser, RequiredRole};
use crate::errors::errors::AppError;
use crate::services::auth::TokenService;

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub required_role: Option<RequiredRole>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let required_role = self.required_role.clone();

        Box::pin(async move {
            let auth_result = authenticate(&req, &TokenService::instance());

            let user = match auth_result {
                Ok(user) => user,
                Err(err) => {
                    log::warn!("인증 실패 ({}): {}", req.path(), err);
                    let response = HttpResponse::Unauthorized().json(json!({
                        "error": "authentication_required",
                        "message": err.to_string()
                    }));
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            };

            if let Some(required) = &required_role {
                if !required.is_satisfied(&user.roles) {
                    log::warn!(
                        "권한 부족: {} ({:?}), 필요 권한: {}",
                        user.username,
                        user.roles,
                        required.describe()
                    );
                    let response = HttpResponse::Forbidden().json(json!({
                        "error": "insufficient_permissions",
                        "message": format!("Required role: {}", required.describe())
                    }));
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
            }

            log::debug!("인증 성공: {}", user.username);
            req.extensions_mut().insert(user);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// Authorization 헤더의 Bearer 액세스 토큰을 검증합니다.
///
/// 리프레시 토큰은 거부됩니다.
fn authenticate(req: &ServiceRequest, token_service: &TokenService) -> Result<AuthenticatedUser, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Authorization 헤더가 없습니다".to_string()))?;

    let token = token_service.extract_bearer_token(auth_header)?;
    let claims = token_service.verify_access_token(token)?;

    Ok(AuthenticatedUser::from(claims))
}
