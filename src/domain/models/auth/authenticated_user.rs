use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;
use crate::domain::models::token::token::TokenClaims;

/// JWT 토큰에서 추출된 사용자 정보
///
/// `AuthMiddleware`가 검증에 성공하면 요청 extensions에 저장하고,
/// 핸들러는 추출자로 꺼내 씁니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// 사용자 고유 ID
    pub user_id: String,

    /// 로그인 아이디 (토큰의 `sub`)
    pub username: String,

    /// 인증 프로바이더
    pub auth_provider: AuthProvider,

    /// 사용자 역할 목록
    pub roles: Vec<String>,
}

impl From<TokenClaims> for AuthenticatedUser {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.uid,
            username: claims.sub,
            auth_provider: claims.provider,
            roles: claims.roles,
        }
    }
}

/// ActixWeb FromRequest trait 구현
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "인증되지 않은 요청입니다"
            ))),
        }
    }
}
