//! 미들웨어 모듈
//!
//! Spring Security의 `SecurityFilterChain`에 해당하는 인증 미들웨어를 제공합니다.
//!
//! | Spring Security | 이 모듈 |
//! |-----------------|---------|
//! | `.anyRequest().authenticated()` | `AuthMiddleware::required()` |
//! | `.hasRole("ADMIN")` | `AuthMiddleware::required_with_role("admin")` |
//! | `oauth2ResourceServer().jwt()` | Bearer 액세스 토큰 검증 |
//!
//! ## 특정 스코프에만 적용
//! ```rust,ignore
//! App::new()
//!     .service(
//!         web::scope("/api/batch")
//!             .wrap(AuthMiddleware::required_with_role("admin"))
//!             .service(handlers::batch::run_job)
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
