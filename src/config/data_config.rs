//! 서버, 데이터 저장소, 실행 환경 설정
//!
//! 모든 값은 환경 변수에서 읽으며, 없으면 개발용 기본값을 사용합니다.
//!
//! | 환경 변수 | 기본값 |
//! |-----------|--------|
//! | `ENVIRONMENT` | `production` |
//! | `HOST` / `PORT` | `0.0.0.0` / `8080` |
//! | `MONGODB_URI` | `mongodb://localhost:27017` |
//! | `DATABASE_NAME` | `api_server_dev` |
//! | `REDIS_URL` | `redis://localhost:6379` |
//! | `BCRYPT_COST` | 환경별 기본값 |

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    pub fn current() -> Self {
        let value = env::var("ENVIRONMENT")
            .or_else(|_| env::var("PROFILE"))
            .unwrap_or_else(|_| "production".to_string());

        Self::from_name(&value)
    }

    /// 알 수 없는 이름은 `Production`으로 취급합니다.
    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" | "local" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// 비밀번호 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// `BCRYPT_COST`(4~15)가 유효하면 그 값을, 아니면 환경별 기본값을 사용합니다.
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if (4..=15).contains(&cost) {
                    return cost;
                }
            }
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// HTTP 서버 설정
pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        env::var("PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(8080)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }

    pub fn workers() -> usize {
        env::var("SERVER_WORKERS")
            .ok()
            .and_then(|workers| workers.parse().ok())
            .filter(|workers| *workers > 0)
            .unwrap_or(4)
    }
}

/// 요청 속도 제한 (actix-governor)
pub struct RateLimitConfig;

impl RateLimitConfig {
    /// 초당 허용 요청 수
    pub fn per_second() -> u64 {
        env::var("RATE_LIMIT_PER_SECOND")
            .ok()
            .and_then(|value| value.parse().ok())
            .filter(|value| *value > 0)
            .unwrap_or(100)
    }

    /// 버스트 허용량
    pub fn burst_size() -> u32 {
        env::var("RATE_LIMIT_BURST_SIZE")
            .ok()
            .and_then(|value| value.parse().ok())
            .filter(|value| *value > 0)
            .unwrap_or(200)
    }
}

/// MongoDB 연결 설정
pub struct DatabaseConfig;

impl DatabaseConfig {
    pub fn uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "api_server_dev".to_string())
    }

    pub fn app_name() -> String {
        "api_server".to_string()
    }
}

/// Redis 연결 설정
pub struct RedisConfig;

impl RedisConfig {
    pub fn url() -> String {
        env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// 사용자 조회 캐시 TTL (초)
    pub fn user_cache_ttl_seconds() -> u64 {
        env::var("USER_CACHE_TTL_SECONDS")
            .ok()
            .and_then(|ttl| ttl.parse().ok())
            .unwrap_or(600)
    }
}
