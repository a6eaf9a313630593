//! API 서버 메인 애플리케이션
//!
//! 인프라 연결(MongoDB, Redis, RabbitMQ, SMTP)을 맺고 레지스트리를 초기화한 뒤
//! 메시지 컨슈머, 배치 스케줄러, HTTP 서버를 순서대로 시작합니다.

use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{App, HttpServer, middleware};
use env_logger::Env;
use log::{error, info, warn};

use api_server_backend::batch::{JobLauncher, scheduler};
use api_server_backend::caching::redis::RedisClient;
use api_server_backend::config::{DatabaseConfig, RabbitMqConfig, RateLimitConfig, RedisConfig, ServerConfig};
use api_server_backend::core::registry::ServiceLocator;
use api_server_backend::db::Database;
use api_server_backend::errors::errors::AppError;
use api_server_backend::mail::SmtpMailer;
use api_server_backend::messaging::consumer::start_consumers;
use api_server_backend::messaging::{AmqpBroker, MessageConsumer};
use api_server_backend::repositories::users::UserRepository;
use api_server_backend::routes::configure_all_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 API 서버 시작중...");

    initialize_data_stores().await.map_err(startup_error)?;
    let broker = connect_message_broker().await;

    ServiceLocator::set(Arc::new(SmtpMailer::from_env().map_err(startup_error)?));
    info!("✅ SMTP 메일러 등록");

    ServiceLocator::initialize_all().map_err(startup_error)?;
    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    if let Some(broker) = broker {
        start_consumers(&broker, MessageConsumer::instance())
            .await
            .map_err(startup_error)?;
    }

    if let Err(e) = UserRepository::instance().create_indexes().await {
        warn!("⚠️ 사용자 인덱스 생성 실패: {}", e);
    }

    scheduler::start(JobLauncher::instance());

    start_http_server().await
}

fn startup_error(e: AppError) -> std::io::Error {
    error!("❌ 시작 실패: {}", e);
    std::io::Error::other(e.to_string())
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 속도 제한, 요청 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server() -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/api/health", bind_address);

    let per_second = RateLimitConfig::per_second();
    let burst_size = RateLimitConfig::burst_size();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(per_second)
        .burst_size(burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("invalid rate limit configuration"))?;

    info!("🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개", per_second, burst_size);

    HttpServer::new(move || {
        App::new()
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
    .bind(&bind_address)?
    .workers(ServerConfig::workers())
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=prod` - `.env.prod`
/// * `PROFILE=dev` - `.env.dev`
/// * 기타 - `.env`
///
/// 로거 초기화 전에 실행되므로 결과는 표준 출력으로 남깁니다.
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_default();

    let filename = match profile.as_str() {
        "prod" => ".env.prod",
        "dev" => ".env.dev",
        _ => ".env",
    };

    match dotenv::from_filename(filename) {
        Ok(_) => println!("{} 파일 로드 됨 (PROFILE={})", filename, profile),
        Err(e) => println!("{} 파일 로드 실패: {}", filename, e),
    }
}

/// 로깅 시스템을 초기화합니다
///
/// `RUST_LOG`가 없으면 `info,actix_web=debug`를 사용합니다.
///
/// ```bash
/// RUST_LOG=api_server_backend::batch=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// MongoDB와 Redis에 연결하고 레지스트리에 등록합니다
async fn initialize_data_stores() -> Result<(), AppError> {
    info!("📡 데이터베이스 연결 중... ({})", DatabaseConfig::database_name());

    let database = Database::new().await?;
    ServiceLocator::set(Arc::new(database));
    info!("✅ MongoDB 연결 성공");

    let redis_client = RedisClient::connect(&RedisConfig::url()).await?;
    ServiceLocator::set(Arc::new(redis_client));
    info!("✅ Redis 연결 성공");

    Ok(())
}

/// RabbitMQ가 설정되어 있으면 연결하고 토폴로지를 선언합니다
///
/// 연결에 실패하면 경고를 남기고 브로커 없이 계속합니다.
/// 이 경우 비동기 발송 API는 503을 반환합니다.
async fn connect_message_broker() -> Option<Arc<AmqpBroker>> {
    if !RabbitMqConfig::is_enabled() {
        info!("⏸️ RabbitMQ 비활성화: 비동기 발송과 컨슈머를 사용하지 않습니다");
        return None;
    }

    let broker = match AmqpBroker::connect(&RabbitMqConfig::uri()).await {
        Ok(broker) => broker,
        Err(e) => {
            warn!("⚠️ RabbitMQ 연결 실패, 브로커 없이 계속합니다: {}", e);
            return None;
        }
    };

    if let Err(e) = broker.declare_topology().await {
        warn!("⚠️ RabbitMQ 토폴로지 선언 실패, 브로커 없이 계속합니다: {}", e);
        return None;
    }

    let broker = Arc::new(broker);
    ServiceLocator::set(broker.clone());

    Some(broker)
}

/// CORS 설정
///
/// 프론트엔드 개발 서버와 API 자체 origin을 허용하고 쿠키(`SESSION`) 전송을 지원합니다.
fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
