//! 사용자 인증 서비스 메인 애플리케이션
//!
//! 설정을 읽고 MongoDB, Redis 연결과 외부 협력자를 만든 뒤
//! 서비스 그래프를 조립해 Actix-web HTTP 서버를 실행합니다.

use std::process;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use user_auth_backend::caching::redis::RedisClient;
use user_auth_backend::config::{
    DataConfig, JwtConfig, MailConfig, PasswordConfig, ServerConfig, SessionConfig, SocialConfig,
    StorageConfig,
};
use user_auth_backend::core::state::{AppDependencies, AppState};
use user_auth_backend::db::Database;
use user_auth_backend::repositories::sessions::SessionRepository;
use user_auth_backend::repositories::users::UserRepository;
use user_auth_backend::services::auth::{PasswordHasher, SocialAuthService, TokenService};
use user_auth_backend::services::mail::build_mailer;
use user_auth_backend::services::storage::GcsObjectStorage;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 사용자 인증 서비스 시작중...");

    let server_config = ServerConfig::from_env();
    let data_config = DataConfig::from_env();
    let jwt_config = JwtConfig::from_env();
    let session_config = SessionConfig::from_env(jwt_config.refresh_ttl_seconds);

    let (database, redis_client) = initialize_data_stores(&data_config).await;

    let user_repository = UserRepository::new(database.clone());
    if let Err(e) = user_repository.create_indexes().await {
        abort("MongoDB 인덱스 생성 실패", e);
    }

    let mailer = match build_mailer(&MailConfig::from_env(), session_config.verification_code_ttl_seconds) {
        Ok(mailer) => mailer,
        Err(e) => abort("메일러 초기화 실패", e),
    };

    let http_client = reqwest::Client::new();
    let state = AppState::new(AppDependencies {
        users: Arc::new(user_repository),
        sessions: Arc::new(SessionRepository::new(redis_client, session_config)),
        tokens: Arc::new(TokenService::new(jwt_config)),
        mailer: Arc::from(mailer),
        storage: Arc::new(GcsObjectStorage::new(http_client.clone(), StorageConfig::from_env())),
        social: SocialAuthService::from_config(http_client, &SocialConfig::from_env()),
        hasher: PasswordHasher::new(PasswordConfig::bcrypt_cost()),
    });

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    let result = start_http_server(server_config, state).await;

    database.shutdown().await;
    result
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 요청 로깅, 경로 정규화 미들웨어를 적용합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(config: ServerConfig, state: AppState) -> std::io::Result<()> {
    let bind_address = config.bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let allowed_origins = config.allowed_origins.clone();

    HttpServer::new(move || {
        let state = state.clone();

        App::new()
            .wrap(configure_cors(&allowed_origins))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(move |cfg| state.register(cfg))
    })
    .bind(&bind_address)?
    .workers(config.workers)
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// # Environment Variables
///
/// * `PROFILE=dev` - .env.dev 파일 로드
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_default();

    match profile.as_str() {
        "prod" => {
            if let Err(e) = dotenv::from_filename(".env.prod") {
                eprintln!(".env.prod 파일 로드 실패: {}", e);
            }
        }
        "dev" => {
            if let Err(e) = dotenv::from_filename(".env.dev") {
                eprintln!(".env.dev 파일 로드 실패: {}", e);
            }
        }
        _ => {
            dotenv().ok();
        }
    }
}

/// 로깅 시스템을 초기화합니다
///
/// # Environment Variables
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=info")
///
/// ```bash
/// RUST_LOG=user_auth_backend::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=info"));
}

/// MongoDB와 Redis 연결을 초기화합니다
///
/// 연결에 실패하면 에러를 로그로 남기고 프로세스를 종료합니다.
async fn initialize_data_stores(config: &DataConfig) -> (Database, RedisClient) {
    info!("📡 데이터베이스 연결 중...");

    let database = match Database::new(config).await {
        Ok(database) => database,
        Err(e) => abort("MongoDB 연결 실패", e),
    };

    let redis_client = match RedisClient::new(&config.redis_url).await {
        Ok(client) => client,
        Err(e) => abort("Redis 연결 실패", e),
    };

    (database, redis_client)
}

/// CORS 설정을 구성합니다
///
/// 클라이언트가 재발급된 액세스 토큰을 읽을 수 있도록 `Authorization` 헤더를 노출하고,
/// 리프레시 토큰 쿠키 전송을 위해 자격 증명을 허용합니다.
fn configure_cors(allowed_origins: &[String]) -> Cors {
    let cors = allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin));

    cors.allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .expose_headers(vec![header::AUTHORIZATION])
        .supports_credentials()
        .max_age(3600)
}

fn abort(context: &str, err: impl std::fmt::Display) -> ! {
    error!("❌ {}: {}", context, err);
    process::exit(1);
}
