//! # 인프라/서버 설정
//!
//! 실행 환경, 비밀번호 해싱 비용, HTTP 서버, MongoDB/Redis 연결,
//! 세션 캐시 TTL, 메일 발송, 프로필 사진 스토리지 설정을 담당합니다.

use std::env;

use super::env_or;

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    pub fn current() -> Self {
        Self::from_str(
            &env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()),
        )
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

pub struct PasswordConfig;

impl PasswordConfig {
    /// `BCRYPT_COST`(4..=15)가 없으면 실행 환경별 기본값을 사용합니다.
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

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_or("PORT", 8080),
            workers: env_or("SERVER_WORKERS", 4),
            allowed_origins,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct DataConfig {
    pub mongodb_uri: String,
    pub database_name: String,
    pub redis_url: String,
}

impl DataConfig {
    pub fn from_env() -> Self {
        Self {
            mongodb_uri: env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            database_name: env::var("DATABASE_NAME")
                .unwrap_or_else(|_| "user_auth_dev".to_string()),
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
        }
    }
}

/// 세션 캐시에 저장되는 단기 상태의 TTL
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub verification_code_ttl_seconds: u64,
    pub refresh_token_ttl_seconds: u64,
}

impl SessionConfig {
    pub fn from_env(refresh_token_ttl_seconds: i64) -> Self {
        Self {
            verification_code_ttl_seconds: env_or("VERIFICATION_CODE_TTL_SECONDS", 10 * 60),
            refresh_token_ttl_seconds: refresh_token_ttl_seconds.max(1) as u64,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    /// 없으면 로그 전용 메일러를 사용합니다.
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub from_address: String,
}

impl MailConfig {
    pub fn from_env() -> Self {
        Self {
            smtp_host: env::var("SMTP_HOST").ok().filter(|host| !host.trim().is_empty()),
            smtp_port: env_or("SMTP_PORT", 587),
            smtp_username: env::var("SMTP_USERNAME").ok(),
            smtp_password: env::var("SMTP_PASSWORD").ok(),
            from_address: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "no-reply@localhost".to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub access_token: Option<String>,
    pub api_base_url: String,
    pub public_base_url: String,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            bucket: env::var("GCS_BUCKET").unwrap_or_else(|_| "user-auth-profile-photos".to_string()),
            access_token: env::var("GCS_ACCESS_TOKEN").ok(),
            api_base_url: env::var("GCS_API_BASE_URL")
                .unwrap_or_else(|_| "https://storage.googleapis.com".to_string()),
            public_base_url: env::var("GCS_PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "https://storage.googleapis.com".to_string()),
        }
    }
}
