//! # Authentication Configuration Module
//!
//! JWT 토큰, 리프레시 쿠키, 소셜 로그인 프로바이더 관련 설정을 관리합니다.
//! 모든 설정은 애플리케이션 시작 시 한 번 읽어서 서비스에 주입합니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### JWT 토큰 설정
//! ```bash
//! export ACCESS_TOKEN_SECRET="your-access-secret"
//! export REFRESH_TOKEN_SECRET="your-refresh-secret"
//! export JWT_ISSUER="user-auth-backend"
//! export ACCESS_TOKEN_TTL_SECONDS="600"
//! export REFRESH_TOKEN_TTL_SECONDS="259200"
//! ```
//!
//! ### 소셜 로그인 (사용자 정보 엔드포인트)
//! ```bash
//! export GOOGLE_USERINFO_URL="https://www.googleapis.com/oauth2/v2/userinfo"
//! export KAKAO_USERINFO_URL="https://kapi.kakao.com/v2/user/me"
//! export NAVER_USERINFO_URL="https://openapi.naver.com/v1/nid/me"
//! ```

use std::env;

use super::data_config::Environment;
use super::env_or;

/// JWT 발급/검증 설정
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub issuer: String,
    pub access_ttl_seconds: i64,
    pub refresh_ttl_seconds: i64,
    /// 리프레시 토큰 쿠키에 Secure 속성을 붙일지 여부
    pub secure_cookie: bool,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        let access_secret = env::var("ACCESS_TOKEN_SECRET").unwrap_or_else(|_| {
            log::warn!("ACCESS_TOKEN_SECRET not set, using default (not secure for production!)");
            "access-token-secret".to_string()
        });
        let refresh_secret = env::var("REFRESH_TOKEN_SECRET").unwrap_or_else(|_| {
            log::warn!("REFRESH_TOKEN_SECRET not set, using default (not secure for production!)");
            "refresh-token-secret".to_string()
        });

        Self {
            access_secret,
            refresh_secret,
            issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "user-auth-backend".to_string()),
            access_ttl_seconds: env_or("ACCESS_TOKEN_TTL_SECONDS", 600),
            refresh_ttl_seconds: env_or("REFRESH_TOKEN_TTL_SECONDS", 3 * 24 * 60 * 60),
            secure_cookie: env_or(
                "REFRESH_COOKIE_SECURE",
                Environment::current() == Environment::Production,
            ),
        }
    }
}

/// 소셜 프로바이더 사용자 정보 엔드포인트 설정
#[derive(Debug, Clone)]
pub struct SocialConfig {
    pub google_userinfo_url: String,
    pub kakao_userinfo_url: String,
    pub naver_userinfo_url: String,
}

impl SocialConfig {
    pub fn from_env() -> Self {
        Self {
            google_userinfo_url: env::var("GOOGLE_USERINFO_URL")
                .unwrap_or_else(|_| "https://www.googleapis.com/oauth2/v2/userinfo".to_string()),
            kakao_userinfo_url: env::var("KAKAO_USERINFO_URL")
                .unwrap_or_else(|_| "https://kapi.kakao.com/v2/user/me".to_string()),
            naver_userinfo_url: env::var("NAVER_USERINFO_URL")
                .unwrap_or_else(|_| "https://openapi.naver.com/v1/nid/me".to_string()),
        }
    }
}

/// 계정을 만든 인증 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// 이메일/비밀번호
    Local,

    Google,

    Kakao,

    Naver,
}

impl AuthProvider {
    /// 사용자 메시지에 쓰는 표시 이름
    pub fn display_name(&self) -> &'static str {
        match self {
            AuthProvider::Local => "Local",
            AuthProvider::Google => "Google",
            AuthProvider::Kakao => "Kakao",
            AuthProvider::Naver => "Naver",
        }
    }
}
