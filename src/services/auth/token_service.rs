//! JWT 토큰 관리 서비스 구현
//!
//! 액세스 토큰과 리프레시 토큰의 생성, 검증, 재발급을 담당합니다.
//! 두 토큰은 서로 다른 비밀키(HS256)로 서명되며 만료 판정에 여유 시간을 두지 않습니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    config::JwtConfig,
    core::errors::{AppError, ErrorContext},
    domain::entities::users::user::User,
    domain::models::token::{AccessClaims, RefreshClaims, TokenPair},
};

/// 리프레시 토큰을 담는 쿠키 이름
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// 토큰 검증 실패 사유
///
/// 미들웨어는 만료와 그 밖의 실패를 다르게 처리합니다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(e.to_string()),
        }
    }
}

/// JWT 토큰 관리 서비스
///
/// 서명 키는 생성 시 한 번 만들어 재사용합니다.
pub struct TokenService {
    config: JwtConfig,
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            config,
        }
    }

    pub fn config(&self) -> &JwtConfig {
        &self.config
    }

    /// 사용자를 위한 액세스 토큰 생성
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let access_token = token_service.generate_access_token(&user)?;
    /// ```
    pub fn generate_access_token(&self, user: &User) -> Result<String, AppError> {
        self.issue_access_token(user.id_string(), user.email.clone())
    }

    /// 만료된 토큰에서 복원한 클레임으로 새 액세스 토큰 생성
    ///
    /// `sub`와 `email`은 그대로 유지하고 `iat`/`exp`만 새로 정합니다.
    pub fn renew_access_token(&self, claims: &AccessClaims) -> Result<String, AppError> {
        self.issue_access_token(claims.sub.clone(), claims.email.clone())
    }

    fn issue_access_token(&self, sub: String, email: String) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub,
            email,
            iss: self.config.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.config.access_ttl_seconds)).timestamp(),
        };

        self.encode_access_claims(&claims)
    }

    pub(crate) fn encode_access_claims(&self, claims: &AccessClaims) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.access_encoding)
            .context("JWT 토큰 생성 실패")
    }

    /// 리프레시 토큰 생성
    ///
    /// 클라이언트에게는 불투명한 값이며 httpOnly 쿠키로만 전달됩니다.
    pub fn generate_refresh_token(&self, user_id: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = RefreshClaims {
            sub: user_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            iss: self.config.issuer.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.config.refresh_ttl_seconds)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.refresh_encoding)
            .context("리프레시 토큰 생성 실패")
    }

    /// 토큰 쌍 생성 (액세스 + 리프레시)
    pub fn generate_token_pair(&self, user: &User) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.generate_access_token(user)?,
            refresh_token: self.generate_refresh_token(&user.id_string())?,
            refresh_expires_in: self.config.refresh_ttl_seconds,
        })
    }

    fn validation(&self, validate_exp: bool) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = validate_exp;
        validation.set_issuer(&[self.config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation
    }

    /// 액세스 토큰 서명과 만료를 검증합니다.
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        decode::<AccessClaims>(token, &self.access_decoding, &self.validation(true))
            .map(|data| data.claims)
            .map_err(TokenError::from)
    }

    /// 만료 여부를 무시하고 액세스 토큰의 클레임을 복원합니다.
    ///
    /// 서명과 발급자는 여전히 검증합니다.
    pub fn decode_expired_access_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        decode::<AccessClaims>(token, &self.access_decoding, &self.validation(false))
            .map(|data| data.claims)
            .map_err(TokenError::from)
    }

    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        decode::<RefreshClaims>(token, &self.refresh_decoding, &self.validation(true))
            .map(|data| data.claims)
            .map_err(TokenError::from)
    }

    /// `Bearer {token}` 형식의 헤더에서 토큰 부분만 추출합니다.
    pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
        auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}
