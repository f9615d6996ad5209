//! Redis 기반 세션 캐시
//!
//! ## 키 구조
//!
//! | 키 | 필드 | TTL |
//! |----|------|-----|
//! | `email:{email}` | `verification_code` | 10분 |
//! | `user:{user_id}` | `refresh_token` | 3일 |

use async_trait::async_trait;

use crate::{
    caching::redis::RedisClient,
    config::SessionConfig,
    core::errors::{AppError, AppResult},
};

use super::SessionStore;

const VERIFICATION_CODE_FIELD: &str = "verification_code";
const REFRESH_TOKEN_FIELD: &str = "refresh_token";

#[derive(Clone)]
pub struct SessionRepository {
    redis: RedisClient,
    config: SessionConfig,
}

impl SessionRepository {
    pub fn new(redis: RedisClient, config: SessionConfig) -> Self {
        Self { redis, config }
    }

    fn email_key(email: &str) -> String {
        format!("email:{}", email)
    }

    fn user_key(user_id: &str) -> String {
        format!("user:{}", user_id)
    }
}

fn cache_error(action: &str, e: redis::RedisError) -> AppError {
    AppError::CacheError(format!("{}: {}", action, e))
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn store_verification_code(&self, email: &str, code: &str) -> AppResult<()> {
        self.redis
            .hset_with_expiry(
                &Self::email_key(email),
                VERIFICATION_CODE_FIELD,
                code,
                self.config.verification_code_ttl_seconds,
            )
            .await
            .map_err(|e| cache_error("인증 코드 저장 실패", e))
    }

    async fn verification_code(&self, email: &str) -> AppResult<Option<String>> {
        self.redis
            .hget(&Self::email_key(email), VERIFICATION_CODE_FIELD)
            .await
            .map_err(|e| cache_error("인증 코드 조회 실패", e))
    }

    async fn store_refresh_token(&self, user_id: &str, token: &str) -> AppResult<()> {
        self.redis
            .hset_with_expiry(
                &Self::user_key(user_id),
                REFRESH_TOKEN_FIELD,
                token,
                self.config.refresh_token_ttl_seconds,
            )
            .await
            .map_err(|e| cache_error("리프레시 토큰 저장 실패", e))
    }

    async fn refresh_token(&self, user_id: &str) -> AppResult<Option<String>> {
        self.redis
            .hget(&Self::user_key(user_id), REFRESH_TOKEN_FIELD)
            .await
            .map_err(|e| cache_error("리프레시 토큰 조회 실패", e))
    }

    async fn remove_refresh_token(&self, user_id: &str) -> AppResult<()> {
        self.redis
            .hdel(&Self::user_key(user_id), REFRESH_TOKEN_FIELD)
            .await
            .map_err(|e| cache_error("리프레시 토큰 삭제 실패", e))
    }
}
