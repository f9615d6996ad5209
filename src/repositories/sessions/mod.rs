//! 세션 캐시 계층
//!
//! 이메일 인증 코드와 사용자별 활성 리프레시 토큰을 TTL과 함께 보관합니다.
//! 트랜잭션 없이 덮어쓰기만 지원하며, 정리는 TTL 만료에 맡깁니다.

use async_trait::async_trait;

use crate::core::errors::AppResult;

pub mod session_repository;

pub use session_repository::SessionRepository;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// 이전 코드가 있으면 덮어쓰고 TTL을 다시 시작합니다.
    async fn store_verification_code(&self, email: &str, code: &str) -> AppResult<()>;

    async fn verification_code(&self, email: &str) -> AppResult<Option<String>>;

    /// 사용자당 하나의 슬롯만 있으며 마지막 쓰기가 남습니다.
    async fn store_refresh_token(&self, user_id: &str, token: &str) -> AppResult<()>;

    async fn refresh_token(&self, user_id: &str) -> AppResult<Option<String>>;

    async fn remove_refresh_token(&self, user_id: &str) -> AppResult<()>;
}
