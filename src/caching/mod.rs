//! 캐싱 계층 모듈
//!
//! 단기 세션 상태(이메일 인증 코드, 활성 리프레시 토큰)를 보관하는
//! Redis 클라이언트를 제공합니다. 모든 값은 해시 필드로 저장되고
//! 키 단위 TTL로 만료됩니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new(&data_config.redis_url).await?;
//! cache.hset_with_expiry("email:a@b.com", "verification_code", "01234567", 600).await?;
//! let code = cache.hget("email:a@b.com", "verification_code").await?;
//! ```
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
