//! 데이터 액세스 계층
//!
//! - [`users`] - MongoDB 기반 자격 증명 저장소 (트랜잭션 지원)
//! - [`sessions`] - Redis 기반 세션 캐시 (인증 코드, 리프레시 토큰)
//!
//! 모든 리포지토리는 `main`에서 명시적으로 생성되어 서비스에 주입됩니다.

pub mod users;
pub mod sessions;
