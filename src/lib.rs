//! 사용자 인증 백엔드
//!
//! 이메일/비밀번호 로그인, 이메일 인증 코드, 액세스/리프레시 토큰 발급과
//! 조용한 재발급, 프로필 관리, Google/Kakao/Naver 소셜 로그인을 제공합니다.
//!
//! # Features
//!
//! - **JWT 인증**: HS256 액세스 토큰 + 세션 캐시에 저장되는 리프레시 토큰
//! - **조용한 재발급**: 만료된 액세스 토큰은 리프레시 토큰으로 새로 발급 (403 + `Authorization` 헤더)
//! - **이메일 인증**: 8자리 코드, 10분 TTL
//! - **소셜 로그인**: 프로바이더 토큰을 서버에서 직접 검증
//! - **MongoDB**: 사용자 데이터 영구 저장 (트랜잭션)
//! - **Redis**: 인증 코드와 리프레시 토큰 저장
//!
//! # Architecture
//!
//! ```text
//! 요청 ──▶ routes ──▶ [AuthMiddleware] ──▶ handlers ──▶ services
//!                         │                               │
//!                         ▼                               ▼
//!                   Authenticator            CredentialStore (MongoDB)
//!                   (토큰 판정/재발급)        SessionStore    (Redis)
//!                                            Mailer / ObjectStorage / 소셜 검증
//! ```
//!
//! 외부 협력자는 모두 트레이트 뒤에 있고, `main`에서
//! [`core::state::AppDependencies`]로 묶어 주입합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use user_auth_backend::core::state::{AppDependencies, AppState};
//!
//! let state = AppState::new(deps);
//! let session = state.auth_service.login("a@x.com", "password123").await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;

#[cfg(test)]
pub(crate) mod test_support;
