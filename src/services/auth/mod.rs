//! 인증 서비스 모듈
//!
//! # Features
//!
//! - HS256 액세스/리프레시 토큰 발급과 검증 ([`TokenService`])
//! - 액세스 토큰 만료 시 리프레시 토큰으로 조용히 재발급 ([`Authenticator`])
//! - 로그인, 회원가입, 이메일 인증 코드 ([`AuthService`])
//! - Google, Kakao, Naver 소셜 로그인 토큰 검증 ([`SocialAuthService`])
//!
//! # Examples
//!
//! ```rust,ignore
//! let session = auth_service.login("a@x.com", "password123").await?;
//! let claims = token_service.verify_access_token(&session.tokens.access_token)?;
//! ```

pub mod token_service;
pub mod authenticator;
pub mod auth_service;
pub mod social_auth_service;
pub mod password;

pub use token_service::*;
pub use authenticator::*;
pub use auth_service::*;
pub use social_auth_service::*;
pub use password::PasswordHasher;
