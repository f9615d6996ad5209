//! 외부 계약 모델
//!
//! - [`token`] - JWT 클레임과 토큰 쌍
//! - [`oauth`] - 소셜 프로바이더 사용자 정보 응답
//! - [`auth`] - 인증된 요청의 사용자 추출자

pub mod token;
pub mod oauth;
pub mod auth;

pub use token::*;
pub use oauth::*;
pub use auth::*;
