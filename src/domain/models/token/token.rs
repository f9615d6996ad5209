//! JWT 클레임 구조체와 토큰 쌍
//!
//! 액세스 토큰과 리프레시 토큰은 서로 다른 비밀키로 서명되며
//! 클레임 구성도 다릅니다. 액세스 토큰만 이메일을 담습니다.
use serde::{Deserialize, Serialize};

/// 액세스 토큰 클레임
///
/// - `sub`: 사용자 ID (ObjectId 16진수)
/// - `email`: 사용자 이메일, 미들웨어가 사용자 조회에 사용
/// - `iss`: 발급자
/// - `iat` / `exp`: 발급/만료 시간 (Unix timestamp)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: String,
    pub email: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

/// 리프레시 토큰 클레임
///
/// `jti`로 같은 초에 발급된 토큰끼리도 값이 달라집니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,
    pub jti: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

/// 로그인/회원가입/소셜 로그인 시 발급되는 토큰 쌍
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// 리프레시 토큰 수명 (초), 쿠키 Max-Age에 사용
    pub refresh_expires_in: i64,
}
