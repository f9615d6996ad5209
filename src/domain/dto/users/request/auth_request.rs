//! 인증 관련 요청 DTO
//!
//! 로그인, 회원가입, 이메일 인증, 소셜 로그인 요청 본문을 정의합니다.

use serde::Deserialize;
use validator::Validate;

/// 이메일/비밀번호 로그인 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 회원가입 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    pub password: String,

    #[validate(length(min = 1, max = 30, message = "사용자명은 1-30자 사이여야 합니다"))]
    pub username: String,
}

/// 인증 코드 발송 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendVerificationRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,
}

/// 클라이언트가 보낸 인증 코드
///
/// 문자열(`"00001234"`)과 숫자(`1234`) 두 형태를 모두 받습니다.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SubmittedCode {
    Text(String),
    Number(u64),
}

impl SubmittedCode {
    pub fn as_text(&self) -> String {
        match self {
            SubmittedCode::Text(text) => text.clone(),
            SubmittedCode::Number(number) => number.to_string(),
        }
    }
}

/// 인증 코드 확인 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    pub code: SubmittedCode,
}

/// 소셜 로그인 요청
///
/// `access_token`은 프로바이더가 발급한 토큰이며 서버가 직접 검증합니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SocialLoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "access_token이 필요합니다"))]
    pub access_token: String,
}
