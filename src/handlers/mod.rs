//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 서비스 호출로 옮기고 결과를 응답으로 직렬화하는 핸들러 모음입니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Client (Browser, Mobile App)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   AuthMiddleware (보호된 라우트만)
//! ├─────────────────────────────────────────────┤
//!   Handlers (이 모듈)                             ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직                        ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - MongoDB / Redis                 ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 모듈 구성
//!
//! - [`auth`] - 로그인, 회원가입, 이메일 인증, 토큰 재발급, 소셜 로그인
//! - [`users`] - 프로필/비밀번호 변경, 계정 삭제, 사용자 조회
//!
//! ## 인증 응답 규칙
//!
//! 로그인 계열 응답은 본문에 사용자 요약을 담고, 액세스 토큰은 `Authorization`
//! 응답 헤더로, 리프레시 토큰은 `refresh_token` httpOnly 쿠키로 전달합니다.
//!
//! 핸들러는 `Result<HttpResponse, AppError>`를 반환하며 에러 응답 변환은
//! `AppError`의 `ResponseError` 구현이 담당합니다.

use actix_web::{
    cookie::{time::Duration as CookieDuration, Cookie, SameSite},
    http::{header, StatusCode},
    HttpRequest, HttpResponse,
};
use validator::Validate;

use crate::{
    config::JwtConfig,
    core::errors::{AppError, AppResult},
    services::auth::{AuthSession, REFRESH_TOKEN_COOKIE},
};

pub mod auth;
pub mod users;

/// 요청 DTO 검증
///
/// 필드별 메시지는 로그에만 남기고 클라이언트에는 `Bad request`를 돌려줍니다.
pub(crate) fn validate<T: Validate>(payload: &T) -> AppResult<()> {
    payload.validate().map_err(|e| {
        log::debug!("요청 검증 실패: {}", e);
        AppError::bad_request()
    })
}

/// 로그인 계열 응답 생성
pub(crate) fn auth_response(status: StatusCode, session: &AuthSession, config: &JwtConfig) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header((header::AUTHORIZATION, session.tokens.access_token.clone()))
        .cookie(refresh_cookie(&session.tokens.refresh_token, session.tokens.refresh_expires_in, config))
        .json(&session.user)
}

fn refresh_cookie<'a>(token: &'a str, max_age_seconds: i64, config: &JwtConfig) -> Cookie<'a> {
    Cookie::build(REFRESH_TOKEN_COOKIE, token)
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .secure(config.secure_cookie)
        .max_age(CookieDuration::seconds(max_age_seconds))
        .finish()
}

/// JSON 본문 파싱 실패를 400 응답으로 변환
pub fn json_error_handler(err: actix_web::error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::debug!("JSON 본문 파싱 실패 {}: {}", req.path(), err);
    AppError::bad_request().into()
}

/// 쿼리 문자열 파싱 실패를 400 응답으로 변환
pub fn query_error_handler(err: actix_web::error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::debug!("쿼리 파싱 실패 {}: {}", req.path(), err);
    AppError::bad_request().into()
}
