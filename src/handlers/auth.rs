//! Authentication HTTP Handlers
//!
//! 로그인, 회원가입, 이메일 인증, 액세스 토큰 재발급, 소셜 로그인 엔드포인트입니다.
//!
//! # Endpoints
//!
//! | 메서드 | 경로 | 인증 | 성공 |
//! |--------|------|------|------|
//! | `POST` | `/login` | - | 200 |
//! | `POST` | `/signup` | - | 201 |
//! | `POST` | `/send-verify-email` | - | 200 |
//! | `POST` | `/verify-code` | - | 200 |
//! | `GET` | `/renew-token` | 필요 | 200 |
//! | `POST` | `/google-login`, `/kakao-login`, `/naver-login` | - | 201 (신규) / 200 |
use actix_web::{get, http::StatusCode, post, web, HttpResponse};

use crate::{
    config::AuthProvider,
    core::errors::AppError,
    domain::dto::users::request::{
        LoginRequest, SendVerificationRequest, SignupRequest, SocialLoginRequest, VerifyCodeRequest,
    },
    domain::dto::users::response::{MessageResponse, RenewedTokenResponse},
    domain::models::auth::AuthenticatedUser,
    middlewares::AuthMiddleware,
    services::auth::{AuthService, TokenService},
};

use super::{auth_response, validate};

/// 이메일/비밀번호 로그인
///
/// # Endpoint
/// `POST /login`
#[post("/login")]
pub async fn login(
    payload: web::Json<LoginRequest>,
    auth_service: web::Data<AuthService>,
    token_service: web::Data<TokenService>,
) -> Result<HttpResponse, AppError> {
    validate(&*payload)?;

    let session = auth_service.login(&payload.email, &payload.password).await?;

    Ok(auth_response(StatusCode::OK, &session, token_service.config()))
}

/// 회원가입
///
/// # Endpoint
/// `POST /signup`
#[post("/signup")]
pub async fn signup(
    payload: web::Json<SignupRequest>,
    auth_service: web::Data<AuthService>,
    token_service: web::Data<TokenService>,
) -> Result<HttpResponse, AppError> {
    validate(&*payload)?;

    let session = auth_service
        .signup(&payload.email, &payload.password, &payload.username)
        .await?;

    Ok(auth_response(StatusCode::CREATED, &session, token_service.config()))
}

/// 회원가입 전 인증 코드 메일 발송
///
/// # Endpoint
/// `POST /send-verify-email`
#[post("/send-verify-email")]
pub async fn send_verify_email(
    payload: web::Json<SendVerificationRequest>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    validate(&*payload)?;

    auth_service.send_verification_code(&payload.email).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Verification code sent")))
}

/// 인증 코드 확인
///
/// # Endpoint
/// `POST /verify-code`
#[post("/verify-code")]
pub async fn verify_code(
    payload: web::Json<VerifyCodeRequest>,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    validate(&*payload)?;

    auth_service
        .verify_code(&payload.email, &payload.code.as_text())
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Valid code")))
}

/// 인증된 사용자에게 새 액세스 토큰 발급
///
/// 리프레시 토큰 쿠키는 건드리지 않습니다.
///
/// # Endpoint
/// `GET /renew-token`
#[get("/renew-token", wrap = "AuthMiddleware::required()")]
pub async fn renew_token(
    user: AuthenticatedUser,
    auth_service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    let access_token = auth_service.renew_token(&user)?;

    Ok(HttpResponse::Ok()
        .insert_header((actix_web::http::header::AUTHORIZATION, access_token))
        .json(RenewedTokenResponse { user_id: user.id_string() }))
}

#[post("/google-login")]
pub async fn google_login(
    payload: web::Json<SocialLoginRequest>,
    auth_service: web::Data<AuthService>,
    token_service: web::Data<TokenService>,
) -> Result<HttpResponse, AppError> {
    social_login(AuthProvider::Google, payload.into_inner(), &auth_service, &token_service).await
}

#[post("/kakao-login")]
pub async fn kakao_login(
    payload: web::Json<SocialLoginRequest>,
    auth_service: web::Data<AuthService>,
    token_service: web::Data<TokenService>,
) -> Result<HttpResponse, AppError> {
    social_login(AuthProvider::Kakao, payload.into_inner(), &auth_service, &token_service).await
}

#[post("/naver-login")]
pub async fn naver_login(
    payload: web::Json<SocialLoginRequest>,
    auth_service: web::Data<AuthService>,
    token_service: web::Data<TokenService>,
) -> Result<HttpResponse, AppError> {
    social_login(AuthProvider::Naver, payload.into_inner(), &auth_service, &token_service).await
}

/// 세 프로바이더 공통 처리: 신규 가입이면 201, 기존 계정이면 200
async fn social_login(
    provider: AuthProvider,
    payload: SocialLoginRequest,
    auth_service: &AuthService,
    token_service: &TokenService,
) -> Result<HttpResponse, AppError> {
    validate(&payload)?;

    let outcome = auth_service
        .handle_social_login(provider, &payload.email, &payload.access_token)
        .await?;

    let status = if outcome.created { StatusCode::CREATED } else { StatusCode::OK };
    Ok(auth_response(status, &outcome.session, token_service.config()))
}
