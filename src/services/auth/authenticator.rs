//! # 요청 인증 판정
//!
//! 보호된 라우트로 들어온 요청의 액세스 토큰(Bearer 헤더)과 리프레시 토큰(쿠키)을
//! 보고 다음 중 하나로 판정합니다.
//!
//! ```text
//! 토큰 둘 중 하나라도 없음 ───────────────► Rejected(MissingCredentials)
//! 액세스 토큰 유효 ─┬─ 이메일로 사용자 조회 ─► Authenticated(User)
//!                  └─ 사용자 없음 ─────────► Rejected(UserNotFound)
//! 액세스 토큰 만료 ─┬─ 리프레시 토큰 유효 ───► Renewed { access_token }
//!                  └─ 무효/불일치/만료 ────► Rejected(ReauthenticationRequired)
//! 그 밖의 검증 실패 ───────────────────────► Rejected(InvalidToken)
//! ```
//!
//! `Renewed`인 경우 보호된 핸들러는 실행되지 않으며 클라이언트가 새 토큰으로 다시 요청해야 합니다.

use std::sync::Arc;

use crate::{
    domain::entities::users::user::User,
    domain::models::token::AccessClaims,
    repositories::{sessions::SessionStore, users::CredentialStore},
};

use super::token_service::{TokenError, TokenService};

#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    Authenticated(User),
    /// 만료된 액세스 토큰을 대신할 새 토큰
    Renewed { access_token: String },
    Rejected(AuthRejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    MissingCredentials,
    InvalidToken,
    /// 리프레시 토큰으로도 갱신할 수 없어 다시 로그인해야 함
    ReauthenticationRequired,
    UserNotFound,
    /// 저장소 장애 등 내부 오류
    Internal,
}

pub struct Authenticator {
    tokens: Arc<TokenService>,
    users: Arc<dyn CredentialStore>,
    sessions: Arc<dyn SessionStore>,
}

impl Authenticator {
    pub fn new(
        tokens: Arc<TokenService>,
        users: Arc<dyn CredentialStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self { tokens, users, sessions }
    }

    pub async fn authenticate(&self, access: Option<&str>, refresh: Option<&str>) -> AuthOutcome {
        let (Some(access), Some(refresh)) = (access, refresh) else {
            return AuthOutcome::Rejected(AuthRejection::MissingCredentials);
        };

        match self.tokens.verify_access_token(access) {
            Ok(claims) => self.load_user(&claims).await,
            Err(TokenError::Expired) => self.renew(access, refresh).await,
            Err(TokenError::Invalid(reason)) => {
                log::debug!("액세스 토큰 검증 실패: {}", reason);
                AuthOutcome::Rejected(AuthRejection::InvalidToken)
            }
        }
    }

    async fn load_user(&self, claims: &AccessClaims) -> AuthOutcome {
        match self.users.find_by_email(&claims.email).await {
            Ok(Some(user)) => AuthOutcome::Authenticated(user),
            Ok(None) => AuthOutcome::Rejected(AuthRejection::UserNotFound),
            Err(e) => {
                log::error!("인증 중 사용자 조회 실패: {}", e);
                AuthOutcome::Rejected(AuthRejection::Internal)
            }
        }
    }

    async fn renew(&self, access: &str, refresh: &str) -> AuthOutcome {
        let claims = match self.tokens.decode_expired_access_token(access) {
            Ok(claims) => claims,
            Err(e) => {
                log::debug!("만료된 액세스 토큰 복원 실패: {}", e);
                return AuthOutcome::Rejected(AuthRejection::InvalidToken);
            }
        };

        let refresh_claims = match self.tokens.verify_refresh_token(refresh) {
            Ok(refresh_claims) => refresh_claims,
            Err(e) => {
                log::debug!("리프레시 토큰 검증 실패 (사용자 {}): {}", claims.sub, e);
                return AuthOutcome::Rejected(AuthRejection::ReauthenticationRequired);
            }
        };

        if refresh_claims.sub != claims.sub {
            log::warn!("리프레시 토큰 주체 불일치: {} != {}", refresh_claims.sub, claims.sub);
            return AuthOutcome::Rejected(AuthRejection::ReauthenticationRequired);
        }

        match self.sessions.refresh_token(&claims.sub).await {
            Ok(Some(stored)) if stored == refresh => {}
            Ok(_) => {
                log::debug!("저장된 리프레시 토큰과 다름 (사용자 {})", claims.sub);
                return AuthOutcome::Rejected(AuthRejection::ReauthenticationRequired);
            }
            Err(e) => {
                log::error!("리프레시 토큰 조회 실패: {}", e);
                return AuthOutcome::Rejected(AuthRejection::Internal);
            }
        }

        match self.tokens.renew_access_token(&claims) {
            Ok(access_token) => {
                log::info!("액세스 토큰 재발급: {}", claims.sub);
                AuthOutcome::Renewed { access_token }
            }
            Err(e) => {
                log::error!("액세스 토큰 재발급 실패: {}", e);
                AuthOutcome::Rejected(AuthRejection::Internal)
            }
        }
    }
}
