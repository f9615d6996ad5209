//! # 인증 비즈니스 로직
//!
//! 로그인, 회원가입, 이메일 인증 코드, 액세스 토큰 재발급, 소셜 로그인을 담당합니다.
//!
//! 쓰기가 필요한 작업은 하나의 [`UserTransaction`] 안에서 수행되며, 어느 단계에서든
//! 실패하면 롤백 후 에러를 그대로 반환합니다. 리프레시 토큰은 커밋 직전에
//! 세션 캐시에 저장됩니다.

use std::sync::Arc;

use rand::Rng;

use crate::{
    config::AuthProvider,
    core::errors::{AppError, AppResult},
    domain::dto::users::response::UserSummary,
    domain::entities::users::user::User,
    domain::models::token::TokenPair,
    repositories::{
        sessions::SessionStore,
        users::{CredentialStore, UserTransaction},
    },
    services::mail::Mailer,
    utils::string_utils::{codes_match, normalize_email},
};

use super::{password::PasswordHasher, social_auth_service::SocialAuthService, token_service::TokenService};

/// 로그인 계열 작업의 결과
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: UserSummary,
    pub tokens: TokenPair,
}

/// 소셜 로그인 결과
#[derive(Debug, Clone)]
pub struct SocialLogin {
    pub session: AuthSession,
    /// 이번 요청으로 계정이 새로 만들어졌는지 여부 (201/200 구분)
    pub created: bool,
}

/// 0 이상 1억 미만의 난수를 8자리로 0 채움
pub(crate) fn generate_verification_code() -> String {
    format!("{:08}", rand::thread_rng().gen_range(0..100_000_000u32))
}

pub struct AuthService {
    users: Arc<dyn CredentialStore>,
    sessions: Arc<dyn SessionStore>,
    tokens: Arc<TokenService>,
    mailer: Arc<dyn Mailer>,
    social: SocialAuthService,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn CredentialStore>,
        sessions: Arc<dyn SessionStore>,
        tokens: Arc<TokenService>,
        mailer: Arc<dyn Mailer>,
        social: SocialAuthService,
        hasher: PasswordHasher,
    ) -> Self {
        Self { users, sessions, tokens, mailer, social, hasher }
    }

    /// 이메일/비밀번호 로그인
    ///
    /// # Errors
    ///
    /// * `NotFound("User not found")` - 가입되지 않은 이메일
    /// * `Unauthorized("Incorrect password")` - 비밀번호 불일치 (소셜 전용 계정 포함)
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let email = normalize_email(email);

        let user = self.users
            .find_by_email(&email)
            .await?
            .ok_or_else(AppError::user_not_found)?;

        let matches = user
            .password_hash
            .as_deref()
            .map(|hash| self.hasher.verify(password, hash))
            .unwrap_or(false);

        if !matches {
            log::warn!("로그인 실패 (비밀번호 불일치): {}", email);
            return Err(AppError::incorrect_password());
        }

        let session = self.start_session(&user).await?;
        log::info!("로그인 성공: {} ({})", email, user.id_string());
        Ok(session)
    }

    /// 회원가입
    ///
    /// 이메일 중복 확인, 사용자 생성, 토큰 발급이 하나의 트랜잭션으로 처리됩니다.
    pub async fn signup(&self, email: &str, password: &str, username: &str) -> AppResult<AuthSession> {
        let email = normalize_email(email);
        let mut tx = self.users.begin().await?;

        match self.signup_in(tx.as_mut(), &email, password, username).await {
            Ok(session) => {
                tx.commit().await?;
                log::info!("회원가입 완료: {} ({})", email, session.user.user_id);
                Ok(session)
            }
            Err(e) => {
                tx.rollback().await;
                Err(e)
            }
        }
    }

    async fn signup_in(
        &self,
        tx: &mut dyn UserTransaction,
        email: &str,
        password: &str,
        username: &str,
    ) -> AppResult<AuthSession> {
        if tx.find_by_email(email).await?.is_some() {
            return Err(AppError::user_already_exists());
        }

        let password_hash = self.hasher.hash(password)?;
        let user = User::new_local(email.to_string(), username.trim().to_string(), password_hash);
        tx.create(&user).await?;

        self.start_session(&user).await
    }

    /// 회원가입 전 이메일 인증 코드 발송
    ///
    /// 새 코드는 이전 코드를 덮어쓰며 메일 발송 전에 저장됩니다.
    pub async fn send_verification_code(&self, email: &str) -> AppResult<()> {
        let email = normalize_email(email);

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::email_already_exists());
        }

        let code = generate_verification_code();
        self.sessions.store_verification_code(&email, &code).await?;
        self.mailer.send_verification_code(&email, &code).await?;

        log::info!("인증 코드 발송: {}", email);
        Ok(())
    }

    /// 인증 코드 확인
    ///
    /// 성공해도 코드는 삭제되지 않으며 TTL 만료 전까지 다시 사용할 수 있습니다.
    pub async fn verify_code(&self, email: &str, code: &str) -> AppResult<()> {
        let email = normalize_email(email);

        match self.sessions.verification_code(&email).await? {
            Some(stored) if codes_match(&stored, code) => Ok(()),
            _ => {
                log::debug!("인증 코드 불일치 또는 만료: {}", email);
                Err(AppError::invalid_code())
            }
        }
    }

    /// 인증된 사용자에게 새 액세스 토큰 발급
    pub fn renew_token(&self, user: &User) -> AppResult<String> {
        self.tokens.generate_access_token(user)
    }

    /// 소셜 로그인
    ///
    /// 프로바이더 토큰이 가리키는 이메일과 요청 이메일이 다르면 `Bad request`.
    /// 해당 이메일의 계정이 없으면 새로 만들고, 있으면 그대로 사용합니다.
    pub async fn handle_social_login(
        &self,
        provider: AuthProvider,
        email: &str,
        access_token: &str,
    ) -> AppResult<SocialLogin> {
        let email = normalize_email(email);
        let verified_email = normalize_email(&self.social.verify(provider, access_token).await?);

        if verified_email != email {
            log::warn!(
                "{} 소셜 로그인 이메일 불일치: 요청 {} / 토큰 {}",
                provider.display_name(),
                email,
                verified_email
            );
            return Err(AppError::bad_request());
        }

        let mut tx = self.users.begin().await?;
        match self.social_login_in(tx.as_mut(), provider, &email).await {
            Ok(login) => {
                tx.commit().await?;
                log::info!(
                    "{} 소셜 로그인 성공: {} (신규: {})",
                    provider.display_name(),
                    email,
                    login.created
                );
                Ok(login)
            }
            Err(e) => {
                tx.rollback().await;
                Err(e)
            }
        }
    }

    async fn social_login_in(
        &self,
        tx: &mut dyn UserTransaction,
        provider: AuthProvider,
        email: &str,
    ) -> AppResult<SocialLogin> {
        let (user, created) = match tx.find_by_email(email).await? {
            Some(user) => (user, false),
            None => {
                let user = User::new_social(email.to_string(), provider);
                tx.create(&user).await?;
                (user, true)
            }
        };

        let session = self.start_session(&user).await?;
        Ok(SocialLogin { session, created })
    }

    /// 토큰 쌍을 발급하고 리프레시 토큰을 사용자 슬롯에 저장합니다.
    async fn start_session(&self, user: &User) -> AppResult<AuthSession> {
        let tokens = self.tokens.generate_token_pair(user)?;
        self.sessions
            .store_refresh_token(&user.id_string(), &tokens.refresh_token)
            .await?;

        Ok(AuthSession {
            user: UserSummary::from(user),
            tokens,
        })
    }
}
