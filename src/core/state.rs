//! # Application State
//!
//! `main`에서 한 번 조립한 서비스 그래프입니다. 전역 레지스트리 없이
//! 생성자 인자로 의존성을 넘기고, 완성된 서비스는 `web::Data`로 앱에 등록합니다.
//!
//! ```text
//! CredentialStore ─┬─► AuthService ◄── TokenService, Mailer, SocialAuthService
//! SessionStore ────┤
//!                  ├─► UserService ◄── ObjectStorage
//!                  └─► Authenticator ◄── TokenService
//! ```

use std::sync::Arc;

use actix_web::web;

use crate::{
    handlers::{json_error_handler, query_error_handler},
    repositories::{sessions::SessionStore, users::CredentialStore},
    routes::configure_all_routes,
    services::{
        auth::{AuthService, Authenticator, PasswordHasher, SocialAuthService, TokenService},
        mail::Mailer,
        storage::ObjectStorage,
        users::UserService,
    },
};

/// 서비스 조립에 필요한 협력자 묶음
pub struct AppDependencies {
    pub users: Arc<dyn CredentialStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub tokens: Arc<TokenService>,
    pub mailer: Arc<dyn Mailer>,
    pub storage: Arc<dyn ObjectStorage>,
    pub social: SocialAuthService,
    pub hasher: PasswordHasher,
}

/// 핸들러와 미들웨어가 공유하는 서비스
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub authenticator: Arc<Authenticator>,
    pub token_service: Arc<TokenService>,
}

impl AppState {
    pub fn new(deps: AppDependencies) -> Self {
        let AppDependencies { users, sessions, tokens, mailer, storage, social, hasher } = deps;

        let auth_service = AuthService::new(
            users.clone(),
            sessions.clone(),
            tokens.clone(),
            mailer,
            social,
            hasher,
        );
        let user_service = UserService::new(users.clone(), sessions.clone(), storage, hasher);
        let authenticator = Authenticator::new(tokens.clone(), users, sessions);

        Self {
            auth_service: Arc::new(auth_service),
            user_service: Arc::new(user_service),
            authenticator: Arc::new(authenticator),
            token_service: tokens,
        }
    }

    /// 서비스, 요청 파서 설정, 라우트를 앱에 등록합니다.
    ///
    /// ```rust,ignore
    /// HttpServer::new(move || {
    ///     let state = state.clone();
    ///     App::new().configure(move |cfg| state.register(cfg))
    /// })
    /// ```
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.auth_service.clone()))
            .app_data(web::Data::from(self.user_service.clone()))
            .app_data(web::Data::from(self.authenticator.clone()))
            .app_data(web::Data::from(self.token_service.clone()))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .configure(configure_all_routes);
    }
}
