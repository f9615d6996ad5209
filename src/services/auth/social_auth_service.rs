//! # 소셜 로그인 토큰 검증 서비스
//!
//! 클라이언트가 프로바이더(Google, Kakao, Naver)에서 직접 받은 액세스 토큰을
//! 각 프로바이더의 사용자 정보 API로 확인하고, 토큰 주인의 이메일을 돌려줍니다.
//!
//! ```text
//! 클라이언트 ── {email, access_token} ──► 우리 서버 ── Bearer access_token ──► 프로바이더 사용자 정보 API
//!                                              ◄──────────── email ────────────┘
//! ```
//!
//! 프로바이더 호출이 어떤 이유로든 실패하면 `"{Provider} API Server error"`로 응답합니다.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    config::{AuthProvider, SocialConfig},
    core::errors::{AppError, AppResult},
    domain::models::oauth::{GoogleUserInfo, KakaoUserInfo, NaverUserInfo, ProviderProfile},
};

/// 프로바이더 액세스 토큰을 검증하고 이메일을 반환합니다.
#[async_trait]
pub trait SocialTokenVerifier: Send + Sync {
    async fn verify(&self, access_token: &str) -> AppResult<String>;
}

fn provider_error(provider: AuthProvider) -> AppError {
    AppError::ExternalServiceError(format!("{} API Server error", provider.display_name()))
}

/// 사용자 정보 API를 호출하는 검증기
pub struct HttpSocialVerifier {
    provider: AuthProvider,
    client: Client,
    endpoint: String,
}

impl HttpSocialVerifier {
    pub fn new(provider: AuthProvider, client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            provider,
            client,
            endpoint: endpoint.into(),
        }
    }

    async fn fetch_email<T>(&self, access_token: &str) -> AppResult<String>
    where
        T: DeserializeOwned + ProviderProfile,
    {
        let provider = self.provider;

        let response = self.client
            .get(&self.endpoint)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                log::error!("{} 사용자 정보 요청 실패: {}", provider.display_name(), e);
                provider_error(provider)
            })?;

        if !response.status().is_success() {
            log::warn!(
                "{} 사용자 정보 조회 실패: HTTP {}",
                provider.display_name(),
                response.status()
            );
            return Err(provider_error(provider));
        }

        let profile = response.json::<T>().await.map_err(|e| {
            log::error!("{} 사용자 정보 파싱 실패: {}", provider.display_name(), e);
            provider_error(provider)
        })?;

        profile.verified_email().ok_or_else(|| {
            log::warn!("{} 응답에 이메일이 없습니다", provider.display_name());
            provider_error(provider)
        })
    }
}

#[async_trait]
impl SocialTokenVerifier for HttpSocialVerifier {
    async fn verify(&self, access_token: &str) -> AppResult<String> {
        match self.provider {
            AuthProvider::Google => self.fetch_email::<GoogleUserInfo>(access_token).await,
            AuthProvider::Kakao => self.fetch_email::<KakaoUserInfo>(access_token).await,
            AuthProvider::Naver => self.fetch_email::<NaverUserInfo>(access_token).await,
            AuthProvider::Local => Err(AppError::InternalError(
                "로컬 계정에는 소셜 검증기가 없습니다".to_string(),
            )),
        }
    }
}

/// 프로바이더별 검증기 모음
#[derive(Default, Clone)]
pub struct SocialAuthService {
    verifiers: HashMap<AuthProvider, Arc<dyn SocialTokenVerifier>>,
}

impl SocialAuthService {
    /// 설정된 엔드포인트로 세 프로바이더의 HTTP 검증기를 등록합니다.
    pub fn from_config(client: Client, config: &SocialConfig) -> Self {
        Self::default()
            .with_verifier(
                AuthProvider::Google,
                Arc::new(HttpSocialVerifier::new(
                    AuthProvider::Google,
                    client.clone(),
                    &config.google_userinfo_url,
                )),
            )
            .with_verifier(
                AuthProvider::Kakao,
                Arc::new(HttpSocialVerifier::new(
                    AuthProvider::Kakao,
                    client.clone(),
                    &config.kakao_userinfo_url,
                )),
            )
            .with_verifier(
                AuthProvider::Naver,
                Arc::new(HttpSocialVerifier::new(
                    AuthProvider::Naver,
                    client,
                    &config.naver_userinfo_url,
                )),
            )
    }

    pub fn with_verifier(
        mut self,
        provider: AuthProvider,
        verifier: Arc<dyn SocialTokenVerifier>,
    ) -> Self {
        self.verifiers.insert(provider, verifier);
        self
    }

    /// 프로바이더 토큰이 가리키는 이메일
    pub async fn verify(&self, provider: AuthProvider, access_token: &str) -> AppResult<String> {
        let verifier = self
            .verifiers
            .get(&provider)
            .ok_or_else(|| provider_error(provider))?;

        verifier.verify(access_token).await
    }
}
