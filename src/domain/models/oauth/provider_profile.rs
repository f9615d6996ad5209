use serde::Deserialize;

/// 프로바이더 응답에서 확인된 이메일을 꺼냅니다.
pub trait ProviderProfile {
    fn verified_email(self) -> Option<String>;
}

/// Google `oauth2/v2/userinfo` 응답
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    pub id: Option<String>,
    pub email: Option<String>,
}

impl ProviderProfile for GoogleUserInfo {
    fn verified_email(self) -> Option<String> {
        self.email
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct KakaoAccount {
    pub email: Option<String>,
}

/// Kakao `/v2/user/me` 응답
#[derive(Debug, Clone, Deserialize)]
pub struct KakaoUserInfo {
    pub id: Option<i64>,
    pub kakao_account: Option<KakaoAccount>,
}

impl ProviderProfile for KakaoUserInfo {
    fn verified_email(self) -> Option<String> {
        self.kakao_account.and_then(|account| account.email)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NaverProfile {
    pub email: Option<String>,
}

/// Naver `/v1/nid/me` 응답
///
/// `resultcode`가 `"00"`일 때만 성공입니다.
#[derive(Debug, Clone, Deserialize)]
pub struct NaverUserInfo {
    pub resultcode: String,
    pub message: Option<String>,
    pub response: Option<NaverProfile>,
}

impl ProviderProfile for NaverUserInfo {
    fn verified_email(self) -> Option<String> {
        if self.resultcode != "00" {
            return None;
        }
        self.response.and_then(|profile| profile.email)
    }
}
