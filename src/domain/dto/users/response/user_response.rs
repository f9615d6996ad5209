//! 사용자 응답 DTO

use serde::{Deserialize, Serialize};

use crate::domain::entities::users::user::User;

/// 클라이언트에 노출되는 사용자 요약
///
/// 필드 이름은 기존 클라이언트와의 호환을 위해 혼합 표기를 유지합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub username: String,
    /// 프로필 사진 URL
    pub image: Option<String>,
    pub status_message: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id_string(),
            username: user.username.clone(),
            image: user.profile_photo_url.clone(),
            status_message: user.status_message.clone(),
        }
    }
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        UserSummary::from(&user)
    }
}

/// 단순 메시지 응답
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// `POST /update-profile` 응답
#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdatedResponse {
    pub message: String,
    /// 갱신 후 프로필 사진 URL
    #[serde(rename = "profilePhoto")]
    pub profile_photo: Option<String>,
}

/// `GET /fetch-user` 응답
#[derive(Debug, Clone, Serialize)]
pub struct UserEnvelope {
    pub user: UserSummary,
}

/// `GET /fetch-users` 응답
#[derive(Debug, Clone, Serialize)]
pub struct UsersEnvelope {
    pub users: Vec<UserSummary>,
}

/// `GET /renew-token` 응답 본문 (새 토큰은 헤더로 전달)
#[derive(Debug, Clone, Serialize)]
pub struct RenewedTokenResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// 미들웨어가 액세스 토큰을 재발급했을 때의 403 응답 본문
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenRenewedResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "accessToken")]
    pub access_token: String,
}
