//! 사용자 정보 관련 요청 DTO

use serde::Deserialize;
use validator::Validate;

/// 비밀번호 변경 요청
///
/// `password`는 현재 비밀번호, `newPassword`는 새 비밀번호입니다.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 1, message = "현재 비밀번호를 입력해주세요"))]
    pub password: String,

    #[serde(rename = "newPassword")]
    #[validate(length(min = 8, message = "비밀번호는 최소 8자 이상이어야 합니다"))]
    pub new_password: String,
}

/// `GET /fetch-user?userId=`
#[derive(Debug, Clone, Deserialize)]
pub struct FetchUserQuery {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

/// `GET /fetch-users?userIds=a,b,c`
#[derive(Debug, Clone, Deserialize)]
pub struct FetchUsersQuery {
    #[serde(rename = "userIds", default)]
    pub user_ids: Option<String>,
}
