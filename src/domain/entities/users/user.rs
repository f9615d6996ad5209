//! User Entity Implementation
//!
//! 로컬 인증(이메일/비밀번호)과 소셜 로그인 사용자를 함께 표현하는 엔티티입니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;

/// 사용자 엔티티
///
/// `users` 컬렉션의 문서 하나에 대응합니다. 이메일은 유일 인덱스로 보호됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// 사용자 이메일 (unique)
    pub email: String,
    /// bcrypt 해시 (소셜 전용 계정은 None)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub password_hash: Option<String>,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub profile_photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status_message: Option<String>,
    /// 계정을 처음 만든 인증 방식
    pub auth_provider: AuthProvider,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성 (이메일/패스워드)
    pub fn new_local(email: String, username: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: ObjectId::new(),
            email,
            password_hash: Some(password_hash),
            username,
            profile_photo_url: None,
            status_message: None,
            auth_provider: AuthProvider::Local,
            created_at: now,
            updated_at: now,
        }
    }

    /// 첫 소셜 로그인 시 생성되는 사용자
    ///
    /// 사용자명은 이메일의 로컬 파트로 초기화합니다.
    pub fn new_social(email: String, provider: AuthProvider) -> Self {
        let now = DateTime::now();
        let username = email
            .split('@')
            .next()
            .filter(|local| !local.is_empty())
            .unwrap_or(email.as_str())
            .to_string();

        Self {
            id: ObjectId::new(),
            email,
            password_hash: None,
            username,
            profile_photo_url: None,
            status_message: None,
            auth_provider: provider,
            created_at: now,
            updated_at: now,
        }
    }

    /// 16진수 문자열 형태의 사용자 ID
    pub fn id_string(&self) -> String {
        self.id.to_hex()
    }

    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }
}
