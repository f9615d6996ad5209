//! # 사용자 관리 비즈니스 로직
//!
//! ## 프로필 사진 교체 순서
//!
//! ```text
//! 새 사진 업로드 → 트랜잭션(프로필 갱신) → 커밋 → 이전 사진 삭제
//!                        │
//!                        └─ 실패 시: 롤백 → 새로 올린 사진 삭제
//! ```
//!
//! 이전 사진은 커밋이 끝난 뒤에만 지우므로 실패 시에도 살아 있는 프로필이
//! 사라진 사진을 가리키는 일이 없습니다.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::{
    core::errors::{AppError, AppResult},
    domain::dto::users::response::UserSummary,
    domain::entities::users::user::User,
    repositories::{
        sessions::SessionStore,
        users::{CredentialStore, ProfileFields},
    },
    services::auth::password::PasswordHasher,
    services::storage::{ObjectStorage, UploadedPhoto},
    utils::string_utils::parse_user_id_list,
};

/// 프로필 사진 변경 방식
#[derive(Debug, Clone, PartialEq)]
pub enum PhotoSource {
    /// 외부 이미지 URL을 그대로 저장 (업로드 없음)
    ExternalUrl(String),
    /// 새 파일을 업로드
    Upload(UploadedPhoto),
    /// 기존 사진 유지
    Unchanged,
}

/// 프로필 변경 요청
///
/// `None`인 필드는 현재 값을 유지합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub status_message: Option<String>,
    pub photo: PhotoSource,
}

pub struct UserService {
    users: Arc<dyn CredentialStore>,
    sessions: Arc<dyn SessionStore>,
    storage: Arc<dyn ObjectStorage>,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(
        users: Arc<dyn CredentialStore>,
        sessions: Arc<dyn SessionStore>,
        storage: Arc<dyn ObjectStorage>,
        hasher: PasswordHasher,
    ) -> Self {
        Self { users, sessions, storage, hasher }
    }

    /// 프로필 변경
    ///
    /// 변경 후의 프로필 사진 URL을 반환합니다.
    pub async fn update_profile(&self, user: &User, update: ProfileUpdate) -> AppResult<Option<String>> {
        let ProfileUpdate { username, status_message, photo } = update;
        let mut fields = ProfileFields {
            username: username.unwrap_or_else(|| user.username.clone()),
            status_message: status_message.or_else(|| user.status_message.clone()),
            profile_photo_url: user.profile_photo_url.clone(),
        };

        match photo {
            PhotoSource::ExternalUrl(url) => {
                fields.profile_photo_url = Some(url);
                self.save_profile(&user.id, &fields).await?;
            }
            PhotoSource::Unchanged => {
                self.save_profile(&user.id, &fields).await?;
            }
            PhotoSource::Upload(photo) => {
                let new_url = self.storage.upload(&photo).await?;
                fields.profile_photo_url = Some(new_url.clone());

                if let Err(e) = self.save_profile(&user.id, &fields).await {
                    self.discard_photo(&new_url).await;
                    return Err(e);
                }

                if let Some(old_url) = user.profile_photo_url.as_deref().filter(|old| *old != new_url) {
                    self.discard_photo(old_url).await;
                }
            }
        }

        log::info!("프로필 업데이트: {}", user.id_string());
        Ok(fields.profile_photo_url)
    }

    async fn save_profile(&self, user_id: &ObjectId, fields: &ProfileFields) -> AppResult<()> {
        let mut tx = self.users.begin().await?;

        if let Err(e) = tx.update_profile(user_id, fields).await {
            tx.rollback().await;
            return Err(e);
        }
        tx.commit().await
    }

    async fn discard_photo(&self, url: &str) {
        if let Err(e) = self.storage.delete(url).await {
            log::warn!("프로필 사진 삭제 실패 {}: {}", url, e);
        }
    }

    /// 비밀번호 변경
    ///
    /// 현재 비밀번호가 틀리면 `ValidationError("Current password is incorrect")`.
    /// 소셜 전용 계정은 비밀번호가 없으므로 항상 실패합니다.
    pub async fn update_password(&self, user: &User, current: &str, new_password: &str) -> AppResult<()> {
        let matches = user
            .password_hash
            .as_deref()
            .map(|hash| self.hasher.verify(current, hash))
            .unwrap_or(false);

        if !matches {
            return Err(AppError::ValidationError("Current password is incorrect".to_string()));
        }

        let new_hash = self.hasher.hash(new_password)?;
        let mut tx = self.users.begin().await?;

        if let Err(e) = tx.update_password(&user.id, &new_hash).await {
            tx.rollback().await;
            return Err(e);
        }
        tx.commit().await?;

        log::info!("비밀번호 변경: {}", user.id_string());
        Ok(())
    }

    /// 계정 삭제
    ///
    /// 커밋 후 사용자의 리프레시 토큰 슬롯도 비웁니다.
    pub async fn delete_user(&self, user: &User) -> AppResult<()> {
        let mut tx = self.users.begin().await?;

        match tx.delete(&user.id).await {
            Ok(true) => tx.commit().await?,
            Ok(false) => {
                tx.rollback().await;
                return Err(AppError::user_not_found());
            }
            Err(e) => {
                tx.rollback().await;
                return Err(e);
            }
        }

        if let Err(e) = self.sessions.remove_refresh_token(&user.id_string()).await {
            log::warn!("삭제된 사용자의 리프레시 토큰 정리 실패 {}: {}", user.id_string(), e);
        }

        log::info!("계정 삭제: {} ({})", user.email, user.id_string());
        Ok(())
    }

    /// 단일 사용자 공개 정보 조회
    pub async fn get_user_data(&self, user_id: Option<&str>) -> AppResult<UserSummary> {
        let user_id = user_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(AppError::bad_request)?;

        self.users
            .find_by_id(user_id)
            .await?
            .map(UserSummary::from)
            .ok_or_else(AppError::user_not_found)
    }

    /// 여러 사용자 공개 정보 조회 (`a,b,c`)
    ///
    /// 존재하는 사용자만 반환하며, 하나도 없으면 `Users not found`.
    pub async fn get_users_data(&self, raw_ids: Option<&str>) -> AppResult<Vec<UserSummary>> {
        let ids = parse_user_id_list(raw_ids)?;
        let users = self.users.find_by_ids(&ids).await?;

        if users.is_empty() {
            return Err(AppError::NotFound("Users not found".to_string()));
        }

        Ok(users.iter().map(UserSummary::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestContext;

    fn png() -> UploadedPhoto {
        UploadedPhoto {
            bytes: vec![137, 80, 78, 71],
            content_type: "image/png".to_string(),
            file_name: Some("me.png".to_string()),
        }
    }

    async fn user_with_photo(ctx: &TestContext, url: &str) -> User {
        let mut user = ctx.insert_local_user("a@x.com", "password123").await;
        user.profile_photo_url = Some(url.to_string());
        ctx.users.insert(user.clone());
        user
    }

    #[actix_web::test]
    async fn test_external_url_never_uploads() {
        let ctx = TestContext::new();
        let user = user_with_photo(&ctx, "https://storage.test/old.png").await;

        let url = ctx
            .user_service()
            .update_profile(
                &user,
                ProfileUpdate {
                    username: Some("renamed".to_string()),
                    status_message: None,
                    photo: PhotoSource::ExternalUrl("https://cdn.example.com/me.jpg".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(url.as_deref(), Some("https://cdn.example.com/me.jpg"));
        assert!(ctx.storage.uploaded().is_empty());
        assert!(ctx.storage.deleted().is_empty());

        let stored = ctx.users.get(&user.id).unwrap();
        assert_eq!(stored.username, "renamed");
        assert_eq!(stored.profile_photo_url.as_deref(), Some("https://cdn.example.com/me.jpg"));
    }

    #[actix_web::test]
    async fn test_upload_replaces_and_deletes_old_photo_after_commit() {
        let ctx = TestContext::new();
        let user = user_with_photo(&ctx, "https://storage.test/old.png").await;

        let url = ctx
            .user_service()
            .update_profile(
                &user,
                ProfileUpdate {
                    username: None,
                    status_message: Some("hello".to_string()),
                    photo: PhotoSource::Upload(png()),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(ctx.storage.uploaded(), vec![url.clone()]);
        assert_eq!(ctx.storage.deleted(), vec!["https://storage.test/old.png".to_string()]);
        assert_eq!(ctx.storage.commits_seen_at_deletes(), vec![1]);

        let stored = ctx.users.get(&user.id).unwrap();
        assert_eq!(stored.profile_photo_url, Some(url));
        assert_eq!(stored.status_message.as_deref(), Some("hello"));
        assert_eq!(stored.username, user.username);
    }

    #[actix_web::test]
    async fn test_failed_commit_keeps_old_photo_and_removes_upload() {
        let ctx = TestContext::new();
        let user = user_with_photo(&ctx, "https://storage.test/old.png").await;
        ctx.users.fail_next_commit();

        let result = ctx
            .user_service()
            .update_profile(
                &user,
                ProfileUpdate {
                    username: None,
                    status_message: None,
                    photo: PhotoSource::Upload(png()),
                },
            )
            .await;

        assert!(result.is_err());
        let uploaded = ctx.storage.uploaded();
        assert_eq!(uploaded.len(), 1);
        assert_eq!(ctx.storage.deleted(), uploaded);

        let stored = ctx.users.get(&user.id).unwrap();
        assert_eq!(stored.profile_photo_url.as_deref(), Some("https://storage.test/old.png"));
    }

    #[actix_web::test]
    async fn test_update_password() {
        let ctx = TestContext::new();
        let user = ctx.insert_local_user("a@x.com", "password123").await;
        let service = ctx.user_service();

        match service.update_password(&user, "wrong", "newpassword1").await {
            Err(AppError::ValidationError(message)) => {
                assert_eq!(message, "Current password is incorrect")
            }
            other => panic!("unexpected result: {:?}", other),
        }

        service.update_password(&user, "password123", "newpassword1").await.unwrap();

        assert!(ctx.auth_service().login("a@x.com", "newpassword1").await.is_ok());
        assert!(ctx.auth_service().login("a@x.com", "password123").await.is_err());
    }

    #[actix_web::test]
    async fn test_deleted_user_is_not_found_afterwards() {
        let ctx = TestContext::new();
        let user = ctx.insert_local_user("a@x.com", "password123").await;
        ctx.sessions.store_refresh_token(&user.id_string(), "refresh").await.unwrap();
        let service = ctx.user_service();

        service.delete_user(&user).await.unwrap();

        assert!(matches!(
            service.get_user_data(Some(&user.id_string())).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(ctx.sessions.refresh_token(&user.id_string()).await.unwrap(), None);
    }

    #[actix_web::test]
    async fn test_get_user_data() {
        let ctx = TestContext::new();
        let user = ctx.insert_local_user("a@x.com", "password123").await;
        let service = ctx.user_service();

        let summary = service.get_user_data(Some(&user.id_string())).await.unwrap();
        assert_eq!(summary.username, user.username);

        assert!(matches!(service.get_user_data(None).await, Err(AppError::ValidationError(_))));
        assert!(matches!(
            service.get_user_data(Some("not-an-id")).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[actix_web::test]
    async fn test_get_users_data() {
        let ctx = TestContext::new();
        let a = ctx.insert_local_user("a@x.com", "password123").await;
        let b = ctx.insert_local_user("b@x.com", "password123").await;
        let service = ctx.user_service();

        let raw = format!("{},{}", a.id_string(), b.id_string());
        let users = service.get_users_data(Some(&raw)).await.unwrap();
        assert_eq!(users.len(), 2);

        assert!(matches!(service.get_users_data(None).await, Err(AppError::ValidationError(_))));
        assert!(matches!(
            service.get_users_data(Some(&ObjectId::new().to_hex())).await,
            Err(AppError::NotFound(_))
        ));
    }
}
