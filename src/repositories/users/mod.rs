//! 사용자 데이터 액세스 계층
//!
//! 서비스는 구체 타입 대신 [`CredentialStore`]와 [`UserTransaction`] trait에
//! 의존합니다. 운영 환경에서는 MongoDB 구현인
//! [`UserRepository`](user_repo::UserRepository)가 주입됩니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! let mut tx = store.begin().await?;
//! match tx.create(&user).await {
//!     Ok(()) => tx.commit().await?,
//!     Err(e) => {
//!         tx.rollback().await;
//!         return Err(e);
//!     }
//! }
//! ```

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppResult;
use crate::domain::entities::users::user::User;

pub mod user_repo;

pub use user_repo::UserRepository;

/// 프로필 갱신 시 저장되는 필드 값
///
/// 서비스가 최종 값을 결정해서 넘기며, 리포지토리는 그대로 덮어씁니다.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileFields {
    pub username: String,
    pub status_message: Option<String>,
    pub profile_photo_url: Option<String>,
}

/// 트랜잭션 밖에서 수행하는 읽기 전용 조회와 트랜잭션 시작
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// 형식이 잘못된 ID는 존재하지 않는 사용자로 취급합니다.
    async fn find_by_id(&self, user_id: &str) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_by_ids(&self, user_ids: &[ObjectId]) -> AppResult<Vec<User>>;

    async fn begin(&self) -> AppResult<Box<dyn UserTransaction>>;
}

/// 하나의 작업 단위
///
/// `commit` 없이 drop되면 변경 사항은 버려집니다.
#[async_trait]
pub trait UserTransaction: Send {
    async fn find_by_email(&mut self, email: &str) -> AppResult<Option<User>>;

    /// 같은 이메일이 이미 있으면 `ConflictError("User already exists")`
    async fn create(&mut self, user: &User) -> AppResult<()>;

    /// 대상이 없으면 `NotFound`
    async fn update_profile(&mut self, user_id: &ObjectId, fields: &ProfileFields) -> AppResult<()>;

    async fn update_password(&mut self, user_id: &ObjectId, password_hash: &str) -> AppResult<()>;

    /// 삭제된 문서가 있으면 `true`
    async fn delete(&mut self, user_id: &ObjectId) -> AppResult<bool>;

    async fn commit(self: Box<Self>) -> AppResult<()>;

    /// 실패는 로그만 남깁니다. 호출 측은 원래 에러를 반환해야 하기 때문입니다.
    async fn rollback(self: Box<Self>);
}
