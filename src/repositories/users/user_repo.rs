//! # 사용자 리포지토리 구현
//!
//! MongoDB `users` 컬렉션에 대한 데이터 액세스를 담당합니다.
//! 쓰기 작업은 모두 `ClientSession` 기반 트랜잭션 안에서 수행됩니다.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    ClientSession, Collection, IndexModel,
};

use crate::{
    core::errors::{AppError, AppResult, ErrorContext},
    db::Database,
    domain::entities::users::user::User,
};

use super::{CredentialStore, ProfileFields, UserTransaction};

const COLLECTION_NAME: &str = "users";
const DUPLICATE_KEY_CODE: i32 = 11000;

/// 사용자 데이터 액세스 리포지토리
///
/// - **컬렉션명**: `users`
/// - **인덱스**: email(unique), created_at(desc)
///
/// ## 에러 처리
///
/// - **DatabaseError**: MongoDB 연결 오류, 쿼리 실행 오류
/// - **ConflictError**: 이메일 중복 (duplicate key 11000)
#[derive(Clone)]
pub struct UserRepository {
    db: Database,
    collection: Collection<User>,
}

impl UserRepository {
    pub fn new(db: Database) -> Self {
        let collection = db.get_database().collection::<User>(COLLECTION_NAME);
        Self { db, collection }
    }

    /// 컬렉션 인덱스 생성
    ///
    /// 애플리케이션 시작 시 한 번 호출합니다. 이미 존재하는 인덱스는 그대로 둡니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection
            .create_indexes([email_index, created_at_index])
            .await
            .db_context("인덱스 생성 실패")?;

        log::info!("✅ users 컬렉션 인덱스 준비 완료");
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for UserRepository {
    async fn find_by_id(&self, user_id: &str) -> AppResult<Option<User>> {
        let Ok(object_id) = ObjectId::parse_str(user_id) else {
            return Ok(None);
        };

        self.collection
            .find_one(doc! { "_id": object_id })
            .await
            .db_context("사용자 조회 실패")
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.collection
            .find_one(doc! { "email": email })
            .await
            .db_context("이메일 조회 실패")
    }

    async fn find_by_ids(&self, user_ids: &[ObjectId]) -> AppResult<Vec<User>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self.collection
            .find(doc! { "_id": { "$in": user_ids.to_vec() } })
            .await
            .db_context("사용자 목록 조회 실패")?;

        cursor
            .try_collect()
            .await
            .db_context("사용자 목록 읽기 실패")
    }

    async fn begin(&self) -> AppResult<Box<dyn UserTransaction>> {
        let mut session = self.db
            .client()
            .start_session()
            .await
            .db_context("세션 시작 실패")?;

        session
            .start_transaction()
            .await
            .db_context("트랜잭션 시작 실패")?;

        Ok(Box::new(MongoUserTransaction {
            session,
            collection: self.collection.clone(),
        }))
    }
}

/// `ClientSession` 하나를 소유하는 트랜잭션
///
/// drop 시 드라이버가 진행 중인 트랜잭션을 중단합니다.
struct MongoUserTransaction {
    session: ClientSession,
    collection: Collection<User>,
}

#[async_trait]
impl UserTransaction for MongoUserTransaction {
    async fn find_by_email(&mut self, email: &str) -> AppResult<Option<User>> {
        self.collection
            .find_one(doc! { "email": email })
            .session(&mut self.session)
            .await
            .db_context("이메일 조회 실패")
    }

    async fn create(&mut self, user: &User) -> AppResult<()> {
        self.collection
            .insert_one(user)
            .session(&mut self.session)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::user_already_exists()
                } else {
                    AppError::DatabaseError(format!("사용자 생성 실패: {}", e))
                }
            })?;

        Ok(())
    }

    async fn update_profile(&mut self, user_id: &ObjectId, fields: &ProfileFields) -> AppResult<()> {
        let update = doc! {
            "$set": {
                "username": &fields.username,
                "status_message": fields.status_message.clone(),
                "profile_photo_url": fields.profile_photo_url.clone(),
                "updated_at": DateTime::now(),
            }
        };

        let result = self.collection
            .update_one(doc! { "_id": user_id }, update)
            .session(&mut self.session)
            .await
            .db_context("프로필 업데이트 실패")?;

        if result.matched_count == 0 {
            return Err(AppError::user_not_found());
        }
        Ok(())
    }

    async fn update_password(&mut self, user_id: &ObjectId, password_hash: &str) -> AppResult<()> {
        let update = doc! {
            "$set": {
                "password_hash": password_hash,
                "updated_at": DateTime::now(),
            }
        };

        let result = self.collection
            .update_one(doc! { "_id": user_id }, update)
            .session(&mut self.session)
            .await
            .db_context("비밀번호 업데이트 실패")?;

        if result.matched_count == 0 {
            return Err(AppError::user_not_found());
        }
        Ok(())
    }

    async fn delete(&mut self, user_id: &ObjectId) -> AppResult<bool> {
        let result = self.collection
            .delete_one(doc! { "_id": user_id })
            .session(&mut self.session)
            .await
            .db_context("사용자 삭제 실패")?;

        Ok(result.deleted_count > 0)
    }

    async fn commit(mut self: Box<Self>) -> AppResult<()> {
        self.session
            .commit_transaction()
            .await
            .db_context("트랜잭션 커밋 실패")
    }

    async fn rollback(mut self: Box<Self>) {
        if let Err(e) = self.session.abort_transaction().await {
            log::error!("트랜잭션 롤백 실패: {}", e);
        }
    }
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}
