//! 테스트 전용 인메모리 협력자
//!
//! MongoDB, Redis, SMTP, 스토리지, 소셜 프로바이더 대신 쓰는 구현과
//! 이를 묶어 서비스를 만들어 주는 [`TestContext`]를 제공합니다.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::{oid::ObjectId, DateTime};
use uuid::Uuid;

use crate::{
    config::{AuthProvider, JwtConfig},
    core::errors::{AppError, AppResult},
    core::state::{AppDependencies, AppState},
    domain::entities::users::user::User,
    domain::models::token::AccessClaims,
    repositories::{
        sessions::SessionStore,
        users::{CredentialStore, ProfileFields, UserTransaction},
    },
    services::{
        auth::{AuthService, Authenticator, PasswordHasher, SocialAuthService, SocialTokenVerifier, TokenService},
        mail::Mailer,
        storage::{ObjectStorage, UploadedPhoto},
        users::UserService,
    },
};

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        access_secret: "test-access-secret".to_string(),
        refresh_secret: "test-refresh-secret".to_string(),
        issuer: "user-auth-test".to_string(),
        access_ttl_seconds: 600,
        refresh_ttl_seconds: 3600,
        secure_cookie: false,
    }
}

/// 2분 전에 만료된 액세스 토큰
pub fn expired_access_token(tokens: &TokenService, user: &User) -> String {
    let now = Utc::now().timestamp();
    tokens
        .encode_access_claims(&AccessClaims {
            sub: user.id_string(),
            email: user.email.clone(),
            iss: tokens.config().issuer.clone(),
            iat: now - 720,
            exp: now - 120,
        })
        .unwrap()
}

pub struct TestContext {
    pub users: Arc<MemoryCredentialStore>,
    pub sessions: Arc<MemorySessionStore>,
    pub tokens: Arc<TokenService>,
    pub mailer: Arc<RecordingMailer>,
    pub storage: Arc<RecordingStorage>,
    pub verifier: Arc<StaticVerifier>,
    hasher: PasswordHasher,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_verification_ttl(Duration::from_secs(600))
    }

    pub fn with_verification_ttl(ttl: Duration) -> Self {
        let users = Arc::new(MemoryCredentialStore::default());
        let storage = Arc::new(RecordingStorage::new(users.commit_counter()));

        Self {
            users,
            sessions: Arc::new(MemorySessionStore::new(ttl)),
            tokens: Arc::new(TokenService::new(jwt_config())),
            mailer: Arc::new(RecordingMailer::default()),
            storage,
            verifier: Arc::new(StaticVerifier::default()),
            hasher: PasswordHasher::new(4),
        }
    }

    /// 트랜잭션을 거치지 않고 바로 저장된 로컬 사용자
    pub async fn insert_local_user(&self, email: &str, password: &str) -> User {
        let username = email.split('@').next().unwrap_or(email).to_string();
        let hash = self.hasher.hash(password).unwrap();
        let user = User::new_local(email.to_string(), username, hash);
        self.users.insert(user.clone());
        user
    }

    fn social(&self) -> SocialAuthService {
        [AuthProvider::Google, AuthProvider::Kakao, AuthProvider::Naver]
            .into_iter()
            .fold(SocialAuthService::default(), |social, provider| {
                social.with_verifier(provider, self.verifier.clone())
            })
    }

    pub fn authenticator(&self) -> Authenticator {
        Authenticator::new(self.tokens.clone(), self.users.clone(), self.sessions.clone())
    }

    pub fn auth_service(&self) -> AuthService {
        AuthService::new(
            self.users.clone(),
            self.sessions.clone(),
            self.tokens.clone(),
            self.mailer.clone(),
            self.social(),
            self.hasher,
        )
    }

    pub fn user_service(&self) -> UserService {
        UserService::new(
            self.users.clone(),
            self.sessions.clone(),
            self.storage.clone(),
            self.hasher,
        )
    }

    pub fn app_state(&self) -> AppState {
        AppState::new(AppDependencies {
            users: self.users.clone(),
            sessions: self.sessions.clone(),
            tokens: self.tokens.clone(),
            mailer: self.mailer.clone(),
            storage: self.storage.clone(),
            social: self.social(),
            hasher: self.hasher,
        })
    }
}

#[derive(Default)]
struct MemoryState {
    users: Mutex<HashMap<ObjectId, User>>,
    commits: Arc<AtomicUsize>,
    rollbacks: AtomicUsize,
    fail_next_commit: AtomicBool,
}

/// 커밋/롤백 횟수를 세는 인메모리 사용자 저장소
#[derive(Default)]
pub struct MemoryCredentialStore {
    state: Arc<MemoryState>,
}

impl MemoryCredentialStore {
    pub fn insert(&self, user: User) {
        self.state.users.lock().unwrap().insert(user.id, user);
    }

    pub fn get(&self, id: &ObjectId) -> Option<User> {
        self.state.users.lock().unwrap().get(id).cloned()
    }

    pub fn remove(&self, id: &ObjectId) {
        self.state.users.lock().unwrap().remove(id);
    }

    pub fn len(&self) -> usize {
        self.state.users.lock().unwrap().len()
    }

    pub fn commits(&self) -> usize {
        self.state.commits.load(Ordering::SeqCst)
    }

    pub fn rollbacks(&self) -> usize {
        self.state.rollbacks.load(Ordering::SeqCst)
    }

    /// 다음 커밋 한 번을 `DatabaseError`로 실패시킵니다.
    pub fn fail_next_commit(&self) {
        self.state.fail_next_commit.store(true, Ordering::SeqCst);
    }

    fn commit_counter(&self) -> Arc<AtomicUsize> {
        self.state.commits.clone()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_id(&self, user_id: &str) -> AppResult<Option<User>> {
        Ok(ObjectId::parse_str(user_id).ok().and_then(|id| self.get(&id)))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.state.users.lock().unwrap();
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn find_by_ids(&self, user_ids: &[ObjectId]) -> AppResult<Vec<User>> {
        Ok(user_ids.iter().filter_map(|id| self.get(id)).collect())
    }

    async fn begin(&self) -> AppResult<Box<dyn UserTransaction>> {
        let working = self.state.users.lock().unwrap().clone();
        Ok(Box::new(MemoryTransaction {
            state: self.state.clone(),
            working,
            pending: Vec::new(),
        }))
    }
}

enum PendingWrite {
    Put(User),
    Remove(ObjectId),
}

/// 시작 시점의 복사본에서 작업하고 커밋 때 변경분만 반영합니다.
struct MemoryTransaction {
    state: Arc<MemoryState>,
    working: HashMap<ObjectId, User>,
    pending: Vec<PendingWrite>,
}

impl MemoryTransaction {
    fn modify(&mut self, user_id: &ObjectId, apply: impl FnOnce(&mut User)) -> AppResult<()> {
        let user = self.working.get_mut(user_id).ok_or_else(AppError::user_not_found)?;
        apply(user);
        user.updated_at = DateTime::now();
        self.pending.push(PendingWrite::Put(user.clone()));
        Ok(())
    }
}

#[async_trait]
impl UserTransaction for MemoryTransaction {
    async fn find_by_email(&mut self, email: &str) -> AppResult<Option<User>> {
        Ok(self.working.values().find(|user| user.email == email).cloned())
    }

    async fn create(&mut self, user: &User) -> AppResult<()> {
        if self.working.values().any(|existing| existing.email == user.email) {
            return Err(AppError::user_already_exists());
        }
        self.working.insert(user.id, user.clone());
        self.pending.push(PendingWrite::Put(user.clone()));
        Ok(())
    }

    async fn update_profile(&mut self, user_id: &ObjectId, fields: &ProfileFields) -> AppResult<()> {
        self.modify(user_id, |user| {
            user.username = fields.username.clone();
            user.status_message = fields.status_message.clone();
            user.profile_photo_url = fields.profile_photo_url.clone();
        })
    }

    async fn update_password(&mut self, user_id: &ObjectId, password_hash: &str) -> AppResult<()> {
        self.modify(user_id, |user| user.password_hash = Some(password_hash.to_string()))
    }

    async fn delete(&mut self, user_id: &ObjectId) -> AppResult<bool> {
        let removed = self.working.remove(user_id).is_some();
        if removed {
            self.pending.push(PendingWrite::Remove(*user_id));
        }
        Ok(removed)
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let MemoryTransaction { state, pending, .. } = *self;
        if state.fail_next_commit.swap(false, Ordering::SeqCst) {
            return Err(AppError::DatabaseError("simulated commit failure".to_string()));
        }

        let mut users = state.users.lock().unwrap();
        for write in &pending {
            if let PendingWrite::Put(user) = write {
                let taken = users
                    .values()
                    .any(|existing| existing.email == user.email && existing.id != user.id);
                if taken {
                    return Err(AppError::user_already_exists());
                }
            }
        }

        for write in pending {
            match write {
                PendingWrite::Put(user) => {
                    users.insert(user.id, user);
                }
                PendingWrite::Remove(id) => {
                    users.remove(&id);
                }
            }
        }

        drop(users);
        state.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(self: Box<Self>) {
        self.state.rollbacks.fetch_add(1, Ordering::SeqCst);
    }
}

/// 인증 코드에만 TTL을 적용하는 인메모리 세션 캐시
pub struct MemorySessionStore {
    verification_ttl: Duration,
    codes: Mutex<HashMap<String, (String, Instant)>>,
    refresh_tokens: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new(verification_ttl: Duration) -> Self {
        Self {
            verification_ttl,
            codes: Mutex::new(HashMap::new()),
            refresh_tokens: Mutex::new(HashMap::new()),
        }
    }

    pub fn refresh_slot_count(&self) -> usize {
        self.refresh_tokens.lock().unwrap().len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn store_verification_code(&self, email: &str, code: &str) -> AppResult<()> {
        let expires_at = Instant::now() + self.verification_ttl;
        self.codes
            .lock()
            .unwrap()
            .insert(email.to_string(), (code.to_string(), expires_at));
        Ok(())
    }

    async fn verification_code(&self, email: &str) -> AppResult<Option<String>> {
        let codes = self.codes.lock().unwrap();
        Ok(codes
            .get(email)
            .filter(|(_, expires_at)| Instant::now() < *expires_at)
            .map(|(code, _)| code.clone()))
    }

    async fn store_refresh_token(&self, user_id: &str, token: &str) -> AppResult<()> {
        self.refresh_tokens
            .lock()
            .unwrap()
            .insert(user_id.to_string(), token.to_string());
        Ok(())
    }

    async fn refresh_token(&self, user_id: &str) -> AppResult<Option<String>> {
        Ok(self.refresh_tokens.lock().unwrap().get(user_id).cloned())
    }

    async fn remove_refresh_token(&self, user_id: &str) -> AppResult<()> {
        self.refresh_tokens.lock().unwrap().remove(user_id);
        Ok(())
    }
}

/// 보낸 인증 코드를 기록하는 메일러
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<(String, String)>>,
    failing: AtomicBool,
}

impl RecordingMailer {
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_verification_code(&self, to: &str, code: &str) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::email_delivery_failed());
        }
        self.sent.lock().unwrap().push((to.to_string(), code.to_string()));
        Ok(())
    }
}

/// 업로드/삭제 URL과 삭제 시점의 커밋 횟수를 기록하는 저장소
pub struct RecordingStorage {
    commits: Arc<AtomicUsize>,
    uploaded: Mutex<Vec<String>>,
    deleted: Mutex<Vec<(String, usize)>>,
}

impl RecordingStorage {
    fn new(commits: Arc<AtomicUsize>) -> Self {
        Self {
            commits,
            uploaded: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
        }
    }

    pub fn uploaded(&self) -> Vec<String> {
        self.uploaded.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().iter().map(|(url, _)| url.clone()).collect()
    }

    pub fn commits_seen_at_deletes(&self) -> Vec<usize> {
        self.deleted.lock().unwrap().iter().map(|(_, commits)| *commits).collect()
    }
}

#[async_trait]
impl ObjectStorage for RecordingStorage {
    async fn upload(&self, photo: &UploadedPhoto) -> AppResult<String> {
        let url = format!("https://storage.test/{}.{}", Uuid::new_v4(), photo.extension());
        self.uploaded.lock().unwrap().push(url.clone());
        Ok(url)
    }

    async fn delete(&self, url: &str) -> AppResult<()> {
        let commits = self.commits.load(Ordering::SeqCst);
        self.deleted.lock().unwrap().push((url.to_string(), commits));
        Ok(())
    }
}

/// 설정된 이메일을 돌려주는 소셜 검증기, 비어 있으면 프로바이더 장애로 응답
#[derive(Default)]
pub struct StaticVerifier {
    email: Mutex<Option<String>>,
}

impl StaticVerifier {
    pub fn set_email(&self, email: Option<&str>) {
        *self.email.lock().unwrap() = email.map(str::to_string);
    }
}

#[async_trait]
impl SocialTokenVerifier for StaticVerifier {
    async fn verify(&self, _access_token: &str) -> AppResult<String> {
        self.email
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| AppError::ExternalServiceError("Test API Server error".to_string()))
    }
}
