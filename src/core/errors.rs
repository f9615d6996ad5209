//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 서비스 계층은 도메인에서 예상 가능한 실패(잘못된 비밀번호, 중복 이메일,
//! 잘못된 인증 코드 등)를 `AppError`로 반환하고, HTTP 경계에서
//! `actix_web::ResponseError` 구현이 이를 상태 코드와 JSON 본문으로 변환합니다.
//!
//! 인프라 계열 에러(`DatabaseError`, `CacheError`, `InternalError`)는 로그에는
//! 상세 내용을 남기지만 클라이언트에게는 항상 `"Server error"`만 전달합니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::core::errors::AppError;
//!
//! async fn login(email: &str) -> Result<User, AppError> {
//!     let user = store.find_by_email(email).await?
//!         .ok_or_else(AppError::user_not_found)?;
//!     Ok(user)
//! }
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 리소스 없음 (404 Not Found)
    #[error("Not found: {0}")]
    NotFound(String),

    /// 자격 증명 불일치 (401 Unauthorized)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 토큰 누락/무효/만료 (401 Unauthorized)
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// 이미 존재하는 리소스 (400 Bad Request)
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 잘못된 입력 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 외부 협력자(메일, 소셜 프로바이더, 스토리지) 실패 (500)
    ///
    /// 메시지는 서비스에서 직접 작성한 문구만 담으며 그대로 클라이언트에 노출됩니다.
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// MongoDB 관련 에러 (500, 상세 내용 숨김)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 관련 에러 (500, 상세 내용 숨김)
    #[error("Cache error: {0}")]
    CacheError(String),

    /// 기타 내부 에러 (500, 상세 내용 숨김)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn user_not_found() -> Self {
        AppError::NotFound("User not found".to_string())
    }

    pub fn incorrect_password() -> Self {
        AppError::Unauthorized("Incorrect password".to_string())
    }

    pub fn user_already_exists() -> Self {
        AppError::ConflictError("User already exists".to_string())
    }

    pub fn email_already_exists() -> Self {
        AppError::ConflictError("Email already exists".to_string())
    }

    pub fn email_delivery_failed() -> Self {
        AppError::ExternalServiceError("Failed to send email".to_string())
    }

    pub fn invalid_code() -> Self {
        AppError::ValidationError("Invalid code".to_string())
    }

    pub fn bad_request() -> Self {
        AppError::ValidationError("Bad request".to_string())
    }

    /// 클라이언트에 노출되는 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::Unauthenticated(_) => "unauthenticated",
            AppError::ConflictError(_) => "conflict",
            AppError::ValidationError(_) => "bad_request",
            AppError::ExternalServiceError(_) => "external_service_error",
            AppError::DatabaseError(_) | AppError::CacheError(_) | AppError::InternalError(_) => {
                "server_error"
            }
        }
    }

    /// 클라이언트에 노출되는 메시지
    ///
    /// 인프라 계열 에러는 상세 내용을 숨기고 고정 문구를 반환합니다.
    pub fn public_message(&self) -> &str {
        match self {
            AppError::NotFound(msg)
            | AppError::Unauthorized(msg)
            | AppError::Unauthenticated(msg)
            | AppError::ConflictError(msg)
            | AppError::ValidationError(msg)
            | AppError::ExternalServiceError(msg) => msg,
            AppError::DatabaseError(_) | AppError::CacheError(_) | AppError::InternalError(_) => {
                "Server error"
            }
        }
    }

    /// 상세 내용이 숨겨지는 서버 에러 여부
    pub fn is_masked(&self) -> bool {
        matches!(
            self,
            AppError::DatabaseError(_) | AppError::CacheError(_) | AppError::InternalError(_)
        )
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) | AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::ConflictError(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        if self.is_masked() {
            log::error!("요청 처리 중 서버 에러: {}", self);
        }

        actix_web::HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.code(),
            "message": self.public_message(),
        }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 크레이트 에러에 실패 지점 설명을 붙여 `AppError`로 바꿉니다.
///
/// 두 변환 모두 서버 에러 계열이라 상세 내용은 로그에만 남습니다.
pub trait ErrorContext<T> {
    /// `InternalError`로 변환 (JWT 서명, 해싱, SMTP, 스토리지 요청)
    fn context(self, what: &str) -> AppResult<T>;

    /// `DatabaseError`로 변환 (MongoDB 조회/쓰기)
    fn db_context(self, what: &str) -> AppResult<T>;
}

impl<T, E: std::fmt::Display> ErrorContext<T> for Result<T, E> {
    fn context(self, what: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", what, e)))
    }

    fn db_context(self, what: &str) -> AppResult<T> {
        self.map_err(|e| AppError::DatabaseError(format!("{}: {}", what, e)))
    }
}
