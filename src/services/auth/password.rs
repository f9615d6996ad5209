//! bcrypt 비밀번호 해싱

use crate::core::errors::{AppError, ErrorContext};

/// 설정된 cost로 해싱하는 비밀번호 해셔
///
/// cost는 `PasswordConfig::bcrypt_cost()`에서 실행 환경별로 결정됩니다.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, self.cost)
            .context("비밀번호 해싱 실패")
    }

    /// 해시 형식이 잘못된 경우에도 불일치로 처리합니다.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or_else(|e| {
            log::error!("비밀번호 검증 실패: {}", e);
            false
        })
    }
}
