//! 이메일 발송 협력자
//!
//! 인증 코드 메일 발송만 담당합니다. `SMTP_HOST`가 설정되어 있으면
//! [`SmtpMailer`], 없으면 코드를 로그로만 남기는 [`LogMailer`]를 사용합니다.

use async_trait::async_trait;

use crate::config::MailConfig;
use crate::core::errors::AppResult;

pub mod smtp_mailer;

pub use smtp_mailer::SmtpMailer;

#[async_trait]
pub trait Mailer: Send + Sync {
    /// 발송 실패는 `ExternalServiceError("Failed to send email")`
    async fn send_verification_code(&self, to: &str, code: &str) -> AppResult<()>;
}

/// 개발 환경용 메일러
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_verification_code(&self, to: &str, code: &str) -> AppResult<()> {
        log::info!("[LogMailer] {} 인증 코드: {}", to, code);
        Ok(())
    }
}

/// 설정에 따라 메일러를 선택합니다.
///
/// `code_ttl_seconds`는 `SessionConfig`의 인증 코드 TTL과 같은 값이어야 합니다.
pub fn build_mailer(config: &MailConfig, code_ttl_seconds: u64) -> AppResult<Box<dyn Mailer>> {
    match config.smtp_host {
        Some(_) => Ok(Box::new(SmtpMailer::new(config, code_ttl_seconds)?)),
        None => {
            log::warn!("SMTP_HOST not set, verification codes will only be logged");
            Ok(Box::new(LogMailer))
        }
    }
}
