//! lettre 기반 비동기 SMTP 메일러

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::MailConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};

use super::Mailer;

const VERIFICATION_SUBJECT: &str = "이메일 인증 코드";

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    code_ttl_seconds: u64,
}

impl SmtpMailer {
    /// `code_ttl_seconds`는 메일 본문에 안내하는 인증 코드 유효 시간입니다.
    pub fn new(config: &MailConfig, code_ttl_seconds: u64) -> AppResult<Self> {
        let host = config
            .smtp_host
            .as_deref()
            .ok_or_else(|| AppError::InternalError("SMTP_HOST가 설정되지 않았습니다".to_string()))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
            .context("SMTP 설정 실패")?
            .port(config.smtp_port);

        if let (Some(username), Some(password)) = (&config.smtp_username, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        let from = config
            .from_address
            .parse::<Mailbox>()
            .context("MAIL_FROM 형식 오류")?;

        Ok(Self {
            transport: builder.build(),
            from,
            code_ttl_seconds,
        })
    }
}

pub(crate) fn verification_body(code: &str, ttl_seconds: u64) -> String {
    let validity = if ttl_seconds >= 60 && ttl_seconds % 60 == 0 {
        format!("{}분", ttl_seconds / 60)
    } else {
        format!("{}초", ttl_seconds)
    };

    format!(
        "인증 코드: {}\n\n{} 안에 입력해주세요. 본인이 요청하지 않았다면 이 메일을 무시하세요.",
        code, validity
    )
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_verification_code(&self, to: &str, code: &str) -> AppResult<()> {
        let recipient = to.parse::<Mailbox>().map_err(|e| {
            log::warn!("수신자 주소 파싱 실패 {}: {}", to, e);
            AppError::email_delivery_failed()
        })?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(VERIFICATION_SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(verification_body(code, self.code_ttl_seconds))
            .map_err(|e| {
                log::error!("메일 메시지 생성 실패: {}", e);
                AppError::email_delivery_failed()
            })?;

        self.transport.send(message).await.map_err(|e| {
            log::error!("인증 메일 발송 실패 {}: {}", to, e);
            AppError::email_delivery_failed()
        })?;

        log::info!("인증 메일 발송 완료: {}", to);
        Ok(())
    }
}
