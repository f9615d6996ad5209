//! 설정 모듈
//!
//! 환경 변수에서 읽은 설정을 타입이 있는 구조체로 제공합니다.
//! `main`에서 한 번 생성한 뒤 각 서비스 생성자에 넘겨 사용합니다.
//!
//! - [`auth_config`] - JWT, 소셜 로그인, 인증 프로바이더
//! - [`data_config`] - 서버, MongoDB/Redis, 세션 TTL, 메일, 스토리지

use std::env;
use std::str::FromStr;

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;

/// 환경 변수를 파싱하고, 없거나 형식이 잘못되면 기본값을 사용합니다.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::error!("{} 파싱 실패: {:?}. 기본값 사용", key, raw);
            default
        }),
        Err(_) => default,
    }
}
