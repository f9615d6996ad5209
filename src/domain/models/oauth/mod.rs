//! 소셜 프로바이더 사용자 정보 응답 모델
//!
//! 프로바이더마다 이메일 위치가 다르므로 각 모델이 [`ProviderProfile`]을
//! 구현해 이메일 추출 방식을 통일합니다.

pub mod provider_profile;

pub use provider_profile::*;
