//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 입력 문자열 정리, 이메일 정규화, ID 목록 파싱, 인증 코드 비교

pub mod string_utils;
