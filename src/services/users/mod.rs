//! 사용자 정보 관리 서비스
//!
//! 로그인한 사용자의 프로필/비밀번호 변경, 계정 삭제와
//! 공개 사용자 정보 조회를 담당합니다.

pub mod user_service;

pub use user_service::*;
