//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 모든 서비스는 `main`에서 저장소와 협력자를 생성자 인자로 받아 만들어지며,
//! [`AppState`](crate::core::state::AppState)를 통해 핸들러에 주입됩니다.
//!
//! - [`auth`] - 토큰 발급/검증, 요청 인증 판정, 로그인/회원가입/소셜 로그인
//! - [`users`] - 프로필, 비밀번호, 계정 삭제, 사용자 조회
//! - [`mail`] - 인증 코드 메일 발송
//! - [`storage`] - 프로필 사진 저장소

pub mod auth;
pub mod users;
pub mod mail;
pub mod storage;
