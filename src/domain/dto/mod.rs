//! 데이터 전송 객체 (HTTP 요청/응답 계약)

pub mod users;

pub use users::*;
