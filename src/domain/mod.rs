//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 모듈입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - 영속 엔티티 (User)
//! ├── dto       - HTTP 요청/응답 계약
//! └── models    - 토큰 클레임, 소셜 프로바이더 응답 모델
//! ```
//!
//! 엔티티는 저장 방식과 분리된 순수 데이터 레코드이며,
//! 조회/생성/수정/삭제는 `repositories` 계층의 명시적 함수로만 수행합니다.

pub mod entities;
pub mod dto;
pub mod models;

pub use entities::*;
pub use models::*;
