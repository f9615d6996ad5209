//! # Core Module
//!
//! 애플리케이션 전역에서 쓰는 에러 타입과 서비스 그래프를 담습니다.
//!
//! ## 모듈 구성
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현
//! - **상세 숨김**: 인프라 에러는 `"Server error"`로만 응답
//!
//! ### [`state`] - 명시적 의존성 조립
//! - **AppState**: `main`에서 만든 서비스들을 `web::Data`로 등록
//! - 전역 싱글톤 없이 생성자 주입만 사용
//!
//! ## 애플리케이션 초기화
//!
//! ```rust,ignore
//! let state = AppState::new(AppDependencies { users, sessions, tokens, mailer, storage, social, hasher });
//!
//! HttpServer::new(move || {
//!     let state = state.clone();
//!     App::new().configure(move |cfg| state.register(cfg))
//! })
//! .bind("0.0.0.0:8080")?
//! .run()
//! .await
//! ```

pub mod errors;
pub mod state;

pub use errors::*;
pub use state::*;
