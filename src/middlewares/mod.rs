//! 미들웨어 모듈
//!
//! ActixWeb 요청 처리 파이프라인에서 사용되는 미들웨어를 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - `Authorization: Bearer` 헤더의 액세스 토큰과 `refresh_token` 쿠키를 함께 검사
//! - 인증된 사용자를 request extension에 저장
//! - 액세스 토큰이 만료되었고 리프레시 토큰이 유효하면 새 액세스 토큰을 담아 403 응답
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::AuthMiddleware;
//!
//! App::new()
//!     .app_data(web::Data::new(authenticator))
//!     .service(
//!         web::resource("/update-password")
//!             .wrap(AuthMiddleware::required())
//!             .route(web::post().to(update_password)),
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
