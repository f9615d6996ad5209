//! 인증 미들웨어
//!
//! 보호된 라우트 앞에서 액세스/리프레시 토큰을 검사합니다.
//! 판정 로직은 [`Authenticator`](crate::services::auth::Authenticator)에 있고,
//! 이 모듈은 ActixWeb 파이프라인에 끼워 넣는 부분만 담당합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 인증 미들웨어
///
/// 앱 데이터에 `web::Data<Authenticator>`가 등록되어 있어야 합니다.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthMiddleware;

impl AuthMiddleware {
    /// 인증을 강제하는 미들웨어 생성
    pub fn required() -> Self {
        AuthMiddleware
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}
