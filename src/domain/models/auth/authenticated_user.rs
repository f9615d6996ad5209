use std::future::{ready, Ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};

use crate::domain::entities::users::user::User;

/// 인증 미들웨어가 요청 extensions에 넣어 둔 사용자
///
/// `AuthMiddleware`로 감싼 라우트에서만 추출할 수 있습니다.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

impl std::ops::Deref for AuthenticatedUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// ActixWeb FromRequest trait 구현
impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<actix_web::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<User>() {
            Some(user) => ready(Ok(AuthenticatedUser(user.clone()))),
            None => ready(Err(actix_web::error::ErrorUnauthorized(
                "인증되지 않은 요청입니다"
            ))),
        }
    }
}
