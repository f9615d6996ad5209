//! AuthMiddleware 인증 로직의 핵심적인 기능
use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;

use crate::domain::dto::users::response::AccessTokenRenewedResponse;
use crate::services::auth::{
    AuthOutcome, AuthRejection, Authenticator, TokenService, REFRESH_TOKEN_COOKIE,
};

/// 실제 인증 로직을 수행하는 서비스
pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let Some(authenticator) = req.app_data::<web::Data<Authenticator>>().cloned() else {
                log::error!("Authenticator가 앱 데이터에 등록되지 않았습니다");
                let (req, _) = req.into_parts();
                let response = rejection_response(AuthRejection::Internal);
                return Ok(ServiceResponse::new(req, response).map_into_right_body());
            };

            let access = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(TokenService::extract_bearer_token)
                .map(str::to_string);
            let refresh = req
                .cookie(REFRESH_TOKEN_COOKIE)
                .map(|cookie| cookie.value().to_string())
                .filter(|value| !value.is_empty());

            let outcome = authenticator
                .authenticate(access.as_deref(), refresh.as_deref())
                .await;

            let response = match outcome {
                AuthOutcome::Authenticated(user) => {
                    log::debug!("인증 성공: 사용자 ID {}", user.id_string());
                    req.extensions_mut().insert(user);
                    let res = service.call(req).await?;
                    return Ok(res.map_into_left_body());
                }
                AuthOutcome::Renewed { access_token } => renewed_response(access_token),
                AuthOutcome::Rejected(rejection) => {
                    log::warn!("인증 실패: {:?} ({})", rejection, req.path());
                    rejection_response(rejection)
                }
            };

            let (req, _) = req.into_parts();
            Ok(ServiceResponse::new(req, response).map_into_right_body())
        })
    }
}

/// 재발급된 액세스 토큰을 헤더와 본문에 담은 403 응답
///
/// 클라이언트는 새 토큰으로 원래 요청을 다시 보내야 합니다.
fn renewed_response(access_token: String) -> HttpResponse {
    HttpResponse::Forbidden()
        .insert_header((header::AUTHORIZATION, access_token.clone()))
        .json(AccessTokenRenewedResponse {
            error: "access_token_renewed".to_string(),
            message: "Access token renewed".to_string(),
            access_token,
        })
}

fn rejection_response(rejection: AuthRejection) -> HttpResponse {
    let (mut builder, error, message) = match rejection {
        AuthRejection::MissingCredentials => (
            HttpResponse::Unauthorized(),
            "authentication_required",
            "Authentication required",
        ),
        AuthRejection::InvalidToken => (
            HttpResponse::Unauthorized(),
            "invalid_token",
            "Invalid token",
        ),
        AuthRejection::ReauthenticationRequired => (
            HttpResponse::Unauthorized(),
            "reauthentication_required",
            "Please log in again",
        ),
        AuthRejection::UserNotFound => (
            HttpResponse::NotFound(),
            "user_not_found",
            "User not found",
        ),
        AuthRejection::Internal => (
            HttpResponse::InternalServerError(),
            "server_error",
            "Server error",
        ),
    };

    builder.json(serde_json::json!({
        "error": error,
        "message": message,
    }))
}
