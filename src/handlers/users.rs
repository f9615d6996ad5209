//! # User Management HTTP Handlers
//!
//! 프로필/비밀번호 변경, 계정 삭제, 공개 사용자 정보 조회 엔드포인트입니다.
//!
//! | 메서드 | 경로 | 인증 | 설명 |
//! |--------|------|------|------|
//! | `POST` | `/update-profile` | 필요 | multipart: `username`, `statusMessage`, `imageUrl`, `image` |
//! | `POST` | `/update-password` | 필요 | `{password, newPassword}` |
//! | `DELETE` | `/signout` | 필요 | 계정 삭제 |
//! | `GET` | `/fetch-user?userId=` | - | 단일 사용자 |
//! | `GET` | `/fetch-users?userIds=a,b` | - | 여러 사용자 |
//!
//! ## 프로필 사진 선택 규칙
//!
//! `image` 파일이 있으면 업로드하고, 없으면 `imageUrl`을 그대로 저장하며,
//! 둘 다 없으면 기존 사진을 유지합니다.
use actix_multipart::{Field, Multipart};
use actix_web::{delete, get, post, web, HttpResponse};
use futures_util::TryStreamExt;

use crate::{
    core::errors::{AppError, AppResult},
    domain::dto::users::request::{FetchUserQuery, FetchUsersQuery, UpdatePasswordRequest},
    domain::dto::users::response::{MessageResponse, ProfileUpdatedResponse, UserEnvelope, UsersEnvelope},
    domain::models::auth::AuthenticatedUser,
    middlewares::AuthMiddleware,
    services::storage::UploadedPhoto,
    services::users::{PhotoSource, ProfileUpdate, UserService},
    utils::string_utils::clean_optional_string,
};

use super::validate;

/// 프로필 사진 최대 크기 (5 MiB)
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// 텍스트 필드 최대 크기
const MAX_TEXT_FIELD_BYTES: usize = 4 * 1024;

/// 프로필 변경
///
/// # Endpoint
/// `POST /update-profile` (multipart/form-data)
#[post("/update-profile", wrap = "AuthMiddleware::required()")]
pub async fn update_profile(
    user: AuthenticatedUser,
    payload: Multipart,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    let update = read_profile_form(payload).await?;

    let profile_photo = user_service.update_profile(&user, update).await?;

    Ok(HttpResponse::Ok().json(ProfileUpdatedResponse {
        message: "Profile updated successfully".to_string(),
        profile_photo,
    }))
}

/// 비밀번호 변경
///
/// # Endpoint
/// `POST /update-password`
#[post("/update-password", wrap = "AuthMiddleware::required()")]
pub async fn update_password(
    user: AuthenticatedUser,
    payload: web::Json<UpdatePasswordRequest>,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    validate(&*payload)?;

    user_service
        .update_password(&user, &payload.password, &payload.new_password)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("Password updated successfully")))
}

/// 계정 삭제
///
/// # Endpoint
/// `DELETE /signout`
#[delete("/signout", wrap = "AuthMiddleware::required()")]
pub async fn signout(
    user: AuthenticatedUser,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    user_service.delete_user(&user).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("User deleted successfully")))
}

/// # Endpoint
/// `GET /fetch-user?userId={id}`
#[get("/fetch-user")]
pub async fn fetch_user(
    query: web::Query<FetchUserQuery>,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    let user = user_service.get_user_data(query.user_id.as_deref()).await?;

    Ok(HttpResponse::Ok().json(UserEnvelope { user }))
}

/// # Endpoint
/// `GET /fetch-users?userIds={id},{id}`
#[get("/fetch-users")]
pub async fn fetch_users(
    query: web::Query<FetchUsersQuery>,
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    let users = user_service.get_users_data(query.user_ids.as_deref()).await?;

    Ok(HttpResponse::Ok().json(UsersEnvelope { users }))
}

/// multipart 본문을 [`ProfileUpdate`]로 변환합니다.
///
/// 알 수 없는 필드는 읽고 버립니다.
async fn read_profile_form(mut payload: Multipart) -> AppResult<ProfileUpdate> {
    let mut username = None;
    let mut status_message = None;
    let mut image_url = None;
    let mut image = None;

    while let Some(field) = payload.try_next().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "username" => username = Some(read_text(field).await?),
            "statusMessage" => status_message = Some(read_text(field).await?),
            "imageUrl" => image_url = Some(read_text(field).await?),
            "image" => image = read_photo(field).await?,
            _ => {
                read_bytes(field, MAX_IMAGE_BYTES).await?;
            }
        }
    }

    let photo = match (image, clean_optional_string(image_url)) {
        (Some(photo), _) => PhotoSource::Upload(photo),
        (None, Some(url)) => PhotoSource::ExternalUrl(url),
        (None, None) => PhotoSource::Unchanged,
    };

    Ok(ProfileUpdate {
        username: clean_optional_string(username),
        status_message: clean_optional_string(status_message),
        photo,
    })
}

async fn read_text(field: Field) -> AppResult<String> {
    let bytes = read_bytes(field, MAX_TEXT_FIELD_BYTES).await?;
    String::from_utf8(bytes).map_err(|_| AppError::bad_request())
}

/// 빈 파일 필드는 사진이 없는 것으로 봅니다.
async fn read_photo(field: Field) -> AppResult<Option<UploadedPhoto>> {
    let content_type = field
        .content_type()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let file_name = field
        .content_disposition()
        .and_then(|disposition| disposition.get_filename())
        .map(str::to_string);

    if !content_type.starts_with("image/") && content_type != "application/octet-stream" {
        log::debug!("이미지가 아닌 프로필 사진 업로드: {}", content_type);
        return Err(AppError::ValidationError("Image file required".to_string()));
    }

    let bytes = read_bytes(field, MAX_IMAGE_BYTES).await?;
    if bytes.is_empty() {
        return Ok(None);
    }

    Ok(Some(UploadedPhoto { bytes, content_type, file_name }))
}

async fn read_bytes(mut field: Field, limit: usize) -> AppResult<Vec<u8>> {
    let mut buffer = Vec::new();

    while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
        if buffer.len() + chunk.len() > limit {
            return Err(AppError::ValidationError("File too large".to_string()));
        }
        buffer.extend_from_slice(&chunk);
    }

    Ok(buffer)
}

fn multipart_error(err: actix_multipart::MultipartError) -> AppError {
    log::debug!("multipart 파싱 실패: {}", err);
    AppError::bad_request()
}

#[cfg(test)]
mod tests {
    use actix_web::{
        cookie::Cookie,
        http::{header, StatusCode},
        test, App,
    };
    use serde_json::json;

    use crate::domain::entities::users::user::User;
    use crate::repositories::sessions::SessionStore;
    use crate::services::auth::REFRESH_TOKEN_COOKIE;
    use crate::test_support::TestContext;

    const BOUNDARY: &str = "----profile-form-boundary";

    macro_rules! test_app {
        ($ctx:expr) => {{
            let state = $ctx.app_state();
            test::init_service(App::new().configure(move |cfg| state.register(cfg))).await
        }};
    }

    /// 로그인 상태의 사용자와 (Bearer 헤더, 리프레시 쿠키)
    async fn signed_in(ctx: &TestContext) -> (User, String, Cookie<'static>) {
        let user = ctx.insert_local_user("a@x.com", "password123").await;
        let pair = ctx.tokens.generate_token_pair(&user).unwrap();
        ctx.sessions
            .store_refresh_token(&user.id_string(), &pair.refresh_token)
            .await
            .unwrap();
        (
            user,
            format!("Bearer {}", pair.access_token),
            Cookie::new(REFRESH_TOKEN_COOKIE, pair.refresh_token),
        )
    }

    fn multipart_body(text_fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in text_fields {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                    BOUNDARY, name, value
                )
                .as_bytes(),
            );
        }
        if let Some((file_name, bytes)) = image {
            body.extend_from_slice(
                format!(
                    "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\nContent-Type: image/png\r\n\r\n",
                    BOUNDARY, file_name
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    /// `image` 파트 하나만 담은 본문
    fn image_only_body(content_type: &str, bytes: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"upload.bin\"\r\nContent-Type: {}\r\n\r\n",
            BOUNDARY, content_type
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    #[actix_web::test]
    async fn test_update_profile_with_uploaded_image() {
        let ctx = TestContext::new();
        let (user, bearer, cookie) = signed_in(&ctx).await;
        let app = test_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/update-profile")
            .insert_header((header::AUTHORIZATION, bearer))
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .cookie(cookie)
            .set_payload(multipart_body(
                &[("username", "renamed"), ("statusMessage", "busy")],
                Some(("me.png", &[137, 80, 78, 71])),
            ))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let uploaded = ctx.storage.uploaded();
        assert_eq!(uploaded.len(), 1);
        assert_eq!(body["profilePhoto"], uploaded[0]);

        let stored = ctx.users.get(&user.id).unwrap();
        assert_eq!(stored.username, "renamed");
        assert_eq!(stored.status_message.as_deref(), Some("busy"));
        assert_eq!(stored.profile_photo_url.as_deref(), Some(uploaded[0].as_str()));
    }

    #[actix_web::test]
    async fn test_update_profile_with_image_url_skips_upload() {
        let ctx = TestContext::new();
        let (user, bearer, cookie) = signed_in(&ctx).await;
        let app = test_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/update-profile")
            .insert_header((header::AUTHORIZATION, bearer))
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .cookie(cookie)
            .set_payload(multipart_body(&[("imageUrl", "https://cdn.test/me.png")], None))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(ctx.storage.uploaded().is_empty());
        let stored = ctx.users.get(&user.id).unwrap();
        assert_eq!(stored.profile_photo_url.as_deref(), Some("https://cdn.test/me.png"));
        assert_eq!(stored.username, user.username);
    }

    #[actix_web::test]
    async fn test_update_profile_rejects_oversized_image() {
        let ctx = TestContext::new();
        let (user, bearer, cookie) = signed_in(&ctx).await;
        let app = test_app!(ctx);

        let oversized = vec![0u8; super::MAX_IMAGE_BYTES + 1];
        let req = test::TestRequest::post()
            .uri("/update-profile")
            .insert_header((header::AUTHORIZATION, bearer))
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .cookie(cookie)
            .set_payload(image_only_body("image/png", &oversized))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "File too large");
        assert!(ctx.storage.uploaded().is_empty());
        assert_eq!(ctx.users.get(&user.id).unwrap().profile_photo_url, user.profile_photo_url);
    }

    #[actix_web::test]
    async fn test_update_profile_rejects_non_image_part() {
        let ctx = TestContext::new();
        let (_user, bearer, cookie) = signed_in(&ctx).await;
        let app = test_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/update-profile")
            .insert_header((header::AUTHORIZATION, bearer))
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .cookie(cookie)
            .set_payload(image_only_body("text/plain", b"not a picture"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Image file required");
        assert!(ctx.storage.uploaded().is_empty());
    }

    #[actix_web::test]
    async fn test_update_password_checks_current_password() {
        let ctx = TestContext::new();
        let (_, bearer, cookie) = signed_in(&ctx).await;
        let app = test_app!(ctx);

        let wrong = test::TestRequest::post()
            .uri("/update-password")
            .insert_header((header::AUTHORIZATION, bearer.clone()))
            .cookie(cookie.clone())
            .set_json(json!({"password": "not-it", "newPassword": "new-password"}))
            .to_request();
        let resp = test::call_service(&app, wrong).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Current password is incorrect");

        let right = test::TestRequest::post()
            .uri("/update-password")
            .insert_header((header::AUTHORIZATION, bearer))
            .cookie(cookie)
            .set_json(json!({"password": "password123", "newPassword": "new-password"}))
            .to_request();
        assert_eq!(test::call_service(&app, right).await.status(), StatusCode::OK);

        let login = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({"email": "a@x.com", "password": "new-password"}))
            .to_request();
        assert_eq!(test::call_service(&app, login).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_signout_deletes_account_and_refresh_slot() {
        let ctx = TestContext::new();
        let (user, bearer, cookie) = signed_in(&ctx).await;
        let app = test_app!(ctx);

        let req = test::TestRequest::delete()
            .uri("/signout")
            .insert_header((header::AUTHORIZATION, bearer))
            .cookie(cookie)
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(ctx.users.get(&user.id).is_none());
        assert!(ctx.sessions.refresh_token(&user.id_string()).await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_fetch_user_and_users() {
        let ctx = TestContext::new();
        let alice = ctx.insert_local_user("a@x.com", "password123").await;
        let bob = ctx.insert_local_user("b@x.com", "password123").await;
        let app = test_app!(ctx);

        let req = test::TestRequest::get()
            .uri(&format!("/fetch-user?userId={}", alice.id_string()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["user"]["userId"], alice.id_string());

        let missing = test::TestRequest::get()
            .uri("/fetch-user?userId=000000000000000000000000")
            .to_request();
        assert_eq!(test::call_service(&app, missing).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri(&format!("/fetch-users?userIds={},{}", alice.id_string(), bob.id_string()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["users"].as_array().unwrap().len(), 2);

        let malformed = test::TestRequest::get().uri("/fetch-users?userIds=abc").to_request();
        assert_eq!(test::call_service(&app, malformed).await.status(), StatusCode::BAD_REQUEST);
    }
}
