//! Google Cloud Storage JSON API 기반 저장소
//!
//! - 업로드: `POST {api}/upload/storage/v1/b/{bucket}/o?uploadType=media&name=...`
//! - 삭제: `DELETE {api}/storage/v1/b/{bucket}/o/{object}`
//! - 공개 URL: `{public}/{bucket}/{object}`

use async_trait::async_trait;
use reqwest::Client;
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};

use super::{ObjectStorage, UploadedPhoto};

const OBJECT_PREFIX: &str = "profile-photos";

pub struct GcsObjectStorage {
    client: Client,
    config: StorageConfig,
}

impl GcsObjectStorage {
    pub fn new(client: Client, config: StorageConfig) -> Self {
        Self { client, config }
    }

    fn public_url(&self, object_name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.public_base_url.trim_end_matches('/'),
            self.config.bucket,
            object_name
        )
    }

    /// 이 버킷의 공개 URL이면 객체 이름을 돌려줍니다.
    fn object_name_of<'a>(&self, url: &'a str) -> Option<&'a str> {
        let prefix = format!(
            "{}/{}/",
            self.config.public_base_url.trim_end_matches('/'),
            self.config.bucket
        );
        url.strip_prefix(prefix.as_str()).filter(|name| !name.is_empty())
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl ObjectStorage for GcsObjectStorage {
    async fn upload(&self, photo: &UploadedPhoto) -> AppResult<String> {
        let object_name = format!("{}/{}.{}", OBJECT_PREFIX, Uuid::new_v4(), photo.extension());
        let url = format!(
            "{}/upload/storage/v1/b/{}/o?uploadType=media&name={}",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.bucket,
            urlencoding::encode(&object_name)
        );

        let response = self
            .authorized(self.client.post(&url))
            .header(reqwest::header::CONTENT_TYPE, photo.content_type.as_str())
            .body(photo.bytes.clone())
            .send()
            .await
            .context("사진 업로드 요청 실패")?;

        if !response.status().is_success() {
            return Err(AppError::InternalError(format!(
                "사진 업로드 실패: HTTP {}",
                response.status()
            )));
        }

        log::debug!("프로필 사진 업로드 완료: {}", object_name);
        Ok(self.public_url(&object_name))
    }

    async fn delete(&self, url: &str) -> AppResult<()> {
        let Some(object_name) = self.object_name_of(url) else {
            log::debug!("외부 URL은 삭제하지 않음: {}", url);
            return Ok(());
        };

        let endpoint = format!(
            "{}/storage/v1/b/{}/o/{}",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.bucket,
            urlencoding::encode(object_name)
        );

        let response = self
            .authorized(self.client.delete(&endpoint))
            .send()
            .await
            .context("사진 삭제 요청 실패")?;

        let status = response.status();
        if status.is_success() || status == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }

        Err(AppError::InternalError(format!("사진 삭제 실패: HTTP {}", status)))
    }
}
