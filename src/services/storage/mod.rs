//! 프로필 사진 저장소 협력자

use async_trait::async_trait;

use crate::core::errors::AppResult;

pub mod gcs_storage;

pub use gcs_storage::GcsObjectStorage;

/// 업로드된 프로필 사진
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedPhoto {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub file_name: Option<String>,
}

impl UploadedPhoto {
    /// 저장 객체 이름에 붙일 확장자
    ///
    /// 파일 이름의 확장자를 우선 사용하고, 없으면 MIME 타입에서 추론합니다.
    pub fn extension(&self) -> String {
        let from_name = self
            .file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()));

        from_name.unwrap_or_else(|| {
            match self.content_type.as_str() {
                "image/jpeg" => "jpg",
                "image/png" => "png",
                "image/gif" => "gif",
                "image/webp" => "webp",
                _ => "bin",
            }
            .to_string()
        })
    }
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// 사진을 업로드하고 공개 URL을 반환합니다.
    async fn upload(&self, photo: &UploadedPhoto) -> AppResult<String>;

    /// 공개 URL로 객체를 삭제합니다. 이 저장소 소유가 아닌 URL은 무시합니다.
    async fn delete(&self, url: &str) -> AppResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(content_type: &str, file_name: Option<&str>) -> UploadedPhoto {
        UploadedPhoto {
            bytes: vec![1, 2, 3],
            content_type: content_type.to_string(),
            file_name: file_name.map(str::to_string),
        }
    }

    #[test]
    fn test_extension_prefers_file_name() {
        assert_eq!(photo("image/png", Some("me.JPEG")).extension(), "jpeg");
        assert_eq!(photo("image/png", Some("noext")).extension(), "png");
        assert_eq!(photo("application/octet-stream", None).extension(), "bin");
    }
}
