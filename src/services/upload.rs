//! Media upload to object storage through pre-signed URLs
//!
//! The backend hands out a signed PUT target; bytes go straight to the bucket
//! and the durable public URL is derived from the bucket name and file key.

use super::api::{ApiError, Backend};
use super::endpoints::request_upload;
use crate::config::AppConfig;

/// Upload path for images and other plain files
pub const FILE_PATH: &str = "";
/// Upload path for videos
pub const VIDEO_PATH: &str = "/video";
/// Upload path for video thumbnails
pub const THUMBNAIL_PATH: &str = "/thumbnail";

/// Upload `bytes` and return the public media URL
pub async fn upload_file(
    backend: &dyn Backend,
    config: &AppConfig,
    bytes: Vec<u8>,
    content_type: &str,
    path: &str,
) -> Result<String, ApiError> {
    let ticket = request_upload(backend, path, content_type).await?;

    log::debug!("Received upload slot for {}", ticket.file_key);

    backend
        .put_object(&ticket.url, bytes, &ticket.file_type)
        .await?;

    let media_url = config.media_url(&ticket.file_key);
    log::info!("Media uploaded: {}", media_url);
    Ok(media_url)
}

/// URLs of an uploaded video and its thumbnail
#[derive(Debug, Clone, PartialEq)]
pub struct VideoUpload {
    pub media_url: String,
    pub thumbnail_url: String,
}

/// Upload a video and its thumbnail side by side. Fails as a whole if either fails.
pub async fn upload_video_and_thumbnail(
    backend: &dyn Backend,
    config: &AppConfig,
    video: Vec<u8>,
    video_type: &str,
    thumbnail: Vec<u8>,
    thumbnail_type: &str,
) -> Result<VideoUpload, ApiError> {
    let (media_url, thumbnail_url) = futures::future::try_join(
        upload_file(backend, config, video, video_type, VIDEO_PATH),
        upload_file(backend, config, thumbnail, thumbnail_type, THUMBNAIL_PATH),
    )
    .await?;
    Ok(VideoUpload {
        media_url,
        thumbnail_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api::mock::MockBackend;
    use crate::services::api::Method;
    use serde_json::json;

    fn config() -> AppConfig {
        AppConfig {
            api_base: "http://api".to_string(),
            auth_base: "http://auth".to_string(),
            socket_url: "ws://rt".to_string(),
            media_bucket: "media".to_string(),
        }
    }

    #[tokio::test]
    async fn test_upload_puts_with_ticket_content_type() {
        let backend = MockBackend::new();
        backend.reply(
            Method::Post,
            "/file",
            Ok(json!({"url": "https://signed/put", "fileKey": "img/a.png", "fileType": "image/png"})),
        );

        let url = upload_file(&backend, &config(), vec![1, 2, 3], "image/png", FILE_PATH)
            .await
            .unwrap();

        assert_eq!(url, "https://media.s3.amazonaws.com/img/a.png");
        let puts = backend.puts.borrow();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].url, "https://signed/put");
        assert_eq!(puts[0].content_type, "image/png");
        assert_eq!(puts[0].len, 3);
    }

    #[tokio::test]
    async fn test_failed_put_fails_upload() {
        let backend = MockBackend::new();
        backend.reply(
            Method::Post,
            "/file",
            Ok(json!({"url": "https://signed/put", "fileKey": "k", "fileType": "image/png"})),
        );
        backend.fail_puts(ApiError::Status { code: 403, message: String::new() });

        assert!(upload_file(&backend, &config(), vec![1], "image/png", FILE_PATH).await.is_err());
    }

    #[tokio::test]
    async fn test_video_and_thumbnail_use_separate_paths() {
        let backend = MockBackend::new();
        backend.reply(
            Method::Post,
            "/file/video",
            Ok(json!({"url": "https://signed/v", "fileKey": "v.mp4", "fileType": "video/mp4"})),
        );
        backend.reply(
            Method::Post,
            "/file/thumbnail",
            Ok(json!({"url": "https://signed/t", "fileKey": "t.jpg", "fileType": "image/jpeg"})),
        );

        let uploaded = upload_video_and_thumbnail(
            &backend,
            &config(),
            vec![0; 10],
            "video/mp4",
            vec![0; 4],
            "image/jpeg",
        )
        .await
        .unwrap();

        assert_eq!(uploaded.media_url, "https://media.s3.amazonaws.com/v.mp4");
        assert_eq!(uploaded.thumbnail_url, "https://media.s3.amazonaws.com/t.jpg");
        assert_eq!(backend.puts.borrow().len(), 2);
    }
}
