//! Post composition pipeline
//!
//! validate -> (probe video) -> upload media -> create post
//!
//! Nothing is posted unless every upload succeeded.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::AppConfig;
use crate::services::endpoints;
use crate::services::upload::{upload_file, upload_video_and_thumbnail, FILE_PATH};
use crate::services::{ApiError, Backend, NewPost};

/// Maximum post length in characters
pub const MAX_MESSAGE_LEN: usize = 200;

pub const EMPTY_POST_MESSAGE: &str = "Please write a message or add media";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

/// A file picked by the user, already read into memory
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn kind(&self) -> MediaKind {
        if self.content_type.starts_with("video/") {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComposeError {
    #[error("{}", EMPTY_POST_MESSAGE)]
    Empty,
    #[error("Posts are limited to {} characters", MAX_MESSAGE_LEN)]
    TooLong,
    #[error("A post is already being submitted")]
    Busy,
    #[error("Could not read video: {0}")]
    Probe(String),
    #[error("Upload failed: {0}")]
    Upload(ApiError),
    #[error("{0}")]
    Submit(ApiError),
}

impl ComposeError {
    /// Validation problems are shown as alerts, not error toasts
    pub fn is_validation(&self) -> bool {
        matches!(self, ComposeError::Empty | ComposeError::TooLong | ComposeError::Busy)
    }

    pub fn user_message(&self) -> String {
        match self {
            ComposeError::Upload(e) | ComposeError::Submit(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// Client-side video inspection
#[async_trait(?Send)]
pub trait MediaProbe {
    /// Duration in seconds
    async fn video_duration(&self, video: &Attachment) -> Result<f64, String>;

    /// Still frame to use as the thumbnail
    async fn video_thumbnail(&self, video: &Attachment) -> Result<Attachment, String>;
}

/// Draft being edited in the composer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Draft {
    pub message: String,
    pub attachment: Option<Attachment>,
}

impl Draft {
    pub fn char_count(&self) -> usize {
        self.message.chars().count()
    }

    pub fn remaining(&self) -> usize {
        MAX_MESSAGE_LEN.saturating_sub(self.char_count())
    }

    pub fn validate(&self) -> Result<(), ComposeError> {
        if self.message.trim().is_empty() && self.attachment.is_none() {
            return Err(ComposeError::Empty);
        }
        if self.char_count() > MAX_MESSAGE_LEN {
            return Err(ComposeError::TooLong);
        }
        Ok(())
    }

    /// Set the message, cutting it at the length limit
    pub fn set_message(&mut self, message: &str) {
        self.message = message.chars().take(MAX_MESSAGE_LEN).collect();
    }
}

/// Upload media and create the post described by `draft`
pub async fn submit(
    backend: &dyn Backend,
    probe: &dyn MediaProbe,
    config: &AppConfig,
    draft: &Draft,
) -> Result<NewPost, ComposeError> {
    draft.validate()?;

    let mut post = NewPost {
        message: draft.message.clone(),
        ..Default::default()
    };

    if let Some(attachment) = &draft.attachment {
        match attachment.kind() {
            MediaKind::Video => {
                let duration = probe
                    .video_duration(attachment)
                    .await
                    .map_err(ComposeError::Probe)?;
                let thumbnail = probe
                    .video_thumbnail(attachment)
                    .await
                    .map_err(ComposeError::Probe)?;

                let uploaded = upload_video_and_thumbnail(
                    backend,
                    config,
                    attachment.bytes.clone(),
                    &attachment.content_type,
                    thumbnail.bytes,
                    &thumbnail.content_type,
                )
                .await
                .map_err(ComposeError::Upload)?;

                post.duration = duration.max(0.0).floor() as u32;
                post.media = uploaded.media_url;
                post.thumbnail = uploaded.thumbnail_url;
            }
            MediaKind::Image => {
                post.media = upload_file(
                    backend,
                    config,
                    attachment.bytes.clone(),
                    &attachment.content_type,
                    FILE_PATH,
                )
                .await
                .map_err(ComposeError::Upload)?;
            }
        }
    }

    endpoints::create_post(backend, &post)
        .await
        .map_err(ComposeError::Submit)?;

    log::info!("Post created (media: {})", !post.media.is_empty());
    Ok(post)
}

/// Composer state with a submission guard
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Composer {
    pub draft: Draft,
    submitting: bool,
}

impl Composer {
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Lock the composer and hand out the draft to submit
    pub fn begin_submit(&mut self) -> Result<Draft, ComposeError> {
        if self.submitting {
            return Err(ComposeError::Busy);
        }
        self.draft.validate()?;
        self.submitting = true;
        Ok(self.draft.clone())
    }

    /// Unlock; a successful submission resets the draft
    pub fn finish_submit<T>(&mut self, result: &Result<T, ComposeError>) {
        self.submitting = false;
        if result.is_ok() {
            self.draft = Draft::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api::mock::MockBackend;
    use crate::services::api::Method;
    use serde_json::json;

    struct FakeProbe {
        duration: f64,
    }

    #[async_trait(?Send)]
    impl MediaProbe for FakeProbe {
        async fn video_duration(&self, _video: &Attachment) -> Result<f64, String> {
            Ok(self.duration)
        }

        async fn video_thumbnail(&self, _video: &Attachment) -> Result<Attachment, String> {
            Ok(Attachment {
                name: "thumb.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
                bytes: vec![9; 4],
            })
        }
    }

    fn config() -> AppConfig {
        AppConfig {
            api_base: "http://api".to_string(),
            auth_base: "http://auth".to_string(),
            socket_url: "ws://rt".to_string(),
            media_bucket: "media".to_string(),
        }
    }

    fn image() -> Attachment {
        Attachment {
            name: "cat.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1; 16],
        }
    }

    fn video() -> Attachment {
        Attachment {
            name: "clip.mp4".to_string(),
            content_type: "video/mp4".to_string(),
            bytes: vec![2; 32],
        }
    }

    fn ticket(key: &str, file_type: &str) -> serde_json::Value {
        json!({"url": format!("https://signed/{}", key), "fileKey": key, "fileType": file_type})
    }

    #[tokio::test]
    async fn test_empty_draft_issues_no_network_call() {
        let backend = MockBackend::new();
        let err = submit(&backend, &FakeProbe { duration: 0.0 }, &config(), &Draft::default())
            .await
            .unwrap_err();
        assert_eq!(err, ComposeError::Empty);
        assert!(err.is_validation());
        assert_eq!(err.user_message(), EMPTY_POST_MESSAGE);
        assert_eq!(backend.call_count(), 0);
        assert!(backend.puts.borrow().is_empty());
    }

    #[test]
    fn test_whitespace_only_message_is_empty() {
        let draft = Draft {
            message: "   ".to_string(),
            attachment: None,
        };
        assert_eq!(draft.validate(), Err(ComposeError::Empty));
    }

    #[tokio::test]
    async fn test_image_only_post_uploads_once_then_creates() {
        let backend = MockBackend::new();
        backend.reply(Method::Post, "/file", Ok(ticket("img/cat.png", "image/png")));
        let draft = Draft {
            message: String::new(),
            attachment: Some(image()),
        };

        let post = submit(&backend, &FakeProbe { duration: 0.0 }, &config(), &draft)
            .await
            .unwrap();

        assert_eq!(backend.calls_to(Method::Post, "/file").len(), 1);
        assert_eq!(backend.puts.borrow().len(), 1);
        let creates = backend.calls_to(Method::Post, "/post");
        assert_eq!(creates.len(), 1);
        let body = creates[0].body.clone().unwrap();
        assert_eq!(body["media"], "https://media.s3.amazonaws.com/img/cat.png");
        assert_eq!(body["duration"], 0);
        assert_eq!(post.thumbnail, "");

        // Upload request precedes post creation
        let order: Vec<_> = backend.calls.borrow().iter().map(|c| c.path.clone()).collect();
        assert_eq!(order, vec!["/file".to_string(), "/post".to_string()]);
    }

    #[tokio::test]
    async fn test_video_post_floors_duration_and_sends_thumbnail() {
        let backend = MockBackend::new();
        backend.reply(Method::Post, "/file/video", Ok(ticket("v.mp4", "video/mp4")));
        backend.reply(Method::Post, "/file/thumbnail", Ok(ticket("t.jpg", "image/jpeg")));
        let draft = Draft {
            message: "look".to_string(),
            attachment: Some(video()),
        };

        let post = submit(&backend, &FakeProbe { duration: 12.9 }, &config(), &draft)
            .await
            .unwrap();

        assert_eq!(post.duration, 12);
        assert_eq!(post.media, "https://media.s3.amazonaws.com/v.mp4");
        assert_eq!(post.thumbnail, "https://media.s3.amazonaws.com/t.jpg");
        assert_eq!(backend.calls_to(Method::Post, "/post").len(), 1);
    }

    #[tokio::test]
    async fn test_failed_upload_creates_no_post() {
        let backend = MockBackend::new();
        backend.reply(Method::Post, "/file", Ok(ticket("img/cat.png", "image/png")));
        backend.fail_puts(ApiError::Network("reset".into()));
        let draft = Draft {
            message: "hi".to_string(),
            attachment: Some(image()),
        };

        let err = submit(&backend, &FakeProbe { duration: 0.0 }, &config(), &draft)
            .await
            .unwrap_err();

        assert!(matches!(err, ComposeError::Upload(_)));
        assert!(!err.is_validation());
        assert!(backend.calls_to(Method::Post, "/post").is_empty());
    }

    #[tokio::test]
    async fn test_text_only_post_skips_upload() {
        let backend = MockBackend::new();
        let draft = Draft {
            message: "hello".to_string(),
            attachment: None,
        };
        let post = submit(&backend, &FakeProbe { duration: 0.0 }, &config(), &draft)
            .await
            .unwrap();
        assert_eq!(post.media, "");
        assert_eq!(backend.call_count(), 1);
    }

    #[test]
    fn test_message_is_capped() {
        let mut draft = Draft::default();
        draft.set_message(&"x".repeat(MAX_MESSAGE_LEN + 20));
        assert_eq!(draft.char_count(), MAX_MESSAGE_LEN);
        assert_eq!(draft.remaining(), 0);

        draft.message = "y".repeat(MAX_MESSAGE_LEN + 1);
        assert_eq!(draft.validate(), Err(ComposeError::TooLong));
    }

    #[test]
    fn test_composer_guard_and_reset() {
        let mut composer = Composer::default();
        composer.draft.set_message("hi");

        let draft = composer.begin_submit().unwrap();
        assert_eq!(draft.message, "hi");
        assert_eq!(composer.begin_submit(), Err(ComposeError::Busy));

        composer.finish_submit::<()>(&Err(ComposeError::Submit(ApiError::Network("x".into()))));
        assert!(!composer.is_submitting());
        assert_eq!(composer.draft.message, "hi");

        composer.begin_submit().unwrap();
        composer.finish_submit(&Ok(()));
        assert_eq!(composer.draft, Draft::default());
    }
}
