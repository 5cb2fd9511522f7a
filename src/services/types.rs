use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Anything held in a paginated list, keyed by its server id
pub trait Identified {
    fn id(&self) -> &str;
}

/// Author summary embedded in posts and rooms
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Author {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub photo: String,
}

/// A post as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: Author,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub media: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub duration: u32,
    #[serde(rename = "likeCount", default)]
    pub like_count: u64,
    #[serde(rename = "saveCount", default)]
    pub save_count: u64,
    #[serde(rename = "commentCount", default)]
    pub comment_count: u64,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "isFollow", default)]
    pub is_follow: bool,
}

impl Post {
    /// Overlay the fields present in `update`. Counts stay as fetched.
    pub fn apply_update(&mut self, update: &PostUpdate) {
        if update.id != self.id {
            return;
        }
        if let Some(message) = &update.message {
            self.message = message.clone();
        }
        if let Some(media) = &update.media {
            self.media = Some(media.clone()).filter(|m| !m.is_empty());
        }
        if let Some(is_follow) = update.is_follow {
            self.is_follow = is_follow;
        }
    }

    pub fn apply_follow(&mut self, change: &FollowChange) {
        if self.user.id == change.user_id {
            self.is_follow = change.is_follow;
        }
    }

    pub fn has_video(&self) -> bool {
        self.duration > 0 || self.thumbnail.as_deref().is_some_and(|t| !t.is_empty())
    }
}

impl Identified for Post {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Partial edit of a post pushed through the store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PostUpdate {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub media: Option<String>,
    #[serde(rename = "isFollow", default)]
    pub is_follow: Option<bool>,
}

impl PostUpdate {
    /// Combine with a later edit of the same post; the later fields win
    pub fn merged_with(self, later: PostUpdate) -> PostUpdate {
        PostUpdate {
            id: later.id,
            message: later.message.or(self.message),
            media: later.media.or(self.media),
            is_follow: later.is_follow.or(self.is_follow),
        }
    }
}

/// Follow state of the viewer towards `user_id` changed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FollowChange {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "isFollow")]
    pub is_follow: bool,
}

/// A direct-message conversation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Room {
    #[serde(rename = "_id")]
    pub id: String,
    pub users: Vec<Author>,
}

impl Room {
    /// The participant that is not the viewer
    pub fn other_participant(&self, viewer_id: &str) -> Option<&Author> {
        self.users.iter().find(|user| user.id != viewer_id)
    }
}

impl Identified for Room {
    fn id(&self) -> &str {
        &self.id
    }
}

/// The authenticated user of this client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Viewer {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Public profile shown by the user layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(rename = "followerCount", default)]
    pub follower_count: u64,
    #[serde(rename = "followingCount", default)]
    pub following_count: u64,
    #[serde(rename = "isFollow", default)]
    pub is_follow: bool,
}

/// Pre-signed upload target handed out by `POST /file{path}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadTicket {
    pub url: String,
    #[serde(rename = "fileKey")]
    pub file_key: String,
    #[serde(rename = "fileType")]
    pub file_type: String,
}

/// Body of `POST /post`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NewPost {
    pub message: String,
    pub media: String,
    pub duration: u32,
    pub thumbnail: String,
}

/// Paged collection envelope
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
}
