//! Typed wrappers over the REST surface

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::api::{ApiError, ApiRequest, Backend};
use super::types::{NewPost, Page, Post, Profile, Room, UploadTicket, Viewer};

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Row-level relations the viewer can toggle on a post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Like,
    Save,
}

impl Relation {
    pub fn path(&self) -> &'static str {
        match self {
            Relation::Like => "/like",
            Relation::Save => "/save",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Relation::Like => "like",
            Relation::Save => "save",
        }
    }
}

/// Whether the viewer has the relation with `post_id` (a non-null body means yes)
pub async fn has_relation(backend: &dyn Backend, relation: Relation, post_id: &str) -> Result<bool, ApiError> {
    let body = backend
        .send(ApiRequest::get(relation.path()).query("id", post_id))
        .await?;
    Ok(!matches!(body, Value::Null | Value::Bool(false)))
}

/// POST to add the relation, DELETE to remove it
pub async fn set_relation(backend: &dyn Backend, relation: Relation, post_id: &str, on: bool) -> Result<(), ApiError> {
    let request = if on {
        ApiRequest::post(relation.path())
    } else {
        ApiRequest::delete(relation.path())
    };
    backend.send(request.query("id", post_id)).await?;
    Ok(())
}

pub async fn set_following(backend: &dyn Backend, user_id: &str, follow: bool) -> Result<(), ApiError> {
    let request = if follow {
        ApiRequest::post("/user/following")
    } else {
        ApiRequest::delete("/user/following")
    };
    backend.send(request.query("id", user_id)).await?;
    Ok(())
}

pub async fn create_post(backend: &dyn Backend, post: &NewPost) -> Result<(), ApiError> {
    let body = serde_json::to_value(post).map_err(|e| ApiError::Decode(e.to_string()))?;
    backend.send(ApiRequest::post("/post").json(body)).await?;
    Ok(())
}

pub async fn delete_post(backend: &dyn Backend, post_id: &str) -> Result<(), ApiError> {
    backend.send(ApiRequest::delete("/post").query("id", post_id)).await?;
    Ok(())
}

pub async fn fetch_post(backend: &dyn Backend, post_id: &str) -> Result<Post, ApiError> {
    let body = backend.send(ApiRequest::get("/post").query("id", post_id)).await?;
    decode(body)
}

pub async fn delete_room(backend: &dyn Backend, room_id: &str) -> Result<(), ApiError> {
    backend.send(ApiRequest::delete("/room").query("id", room_id)).await?;
    Ok(())
}

/// Page of the rooms the viewer takes part in
pub async fn fetch_rooms(backend: &dyn Backend, page: u32) -> Result<Vec<Room>, ApiError> {
    let body = backend.send(ApiRequest::get("/room").query("page", page)).await?;
    Ok(decode::<Page<Room>>(body)?.data)
}

/// Page of posts liked by `username`
pub async fn fetch_liked_posts(backend: &dyn Backend, username: &str, page: u32) -> Result<Vec<Post>, ApiError> {
    let body = backend
        .send(
            ApiRequest::get("/user/likes")
                .query("username", username)
                .query("page", page),
        )
        .await?;
    Ok(decode::<Page<Post>>(body)?.data)
}

/// Resolve the session user
pub async fn check_session(backend: &dyn Backend) -> Result<Viewer, ApiError> {
    let body = backend.send(ApiRequest::get("/user/check")).await?;
    if body.is_null() {
        return Err(ApiError::Unauthorized("Please log in to continue".to_string()));
    }
    decode(body)
}

pub async fn fetch_profile(backend: &dyn Backend, username: &str) -> Result<Profile, ApiError> {
    let body = backend
        .send(ApiRequest::get("/user/profile").query("username", username))
        .await?;
    if body.is_null() {
        return Err(ApiError::NotFound(format!("@{} does not exist", username)));
    }
    decode(body)
}

/// Ask for a pre-signed upload slot under `/file{path}`
pub async fn request_upload(backend: &dyn Backend, path: &str, file_type: &str) -> Result<UploadTicket, ApiError> {
    let body = backend
        .send(ApiRequest::post(format!("/file{}", path)).json(json!({ "fileType": file_type })))
        .await?;
    decode(body)
}

/// Submit the signup one-time code to the auth service
pub async fn verify_signup(backend: &dyn Backend, otp: &str) -> Result<(), ApiError> {
    backend
        .send(ApiRequest::post("/signup/verify").auth().json(json!({ "otp": otp })))
        .await?;
    Ok(())
}
