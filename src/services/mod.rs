// Network-facing services
// REST calls, media upload and the realtime channel

pub mod api;
pub mod endpoints;
pub mod media_probe;
pub mod realtime;
pub mod socket;
pub mod types;
pub mod upload;

pub use api::{ApiError, Backend, HttpBackend, GENERIC_ERROR};
pub use realtime::{EventKind, RealtimeEvent, RealtimeHub, Subscription};
pub use types::{Author, FollowChange, Identified, NewPost, Post, PostUpdate, Profile, Room, Viewer};
