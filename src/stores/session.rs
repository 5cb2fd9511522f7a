use crate::services::endpoints;
use crate::services::{ApiError, Backend, Profile, Viewer};
use crate::utils::DataState;

pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to continue";

/// Resolve the authenticated viewer. Failures are terminal for this pass.
pub async fn resolve_viewer(backend: &dyn Backend) -> DataState<Viewer> {
    match endpoints::check_session(backend).await {
        Ok(viewer) => {
            log::info!("Session resolved for @{}", viewer.username);
            DataState::Loaded(viewer)
        }
        Err(ApiError::Unauthorized(message)) => {
            log::warn!("No active session");
            let message = if message.trim().is_empty() {
                LOGIN_REQUIRED_MESSAGE.to_string()
            } else {
                message
            };
            DataState::Error(message)
        }
        Err(e) => {
            log::error!("Failed to resolve session: {}", e);
            DataState::Error(e.user_message())
        }
    }
}

/// Resolve the profile shown by the user layout
pub async fn resolve_profile(backend: &dyn Backend, username: &str) -> DataState<Profile> {
    match endpoints::fetch_profile(backend, username).await {
        Ok(profile) => DataState::Loaded(profile),
        Err(e) => {
            log::error!("Failed to load profile @{}: {}", username, e);
            DataState::Error(e.user_message())
        }
    }
}
