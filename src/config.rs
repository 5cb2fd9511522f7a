/// Default backend base URL for local development
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// Default auth service base URL for local development
pub const DEFAULT_AUTH_URL: &str = "http://localhost:8000/auth/v1";

/// Default realtime socket endpoint for local development
pub const DEFAULT_SOCKET_URL: &str = "ws://localhost:8000";

/// Default object storage bucket for media
pub const DEFAULT_MEDIA_BUCKET: &str = "threadly-media";

/// Client configuration, fixed at build time.
///
/// Values come from `THREADLY_API_URL`, `THREADLY_AUTH_URL`,
/// `THREADLY_SOCKET_URL` and `THREADLY_MEDIA_BUCKET` when those are set while
/// compiling, otherwise the local development defaults apply.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base: String,
    pub auth_base: String,
    pub socket_url: String,
    pub media_bucket: String,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self {
            api_base: normalize_base(option_env!("THREADLY_API_URL").unwrap_or(DEFAULT_API_URL)),
            auth_base: normalize_base(option_env!("THREADLY_AUTH_URL").unwrap_or(DEFAULT_AUTH_URL)),
            socket_url: normalize_base(option_env!("THREADLY_SOCKET_URL").unwrap_or(DEFAULT_SOCKET_URL)),
            media_bucket: option_env!("THREADLY_MEDIA_BUCKET")
                .unwrap_or(DEFAULT_MEDIA_BUCKET)
                .to_string(),
        }
    }

    /// Public URL of an object stored under `file_key` in the media bucket
    pub fn media_url(&self, file_key: &str) -> String {
        format!(
            "https://{}.s3.amazonaws.com/{}",
            self.media_bucket,
            file_key.trim_start_matches('/')
        )
    }

    /// Engine.io websocket endpoint derived from the socket base
    pub fn socket_endpoint(&self) -> String {
        format!("{}/socket.io/?EIO=4&transport=websocket", self.socket_url)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_build_env()
    }
}

fn normalize_base(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}
