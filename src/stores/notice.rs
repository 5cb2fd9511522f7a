use crate::services::GENERIC_ERROR;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    /// Failed network or session call
    Error,
    /// Input problem caught before any request
    Alert,
    Success,
}

/// Transient user-visible message
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    pub fn alert(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Alert, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            GENERIC_ERROR.to_string()
        } else {
            message
        };
        Self { kind, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_message_uses_fallback() {
        assert_eq!(Notice::error("").message, GENERIC_ERROR);
        assert_eq!(Notice::error("  ").message, GENERIC_ERROR);
        assert_eq!(Notice::alert("Add a message").message, "Add a message");
    }
}
