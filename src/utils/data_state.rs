/// State of a one-shot async load (session, profile, single post)
///
/// One enum instead of separate loading/error/data signals, so a screen can
/// never be loading and failed at the same time.
///
/// ```ignore
/// let mut session = use_signal(|| DataState::Loading);
///
/// spawn(async move {
///     session.set(resolve_viewer(backend.as_ref()).await);
/// });
///
/// match &*session.read() {
///     DataState::Loaded(viewer) => rsx! { "@{viewer.username}" },
///     DataState::Error(msg) => rsx! { ErrorPanel { message: msg.clone() } },
///     _ => rsx! { Loading {} },
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DataState<T> {
    /// Nothing requested yet
    Pending,

    /// Request in flight
    Loading,

    Loaded(T),

    /// Failed; holds the user-facing message
    Error(String),
}

impl<T> DataState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, DataState::Pending | DataState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            DataState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DataState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn map<U, F>(self, f: F) -> DataState<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            DataState::Pending => DataState::Pending,
            DataState::Loading => DataState::Loading,
            DataState::Loaded(data) => DataState::Loaded(f(data)),
            DataState::Error(msg) => DataState::Error(msg),
        }
    }
}

impl<T> Default for DataState<T> {
    fn default() -> Self {
        DataState::Pending
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for DataState<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => DataState::Loaded(data),
            Err(err) => DataState::Error(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_counts_as_loading() {
        let state: DataState<i32> = DataState::default();
        assert!(state.is_loading());
        assert!(DataState::<i32>::Loading.is_loading());
        assert!(!DataState::Loaded(1).is_loading());
    }

    #[test]
    fn test_accessors() {
        let state = DataState::Loaded(42);
        assert_eq!(state.data(), Some(&42));
        assert_eq!(state.error(), None);

        let state: DataState<i32> = DataState::Error("nope".to_string());
        assert_eq!(state.error(), Some("nope"));
        assert_eq!(state.data(), None);
    }

    #[test]
    fn test_map_keeps_error() {
        let state: DataState<i32> = DataState::Error("e".into());
        assert_eq!(state.map(|x| x + 1), DataState::Error("e".into()));
        assert_eq!(DataState::Loaded(1).map(|x| x + 1), DataState::Loaded(2));
    }

    #[test]
    fn test_from_result() {
        let state: DataState<i32> = Err::<i32, _>("boom").into();
        assert_eq!(state.error(), Some("boom"));
        let state: DataState<i32> = Ok::<_, String>(7).into();
        assert_eq!(state.data(), Some(&7));
    }
}
