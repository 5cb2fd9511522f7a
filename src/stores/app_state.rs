//! Cross-screen application state
//!
//! One [`AppState`] per client, split into typed slices. Changes go through
//! [`reduce`], a pure function that returns a new state with exactly one
//! slice replaced. [`AppStore`] holds the state in a Dioxus signal and is
//! handed to the tree with `use_context_provider`.

use dioxus::prelude::*;

use crate::services::{FollowChange, PostUpdate, Room, Viewer};

#[derive(Clone, Debug, PartialEq, Default)]
pub struct UserSlice {
    pub viewer: Option<Viewer>,
    pub liked_posts_count: usize,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct ToggleSlice {
    pub composer_open: bool,
    pub sidebar_open: bool,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct RoomSlice {
    pub rooms: Vec<Room>,
    /// Rooms deleted by the viewer, waiting for list screens to drop them
    pub removed: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct PostSlice {
    pub updates: Vec<PostUpdate>,
    pub deleted: Vec<String>,
    /// Posts currently open in a detail view
    pub opened: Vec<String>,
}

impl PostSlice {
    pub fn is_deleted(&self, id: &str) -> bool {
        self.deleted.iter().any(|d| d == id)
    }

    /// Most recent pending update for `id`
    pub fn update_for(&self, id: &str) -> Option<&PostUpdate> {
        self.updates.iter().rev().find(|u| u.id == id)
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct FollowingSlice {
    pub changes: Vec<FollowChange>,
}

impl FollowingSlice {
    /// Latest known follow state towards `user_id`
    pub fn state_for(&self, user_id: &str) -> Option<bool> {
        self.changes
            .iter()
            .rev()
            .find(|c| c.user_id == user_id)
            .map(|c| c.is_follow)
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct AppState {
    pub user: UserSlice,
    pub toggle: ToggleSlice,
    pub room: RoomSlice,
    pub post: PostSlice,
    pub following: FollowingSlice,
}

#[derive(Clone, Debug, PartialEq)]
pub enum UserAction {
    SetViewer(Viewer),
    ClearViewer,
    SetLikedPostsCount(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ToggleAction {
    SetComposerOpen(bool),
    ToggleSidebar,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RoomAction {
    SetRooms(Vec<Room>),
    RoomRemoved(String),
    ClearRemoved,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PostAction {
    PostUpdated(PostUpdate),
    PostDeleted(String),
    PostOpened(String),
    PostClosed(String),
    ClearPending,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FollowingAction {
    FollowChanged(FollowChange),
    Clear,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    User(UserAction),
    Toggle(ToggleAction),
    Room(RoomAction),
    Post(PostAction),
    Following(FollowingAction),
}

fn reduce_user(slice: &UserSlice, action: UserAction) -> UserSlice {
    match action {
        UserAction::SetViewer(viewer) => UserSlice {
            viewer: Some(viewer),
            ..slice.clone()
        },
        UserAction::ClearViewer => UserSlice::default(),
        UserAction::SetLikedPostsCount(count) => UserSlice {
            liked_posts_count: count,
            ..slice.clone()
        },
    }
}

fn reduce_toggle(slice: &ToggleSlice, action: ToggleAction) -> ToggleSlice {
    match action {
        ToggleAction::SetComposerOpen(open) => ToggleSlice {
            composer_open: open,
            ..slice.clone()
        },
        ToggleAction::ToggleSidebar => ToggleSlice {
            sidebar_open: !slice.sidebar_open,
            ..slice.clone()
        },
    }
}

fn reduce_room(slice: &RoomSlice, action: RoomAction) -> RoomSlice {
    match action {
        RoomAction::SetRooms(rooms) => RoomSlice {
            rooms: rooms
                .into_iter()
                .filter(|r| !slice.removed.contains(&r.id))
                .collect(),
            removed: slice.removed.clone(),
        },
        RoomAction::RoomRemoved(id) => {
            let mut removed = slice.removed.clone();
            if !removed.contains(&id) {
                removed.push(id.clone());
            }
            RoomSlice {
                rooms: slice.rooms.iter().filter(|r| r.id != id).cloned().collect(),
                removed,
            }
        }
        RoomAction::ClearRemoved => RoomSlice {
            rooms: slice.rooms.clone(),
            removed: Vec::new(),
        },
    }
}

fn reduce_post(slice: &PostSlice, action: PostAction) -> PostSlice {
    match action {
        PostAction::PostUpdated(update) => {
            let mut updates = slice.updates.clone();
            // One entry per post: fold the earlier edit into the new one
            let merged = match updates.iter().position(|u| u.id == update.id) {
                Some(index) => updates.remove(index).merged_with(update),
                None => update,
            };
            updates.push(merged);
            PostSlice {
                updates: keep_latest(updates),
                ..slice.clone()
            }
        }
        PostAction::PostDeleted(id) => {
            let mut deleted = slice.deleted.clone();
            if !deleted.contains(&id) {
                deleted.push(id.clone());
            }
            PostSlice {
                updates: slice.updates.iter().filter(|u| u.id != id).cloned().collect(),
                deleted: keep_latest(deleted),
                opened: slice.opened.clone(),
            }
        }
        PostAction::PostOpened(id) => {
            let mut opened = slice.opened.clone();
            if !opened.contains(&id) {
                opened.push(id);
            }
            PostSlice {
                opened,
                ..slice.clone()
            }
        }
        PostAction::PostClosed(id) => PostSlice {
            opened: slice.opened.iter().filter(|o| **o != id).cloned().collect(),
            ..slice.clone()
        },
        PostAction::ClearPending => PostSlice {
            updates: Vec::new(),
            deleted: Vec::new(),
            opened: slice.opened.clone(),
        },
    }
}

fn reduce_following(slice: &FollowingSlice, action: FollowingAction) -> FollowingSlice {
    match action {
        FollowingAction::FollowChanged(change) => {
            let mut changes: Vec<FollowChange> = slice
                .changes
                .iter()
                .filter(|c| c.user_id != change.user_id)
                .cloned()
                .collect();
            changes.push(change);
            FollowingSlice {
                changes: keep_latest(changes),
            }
        }
        FollowingAction::Clear => FollowingSlice::default(),
    }
}

/// Most pending entries a slice keeps; older ones belong to lists long gone
pub const MAX_PENDING: usize = 200;

fn keep_latest<T>(mut entries: Vec<T>) -> Vec<T> {
    if entries.len() > MAX_PENDING {
        entries.drain(..entries.len() - MAX_PENDING);
    }
    entries
}

/// Apply `action`, replacing the slice it targets
pub fn reduce(state: &AppState, action: Action) -> AppState {
    match action {
        Action::User(a) => AppState {
            user: reduce_user(&state.user, a),
            ..state.clone()
        },
        Action::Toggle(a) => AppState {
            toggle: reduce_toggle(&state.toggle, a),
            ..state.clone()
        },
        Action::Room(a) => AppState {
            room: reduce_room(&state.room, a),
            ..state.clone()
        },
        Action::Post(a) => AppState {
            post: reduce_post(&state.post, a),
            ..state.clone()
        },
        Action::Following(a) => AppState {
            following: reduce_following(&state.following, a),
            ..state.clone()
        },
    }
}

/// Signal-backed handle to the application state.
///
/// `Copy`, so it can be moved into any number of event handlers.
#[derive(Clone, Copy, PartialEq)]
pub struct AppStore {
    state: Signal<AppState>,
}

impl AppStore {
    /// Must be called inside a component scope
    pub fn new() -> Self {
        Self {
            state: Signal::new(AppState::default()),
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        log::debug!("dispatch {:?}", action);
        let next = reduce(&self.state.peek(), action);
        self.state.set(next);
    }

    /// Non-subscribing read, for async tasks and event handlers
    pub fn snapshot(&self) -> AppState {
        self.state.peek().clone()
    }

    pub fn post(&self) -> PostSlice {
        self.state.read().post.clone()
    }

    pub fn following(&self) -> FollowingSlice {
        self.state.read().following.clone()
    }

    pub fn room(&self) -> RoomSlice {
        self.state.read().room.clone()
    }

    pub fn user(&self) -> UserSlice {
        self.state.read().user.clone()
    }

    pub fn toggle(&self) -> ToggleSlice {
        self.state.read().toggle.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::types::fixtures::{author, room};

    fn viewer() -> Viewer {
        let a = author("me");
        Viewer {
            id: a.id,
            username: a.username,
            name: a.name,
            photo: a.photo,
            email: None,
        }
    }

    #[test]
    fn test_reduce_replaces_only_target_slice() {
        let state = AppState::default();
        let next = reduce(&state, Action::Toggle(ToggleAction::ToggleSidebar));
        assert!(next.toggle.sidebar_open);
        assert_eq!(next.user, state.user);
        assert_eq!(next.post, state.post);
        // Input untouched
        assert!(!state.toggle.sidebar_open);
    }

    #[test]
    fn test_user_slice() {
        let s = reduce(&AppState::default(), Action::User(UserAction::SetViewer(viewer())));
        let s = reduce(&s, Action::User(UserAction::SetLikedPostsCount(7)));
        assert_eq!(s.user.viewer.as_ref().map(|v| v.id.as_str()), Some("me"));
        assert_eq!(s.user.liked_posts_count, 7);

        let s = reduce(&s, Action::User(UserAction::ClearViewer));
        assert_eq!(s.user, UserSlice::default());
    }

    #[test]
    fn test_post_deletes_are_append_only_and_deduplicated() {
        let mut s = AppState::default();
        for id in ["p1", "p2", "p1"] {
            s = reduce(&s, Action::Post(PostAction::PostDeleted(id.to_string())));
        }
        assert_eq!(s.post.deleted, vec!["p1".to_string(), "p2".to_string()]);
        assert!(s.post.is_deleted("p2"));

        let s = reduce(&s, Action::Post(PostAction::ClearPending));
        assert!(s.post.deleted.is_empty());
    }

    #[test]
    fn test_latest_update_wins() {
        let mut s = AppState::default();
        for msg in ["a", "b"] {
            s = reduce(
                &s,
                Action::Post(PostAction::PostUpdated(PostUpdate {
                    id: "p1".to_string(),
                    message: Some(msg.to_string()),
                    ..Default::default()
                })),
            );
        }
        assert_eq!(s.post.update_for("p1").and_then(|u| u.message.as_deref()), Some("b"));
        assert!(s.post.update_for("p2").is_none());
    }

    #[test]
    fn test_edits_to_one_post_fold_into_one_entry() {
        let s = reduce(
            &AppState::default(),
            Action::Post(PostAction::PostUpdated(PostUpdate {
                id: "p1".to_string(),
                message: Some("edited".to_string()),
                ..Default::default()
            })),
        );
        let s = reduce(
            &s,
            Action::Post(PostAction::PostUpdated(PostUpdate {
                id: "p1".to_string(),
                is_follow: Some(true),
                ..Default::default()
            })),
        );
        assert_eq!(s.post.updates.len(), 1);
        let update = s.post.update_for("p1").unwrap();
        assert_eq!(update.message.as_deref(), Some("edited"));
        assert_eq!(update.is_follow, Some(true));

        let s = reduce(&s, Action::Post(PostAction::PostDeleted("p1".into())));
        assert!(s.post.updates.is_empty());
    }

    #[test]
    fn test_pending_slices_stay_bounded() {
        let mut s = AppState::default();
        for i in 0..MAX_PENDING + 50 {
            s = reduce(&s, Action::Post(PostAction::PostDeleted(format!("p{}", i))));
            s = reduce(
                &s,
                Action::Following(FollowingAction::FollowChanged(FollowChange {
                    user_id: format!("u{}", i % 3),
                    is_follow: i % 2 == 0,
                })),
            );
        }
        assert_eq!(s.post.deleted.len(), MAX_PENDING);
        assert!(!s.post.is_deleted("p0"));
        assert!(s.post.is_deleted(&format!("p{}", MAX_PENDING + 49)));
        assert_eq!(s.following.changes.len(), 3);
    }

    #[test]
    fn test_opened_posts() {
        let s = reduce(&AppState::default(), Action::Post(PostAction::PostOpened("p1".into())));
        let s = reduce(&s, Action::Post(PostAction::PostOpened("p1".into())));
        assert_eq!(s.post.opened.len(), 1);
        let s = reduce(&s, Action::Post(PostAction::PostClosed("p1".into())));
        assert!(s.post.opened.is_empty());
    }

    #[test]
    fn test_follow_state_lookup() {
        let mut s = AppState::default();
        for follow in [true, false] {
            s = reduce(
                &s,
                Action::Following(FollowingAction::FollowChanged(FollowChange {
                    user_id: "u1".to_string(),
                    is_follow: follow,
                })),
            );
        }
        assert_eq!(s.following.state_for("u1"), Some(false));
        assert_eq!(s.following.state_for("u2"), None);
    }

    #[test]
    fn test_removed_room_is_filtered_from_later_loads() {
        let s = reduce(
            &AppState::default(),
            Action::Room(RoomAction::SetRooms(vec![room("r1", &["me", "a"]), room("r2", &["me", "b"])])),
        );
        let s = reduce(&s, Action::Room(RoomAction::RoomRemoved("r1".into())));
        assert_eq!(s.room.rooms.len(), 1);

        let s = reduce(
            &s,
            Action::Room(RoomAction::SetRooms(vec![room("r1", &["me", "a"]), room("r3", &["me", "c"])])),
        );
        let ids: Vec<_> = s.room.rooms.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r3"]);
    }
}
