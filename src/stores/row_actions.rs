//! Network side of row actions: deferred lookups, confirmed toggles and deletes

use std::cell::RefCell;
use std::rc::Rc;

use crate::services::endpoints::{self, Relation};
use crate::services::{ApiError, Backend, FollowChange, PostUpdate};
use crate::stores::app_state::{Action, FollowingAction, PostAction, RoomAction};
use crate::stores::notice::Notice;
use crate::stores::row_state::RowFlag;

/// Somewhere a [`RowFlag`] lives between awaits (a signal in components)
pub trait FlagCell {
    fn update<R>(&mut self, f: impl FnOnce(&mut RowFlag) -> R) -> R;
}

impl FlagCell for Rc<RefCell<RowFlag>> {
    fn update<R>(&mut self, f: impl FnOnce(&mut RowFlag) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// What a row toggle talks to
#[derive(Clone, Debug, PartialEq)]
pub enum RowAction {
    Relation { relation: Relation, post_id: String },
    /// Follow the author of `post_id`
    Follow { user_id: String, post_id: String },
}

impl RowAction {
    pub fn like(post_id: &str) -> Self {
        RowAction::Relation {
            relation: Relation::Like,
            post_id: post_id.to_string(),
        }
    }

    pub fn save(post_id: &str) -> Self {
        RowAction::Relation {
            relation: Relation::Save,
            post_id: post_id.to_string(),
        }
    }

    pub fn follow(user_id: &str, post_id: &str) -> Self {
        RowAction::Follow {
            user_id: user_id.to_string(),
            post_id: post_id.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ToggleOutcome {
    /// Another request is in flight or the state is still loading
    Refused,
    /// Server confirmed; the flag now holds this value
    Confirmed(bool),
    Failed(Notice),
}

/// Run the lookup for a row that just became visible.
/// Returns a notice when the lookup failed.
pub async fn lookup(
    backend: &dyn Backend,
    relation: Relation,
    post_id: &str,
    cell: &mut impl FlagCell,
) -> Option<Notice> {
    if !cell.update(|flag| flag.on_visible()) {
        return None;
    }

    let result = endpoints::has_relation(backend, relation, post_id).await;
    let notice = result.as_ref().err().map(|e| {
        log::error!("Failed to load {} state for {}: {}", relation.label(), post_id, e);
        Notice::error(e.user_message())
    });
    cell.update(|flag| flag.resolve_fetch(result));
    notice
}

/// Flip a row flag after the server confirms
pub async fn toggle(backend: &dyn Backend, action: &RowAction, cell: &mut impl FlagCell) -> ToggleOutcome {
    let Some(target) = cell.update(|flag| flag.begin_toggle()) else {
        return ToggleOutcome::Refused;
    };

    let result = match action {
        RowAction::Relation { relation, post_id } => {
            endpoints::set_relation(backend, *relation, post_id, target).await
        }
        RowAction::Follow { user_id, .. } => endpoints::set_following(backend, user_id, target).await,
    };

    match cell.update(|flag| flag.finish_toggle(target, result)) {
        Ok(()) => ToggleOutcome::Confirmed(target),
        Err(e) => {
            log::error!("{:?} failed: {}", action, e);
            ToggleOutcome::Failed(Notice::error(e.user_message()))
        }
    }
}

/// Store changes that publish a confirmed follow: the author's new state and
/// a pending edit of the post it was toggled from
pub fn follow_actions(user_id: &str, post_id: &str, is_follow: bool) -> [Action; 2] {
    [
        Action::Following(FollowingAction::FollowChanged(FollowChange {
            user_id: user_id.to_string(),
            is_follow,
        })),
        Action::Post(PostAction::PostUpdated(PostUpdate {
            id: post_id.to_string(),
            is_follow: Some(is_follow),
            ..Default::default()
        })),
    ]
}

/// A delete that found nothing to delete still counts as deleted
fn deleted_or_gone(result: Result<(), ApiError>) -> Result<(), ApiError> {
    match result {
        Err(e) if e.is_not_found() => {
            log::info!("Already deleted: {}", e);
            Ok(())
        }
        other => other,
    }
}

/// Delete a post; returns the store action announcing it
pub async fn delete_post(backend: &dyn Backend, post_id: &str) -> Result<Action, Notice> {
    match deleted_or_gone(endpoints::delete_post(backend, post_id).await) {
        Ok(()) => {
            log::info!("Deleted post {}", post_id);
            Ok(Action::Post(PostAction::PostDeleted(post_id.to_string())))
        }
        Err(e) => {
            log::error!("Failed to delete post {}: {}", post_id, e);
            Err(Notice::error(e.user_message()))
        }
    }
}

/// Delete a room; returns the store action announcing it
pub async fn delete_room(backend: &dyn Backend, room_id: &str) -> Result<Action, Notice> {
    match deleted_or_gone(endpoints::delete_room(backend, room_id).await) {
        Ok(()) => {
            log::info!("Deleted room {}", room_id);
            Ok(Action::Room(RoomAction::RoomRemoved(room_id.to_string())))
        }
        Err(e) => {
            log::error!("Failed to delete room {}: {}", room_id, e);
            Err(Notice::error(e.user_message()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::api::mock::MockBackend;
    use crate::services::api::Method;
    use crate::stores::notice::NoticeKind;
    use crate::stores::row_state::RowFetch;
    use serde_json::json;

    fn cell(flag: RowFlag) -> Rc<RefCell<RowFlag>> {
        Rc::new(RefCell::new(flag))
    }

    #[tokio::test]
    async fn test_like_unliked_post() {
        let backend = MockBackend::new();
        let mut flag = cell(RowFlag::known(false));

        let outcome = toggle(&backend, &RowAction::like("p1"), &mut flag).await;

        assert_eq!(outcome, ToggleOutcome::Confirmed(true));
        assert!(flag.borrow().value());
        assert_eq!(backend.calls_to(Method::Post, "/like").len(), 1);
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_like_stays_unliked_with_notice() {
        let backend = MockBackend::new();
        backend.reply(Method::Post, "/like", Err(ApiError::Network("offline".into())));
        let mut flag = cell(RowFlag::known(false));

        let outcome = toggle(&backend, &RowAction::like("p1"), &mut flag).await;

        match outcome {
            ToggleOutcome::Failed(notice) => {
                assert_eq!(notice.kind, NoticeKind::Error);
                assert_eq!(notice.message, crate::services::GENERIC_ERROR);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(!flag.borrow().value());
        assert!(!flag.borrow().is_busy());
    }

    #[tokio::test]
    async fn test_unfollow_uses_delete() {
        let backend = MockBackend::new();
        let mut flag = cell(RowFlag::known(true));
        let outcome = toggle(&backend, &RowAction::follow("u1", "p1"), &mut flag).await;
        assert_eq!(outcome, ToggleOutcome::Confirmed(false));
        assert_eq!(backend.calls_to(Method::Delete, "/user/following").len(), 1);
    }

    #[tokio::test]
    async fn test_toggle_while_busy_is_refused_without_request() {
        let backend = MockBackend::new();
        let mut flag = cell(RowFlag::known(false));
        flag.borrow_mut().begin_toggle();

        let outcome = toggle(&backend, &RowAction::save("p1"), &mut flag).await;
        assert_eq!(outcome, ToggleOutcome::Refused);
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_lookup_runs_once() {
        let backend = MockBackend::new();
        backend.reply(Method::Get, "/save", Ok(json!({"_id": "s1"})));
        let mut flag = cell(RowFlag::lazy(false, 0));

        assert!(lookup(&backend, Relation::Save, "p1", &mut flag).await.is_none());
        assert!(lookup(&backend, Relation::Save, "p1", &mut flag).await.is_none());

        assert_eq!(backend.calls_to(Method::Get, "/save").len(), 1);
        assert_eq!(flag.borrow().fetch_state(), RowFetch::Resolved(true));
    }

    #[tokio::test]
    async fn test_failed_lookup_defaults_and_notifies() {
        let backend = MockBackend::new();
        backend.reply(
            Method::Get,
            "/like",
            Err(ApiError::Status { code: 500, message: "db down".into() }),
        );
        let mut flag = cell(RowFlag::lazy(false, 0));

        let notice = lookup(&backend, Relation::Like, "p1", &mut flag).await;
        assert_eq!(notice.map(|n| n.message), Some("db down".to_string()));
        assert_eq!(flag.borrow().fetch_state(), RowFetch::Resolved(false));
    }

    #[tokio::test]
    async fn test_unlike_from_liked_by_default_row() {
        let backend = MockBackend::new();
        let mut flag = cell(RowFlag::lazy(true, 4));

        assert!(lookup(&backend, Relation::Like, "p1", &mut flag).await.is_none());
        let outcome = toggle(&backend, &RowAction::like("p1"), &mut flag).await;

        assert_eq!(outcome, ToggleOutcome::Confirmed(false));
        assert_eq!(flag.borrow().count(), 3);
        assert!(backend.calls_to(Method::Get, "/like").is_empty());
        assert_eq!(backend.calls_to(Method::Delete, "/like").len(), 1);
    }

    #[tokio::test]
    async fn test_delete_post_announces_deletion() {
        let backend = MockBackend::new();
        let action = delete_post(&backend, "p1").await.unwrap();
        assert_eq!(action, Action::Post(PostAction::PostDeleted("p1".to_string())));
        assert_eq!(backend.calls_to(Method::Delete, "/post")[0].param("id"), Some("p1"));
    }

    #[tokio::test]
    async fn test_deleting_already_deleted_post_still_announces() {
        let backend = MockBackend::new();
        backend.reply(Method::Delete, "/post", Err(ApiError::NotFound(String::new())));
        let action = delete_post(&backend, "p1").await.unwrap();
        assert_eq!(action, Action::Post(PostAction::PostDeleted("p1".to_string())));
    }

    #[tokio::test]
    async fn test_failed_post_delete_is_a_notice() {
        let backend = MockBackend::new();
        backend.reply(
            Method::Delete,
            "/post",
            Err(ApiError::Status { code: 500, message: "db down".into() }),
        );
        let notice = delete_post(&backend, "p1").await.unwrap_err();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "db down");
    }

    #[tokio::test]
    async fn test_deleting_already_deleted_room_still_announces() {
        let backend = MockBackend::new();
        backend.reply(Method::Delete, "/room", Err(ApiError::NotFound("gone".into())));
        let action = delete_room(&backend, "r1").await.unwrap();
        assert_eq!(action, Action::Room(RoomAction::RoomRemoved("r1".to_string())));
    }

    #[tokio::test]
    async fn test_failed_room_delete_is_a_notice() {
        let backend = MockBackend::new();
        backend.reply(Method::Delete, "/room", Err(ApiError::Network("offline".into())));
        let notice = delete_room(&backend, "r1").await.unwrap_err();
        assert_eq!(notice.message, crate::services::GENERIC_ERROR);
    }

    #[test]
    fn test_confirmed_follow_records_pending_edit() {
        let [changed, edited] = follow_actions("u1", "p1", true);
        assert_eq!(
            changed,
            Action::Following(FollowingAction::FollowChanged(FollowChange {
                user_id: "u1".to_string(),
                is_follow: true,
            }))
        );
        assert_eq!(
            edited,
            Action::Post(PostAction::PostUpdated(PostUpdate {
                id: "p1".to_string(),
                is_follow: Some(true),
                ..Default::default()
            }))
        );
    }

    #[tokio::test]
    async fn test_default_liked_row_never_looks_up() {
        let backend = MockBackend::new();
        let mut flag = cell(RowFlag::lazy(true, 1));
        assert!(lookup(&backend, Relation::Like, "p1", &mut flag).await.is_none());
        assert_eq!(backend.call_count(), 0);
    }
}
