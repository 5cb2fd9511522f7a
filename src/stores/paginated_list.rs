//! Per-screen list reconciliation
//!
//! A [`PaginatedList`] owns the ordered items a screen displays and keeps them
//! consistent with:
//! - fetched pages, which may resolve out of order
//! - realtime deletes
//! - pending edits and follow changes from the app store
//!
//! Every page request gets a [`RequestToken`]. A response is applied only if
//! its token is still the latest for that page within the current generation;
//! a page 1 request (refresh) opens a new generation, and [`PaginatedList::abandon`]
//! invalidates everything in flight.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::services::{Identified, Post};
use crate::stores::app_state::{FollowingSlice, PostSlice};

/// Where a page beyond the first lands relative to what is already shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergeOrder {
    /// Later pages go in front of earlier ones
    #[default]
    Prepend,
    /// Later pages go after earlier ones
    Append,
}

/// Identifies one page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    pub page: u32,
    generation: u64,
    seq: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedList<T> {
    order: MergeOrder,
    pages: BTreeMap<u32, (u64, Vec<T>)>,
    items: Vec<T>,
    generation: u64,
    next_seq: u64,
    latest: HashMap<u32, u64>,
    tombstones: HashSet<String>,
    highest_page: u32,
    has_more: bool,
    failure: Option<String>,
}

impl<T> Default for PaginatedList<T> {
    fn default() -> Self {
        Self::new(MergeOrder::default())
    }
}

impl<T> PaginatedList<T> {
    pub fn new(order: MergeOrder) -> Self {
        Self {
            order,
            pages: BTreeMap::new(),
            items: Vec::new(),
            generation: 0,
            next_seq: 0,
            latest: HashMap::new(),
            tombstones: HashSet::new(),
            highest_page: 0,
            has_more: true,
            failure: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Message of the last failed load, cleared by the next request
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Nothing to show because the first load failed
    pub fn failed_empty(&self) -> bool {
        self.items.is_empty() && self.failure.is_some()
    }

    /// Highest page applied so far, 0 before the first load
    pub fn current_page(&self) -> u32 {
        self.highest_page
    }

    /// Whether a request for `token` is still outstanding and would be applied
    pub fn is_pending(&self, token: &RequestToken) -> bool {
        token.generation == self.generation && self.latest.get(&token.page) == Some(&token.seq)
    }

    /// Issue a token for a request of `page` (pages start at 1)
    pub fn begin_load(&mut self, page: u32) -> RequestToken {
        let page = page.max(1);
        if page == 1 {
            self.generation += 1;
            self.latest.clear();
        }
        self.next_seq += 1;
        self.latest.insert(page, self.next_seq);
        self.failure = None;

        RequestToken {
            page,
            generation: self.generation,
            seq: self.next_seq,
        }
    }

    /// Record a failed request. Returns false when the response is stale.
    pub fn fail_page(&mut self, token: RequestToken, message: impl Into<String>) -> bool {
        if !self.is_pending(&token) {
            return false;
        }
        self.latest.remove(&token.page);
        self.failure = Some(message.into());
        true
    }

    /// Drop every outstanding request (the screen went away)
    pub fn abandon(&mut self) {
        self.generation += 1;
        self.latest.clear();
    }
}

impl<T: Identified + Clone> PaginatedList<T> {
    /// Apply a fetched batch. Returns false when the response is stale.
    pub fn apply_page(&mut self, token: RequestToken, batch: Vec<T>) -> bool {
        if !self.is_pending(&token) {
            log::debug!("Discarding stale response for page {}", token.page);
            return false;
        }
        self.latest.remove(&token.page);

        let batch: Vec<T> = batch
            .into_iter()
            .filter(|item| !self.tombstones.contains(item.id()))
            .collect();

        if token.page == 1 {
            // A fresh first page is authoritative: keep only pages fetched
            // within the same generation
            let generation = self.generation;
            self.pages.retain(|_, (g, _)| *g == generation);
        }

        let exhausted = batch.is_empty();
        self.pages.insert(token.page, (token.generation, batch));
        self.highest_page = self.pages.keys().next_back().copied().unwrap_or(0);
        // Only the furthest page decides whether more exist
        if token.page == self.highest_page {
            self.has_more = !exhausted;
        }
        self.rebuild();
        true
    }

    /// Remove every item with `id`; absent ids are a no-op
    pub fn apply_delete(&mut self, id: &str) -> bool {
        self.tombstones.insert(id.to_string());
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        for (_, items) in self.pages.values_mut() {
            items.retain(|item| item.id() != id);
        }
        before != self.items.len()
    }

    fn rebuild(&mut self) {
        let pages: Box<dyn Iterator<Item = &(u64, Vec<T>)>> = match self.order {
            MergeOrder::Prepend => Box::new(self.pages.values().rev()),
            MergeOrder::Append => Box::new(self.pages.values()),
        };

        let mut seen = HashSet::new();
        let mut items = Vec::new();
        for (_, page) in pages {
            for item in page {
                if seen.insert(item.id().to_string()) {
                    items.push(item.clone());
                }
            }
        }
        self.items = items;
    }
}

impl PaginatedList<Post> {
    /// Re-apply pending store changes. Idempotent.
    pub fn reconcile(&mut self, posts: &PostSlice, following: &FollowingSlice) {
        for id in &posts.deleted {
            self.apply_delete(id);
        }

        let mut changed = false;
        for (_, items) in self.pages.values_mut() {
            for post in items.iter_mut() {
                let before = post.clone();
                let id = post.id.clone();
                for update in posts.updates.iter().filter(|u| u.id == id) {
                    post.apply_update(update);
                }
                // Oldest first, so the latest change wins
                for change in &following.changes {
                    post.apply_follow(change);
                }
                changed |= *post != before;
            }
        }
        if changed {
            self.rebuild();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::types::fixtures::post;
    use crate::services::{FollowChange, PostUpdate};

    fn ids(list: &PaginatedList<Post>) -> Vec<&str> {
        list.items().iter().map(|p| p.id.as_str()).collect()
    }

    fn batch(ids: &[&str]) -> Vec<Post> {
        ids.iter().map(|id| post(id, "author")).collect()
    }

    #[test]
    fn test_page_one_replaces() {
        let mut list = PaginatedList::default();
        let t = list.begin_load(1);
        assert!(list.apply_page(t, batch(&["a", "b"])));
        let t = list.begin_load(1);
        assert!(list.apply_page(t, batch(&["c"])));
        assert_eq!(ids(&list), vec!["c"]);
        assert_eq!(list.current_page(), 1);
    }

    #[test]
    fn test_later_pages_are_prepended() {
        let mut list = PaginatedList::default();
        let t = list.begin_load(1);
        list.apply_page(t, batch(&["a", "b"]));
        let t = list.begin_load(2);
        list.apply_page(t, batch(&["c", "d"]));
        assert_eq!(ids(&list), vec!["c", "d", "a", "b"]);
    }

    #[test]
    fn test_append_order() {
        let mut list = PaginatedList::new(MergeOrder::Append);
        let t = list.begin_load(1);
        list.apply_page(t, batch(&["a"]));
        let t = list.begin_load(2);
        list.apply_page(t, batch(&["b"]));
        assert_eq!(ids(&list), vec!["a", "b"]);
    }

    #[test]
    fn test_out_of_order_settles_to_same_list() {
        let mut list = PaginatedList::default();
        let t1 = list.begin_load(1);
        let t2 = list.begin_load(2);
        assert!(list.apply_page(t2, batch(&["c"])));
        assert!(list.apply_page(t1, batch(&["a", "b"])));
        assert_eq!(ids(&list), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_refresh_drops_pages_from_older_generation() {
        let mut list = PaginatedList::default();
        let t = list.begin_load(1);
        list.apply_page(t, batch(&["a"]));
        let t = list.begin_load(2);
        list.apply_page(t, batch(&["old"]));

        let t = list.begin_load(1);
        list.apply_page(t, batch(&["fresh"]));
        assert_eq!(ids(&list), vec!["fresh"]);
    }

    #[test]
    fn test_superseded_request_is_discarded() {
        let mut list = PaginatedList::default();
        let first = list.begin_load(1);
        let second = list.begin_load(1);
        assert!(list.apply_page(second, batch(&["new"])));
        assert!(!list.apply_page(first, batch(&["old"])));
        assert_eq!(ids(&list), vec!["new"]);
    }

    #[test]
    fn test_response_before_refresh_is_discarded() {
        let mut list = PaginatedList::default();
        let t = list.begin_load(1);
        list.apply_page(t, batch(&["a"]));
        let stale_page2 = list.begin_load(2);
        let refresh = list.begin_load(1);

        assert!(!list.apply_page(stale_page2, batch(&["x"])));
        assert!(list.apply_page(refresh, batch(&["b"])));
        assert_eq!(ids(&list), vec!["b"]);
    }

    #[test]
    fn test_abandon_ignores_in_flight() {
        let mut list = PaginatedList::default();
        let t = list.begin_load(1);
        assert!(list.is_pending(&t));
        list.abandon();
        assert!(!list.is_pending(&t));
        assert!(!list.apply_page(t, batch(&["a"])));
        assert!(list.is_empty());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut list = PaginatedList::default();
        let t = list.begin_load(1);
        list.apply_page(t, batch(&["a", "b", "c"]));

        assert!(list.apply_delete("b"));
        let after_first = list.clone();
        assert!(!list.apply_delete("b"));
        assert_eq!(list.items(), after_first.items());
        assert_eq!(ids(&list), vec!["a", "c"]);
    }

    #[test]
    fn test_delete_of_absent_id_is_noop() {
        let mut list = PaginatedList::default();
        let t = list.begin_load(1);
        list.apply_page(t, batch(&["a"]));
        assert!(!list.apply_delete("zzz"));
        assert_eq!(ids(&list), vec!["a"]);
    }

    #[test]
    fn test_late_page_cannot_resurrect_deleted() {
        let mut list = PaginatedList::default();
        let t = list.begin_load(1);
        list.apply_delete("a");
        list.apply_page(t, batch(&["a", "b"]));
        assert_eq!(ids(&list), vec!["b"]);
    }

    #[test]
    fn test_duplicates_across_pages_keep_first() {
        let mut list = PaginatedList::default();
        let t = list.begin_load(1);
        list.apply_page(t, batch(&["a", "b"]));
        let t = list.begin_load(2);
        list.apply_page(t, batch(&["b", "c"]));
        assert_eq!(ids(&list), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_empty_last_page_ends_pagination() {
        let mut list: PaginatedList<Post> = PaginatedList::default();
        let t = list.begin_load(1);
        list.apply_page(t, batch(&["a"]));
        assert!(list.has_more());
        let t = list.begin_load(2);
        list.apply_page(t, Vec::new());
        assert!(!list.has_more());
    }

    #[test]
    fn test_refresh_after_exhausted_list_resumes_paging() {
        let mut list = PaginatedList::default();
        let t = list.begin_load(1);
        list.apply_page(t, batch(&["a"]));
        let t = list.begin_load(2);
        list.apply_page(t, Vec::new());
        assert!(!list.has_more());

        let t = list.begin_load(1);
        assert!(list.apply_page(t, batch(&["x"])));
        assert_eq!(list.current_page(), 1);
        assert!(list.has_more());
    }

    #[test]
    fn test_empty_refresh_ends_pagination() {
        let mut list: PaginatedList<Post> = PaginatedList::default();
        let t = list.begin_load(1);
        list.apply_page(t, batch(&["a"]));
        let t = list.begin_load(2);
        list.apply_page(t, batch(&["b"]));

        let t = list.begin_load(1);
        list.apply_page(t, Vec::new());
        assert!(list.is_empty());
        assert!(!list.has_more());
    }

    #[test]
    fn test_early_page_does_not_reopen_pagination() {
        let mut list = PaginatedList::default();
        let t1 = list.begin_load(1);
        let t2 = list.begin_load(2);
        list.apply_page(t2, Vec::new());
        list.apply_page(t1, batch(&["a"]));
        assert!(!list.has_more());
    }

    #[test]
    fn test_failed_first_load_then_retry() {
        let mut list: PaginatedList<Post> = PaginatedList::default();
        let t = list.begin_load(1);
        assert!(list.fail_page(t, "Network error"));
        assert!(list.failed_empty());
        assert_eq!(list.failure(), Some("Network error"));
        assert!(!list.is_pending(&t));

        let retry = list.begin_load(1);
        assert_eq!(list.failure(), None);
        list.apply_page(retry, batch(&["a"]));
        assert!(!list.failed_empty());
        assert_eq!(ids(&list), vec!["a"]);
    }

    #[test]
    fn test_failed_later_page_keeps_items() {
        let mut list = PaginatedList::default();
        let t = list.begin_load(1);
        list.apply_page(t, batch(&["a"]));
        let t = list.begin_load(2);
        list.fail_page(t, "Server error");
        assert!(!list.failed_empty());
        assert_eq!(ids(&list), vec!["a"]);
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let mut list: PaginatedList<Post> = PaginatedList::default();
        let stale = list.begin_load(1);
        let fresh = list.begin_load(1);
        assert!(!list.fail_page(stale, "timeout"));
        assert_eq!(list.failure(), None);
        assert!(list.is_pending(&fresh));
    }

    #[test]
    fn test_reconcile_overlays_store_state() {
        let mut list = PaginatedList::default();
        let t = list.begin_load(1);
        list.apply_page(t, vec![post("a", "u1"), post("b", "u2"), post("c", "u1")]);

        let posts = PostSlice {
            updates: vec![PostUpdate {
                id: "a".to_string(),
                message: Some("edited".to_string()),
                ..Default::default()
            }],
            deleted: vec!["b".to_string()],
            opened: Vec::new(),
        };
        let following = FollowingSlice {
            changes: vec![FollowChange { user_id: "u1".to_string(), is_follow: true }],
        };

        list.reconcile(&posts, &following);
        let once = list.clone();
        list.reconcile(&posts, &following);
        assert_eq!(list.items(), once.items());

        assert_eq!(ids(&list), vec!["a", "c"]);
        assert_eq!(list.items()[0].message, "edited");
        assert_eq!(list.items()[0].like_count, 3);
        assert!(list.items().iter().all(|p| p.is_follow));
    }
}
