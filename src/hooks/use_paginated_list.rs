//! use_paginated_list - page loading for list screens
//!
//! Wires a [`PaginatedList`] to the backend:
//! - every request carries a token, stale responses are dropped
//! - unmounting abandons whatever is still in flight
//! - post feeds also follow realtime deletes and pending store changes

use dioxus::prelude::*;
use std::future::Future;
use std::rc::Rc;

use crate::components::toast::use_toast;
use crate::context::use_app_context;
use crate::services::{ApiError, Backend, EventKind, Identified, Post, RealtimeEvent};
use crate::stores::{MergeOrder, Notice, PaginatedList};

/// Handle returned by [`use_paginated_list`]
pub struct PagedList<T: 'static> {
    pub list: Signal<PaginatedList<T>>,
    pub loading: Signal<bool>,
    /// Bumped after every applied page
    pub revision: Signal<u64>,
    pub load_more: Callback<()>,
    pub refresh: Callback<()>,
}

impl<T: 'static> Clone for PagedList<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for PagedList<T> {}

/// Load pages with `fetch_page(backend, page)`, starting with page 1 on mount
pub fn use_paginated_list<T, F, Fut>(order: MergeOrder, fetch_page: F) -> PagedList<T>
where
    T: Identified + Clone + 'static,
    F: Fn(Rc<dyn Backend>, u32) -> Fut + 'static,
    Fut: Future<Output = Result<Vec<T>, ApiError>> + 'static,
{
    let ctx = use_app_context();
    let mut toasts = use_toast();
    let mut list = use_signal(|| PaginatedList::<T>::new(order));
    let mut loading = use_signal(|| false);
    let mut revision = use_signal(|| 0u64);
    let fetch_page = use_hook(|| Rc::new(fetch_page));

    let load = use_callback(move |page: u32| {
        let token = list.write().begin_load(page);
        loading.set(true);

        let backend = ctx.backend.clone();
        let fetch_page = fetch_page.clone();
        spawn(async move {
            let result = fetch_page(backend, page).await;
            if !list.peek().is_pending(&token) {
                log::debug!("Page {} response superseded, ignoring", page);
                return;
            }

            match result {
                Ok(batch) => {
                    log::info!("Loaded page {} ({} items)", page, batch.len());
                    if list.write().apply_page(token, batch) {
                        revision += 1;
                    }
                }
                Err(e) => {
                    log::error!("Failed to load page {}: {}", page, e);
                    let message = e.user_message();
                    // An empty screen shows the error in place instead
                    if page > 1 || !list.peek().is_empty() {
                        toasts.show(Notice::error(message.clone()));
                    }
                    list.write().fail_page(token, message);
                }
            }
            loading.set(false);
        });
    });

    let load_more = use_callback(move |_| {
        let next = list.peek().current_page() + 1;
        load.call(next);
    });
    let refresh = use_callback(move |_| load.call(1));

    use_effect(move || load.call(1));

    use_drop(move || {
        if let Ok(mut list) = list.try_write() {
            list.abandon();
        }
    });

    PagedList {
        list,
        loading,
        revision,
        load_more,
        refresh,
    }
}

/// Paginated post list that follows realtime deletes and store edits
pub fn use_post_feed<F, Fut>(fetch_page: F) -> PagedList<Post>
where
    F: Fn(Rc<dyn Backend>, u32) -> Fut + 'static,
    Fut: Future<Output = Result<Vec<Post>, ApiError>> + 'static,
{
    let ctx = use_app_context();
    let feed = use_paginated_list(MergeOrder::default(), fetch_page);
    let mut list = feed.list;

    // Exactly one delete subscription per mounted feed, released with the hook
    let hub = ctx.hub.clone();
    use_hook(move || {
        Rc::new(hub.subscribe(EventKind::PostDeleted, move |event| match event {
            RealtimeEvent::PostDeleted(id) => {
                let mut list = list;
                if list.write().apply_delete(id) {
                    log::info!("Post {} removed by realtime delete", id);
                }
            }
        }))
    });

    let store = ctx.store;
    let revision = feed.revision;
    use_effect(move || {
        // Re-run on new pages and on store changes
        let _ = revision.read();
        let posts = store.post();
        let following = store.following();
        list.write().reconcile(&posts, &following);
    });

    feed
}
