use dioxus::prelude::*;
use std::rc::Rc;

use crate::components::{use_viewer, ErrorPanel, PostCard, PostSkeleton};
use crate::context::use_app_context;
use crate::hooks::{use_infinite_scroll, use_post_feed};
use crate::services::endpoints;
use crate::services::Backend;
use crate::stores::app_state::{Action, UserAction};

/// Posts liked by `username`
#[component]
pub fn Likes(username: String) -> Element {
    // Keyed so a different user gets a fresh feed instead of a merged one
    rsx! {
        LikedPosts { key: "{username}", username: username.clone() }
    }
}

#[component]
fn LikedPosts(username: String) -> Element {
    let ctx = use_app_context();
    let viewer = use_viewer();
    let mut store = ctx.store;
    let is_own = viewer.username == username;

    let owner = username.clone();
    let feed = use_post_feed(move |backend: Rc<dyn Backend>, page| {
        let owner = owner.clone();
        async move { endpoints::fetch_liked_posts(backend.as_ref(), &owner, page).await }
    });

    let can_load = use_memo(move || feed.list.read().has_more() && !*feed.loading.read());
    let sentinel_id = use_infinite_scroll(move || feed.load_more.call(()), can_load);

    // The sidebar badge counts the viewer's own likes
    use_effect(move || {
        let count = feed.list.read().len();
        if is_own {
            store.dispatch(Action::User(UserAction::SetLikedPostsCount(count)));
        }
    });

    let list = feed.list.read();
    let loading = *feed.loading.read();
    let has_more = list.has_more();
    let posts = list.items().to_vec();
    let failure = list.failed_empty().then(|| list.failure().unwrap_or_default().to_string());
    drop(list);

    rsx! {
        div {
            class: "min-h-screen",

            div {
                class: "px-4 py-3 border-b border-border",
                h3 { class: "font-bold", "Likes" }
            }

            if posts.is_empty() && loading {
                for i in 0..3 {
                    PostSkeleton { key: "{i}" }
                }
            } else if let Some(message) = failure {
                ErrorPanel { message, on_retry: move |_| feed.refresh.call(()) }
            } else if posts.is_empty() {
                div {
                    class: "px-6 py-12 text-center text-muted-foreground",
                    if is_own {
                        "Posts you like will show up here."
                    } else {
                        "@{username} hasn't liked any posts yet."
                    }
                }
            } else {
                for post in posts {
                    // Only the viewer's own likes are known to be liked
                    PostCard { key: "{post.id}", post, default_liked: is_own }
                }

                if has_more {
                    div { id: "{sentinel_id}", class: "h-4" }
                    div {
                        class: "flex justify-center py-4",
                        button {
                            class: "px-4 py-2 text-sm text-blue-500 hover:bg-blue-500/10 rounded-full disabled:opacity-50 transition",
                            disabled: loading,
                            onclick: move |_| feed.load_more.call(()),
                            if loading { "Loading..." } else { "Load more" }
                        }
                    }
                }
            }
        }
    }
}
