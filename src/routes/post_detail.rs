use dioxus::prelude::*;

use crate::components::icons::ArrowLeftIcon;
use crate::components::{ErrorPanel, Loading, PostDetails};
use crate::context::use_app_context;
use crate::services::endpoints;
use crate::services::Post;
use crate::utils::DataState;

#[component]
pub fn PostDetail(id: String) -> Element {
    let ctx = use_app_context();
    let navigator = use_navigator();
    let store = ctx.store;
    let mut post = use_signal(|| DataState::<Post>::Loading);
    let mut requested = use_signal(String::new);

    use_effect(use_reactive(&id, move |post_id| {
        post.set(DataState::Loading);
        requested.set(post_id.clone());

        let backend = ctx.backend.clone();
        spawn(async move {
            let result = endpoints::fetch_post(backend.as_ref(), &post_id).await;
            if *requested.peek() != post_id {
                return;
            }
            if let Err(e) = &result {
                log::error!("Failed to load post {}: {}", post_id, e);
            }
            post.set(DataState::from(result.map_err(|e| e.user_message())));
        });
    }));

    // Pending store edits win over what was fetched
    let state = post.read().clone().map(|mut p| {
        if let Some(update) = store.post().update_for(&p.id) {
            p.apply_update(update);
        }
        if let Some(is_follow) = store.following().state_for(&p.user.id) {
            p.is_follow = is_follow;
        }
        p
    });

    rsx! {
        div {
            class: "min-h-screen",

            div {
                class: "sticky top-0 z-20 flex items-center gap-4 px-4 py-3 bg-background/80 backdrop-blur-sm border-b border-border",
                button {
                    class: "p-2 -ml-2 rounded-full hover:bg-accent transition",
                    aria_label: "Back",
                    onclick: move |_| navigator.go_back(),
                    ArrowLeftIcon { class: "w-5 h-5" }
                }
                h2 { class: "text-xl font-bold", "Post" }
            }

            match state {
                DataState::Loaded(p) => rsx! {
                    PostDetails { key: "{p.id}", post: p }
                },
                DataState::Error(message) => rsx! {
                    ErrorPanel { message }
                },
                _ => rsx! {
                    Loading { label: "Loading post..." }
                },
            }
        }
    }
}
