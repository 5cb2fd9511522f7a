use dioxus::prelude::*;

use crate::components::post_actions::PostActions;
use crate::components::post_card::{Avatar, DeletePostMenu, PostMedia};
use crate::components::session_gate::use_viewer;
use crate::context::use_app_context;
use crate::hooks::use_row_flag;
use crate::services::Post;
use crate::stores::app_state::{Action, PostAction};
use crate::stores::row_actions::RowAction;
use crate::stores::RowFlag;
use crate::utils::format_datetime;

/// Full view of one post.
///
/// Registers itself as open in the store while mounted and navigates back
/// as soon as the post is deleted (here or from another screen).
#[component]
pub fn PostDetails(post: Post) -> Element {
    let ctx = use_app_context();
    let viewer = use_viewer();
    let navigator = use_navigator();
    let mut store = ctx.store;
    let is_own = post.user.id == viewer.id;

    let opened_id = post.id.clone();
    use_effect(move || {
        store.dispatch(Action::Post(PostAction::PostOpened(opened_id.clone())));
    });
    let closed_id = post.id.clone();
    use_drop(move || {
        store.dispatch(Action::Post(PostAction::PostClosed(closed_id)));
    });

    let deleted_id = post.id.clone();
    use_effect(move || {
        if store.post().is_deleted(&deleted_id) {
            log::info!("Open post {} was deleted, leaving detail view", deleted_id);
            navigator.go_back();
        }
    });

    let follow = use_row_flag(
        RowAction::follow(&post.user.id, &post.id),
        RowFlag::known(post.is_follow),
    );

    // Follow changes confirmed elsewhere (another row by the same author)
    let author_id = post.user.id.clone();
    use_effect(move || {
        let Some(is_follow) = store.following().state_for(&author_id) else {
            return;
        };
        let mut flag = follow.flag;
        let current = *flag.peek();
        if !current.is_busy() && current.value() != is_follow {
            flag.set(RowFlag::known(is_follow));
        }
    });

    let following = follow.flag.read().value();
    let follow_busy = follow.flag.read().is_busy();
    let follow_label = if following { "Following" } else { "Follow" };
    let follow_style = if following {
        "border border-border hover:border-destructive hover:text-destructive"
    } else {
        "bg-foreground text-background hover:opacity-90"
    };

    rsx! {
        article {
            class: "p-4 border-b border-border",

            div {
                class: "flex items-center gap-3",
                Avatar { author: post.user.clone(), size: "w-12 h-12" }
                div {
                    class: "flex-1 min-w-0",
                    p { class: "font-semibold truncate", "{post.user.name}" }
                    p { class: "text-muted-foreground truncate", "@{post.user.username}" }
                }
                if is_own {
                    DeletePostMenu { post_id: post.id.clone() }
                } else {
                    button {
                        class: "px-4 py-1.5 rounded-full text-sm font-semibold transition disabled:opacity-50 {follow_style}",
                        disabled: follow_busy,
                        onclick: move |_| follow.toggle.call(()),
                        "{follow_label}"
                    }
                }
            }

            if !post.message.is_empty() {
                p { class: "mt-4 text-lg whitespace-pre-wrap break-words", "{post.message}" }
            }

            PostMedia { post: post.clone() }

            p {
                class: "mt-4 pb-3 border-b border-border text-sm text-muted-foreground",
                "{format_datetime(post.created_at)}"
            }

            PostActions { post: post.clone() }
        }
    }
}
