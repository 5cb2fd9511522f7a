use dioxus::prelude::*;

use crate::components::icons::{BookmarkIcon, HeartIcon, MessageCircleIcon};
use crate::hooks::use_row_flag;
use crate::services::Post;
use crate::stores::row_actions::RowAction;
use crate::stores::RowFlag;
use crate::utils::format_count;

/// Like / save / comment buttons under a post.
///
/// Like and save state is fetched lazily the first time the bar scrolls into
/// view; buttons are disabled while a request for that flag is outstanding.
#[component]
pub fn PostActions(post: Post, #[props(default = false)] default_liked: bool) -> Element {
    let like = use_row_flag(RowAction::like(&post.id), RowFlag::lazy(default_liked, post.like_count));
    let save = use_row_flag(RowAction::save(&post.id), RowFlag::lazy(false, post.save_count));

    let liked = like.flag.read();
    let saved = save.flag.read();
    let like_anchor = like.anchor_id.read().clone();
    let save_anchor = save.anchor_id.read().clone();

    let like_color = if liked.value() { "text-red-500" } else { "hover:text-red-500" };
    let save_color = if saved.value() { "text-blue-500" } else { "hover:text-blue-500" };

    rsx! {
        div {
            class: "flex items-center gap-6 mt-3 text-muted-foreground",
            onclick: move |e| e.stop_propagation(),

            button {
                id: "{like_anchor}",
                class: "flex items-center gap-1 transition disabled:opacity-50 {like_color}",
                disabled: liked.is_busy(),
                aria_pressed: "{liked.value()}",
                onclick: move |_| like.toggle.call(()),
                HeartIcon { class: "w-5 h-5", filled: liked.value() }
                span { class: "text-sm", "{format_count(liked.count())}" }
            }

            div {
                class: "flex items-center gap-1",
                MessageCircleIcon { class: "w-5 h-5" }
                span { class: "text-sm", "{format_count(post.comment_count)}" }
            }

            button {
                id: "{save_anchor}",
                class: "flex items-center gap-1 transition disabled:opacity-50 {save_color}",
                disabled: saved.is_busy(),
                aria_pressed: "{saved.value()}",
                onclick: move |_| save.toggle.call(()),
                BookmarkIcon { class: "w-5 h-5", filled: saved.value() }
                span { class: "text-sm", "{format_count(saved.count())}" }
            }
        }
    }
}
