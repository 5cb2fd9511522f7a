use dioxus::prelude::*;

use crate::components::confirm_modal::ConfirmModal;
use crate::components::icons::{MoreHorizontalIcon, TrashIcon, UserIcon};
use crate::components::post_actions::PostActions;
use crate::components::session_gate::use_viewer;
use crate::components::toast::use_toast;
use crate::context::use_app_context;
use crate::routes::Route;
use crate::services::{Author, Post};
use crate::stores::row_actions;
use crate::stores::Notice;
use crate::utils::{format_duration, format_relative_time};

/// A post row in a feed.
///
/// `default_liked` marks rows known to be liked by the viewer, which skips
/// the like lookup.
#[component]
pub fn PostCard(post: Post, #[props(default = false)] default_liked: bool) -> Element {
    let viewer = use_viewer();
    let navigator = use_navigator();
    let is_own = post.user.id == viewer.id;
    let target = Route::PostDetail { id: post.id.clone() };

    rsx! {
        article {
            class: "p-4 border-b border-border hover:bg-accent/30 transition cursor-pointer",
            onclick: move |_| {
                navigator.push(target.clone());
            },

            div {
                class: "flex gap-3",
                Avatar { author: post.user.clone() }

                div {
                    class: "flex-1 min-w-0",
                    div {
                        class: "flex items-center gap-2",
                        span { class: "font-semibold truncate", "{post.user.name}" }
                        span { class: "text-muted-foreground truncate", "@{post.user.username}" }
                        span { class: "text-muted-foreground", "·" }
                        span { class: "text-muted-foreground text-sm", "{format_relative_time(post.created_at)}" }
                        if is_own {
                            div {
                                class: "ml-auto",
                                DeletePostMenu { post_id: post.id.clone() }
                            }
                        }
                    }

                    if !post.message.is_empty() {
                        p { class: "mt-1 whitespace-pre-wrap break-words", "{post.message}" }
                    }

                    PostMedia { post: post.clone() }
                    PostActions { post: post.clone(), default_liked }
                }
            }
        }
    }
}

#[component]
pub fn Avatar(author: Author, #[props(default = "w-10 h-10".to_string())] size: String) -> Element {
    if author.photo.is_empty() {
        let initial = author.name.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default();
        rsx! {
            div {
                class: "{size} rounded-full bg-blue-500 text-white flex items-center justify-center font-semibold flex-shrink-0",
                if initial.is_empty() {
                    UserIcon { class: "w-1/2 h-1/2" }
                } else {
                    "{initial}"
                }
            }
        }
    } else {
        rsx! {
            img { class: "{size} rounded-full object-cover flex-shrink-0", src: "{author.photo}", alt: "{author.name}" }
        }
    }
}

/// Image, or video with its thumbnail as poster
#[component]
pub fn PostMedia(post: Post) -> Element {
    let Some(media) = post.media.clone().filter(|m| !m.is_empty()) else {
        return rsx! {};
    };

    if post.has_video() {
        let poster = post.thumbnail.clone().unwrap_or_default();
        rsx! {
            div {
                class: "relative mt-3",
                onclick: move |e| e.stop_propagation(),
                video {
                    class: "w-full max-h-[500px] rounded-xl border border-border bg-black",
                    src: "{media}",
                    poster: "{poster}",
                    controls: true,
                    preload: "metadata",
                }
                span {
                    class: "absolute bottom-2 right-2 px-2 py-0.5 rounded bg-black/70 text-white text-xs",
                    "{format_duration(post.duration)}"
                }
            }
        }
    } else {
        rsx! {
            img {
                class: "mt-3 w-full max-h-[500px] object-cover rounded-xl border border-border",
                src: "{media}",
                alt: "Post media",
                loading: "lazy",
            }
        }
    }
}

/// Owner-only menu with a confirmed delete
#[component]
pub fn DeletePostMenu(post_id: String) -> Element {
    let ctx = use_app_context();
    let mut toasts = use_toast();
    let mut menu_open = use_signal(|| false);
    let mut confirming = use_signal(|| false);
    let mut deleting = use_signal(|| false);

    let handle_delete = move |_| {
        if *deleting.peek() {
            return;
        }
        deleting.set(true);

        let backend = ctx.backend.clone();
        let mut store = ctx.store;
        let post_id = post_id.clone();
        spawn(async move {
            match row_actions::delete_post(backend.as_ref(), &post_id).await {
                Ok(deleted) => {
                    store.dispatch(deleted);
                    toasts.show(Notice::success("Post deleted"));
                    confirming.set(false);
                }
                Err(notice) => toasts.show(notice),
            }
            deleting.set(false);
        });
    };

    rsx! {
        div {
            class: "relative",
            onclick: move |e| e.stop_propagation(),

            button {
                class: "p-1 rounded-full hover:bg-accent transition",
                aria_label: "Post options",
                onclick: move |_| {
                    let open = *menu_open.read();
                    menu_open.set(!open);
                },
                MoreHorizontalIcon { class: "w-5 h-5" }
            }

            if *menu_open.read() {
                div {
                    class: "absolute right-0 mt-1 bg-card border border-border rounded-lg shadow-lg min-w-[160px] overflow-hidden z-20",
                    button {
                        class: "flex items-center gap-2 w-full px-4 py-3 text-destructive hover:bg-accent transition",
                        onclick: move |_| {
                            menu_open.set(false);
                            confirming.set(true);
                        },
                        TrashIcon { class: "w-4 h-4" }
                        "Delete"
                    }
                }
            }

            if *confirming.read() {
                ConfirmModal {
                    title: "Delete post?",
                    message: "This can't be undone and the post will disappear from every feed.",
                    busy: *deleting.read(),
                    on_confirm: handle_delete,
                    on_cancel: move |_| confirming.set(false),
                }
            }
        }
    }
}
