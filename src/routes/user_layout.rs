use dioxus::prelude::*;

use crate::components::{Avatar, ErrorPanel, Loading};
use crate::context::use_app_context;
use crate::routes::Route;
use crate::services::{Author, Profile};
use crate::stores::session::resolve_profile;
use crate::utils::{format_count, DataState};

/// Profile header for everything under `/:username`
#[component]
pub fn UserLayout(username: String) -> Element {
    let ctx = use_app_context();
    let mut profile = use_signal(|| DataState::<Profile>::Loading);
    let mut requested = use_signal(String::new);

    use_effect(use_reactive(&username, move |name| {
        profile.set(DataState::Loading);
        requested.set(name.clone());

        let backend = ctx.backend.clone();
        spawn(async move {
            let state = resolve_profile(backend.as_ref(), &name).await;
            // Navigated to another user meanwhile
            if *requested.peek() != name {
                return;
            }
            profile.set(state);
        });
    }));

    let state = profile.read().clone();
    match state {
        DataState::Loaded(profile) => rsx! {
            ProfileHeader { profile }
            Outlet::<Route> {}
        },
        DataState::Error(message) => rsx! {
            ErrorPanel { message }
        },
        _ => rsx! {
            Loading { label: "Loading profile..." }
        },
    }
}

#[component]
fn ProfileHeader(profile: Profile) -> Element {
    let author = Author {
        id: profile.id.clone(),
        username: profile.username.clone(),
        name: profile.name.clone(),
        photo: profile.photo.clone(),
    };
    let followers = stat(profile.follower_count);
    let following = stat(profile.following_count);

    rsx! {
        div {
            class: "px-4 py-6 border-b border-border",
            div {
                class: "flex items-center gap-4",
                Avatar { author, size: "w-16 h-16" }
                div {
                    class: "min-w-0",
                    h2 { class: "text-xl font-bold truncate", "{profile.name}" }
                    p { class: "text-muted-foreground truncate", "@{profile.username}" }
                }
            }

            if let Some(bio) = profile.bio.as_ref().filter(|b| !b.trim().is_empty()) {
                p { class: "mt-3 whitespace-pre-wrap", "{bio}" }
            }

            div {
                class: "mt-3 flex gap-4 text-sm",
                span {
                    span { class: "font-semibold", "{following}" }
                    span { class: "text-muted-foreground", " Following" }
                }
                span {
                    span { class: "font-semibold", "{followers}" }
                    span { class: "text-muted-foreground", " Followers" }
                }
            }
        }
    }
}

fn stat(count: u64) -> String {
    if count == 0 {
        "0".to_string()
    } else {
        format_count(count)
    }
}
