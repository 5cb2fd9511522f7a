use dioxus::prelude::*;
use std::rc::Rc;

use crate::components::{use_viewer, Avatar, ErrorPanel, RoomRow};
use crate::components::icons::MessageCircleIcon;
use crate::context::use_app_context;
use crate::hooks::{use_infinite_scroll, use_paginated_list};
use crate::services::endpoints;
use crate::services::{Backend, Room};
use crate::stores::app_state::{Action, RoomAction};
use crate::stores::MergeOrder;

#[component]
pub fn Messages() -> Element {
    rsx! {
        MessagesLayout { active: None }
    }
}

#[component]
pub fn MessageRoom(room_id: String) -> Element {
    rsx! {
        MessagesLayout { active: Some(room_id) }
    }
}

#[component]
fn MessagesLayout(active: Option<String>) -> Element {
    let ctx = use_app_context();
    let viewer = use_viewer();
    let rooms = ctx.store.room().rooms;

    let selected = active
        .as_ref()
        .and_then(|id| rooms.iter().find(|r| &r.id == id))
        .and_then(|room| room.other_participant(&viewer.id).cloned());

    rsx! {
        div {
            class: "flex min-h-screen",

            div {
                class: "w-full md:w-[320px] flex-shrink-0 border-r border-border",
                div {
                    class: "px-4 py-3 border-b border-border",
                    h2 { class: "text-xl font-bold", "Messages" }
                }
                RoomList { active: active.clone() }
            }

            div {
                class: "hidden md:flex flex-1 flex-col",
                match (active.is_some(), selected) {
                    (true, Some(other)) => rsx! {
                        div {
                            class: "flex items-center gap-3 px-4 py-3 border-b border-border",
                            Avatar { author: other.clone(), size: "w-8 h-8" }
                            div {
                                p { class: "font-semibold", "{other.name}" }
                                p { class: "text-sm text-muted-foreground", "@{other.username}" }
                            }
                        }
                    },
                    (true, None) => rsx! {
                        div {
                            class: "flex-1 flex items-center justify-center text-muted-foreground",
                            "Loading conversation..."
                        }
                    },
                    (false, _) => rsx! {
                        div {
                            class: "flex-1 flex flex-col items-center justify-center gap-3 text-muted-foreground",
                            MessageCircleIcon { class: "w-10 h-10" }
                            p { "Select a conversation" }
                        }
                    },
                }
            }
        }
    }
}

/// Rooms the viewer takes part in, mirrored into the room slice
#[component]
fn RoomList(active: Option<String>) -> Element {
    let ctx = use_app_context();
    let mut store = ctx.store;

    let rooms = use_paginated_list::<Room, _, _>(MergeOrder::Append, |backend: Rc<dyn Backend>, page| async move {
        endpoints::fetch_rooms(backend.as_ref(), page).await
    });
    let mut list = rooms.list;

    let can_load = use_memo(move || list.read().has_more() && !*rooms.loading.read());
    let sentinel_id = use_infinite_scroll(move || rooms.load_more.call(()), can_load);

    use_effect(move || {
        let _ = rooms.revision.read();
        let loaded = list.peek().items().to_vec();
        store.dispatch(Action::Room(RoomAction::SetRooms(loaded)));
    });

    // Rooms deleted from a row drop out of this list too
    use_effect(move || {
        let removed = store.room().removed;
        if removed.is_empty() {
            return;
        }
        let mut list = list.write();
        for id in &removed {
            if list.apply_delete(id) {
                log::info!("Room {} removed from list", id);
            }
        }
    });

    use_drop(move || {
        store.dispatch(Action::Room(RoomAction::ClearRemoved));
    });

    let snapshot = list.read();
    let loading = *rooms.loading.read();
    let has_more = snapshot.has_more();
    let items = snapshot.items().to_vec();
    let failure = snapshot.failed_empty().then(|| snapshot.failure().unwrap_or_default().to_string());
    drop(snapshot);

    rsx! {
        if items.is_empty() && loading {
            div { class: "px-4 py-6 text-center text-muted-foreground", "Loading conversations..." }
        } else if let Some(message) = failure {
            ErrorPanel { message, on_retry: move |_| rooms.refresh.call(()) }
        } else if items.is_empty() {
            div { class: "px-4 py-6 text-center text-muted-foreground", "No conversations yet" }
        } else {
            for room in items {
                RoomRow {
                    key: "{room.id}",
                    active: active.as_deref() == Some(room.id.as_str()),
                    room,
                }
            }
            if has_more {
                div { id: "{sentinel_id}", class: "h-4" }
            }
        }
    }
}
