use dioxus::prelude::*;

use crate::components::confirm_modal::ConfirmModal;
use crate::components::icons::TrashIcon;
use crate::components::post_card::Avatar;
use crate::components::session_gate::use_viewer;
use crate::components::toast::use_toast;
use crate::context::use_app_context;
use crate::routes::Route;
use crate::services::Room;
use crate::stores::row_actions;

/// One conversation in the room list
#[component]
pub fn RoomRow(room: Room, active: bool) -> Element {
    let ctx = use_app_context();
    let viewer = use_viewer();
    let mut toasts = use_toast();
    let navigator = use_navigator();
    let mut confirming = use_signal(|| false);
    let mut deleting = use_signal(|| false);

    let Some(other) = room.other_participant(&viewer.id).cloned() else {
        log::warn!("Room {} has no other participant", room.id);
        return rsx! {};
    };

    let room_id = room.id.clone();
    let handle_delete = move |_| {
        if *deleting.peek() {
            return;
        }
        deleting.set(true);

        let backend = ctx.backend.clone();
        let mut store = ctx.store;
        let room_id = room_id.clone();
        spawn(async move {
            match row_actions::delete_room(backend.as_ref(), &room_id).await {
                Ok(removed) => {
                    store.dispatch(removed);
                    confirming.set(false);
                    navigator.push(Route::Messages {});
                }
                Err(notice) => toasts.show(notice),
            }
            deleting.set(false);
        });
    };

    let highlight = if active { "bg-accent" } else { "hover:bg-accent/50" };
    let target = Route::MessageRoom { room_id: room.id.clone() };

    rsx! {
        div {
            class: "flex items-center gap-3 px-4 py-3 border-b border-border transition {highlight}",
            Link {
                to: target,
                class: "flex items-center gap-3 flex-1 min-w-0",
                Avatar { author: other.clone() }
                div {
                    class: "min-w-0",
                    p { class: "font-semibold truncate", "{other.name}" }
                    p { class: "text-sm text-muted-foreground truncate", "@{other.username}" }
                }
            }
            button {
                class: "p-2 rounded-full hover:bg-destructive/10 hover:text-destructive transition",
                aria_label: "Delete conversation",
                onclick: move |_| confirming.set(true),
                TrashIcon { class: "w-4 h-4" }
            }
        }

        if *confirming.read() {
            ConfirmModal {
                title: "Delete conversation?",
                message: "This removes the conversation with @{other.username} for you.",
                busy: *deleting.read(),
                on_confirm: handle_delete,
                on_cancel: move |_| confirming.set(false),
            }
        }
    }
}
