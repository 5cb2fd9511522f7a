use dioxus::prelude::*;

/// Confirmation dialog for destructive actions (delete post, delete conversation)
///
/// While `busy` the confirm button is disabled so the action cannot be sent twice.
#[component]
pub fn ConfirmModal(
    title: String,
    message: String,
    #[props(default = "Delete".to_string())] confirm_text: String,
    #[props(default = false)] busy: bool,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            class: "fixed inset-0 bg-black/50 z-50 flex items-center justify-center p-4",
            onclick: move |_| {
                if !busy {
                    on_cancel.call(());
                }
            },

            div {
                class: "bg-card border border-border rounded-xl max-w-sm w-full p-6 shadow-xl",
                role: "dialog",
                aria_modal: "true",
                aria_labelledby: "confirm-title",
                onclick: move |e| e.stop_propagation(),

                h2 { class: "text-lg font-bold mb-2", id: "confirm-title", "{title}" }
                p { class: "text-muted-foreground mb-6", "{message}" }

                div {
                    class: "flex gap-3 justify-end",
                    button {
                        class: "px-4 py-2 rounded-lg hover:bg-accent transition",
                        disabled: busy,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    button {
                        class: "px-4 py-2 bg-destructive text-destructive-foreground rounded-lg hover:bg-destructive/90 transition disabled:opacity-50",
                        disabled: busy,
                        onclick: move |_| on_confirm.call(()),
                        if busy { "Deleting..." } else { "{confirm_text}" }
                    }
                }
            }
        }
    }
}
