use dioxus::prelude::*;

use crate::components::media_picker::{read_selected_file, AttachmentChip, MediaPickerButton};
use crate::components::post_card::Avatar;
use crate::components::session_gate::use_viewer;
use crate::components::toast::use_toast;
use crate::context::use_app_context;
use crate::hooks::use_click_outside;
use crate::services::Author;
use crate::stores::app_state::{Action, ToggleAction};
use crate::stores::composer::{submit, ComposeError, Composer, MAX_MESSAGE_LEN};
use crate::stores::Notice;

/// Post composer.
///
/// Collapsed to a single prompt until focused; a press outside collapses it
/// again. Media is uploaded before the post is created, and a successful post
/// resets the draft.
#[component]
pub fn CreatePost() -> Element {
    let ctx = use_app_context();
    let viewer = use_viewer();
    let mut toasts = use_toast();
    let mut store = ctx.store;
    let mut composer = use_signal(Composer::default);

    let container_id = use_hook(|| format!("composer-{}", uuid::Uuid::new_v4()));
    let input_id = use_hook(|| format!("composer-file-{}", uuid::Uuid::new_v4()));

    use_click_outside(container_id.clone(), move || {
        if store.snapshot().toggle.composer_open && !composer.peek().is_submitting() {
            store.dispatch(Action::Toggle(ToggleAction::SetComposerOpen(false)));
        }
    });

    let picker_id = input_id.clone();
    let handle_file = move |_| {
        let id = picker_id.clone();
        spawn(async move {
            match read_selected_file(&id).await {
                Ok(attachment) => {
                    log::info!("Attached {} ({} bytes)", attachment.name, attachment.bytes.len());
                    composer.write().draft.attachment = Some(attachment);
                }
                Err(e) => {
                    log::error!("Failed to read file: {}", e);
                    toasts.show(Notice::error(format!("Failed to read file: {}", e)));
                }
            }
        });
    };

    let handle_submit = move |_| {
        let draft = match composer.write().begin_submit() {
            Ok(draft) => draft,
            Err(ComposeError::Busy) => return,
            Err(e) => {
                toasts.show(Notice::alert(e.user_message()));
                return;
            }
        };

        let backend = ctx.backend.clone();
        let probe = ctx.probe.clone();
        let config = ctx.config.clone();
        spawn(async move {
            let result = submit(backend.as_ref(), probe.as_ref(), &config, &draft).await;
            composer.write().finish_submit(&result);

            match result {
                Ok(_) => {
                    toasts.show(Notice::success("Your post was published"));
                    store.dispatch(Action::Toggle(ToggleAction::SetComposerOpen(false)));
                }
                Err(e) if e.is_validation() => toasts.show(Notice::alert(e.user_message())),
                Err(e) => {
                    log::error!("Post submission failed: {}", e);
                    toasts.show(Notice::error(e.user_message()));
                }
            }
        });
    };

    let expanded = store.toggle().composer_open;
    let state = composer.read();
    let submitting = state.is_submitting();
    let remaining = state.draft.remaining();
    let counter_color = if remaining <= 20 { "text-red-500" } else { "text-muted-foreground" };
    let me = Author {
        id: viewer.id.clone(),
        username: viewer.username.clone(),
        name: viewer.name.clone(),
        photo: viewer.photo.clone(),
    };

    rsx! {
        div {
            id: "{container_id}",
            class: "p-4 border-b border-border",

            div {
                class: "flex gap-3",
                Avatar { author: me }

                div {
                    class: "flex-1 min-w-0",
                    if expanded {
                        textarea {
                            class: "w-full min-h-[96px] bg-transparent text-lg resize-none outline-none placeholder:text-muted-foreground",
                            placeholder: "What's happening?",
                            maxlength: "{MAX_MESSAGE_LEN}",
                            autofocus: true,
                            disabled: submitting,
                            value: "{state.draft.message}",
                            oninput: move |evt| composer.write().draft.set_message(&evt.value()),
                        }

                        if let Some(attachment) = state.draft.attachment.clone() {
                            AttachmentChip {
                                attachment,
                                disabled: submitting,
                                on_remove: move |_| composer.write().draft.attachment = None,
                            }
                        }

                        div {
                            class: "flex items-center justify-between mt-3 pt-3 border-t border-border",
                            MediaPickerButton {
                                input_id: input_id.clone(),
                                disabled: submitting || state.draft.attachment.is_some(),
                                on_change: handle_file,
                            }
                            div {
                                class: "flex items-center gap-3",
                                span { class: "text-sm {counter_color}", "{remaining}" }
                                button {
                                    class: "px-5 py-2 bg-blue-500 hover:bg-blue-600 disabled:opacity-50 text-white rounded-full font-semibold transition",
                                    disabled: submitting,
                                    onclick: handle_submit,
                                    if submitting { "Posting..." } else { "Post" }
                                }
                            }
                        }
                    } else {
                        button {
                            class: "w-full text-left py-2 text-lg text-muted-foreground",
                            onclick: move |_| store.dispatch(Action::Toggle(ToggleAction::SetComposerOpen(true))),
                            if state.draft.message.is_empty() { "What's happening?" } else { "{state.draft.message}" }
                        }
                    }
                }
            }
        }
    }
}
