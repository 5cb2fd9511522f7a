use dioxus::prelude::*;

use crate::components::icons::{ImageIcon, VideoIcon};
use crate::stores::composer::{Attachment, MediaKind};
use crate::utils::format_file_size;

/// Hidden file input behind an icon button. `on_change` fires after a file was picked.
#[component]
pub fn MediaPickerButton(input_id: String, disabled: bool, on_change: EventHandler<()>) -> Element {
    rsx! {
        label {
            class: "p-2 rounded-full text-blue-500 hover:bg-blue-500/10 transition cursor-pointer",
            class: if disabled { "opacity-50 pointer-events-none" },
            title: "Add photo or video",
            ImageIcon { class: "w-5 h-5" }
            input {
                id: "{input_id}",
                class: "hidden",
                r#type: "file",
                accept: "image/*,video/*",
                disabled,
                onchange: move |_| on_change.call(()),
            }
        }
    }
}

/// Selected attachment with a remove button
#[component]
pub fn AttachmentChip(attachment: Attachment, disabled: bool, on_remove: EventHandler<()>) -> Element {
    let is_video = attachment.kind() == MediaKind::Video;

    rsx! {
        div {
            class: "mt-3 flex items-center justify-between gap-3 p-3 rounded-lg bg-accent/50",
            div {
                class: "flex items-center gap-2 min-w-0",
                if is_video {
                    VideoIcon { class: "w-5 h-5 flex-shrink-0" }
                } else {
                    ImageIcon { class: "w-5 h-5 flex-shrink-0" }
                }
                div {
                    class: "min-w-0",
                    p { class: "text-sm font-medium truncate", "{attachment.name}" }
                    p { class: "text-xs text-muted-foreground", "{format_file_size(attachment.bytes.len())}" }
                }
            }
            button {
                class: "px-3 py-1 text-sm text-red-600 hover:text-red-700 disabled:opacity-50",
                disabled,
                onclick: move |_| on_remove.call(()),
                "✕ Remove"
            }
        }
    }
}

/// Read the file currently selected in the input with `input_id`.
///
/// The input is cleared afterwards so picking the same file again still
/// fires `change`.
#[cfg(target_arch = "wasm32")]
pub async fn read_selected_file(input_id: &str) -> Result<Attachment, String> {
    use js_sys::{ArrayBuffer, Uint8Array};
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlInputElement;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("No document")?;

    let input = document
        .get_element_by_id(input_id)
        .ok_or("Input not found")?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| "Not an input element")?;

    let file = input
        .files()
        .and_then(|files| files.get(0))
        .ok_or("No file selected")?;

    let array_buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|_| "Failed to read file")?;
    let array_buffer: ArrayBuffer = array_buffer.dyn_into().map_err(|_| "Not an ArrayBuffer")?;
    let bytes = Uint8Array::new(&array_buffer).to_vec();

    input.set_value("");

    Ok(Attachment {
        name: file.name(),
        content_type: file.type_(),
        bytes,
    })
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn read_selected_file(input_id: &str) -> Result<Attachment, String> {
    Err(format!("No file input {} outside the browser", input_id))
}
