use dioxus::prelude::*;

use crate::stores::signup::{OtpCode, OTP_LENGTH};

/// Row of single-digit inputs bound to `code`.
///
/// Typing moves focus forward, backspace on an empty cell moves back, and a
/// pasted code spreads over the following cells.
#[component]
pub fn OtpInput(code: Signal<OtpCode>, disabled: bool) -> Element {
    let mut code = code;
    let prefix = use_hook(|| format!("otp-{}", uuid::Uuid::new_v4()));
    let cells = code.read().cells().to_vec();

    rsx! {
        div {
            class: "flex justify-center gap-2",
            for (index, value) in cells.into_iter().enumerate() {
                input {
                    key: "{index}",
                    id: "{prefix}-{index}",
                    class: "w-10 h-12 text-center text-xl font-semibold rounded-lg border border-border bg-background focus:border-blue-500 outline-none",
                    r#type: "text",
                    inputmode: "numeric",
                    autocomplete: "one-time-code",
                    aria_label: "Digit {index + 1}",
                    disabled,
                    value: "{value}",
                    oninput: {
                        let prefix = prefix.clone();
                        move |evt: Event<FormData>| {
                            let raw = evt.value();
                            let digits = raw.chars().filter(|c| c.is_ascii_digit()).count();
                            if digits > 1 {
                                code.write().paste(index, &raw);
                                focus_cell(&prefix, (index + digits).min(OTP_LENGTH - 1));
                            } else if code.write().set_cell(index, &raw) && index + 1 < OTP_LENGTH {
                                focus_cell(&prefix, index + 1);
                            }
                        }
                    },
                    onkeydown: {
                        let prefix = prefix.clone();
                        move |evt: Event<KeyboardData>| {
                            let empty = code.peek().cells().get(index).map_or(true, |c| c.is_empty());
                            if evt.key() == Key::Backspace && empty && index > 0 {
                                focus_cell(&prefix, index - 1);
                            }
                        }
                    },
                }
            }
        }
    }
}

fn focus_cell(prefix: &str, index: usize) {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let cell = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&format!("{}-{}", prefix, index)))
            .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok());
        if let Some(cell) = cell {
            let _ = cell.focus();
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    let _ = (prefix, index);
}
