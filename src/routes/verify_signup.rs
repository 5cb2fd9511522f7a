use dioxus::prelude::*;

use crate::components::{use_toast, OtpInput};
use crate::context::use_app_context;
use crate::routes::Route;
use crate::stores::local_store::{pending_email, PLACEHOLDER_EMAIL};
use crate::stores::signup::{verify, OtpCode, SignupError};
use crate::stores::Notice;
use crate::utils::mask_email;

/// One-time code entry after signup
#[component]
pub fn VerifySignup() -> Element {
    let ctx = use_app_context();
    let navigator = use_navigator();
    let mut toasts = use_toast();
    let code = use_signal(OtpCode::default);
    let mut submitting = use_signal(|| false);

    let storage = ctx.storage.clone();
    let email = use_hook(move || {
        let email = pending_email(storage.as_ref()).unwrap_or_else(|| PLACEHOLDER_EMAIL.to_string());
        mask_email(&email)
    });

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if *submitting.peek() {
            return;
        }
        submitting.set(true);

        let backend = ctx.backend.clone();
        let storage = ctx.storage.clone();
        let entered = code.peek().clone();
        spawn(async move {
            match verify(backend.as_ref(), storage.as_ref(), &entered).await {
                Ok(()) => {
                    toasts.show(Notice::success("Your account is verified"));
                    navigator.replace(Route::Home {});
                }
                Err(e @ SignupError::InvalidCode) => {
                    log::warn!("Signup code incomplete");
                    toasts.show(Notice::alert(e.to_string()));
                }
                Err(e) => toasts.show(Notice::error(e.to_string())),
            }
            submitting.set(false);
        });
    };

    let busy = *submitting.read();

    rsx! {
        div {
            class: "min-h-screen flex items-center justify-center bg-background px-4",
            form {
                class: "w-full max-w-md p-8 rounded-2xl border border-border space-y-6 text-center",
                onsubmit: handle_submit,

                h1 { class: "text-2xl font-bold", "Verify your email" }
                p {
                    class: "text-muted-foreground",
                    "We sent an 8 digit code to "
                    span { class: "font-semibold text-foreground", "{email}" }
                }

                OtpInput { code, disabled: busy }

                button {
                    class: "w-full py-3 bg-blue-500 hover:bg-blue-600 disabled:opacity-50 text-white rounded-full font-semibold transition",
                    r#type: "submit",
                    disabled: busy,
                    if busy { "Verifying..." } else { "Verify" }
                }
            }
        }
    }
}
