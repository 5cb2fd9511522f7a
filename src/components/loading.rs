use dioxus::prelude::*;

/// Centered spinner for screens waiting on their first response
#[component]
pub fn Loading(#[props(default = "Loading...".to_string())] label: String) -> Element {
    rsx! {
        div {
            class: "flex flex-col items-center justify-center gap-3 py-16 text-muted-foreground",
            role: "status",
            div { class: "w-8 h-8 border-2 border-blue-500 border-t-transparent rounded-full animate-spin" }
            span { class: "text-sm", "{label}" }
        }
    }
}

/// Error for a screen (failed session check, missing profile, failed list).
/// With `on_retry` it offers a "Try again" button.
#[component]
pub fn ErrorPanel(message: String, on_retry: Option<EventHandler<()>>) -> Element {
    rsx! {
        div {
            class: "flex flex-col items-center justify-center gap-2 py-16 px-6 text-center",
            role: "alert",
            p { class: "text-lg font-semibold", "Something went wrong" }
            p { class: "text-muted-foreground", "{message}" }
            if let Some(on_retry) = on_retry {
                button {
                    class: "mt-2 px-4 py-2 text-sm text-blue-500 hover:bg-blue-500/10 rounded-full transition",
                    onclick: move |_| on_retry.call(()),
                    "Try again"
                }
            }
        }
    }
}

/// Placeholder row shown while a post list loads
#[component]
pub fn PostSkeleton() -> Element {
    rsx! {
        div {
            class: "p-4 border-b border-border animate-pulse flex gap-3",
            div { class: "w-10 h-10 rounded-full bg-muted" }
            div {
                class: "flex-1 space-y-2",
                div { class: "h-3 w-1/3 bg-muted rounded" }
                div { class: "h-3 w-full bg-muted rounded" }
                div { class: "h-3 w-2/3 bg-muted rounded" }
            }
        }
    }
}
