use dioxus::prelude::*;

use crate::stores::{Notice, NoticeKind};

/// How long a toast stays on screen
const TOAST_DURATION_MS: u32 = 4_000;

/// Handle for showing transient notices
#[derive(Clone, Copy, PartialEq)]
pub struct Toasts {
    queue: Signal<Vec<(u64, Notice)>>,
    next_id: Signal<u64>,
}

impl Toasts {
    pub fn show(&mut self, notice: Notice) {
        match notice.kind {
            NoticeKind::Error => log::warn!("Toast: {}", notice.message),
            _ => log::debug!("Toast: {}", notice.message),
        }
        let id = *self.next_id.peek();
        self.next_id.set(id + 1);
        self.queue.write().push((id, notice));
    }

    pub fn dismiss(&mut self, id: u64) {
        self.queue.write().retain(|(toast_id, _)| *toast_id != id);
    }
}

pub fn use_toast() -> Toasts {
    use_context::<Toasts>()
}

#[component]
pub fn ToastProvider(children: Element) -> Element {
    let toasts = use_context_provider(|| Toasts {
        queue: Signal::new(Vec::new()),
        next_id: Signal::new(0),
    });

    rsx! {
        {children}

        div {
            class: "fixed bottom-4 left-1/2 -translate-x-1/2 z-[60] flex flex-col gap-2 items-center pointer-events-none",
            aria_live: "polite",
            for (id, notice) in toasts.queue.read().iter().cloned() {
                ToastItem { key: "{id}", id, notice }
            }
        }
    }
}

#[component]
fn ToastItem(id: u64, notice: Notice) -> Element {
    let mut toasts = use_toast();

    // Timer lives in this item's scope, so dismissing early cancels it
    use_hook(move || {
        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_DURATION_MS).await;
            toasts.dismiss(id);
        });
    });

    let tone = match notice.kind {
        NoticeKind::Error => "bg-destructive text-destructive-foreground",
        NoticeKind::Alert => "bg-amber-500 text-white",
        NoticeKind::Success => "bg-blue-500 text-white",
    };

    rsx! {
        div {
            class: "pointer-events-auto px-4 py-3 rounded-lg shadow-lg text-sm flex items-center gap-3 {tone}",
            role: "status",
            span { "{notice.message}" }
            button {
                class: "opacity-80 hover:opacity-100",
                aria_label: "Dismiss",
                onclick: move |_| toasts.dismiss(id),
                "✕"
            }
        }
    }
}
