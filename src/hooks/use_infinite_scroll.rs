use dioxus::prelude::*;

use super::use_in_view::use_in_view;
use crate::stores::row_state::ViewportConfig;

/// Sentinel observation for "load more": fires 300px early, every time
pub const LOAD_MORE_VIEWPORT: ViewportConfig = ViewportConfig {
    threshold: 0.0,
    root_margin: "300px",
    trigger_once: false,
};

/// Minimum gap between two load-more triggers
const DEBOUNCE_MS: i64 = 1000;

/// Infinite scroll hook that triggers loading when the sentinel element enters the viewport
///
/// Returns the id to put on a sentinel element below the list. `enabled`
/// should be false while a page is loading or when there is nothing left.
///
/// # Example
/// ```ignore
/// let can_load = use_memo(move || feed.list.read().has_more() && !*feed.loading.read());
/// let sentinel_id = use_infinite_scroll(move || feed.load_more.call(()), can_load);
///
/// // In your rsx:
/// div { id: "{sentinel_id}", class: "h-4" }
/// ```
pub fn use_infinite_scroll<F>(mut on_load_more: F, enabled: Memo<bool>) -> String
where
    F: FnMut() + 'static,
{
    let mut last_trigger = use_signal(|| 0i64);

    use_in_view(LOAD_MORE_VIEWPORT, move || {
        if !*enabled.peek() {
            log::debug!("Infinite scroll idle");
            return;
        }

        let now = chrono::Utc::now().timestamp_millis();
        if now - *last_trigger.peek() < DEBOUNCE_MS {
            return;
        }
        last_trigger.set(now);

        log::info!("Sentinel in view - loading next page");
        on_load_more();
    })
}
