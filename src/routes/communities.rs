use dioxus::prelude::*;

use crate::routes::Route;

/// Communities are not available; send visitors home
#[component]
pub fn Communities() -> Element {
    let navigator = use_navigator();

    use_effect(move || {
        log::debug!("Redirecting /communities to home");
        navigator.replace(Route::Home {});
    });

    rsx! {}
}
