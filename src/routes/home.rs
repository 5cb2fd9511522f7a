use dioxus::prelude::*;

use crate::components::{use_viewer, CreatePost};
use crate::routes::Route;

#[component]
pub fn Home() -> Element {
    let viewer = use_viewer();

    rsx! {
        div {
            class: "min-h-screen",

            div {
                class: "sticky top-0 z-20 bg-background/80 backdrop-blur-sm border-b border-border px-4 py-3",
                h2 { class: "text-xl font-bold", "Home" }
            }

            CreatePost {}

            div {
                class: "px-6 py-12 text-center text-muted-foreground space-y-2",
                p { "Share a thought, a photo or a short video." }
                p {
                    "Everything you like is collected on "
                    Link {
                        to: Route::Likes { username: viewer.username.clone() },
                        class: "text-blue-500 hover:underline",
                        "your likes page"
                    }
                    "."
                }
            }
        }
    }
}
