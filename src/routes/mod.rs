use dioxus::prelude::*;

pub mod communities;
pub mod home;
pub mod likes;
pub mod messages;
pub mod post_detail;
pub mod user_layout;
pub mod verify_signup;

use communities::Communities;
use home::Home;
use likes::Likes;
use messages::{MessageRoom, Messages};
use post_detail::PostDetail;
use user_layout::UserLayout;
use verify_signup::VerifySignup;

use crate::components::icons::{HeartIcon, HomeIcon, MailIcon};
use crate::components::{use_viewer, Avatar, SessionGate};
use crate::context::use_app_context;
use crate::services::Author;
use crate::stores::app_state::{Action, ToggleAction};

/// App routes
#[derive(Clone, Routable, Debug, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/")]
        Home {},

        #[route("/messages")]
        Messages {},

        #[route("/messages/:room_id")]
        MessageRoom { room_id: String },

        #[route("/posts/:id")]
        PostDetail { id: String },

        #[route("/communities")]
        Communities {},

        #[nest("/:username")]
            #[layout(UserLayout)]
                #[route("/likes")]
                Likes { username: String },
            #[end_layout]
        #[end_nest]
    #[end_layout]

    #[route("/signup/verify")]
    VerifySignup {},
}

/// Every signed-in screen: session check first, then the shell
#[component]
fn Layout() -> Element {
    rsx! {
        SessionGate {
            Shell {}
        }
    }
}

#[component]
fn Shell() -> Element {
    let ctx = use_app_context();
    let viewer = use_viewer();
    let mut store = ctx.store;
    let sidebar_open = store.toggle().sidebar_open;
    let liked_count = store.user().liked_posts_count;
    let current_route = use_route::<Route>();
    let navigator = navigator();
    let is_home_page = matches!(current_route, Route::Home {});

    let me = Author {
        id: viewer.id.clone(),
        username: viewer.username.clone(),
        name: viewer.name.clone(),
        photo: viewer.photo.clone(),
    };
    let sidebar_visibility = if sidebar_open { "block" } else { "hidden lg:block" };

    rsx! {
        div {
            class: "min-h-screen bg-background transition-colors",

            // Mobile header
            div {
                class: "lg:hidden sticky top-0 z-30 flex items-center justify-between px-4 py-3 border-b border-border bg-background/90 backdrop-blur",
                button {
                    class: "font-bold text-xl",
                    onclick: move |_| store.dispatch(Action::Toggle(ToggleAction::ToggleSidebar)),
                    "Threadly"
                }
            }

            div {
                class: "flex justify-center max-w-[1280px] mx-auto",

                aside {
                    class: "w-[260px] flex-shrink-0 border-r border-border sticky top-0 h-screen bg-background {sidebar_visibility}",
                    div {
                        class: "h-full flex flex-col p-4",

                        div {
                            class: "w-12 h-12 mb-6 bg-blue-500 hover:bg-blue-600 rounded-full flex items-center justify-center text-white font-bold text-xl transition cursor-pointer",
                            onclick: move |_| {
                                if is_home_page {
                                    scroll_to_top();
                                } else {
                                    navigator.push(Route::Home {});
                                }
                            },
                            "T"
                        }

                        nav {
                            class: "flex flex-col gap-1",
                            NavLink {
                                to: Route::Home {},
                                icon: rsx! { HomeIcon { class: "w-7 h-7" } },
                                label: "Home"
                            }
                            NavLink {
                                to: Route::Messages {},
                                icon: rsx! { MailIcon { class: "w-7 h-7" } },
                                label: "Messages"
                            }
                            NavLink {
                                to: Route::Likes { username: viewer.username.clone() },
                                icon: rsx! { HeartIcon { class: "w-7 h-7" } },
                                label: "Likes",
                                badge: Some(liked_count)
                            }
                        }

                        div {
                            class: "mt-auto flex items-center gap-3 p-3 rounded-full",
                            Avatar { author: me }
                            div {
                                class: "min-w-0",
                                p { class: "font-semibold truncate", "{viewer.name}" }
                                p { class: "text-sm text-muted-foreground truncate", "@{viewer.username}" }
                            }
                        }
                    }
                }

                main {
                    class: "flex-1 max-w-[640px] min-h-screen border-r border-border",
                    Outlet::<Route> {}
                }
            }
        }
    }
}

#[component]
fn NavLink(to: Route, icon: Element, label: &'static str, #[props(default = None)] badge: Option<usize>) -> Element {
    let current_route = use_route::<Route>();

    let is_active = match (&to, &current_route) {
        (Route::Home {}, Route::Home {}) => true,
        (Route::Messages {}, Route::Messages {} | Route::MessageRoom { .. }) => true,
        (Route::Likes { username: a }, Route::Likes { username: b }) => a == b,
        _ => false,
    };
    let font_class = if is_active { "font-bold" } else { "" };

    rsx! {
        Link {
            to: to.clone(),
            class: "flex items-center gap-4 px-4 py-3 rounded-full hover:bg-accent transition text-xl {font_class}",
            {icon}
            span { "{label}" }
            if let Some(count) = badge.filter(|c| *c > 0) {
                span {
                    class: "ml-auto text-xs px-2 py-0.5 rounded-full bg-blue-500 text-white",
                    "{count}"
                }
            }
        }
    }
}

fn scroll_to_top() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let mut options = web_sys::ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(web_sys::ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        }
    }
}
