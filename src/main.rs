#![allow(non_snake_case)]

use dioxus::prelude::*;
use std::rc::Rc;

// Modules
mod components;
mod config;
mod context;
mod hooks;
mod routes;
mod services;
mod stores;
mod utils;

use components::toast::ToastProvider;
use config::AppConfig;
use context::AppContext;
use services::socket::{self, SocketConnection};
use services::RealtimeEvent;

fn main() {
    // Initialize panic hook for better error messages in browser console
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    }

    log::info!("Starting Threadly client");

    // Launch the Dioxus web app
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let ctx = use_context_provider(|| AppContext::browser(AppConfig::from_build_env()));

    // Socket callbacks only forward events; the hub runs inside this scope
    let endpoint = ctx.config.socket_endpoint();
    let hub = ctx.hub.clone();
    let _socket = use_hook(move || {
        let (events_tx, mut events_rx) = tokio::sync::mpsc::unbounded_channel::<RealtimeEvent>();

        let connection: Option<SocketConnection> = match socket::connect(&endpoint, events_tx) {
            Ok(connection) => {
                log::info!("Realtime socket opening at {}", connection.endpoint());
                Some(connection)
            }
            Err(e) => {
                log::warn!("Realtime updates unavailable: {}", e);
                None
            }
        };

        spawn(async move {
            while let Some(event) = events_rx.recv().await {
                hub.emit(&event);
            }
            log::info!("Realtime event stream closed");
        });

        Rc::new(connection)
    });

    rsx! {
        ToastProvider {
            Router::<routes::Route> {}
        }
    }
}
