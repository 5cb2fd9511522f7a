/// Application Context
///
/// Everything a screen needs from outside itself: the backend, the shared
/// store, the realtime hub, configuration, persisted browser state and the
/// media probe. Created once in `App` and handed down with
/// `use_context_provider`, so components never reach for global singletons.
use std::rc::Rc;

use dioxus::prelude::*;

use crate::config::AppConfig;
use crate::services::media_probe::BrowserMediaProbe;
use crate::services::{Backend, HttpBackend, RealtimeHub};
use crate::stores::composer::MediaProbe;
use crate::stores::local_store::{BrowserStore, KeyValueStore};
use crate::stores::AppStore;

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub backend: Rc<dyn Backend>,
    pub store: AppStore,
    pub hub: RealtimeHub,
    pub storage: Rc<dyn KeyValueStore>,
    pub probe: Rc<dyn MediaProbe>,
}

impl AppContext {
    /// Context wired to the real browser services.
    ///
    /// Must be called inside a component scope (the store owns a signal).
    pub fn browser(config: AppConfig) -> Self {
        Self {
            backend: Rc::new(HttpBackend::new(config.clone())),
            config,
            store: AppStore::new(),
            hub: RealtimeHub::new(),
            storage: Rc::new(BrowserStore),
            probe: Rc::new(BrowserMediaProbe),
        }
    }
}

/// Fetch the application context provided by `App`
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>()
}
