use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

use crate::stores::row_state::ViewportConfig;

/// Live IntersectionObserver plus its callback.
///
/// Disconnects on drop; the callback closure is owned here instead of being
/// forgotten, so nothing outlives the component that created it.
pub struct ViewportWatch {
    #[cfg(target_family = "wasm")]
    observer: web_sys::IntersectionObserver,
    #[cfg(target_family = "wasm")]
    _callback: wasm_bindgen::closure::Closure<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>,
}

impl Drop for ViewportWatch {
    fn drop(&mut self) {
        #[cfg(target_family = "wasm")]
        self.observer.disconnect();
    }
}

impl ViewportWatch {
    /// Observe the element with `element_id`; every entry is signalled on `entered`.
    ///
    /// The observer callback runs outside the Dioxus runtime, so it only
    /// signals and the receiving task does the work.
    #[cfg(target_family = "wasm")]
    pub fn observe(
        element_id: &str,
        config: &ViewportConfig,
        entered: UnboundedSender<()>,
    ) -> Result<Self, String> {
        use wasm_bindgen::prelude::*;
        use wasm_bindgen::JsCast;

        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(element_id))
            .ok_or_else(|| format!("Element {} not mounted", element_id))?;

        let trigger_once = config.trigger_once;
        let callback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: web_sys::IntersectionObserver| {
                let intersecting = entries.iter().any(|entry| {
                    entry
                        .dyn_into::<web_sys::IntersectionObserverEntry>()
                        .map(|e| e.is_intersecting())
                        .unwrap_or(false)
                });
                if !intersecting {
                    return;
                }
                if trigger_once {
                    observer.disconnect();
                }
                let _ = entered.send(());
            },
        ) as Box<dyn FnMut(js_sys::Array, web_sys::IntersectionObserver)>);

        let mut options = web_sys::IntersectionObserverInit::new();
        options.set_root_margin(config.root_margin);
        options.set_threshold(&JsValue::from_f64(config.threshold));

        let observer =
            web_sys::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .map_err(|e| format!("Failed to create IntersectionObserver: {:?}", e))?;
        observer.observe(&element);

        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    #[cfg(not(target_family = "wasm"))]
    pub fn observe(
        element_id: &str,
        _config: &ViewportConfig,
        _entered: UnboundedSender<()>,
    ) -> Result<Self, String> {
        Err(format!("No viewport to observe {} outside the browser", element_id))
    }
}

/// Call `on_enter` when the returned element id scrolls into view.
///
/// Assign the id to the element to watch. The observer is set up once after
/// mount and torn down when the component unmounts.
///
/// ```ignore
/// let row_id = use_in_view(ROW_VIEWPORT, move || flag.write().on_visible());
/// rsx! { article { id: "{row_id}", ... } }
/// ```
pub fn use_in_view<F>(config: ViewportConfig, on_enter: F) -> String
where
    F: FnMut() + 'static,
{
    let element_id = use_hook(|| format!("in-view-{}", uuid::Uuid::new_v4()));
    let handler = use_hook(|| {
        let handler: Rc<RefCell<dyn FnMut()>> = Rc::new(RefCell::new(on_enter));
        handler
    });
    let watch = use_hook(|| Rc::new(RefCell::new(None::<ViewportWatch>)));

    let id = element_id.clone();
    let slot = watch.clone();
    use_effect(move || {
        let id = id.clone();
        let handler = handler.clone();
        let slot = slot.clone();
        let config = config.clone();
        spawn(async move {
            // Let the DOM catch up with the first render
            gloo_timers::future::TimeoutFuture::new(0).await;
            let (tx, mut rx) = unbounded_channel();
            match ViewportWatch::observe(&id, &config, tx) {
                Ok(w) => *slot.borrow_mut() = Some(w),
                Err(e) => {
                    log::debug!("Viewport watch not started: {}", e);
                    return;
                }
            }
            while rx.recv().await.is_some() {
                (handler.borrow_mut())();
            }
        });
    });

    use_drop(move || {
        watch.borrow_mut().take();
    });

    element_id
}
