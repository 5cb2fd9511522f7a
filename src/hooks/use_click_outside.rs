use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

/// Document `mousedown` listener that reports presses outside one element.
///
/// Removed from the document when dropped.
pub struct OutsidePressWatch {
    #[cfg(target_family = "wasm")]
    document: web_sys::Document,
    #[cfg(target_family = "wasm")]
    callback: wasm_bindgen::closure::Closure<dyn FnMut(web_sys::MouseEvent)>,
}

impl Drop for OutsidePressWatch {
    fn drop(&mut self) {
        #[cfg(target_family = "wasm")]
        {
            use wasm_bindgen::JsCast;
            let _ = self
                .document
                .remove_event_listener_with_callback("mousedown", self.callback.as_ref().unchecked_ref());
        }
    }
}

impl OutsidePressWatch {
    #[cfg(target_family = "wasm")]
    pub fn listen(container_id: &str, pressed: UnboundedSender<()>) -> Result<Self, String> {
        use wasm_bindgen::prelude::*;
        use wasm_bindgen::JsCast;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("No document")?;

        let lookup = document.clone();
        let id = container_id.to_string();
        let callback = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
            let Some(container) = lookup.get_element_by_id(&id) else {
                return;
            };
            let inside = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Node>().ok())
                .map(|node| container.contains(Some(&node)))
                .unwrap_or(false);
            if !inside {
                let _ = pressed.send(());
            }
        }) as Box<dyn FnMut(web_sys::MouseEvent)>);

        document
            .add_event_listener_with_callback("mousedown", callback.as_ref().unchecked_ref())
            .map_err(|e| format!("Failed to listen for mousedown: {:?}", e))?;

        Ok(Self { document, callback })
    }

    #[cfg(not(target_family = "wasm"))]
    pub fn listen(container_id: &str, _pressed: UnboundedSender<()>) -> Result<Self, String> {
        Err(format!("No document to watch around {}", container_id))
    }
}

/// Call `on_outside` whenever a mousedown lands outside the element with `container_id`.
///
/// The listener is installed after mount and removed on unmount.
pub fn use_click_outside<F>(container_id: String, on_outside: F)
where
    F: FnMut() + 'static,
{
    let handler = use_hook(|| {
        let handler: Rc<RefCell<dyn FnMut()>> = Rc::new(RefCell::new(on_outside));
        handler
    });
    let watch = use_hook(|| Rc::new(RefCell::new(None::<OutsidePressWatch>)));

    let slot = watch.clone();
    use_effect(move || {
        let id = container_id.clone();
        let handler = handler.clone();
        let slot = slot.clone();
        spawn(async move {
            let (tx, mut rx) = unbounded_channel();
            match OutsidePressWatch::listen(&id, tx) {
                Ok(w) => *slot.borrow_mut() = Some(w),
                Err(e) => {
                    log::debug!("Click-outside watch not started: {}", e);
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
}
