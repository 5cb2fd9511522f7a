//! WebSocket transport for the realtime channel (socket.io v4 over engine.io)
//!
//! Follows the same lifecycle rules as the rest of the browser glue:
//! - No Closure::forget() - closures live in the connection and drop with it
//! - Explicit close() when the connection is dropped
//! - Namespace connect sent once the engine.io handshake arrives
//! - Decoded events go out over a channel; the app drains it inside the
//!   Dioxus runtime and emits them on the [`RealtimeHub`](super::realtime::RealtimeHub)

use tokio::sync::mpsc::UnboundedSender;

use super::realtime::RealtimeEvent;

/// Open socket; closes and releases its callbacks on drop
pub struct SocketConnection {
    #[cfg(target_arch = "wasm32")]
    ws: web_sys::WebSocket,
    #[cfg(target_arch = "wasm32")]
    _closures: wasm::SocketClosures,
    endpoint: String,
}

impl SocketConnection {
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Drop for SocketConnection {
    fn drop(&mut self) {
        #[cfg(target_arch = "wasm32")]
        {
            self.ws.set_onopen(None);
            self.ws.set_onmessage(None);
            self.ws.set_onerror(None);
            self.ws.set_onclose(None);
            if let Err(e) = self.ws.close() {
                log::error!("Failed to close realtime socket: {:?}", e);
            }
        }
        log::info!("Realtime socket closed: {}", self.endpoint);
    }
}

/// Connect to `endpoint` and forward decoded events to `events`
#[cfg(target_arch = "wasm32")]
pub fn connect(endpoint: &str, events: UnboundedSender<RealtimeEvent>) -> Result<SocketConnection, String> {
    let ws = web_sys::WebSocket::new(endpoint)
        .map_err(|e| format!("Failed to open realtime socket: {:?}", e))?;
    let closures = wasm::attach(&ws, events);

    log::info!("Realtime socket connecting to {}", endpoint);
    Ok(SocketConnection {
        ws,
        _closures: closures,
        endpoint: endpoint.to_string(),
    })
}

#[cfg(not(target_arch = "wasm32"))]
pub fn connect(endpoint: &str, _events: UnboundedSender<RealtimeEvent>) -> Result<SocketConnection, String> {
    log::warn!("Realtime socket is only available in the browser ({})", endpoint);
    Err("Realtime socket requires a browser".to_string())
}

#[cfg(target_arch = "wasm32")]
mod wasm {
    use super::super::realtime::{decode_frame, Frame, RealtimeEvent, CONNECT_FRAME, PONG_FRAME};
    use tokio::sync::mpsc::UnboundedSender;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{CloseEvent, ErrorEvent, MessageEvent, WebSocket};

    pub struct SocketClosures {
        _onmessage: Closure<dyn FnMut(MessageEvent)>,
        _onerror: Closure<dyn FnMut(ErrorEvent)>,
        _onclose: Closure<dyn FnMut(CloseEvent)>,
    }

    pub fn attach(ws: &WebSocket, events: UnboundedSender<RealtimeEvent>) -> SocketClosures {
        let ws_for_reply = ws.clone();
        let onmessage = Closure::wrap(Box::new(move |event: MessageEvent| {
            let Some(text) = event.data().as_string() else {
                return;
            };

            match decode_frame(&text) {
                Some(Frame::Open) => {
                    if let Err(e) = ws_for_reply.send_with_str(CONNECT_FRAME) {
                        log::error!("Failed to join realtime namespace: {:?}", e);
                    }
                }
                Some(Frame::Ping) => {
                    if let Err(e) = ws_for_reply.send_with_str(PONG_FRAME) {
                        log::warn!("Failed to answer realtime ping: {:?}", e);
                    }
                }
                Some(Frame::Connected) => log::info!("Realtime channel connected"),
                Some(Frame::Disconnected) => log::warn!("Realtime namespace disconnected"),
                Some(Frame::Event { name, args }) => match RealtimeEvent::from_wire(&name, &args) {
                    Some(event) => {
                        if events.send(event).is_err() {
                            log::warn!("Realtime event dropped: app listener is gone");
                        }
                    }
                    None => log::debug!("Ignoring realtime event {}", name),
                },
                None => log::debug!("Ignoring realtime frame: {}", text),
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));

        let onerror = Closure::wrap(Box::new(move |event: ErrorEvent| {
            log::error!("Realtime socket error: {}", event.message());
        }) as Box<dyn FnMut(ErrorEvent)>);
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        let onclose = Closure::wrap(Box::new(move |event: CloseEvent| {
            log::info!("Realtime socket closed by server (code {})", event.code());
        }) as Box<dyn FnMut(CloseEvent)>);
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));

        SocketClosures {
            _onmessage: onmessage,
            _onerror: onerror,
            _onclose: onclose,
        }
    }
}
