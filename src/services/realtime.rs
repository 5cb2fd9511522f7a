//! Realtime channel: named server events fanned out to mounted screens
//!
//! Screens subscribe through [`RealtimeHub::subscribe`] and hold the returned
//! [`Subscription`]; dropping it removes the listener. The socket transport
//! (see `socket.rs`) decodes frames with [`decode_frame`] and feeds the hub.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::Value;

/// Socket.io event name for post deletion
pub const POST_DELETED_EVENT: &str = "deletePost";

#[derive(Debug, Clone, PartialEq)]
pub enum RealtimeEvent {
    PostDeleted(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    PostDeleted,
}

impl RealtimeEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            RealtimeEvent::PostDeleted(_) => EventKind::PostDeleted,
        }
    }

    /// Map a socket.io event name and its arguments to a typed event
    pub fn from_wire(name: &str, args: &[Value]) -> Option<Self> {
        match name {
            POST_DELETED_EVENT => {
                let id = args.first()?.as_str()?;
                Some(RealtimeEvent::PostDeleted(id.to_string()))
            }
            _ => None,
        }
    }
}

type Listener = Rc<dyn Fn(&RealtimeEvent)>;

#[derive(Default)]
struct HubInner {
    next_id: u64,
    listeners: BTreeMap<u64, (EventKind, Listener)>,
}

/// Fan-out point between the socket and the screens
#[derive(Clone, Default)]
pub struct RealtimeHub {
    inner: Rc<RefCell<HubInner>>,
}

impl PartialEq for RealtimeHub {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl RealtimeHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events of `kind` until the subscription drops
    pub fn subscribe(&self, kind: EventKind, handler: impl Fn(&RealtimeEvent) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.insert(id, (kind, Rc::new(handler)));
        log::debug!("Realtime listener {} subscribed to {:?}", id, kind);

        Subscription {
            id,
            hub: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver `event` to every listener registered for its kind
    pub fn emit(&self, event: &RealtimeEvent) {
        // Snapshot so handlers may drop their own subscription mid-dispatch
        let targets: Vec<Listener> = self
            .inner
            .borrow()
            .listeners
            .values()
            .filter(|(kind, _)| *kind == event.kind())
            .map(|(_, listener)| listener.clone())
            .collect();

        log::debug!("Dispatching {:?} to {} listener(s)", event, targets.len());
        for listener in targets {
            listener(event);
        }
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.inner
            .borrow()
            .listeners
            .values()
            .filter(|(k, _)| *k == kind)
            .count()
    }
}

/// Live registration; unsubscribes on drop
pub struct Subscription {
    id: u64,
    hub: std::rc::Weak<RefCell<HubInner>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.hub.upgrade() {
            inner.borrow_mut().listeners.remove(&self.id);
            log::debug!("Realtime listener {} unsubscribed", self.id);
        }
    }
}

/// Decoded engine.io / socket.io text frame
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Engine.io handshake (`0{...}`)
    Open,
    /// Engine.io ping, must be answered with [`PONG_FRAME`]
    Ping,
    /// Namespace connected (`40`)
    Connected,
    /// Namespace disconnected (`41`)
    Disconnected,
    /// Socket.io event (`42["name", ...args]`)
    Event { name: String, args: Vec<Value> },
}

pub const PONG_FRAME: &str = "3";
pub const CONNECT_FRAME: &str = "40";

/// Parse a text frame. Unknown or malformed frames yield `None`.
pub fn decode_frame(text: &str) -> Option<Frame> {
    let mut chars = text.chars();
    match chars.next()? {
        '0' => Some(Frame::Open),
        '2' => Some(Frame::Ping),
        '4' => {
            let packet = chars.next()?;
            let payload = chars.as_str();
            match packet {
                '0' => Some(Frame::Connected),
                '1' => Some(Frame::Disconnected),
                '2' => {
                    // Optional ack id precedes the JSON array
                    let json_start = payload.find('[')?;
                    let array: Vec<Value> = serde_json::from_str(&payload[json_start..]).ok()?;
                    let mut items = array.into_iter();
                    let name = items.next()?.as_str()?.to_string();
                    Some(Frame::Event {
                        name,
                        args: items.collect(),
                    })
                }
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_subscription_drop_unsubscribes() {
        let hub = RealtimeHub::new();
        let seen = Rc::new(Cell::new(0));
        let seen_clone = seen.clone();

        let sub = hub.subscribe(EventKind::PostDeleted, move |_| seen_clone.set(seen_clone.get() + 1));
        assert_eq!(hub.listener_count(EventKind::PostDeleted), 1);

        hub.emit(&RealtimeEvent::PostDeleted("p1".into()));
        drop(sub);
        hub.emit(&RealtimeEvent::PostDeleted("p2".into()));

        assert_eq!(seen.get(), 1);
        assert_eq!(hub.listener_count(EventKind::PostDeleted), 0);
    }

    #[test]
    fn test_each_screen_gets_one_delivery() {
        let hub = RealtimeHub::new();
        let a = Rc::new(RefCell::new(Vec::new()));
        let b = Rc::new(RefCell::new(Vec::new()));
        let (a2, b2) = (a.clone(), b.clone());

        let _sa = hub.subscribe(EventKind::PostDeleted, move |e| a2.borrow_mut().push(e.clone()));
        let _sb = hub.subscribe(EventKind::PostDeleted, move |e| b2.borrow_mut().push(e.clone()));
        hub.emit(&RealtimeEvent::PostDeleted("p1".into()));

        assert_eq!(a.borrow().len(), 1);
        assert_eq!(b.borrow().len(), 1);
    }

    #[test]
    fn test_handler_may_drop_its_own_subscription() {
        let hub = RealtimeHub::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let slot_clone = slot.clone();
        let sub = hub.subscribe(EventKind::PostDeleted, move |_| {
            slot_clone.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(sub);

        hub.emit(&RealtimeEvent::PostDeleted("p1".into()));
        assert_eq!(hub.listener_count(EventKind::PostDeleted), 0);
    }

    #[test]
    fn test_subscription_outliving_hub_is_harmless() {
        let hub = RealtimeHub::new();
        let sub = hub.subscribe(EventKind::PostDeleted, |_| {});
        drop(hub);
        drop(sub);
    }

    #[test]
    fn test_decode_frames() {
        assert_eq!(decode_frame(r#"0{"sid":"abc"}"#), Some(Frame::Open));
        assert_eq!(decode_frame("2"), Some(Frame::Ping));
        assert_eq!(decode_frame("40"), Some(Frame::Connected));
        assert_eq!(decode_frame(r#"40{"sid":"x"}"#), Some(Frame::Connected));
        assert_eq!(
            decode_frame(r#"42["deletePost","p1"]"#),
            Some(Frame::Event {
                name: "deletePost".to_string(),
                args: vec![Value::String("p1".to_string())],
            })
        );
        assert_eq!(
            decode_frame(r#"4217["deletePost","p1"]"#).map(|f| matches!(f, Frame::Event { .. })),
            Some(true)
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(decode_frame(""), None);
        assert_eq!(decode_frame("42not json"), None);
        assert_eq!(decode_frame("42[]"), None);
        assert_eq!(decode_frame("9"), None);
    }

    #[test]
    fn test_from_wire() {
        assert_eq!(
            RealtimeEvent::from_wire("deletePost", &[Value::String("p1".into())]),
            Some(RealtimeEvent::PostDeleted("p1".into()))
        );
        assert_eq!(RealtimeEvent::from_wire("deletePost", &[]), None);
        assert_eq!(RealtimeEvent::from_wire("newMessage", &[]), None);
    }
}
