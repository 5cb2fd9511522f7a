use dioxus::prelude::*;

use crate::components::loading::{ErrorPanel, Loading};
use crate::context::use_app_context;
use crate::services::Viewer;
use crate::stores::app_state::{Action, FollowingAction, PostAction, UserAction};
use crate::stores::session::resolve_viewer;
use crate::utils::DataState;

/// Resolves the viewer before rendering `children`.
///
/// Children render inside a [`ViewerScope`], so anything below can call
/// [`use_viewer`]. The viewer is mirrored into the store's user slice.
#[component]
pub fn SessionGate(children: Element) -> Element {
    let ctx = use_app_context();
    let mut store = ctx.store;
    let mut session = use_signal(|| DataState::<Viewer>::Loading);

    use_effect(move || {
        let backend = ctx.backend.clone();
        spawn(async move {
            let state = resolve_viewer(backend.as_ref()).await;
            match state.data() {
                Some(viewer) => store.dispatch(Action::User(UserAction::SetViewer(viewer.clone()))),
                None => {
                    // Pending edits belong to whoever was signed in before
                    store.dispatch(Action::User(UserAction::ClearViewer));
                    store.dispatch(Action::Post(PostAction::ClearPending));
                    store.dispatch(Action::Following(FollowingAction::Clear));
                }
            }
            session.set(state);
        });
    });

    let state = session.read().clone();
    match state {
        DataState::Loaded(viewer) => rsx! {
            ViewerScope { viewer, {children} }
        },
        DataState::Error(message) => rsx! {
            ErrorPanel { message }
        },
        _ => rsx! {
            Loading { label: "Checking your session..." }
        },
    }
}

#[component]
fn ViewerScope(viewer: Viewer, children: Element) -> Element {
    use_context_provider(|| viewer.clone());
    rsx! { {children} }
}

/// The signed-in viewer. Only valid below a [`SessionGate`].
pub fn use_viewer() -> Viewer {
    use_context::<Viewer>()
}
