//! use_row_flag - like/save/follow state for one row
//!
//! - Like/save state is looked up once, when the row first scrolls into view
//! - Toggles wait for the server before flipping
//! - Only one request per row at a time; extra clicks are ignored
//! - Confirmed follow changes are published to the app store

use dioxus::prelude::*;

use crate::components::toast::use_toast;
use crate::context::use_app_context;
use crate::hooks::use_in_view::use_in_view;
use crate::stores::row_actions::{self, FlagCell, RowAction, ToggleOutcome};
use crate::stores::row_state::{RowFlag, ROW_VIEWPORT};

impl FlagCell for Signal<RowFlag> {
    fn update<R>(&mut self, f: impl FnOnce(&mut RowFlag) -> R) -> R {
        f(&mut self.write())
    }
}

/// Return type for the use_row_flag hook
#[derive(Clone, Copy, PartialEq)]
pub struct RowToggle {
    pub flag: Signal<RowFlag>,
    /// Id for the element whose first appearance triggers the lookup
    pub anchor_id: Signal<String>,
    pub toggle: Callback<()>,
}

/// Hook for one toggleable row flag.
///
/// `initial` decides whether a lookup happens: a [`RowFlag::lazy`] flag that
/// is still unknown fetches when the anchor element becomes visible.
pub fn use_row_flag(action: RowAction, initial: RowFlag) -> RowToggle {
    let ctx = use_app_context();
    let mut toasts = use_toast();
    let flag = use_signal(|| initial);

    let lookup_action = action.clone();
    let lookup_backend = ctx.backend.clone();
    let anchor = use_in_view(ROW_VIEWPORT, move || {
        let RowAction::Relation { relation, post_id } = lookup_action.clone() else {
            return;
        };
        let backend = lookup_backend.clone();
        let mut cell = flag;
        spawn(async move {
            if let Some(notice) = row_actions::lookup(backend.as_ref(), relation, &post_id, &mut cell).await {
                toasts.show(notice);
            }
        });
    });
    let anchor_id = use_signal(|| anchor);

    let mut store = ctx.store;
    let backend = ctx.backend.clone();
    let toggle = use_callback(move |_| {
        let action = action.clone();
        let backend = backend.clone();
        let mut cell = flag;
        spawn(async move {
            match row_actions::toggle(backend.as_ref(), &action, &mut cell).await {
                ToggleOutcome::Refused => log::debug!("Ignoring toggle for {:?}: request in flight", action),
                ToggleOutcome::Confirmed(value) => {
                    if let RowAction::Follow { user_id, post_id } = &action {
                        for published in row_actions::follow_actions(user_id, post_id, value) {
                            store.dispatch(published);
                        }
                    }
                }
                ToggleOutcome::Failed(notice) => toasts.show(notice),
            }
        });
    });

    RowToggle {
        flag,
        anchor_id,
        toggle,
    }
}
