//! Close-notification filtering scoped to a component's governing dialog.

use crate::{
    dom::{governing_dialog, DialogDom},
    model::DialogEvent,
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Governing-dialog reference resolved once at mount and used to filter close notifications.
///
/// Close notifications bubble to page-level listeners from every dialog on the page; a nested
/// component must only react to the one raised by its own nearest ancestor dialog.
pub struct ScopedCloseListener<N> {
    governing: Option<N>,
}

impl<N> ScopedCloseListener<N> {
    /// Resolves the governing dialog of `node` by walking its composed ancestors.
    pub fn resolve<D>(dom: &D, node: &N) -> Self
    where
        D: DialogDom<Node = N> + ?Sized,
    {
        Self {
            governing: governing_dialog(dom, node),
        }
    }

    /// Creates a listener bound to a known dialog.
    pub fn for_dialog(dialog: N) -> Self {
        Self {
            governing: Some(dialog),
        }
    }

    /// Creates a listener with no governing dialog; it never accepts a notification.
    pub fn unscoped() -> Self {
        Self { governing: None }
    }

    /// Returns the resolved governing dialog.
    pub fn governing(&self) -> Option<&N> {
        self.governing.as_ref()
    }

    /// Returns whether a governing dialog was found.
    pub fn is_scoped(&self) -> bool {
        self.governing.is_some()
    }
}

impl<N: PartialEq> ScopedCloseListener<N> {
    /// Returns whether `event`, dispatched from `origin`, is a close of the governing dialog.
    pub fn accepts(&self, origin: &N, event: &DialogEvent<N>) -> bool {
        matches!(event, DialogEvent::Closed) && self.governing.as_ref() == Some(origin)
    }
}
