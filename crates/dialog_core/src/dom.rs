//! Host tree contract plus the focus and ancestor algorithms built on it.

use std::fmt::Debug;

use crate::model::DialogEvent;

/// Host services the dialog engine needs from a document tree.
///
/// Implementations must treat shadow roots as separate focus scopes: a document (or shadow root)
/// only reports the element of its own tree that contains focus, retargeted to a shadow host when
/// the focused element lives deeper.
pub trait DialogDom {
    /// Handle to an element of the tree.
    type Node: Clone + PartialEq + Debug;

    /// Returns the document-level active element.
    fn document_active_element(&self) -> Option<Self::Node>;

    /// Returns the active element of `host`'s shadow root, if it has one containing focus.
    fn shadow_active_element(&self, host: &Self::Node) -> Option<Self::Node>;

    /// Returns the parent element, or the shadow host when `node` is a shadow-root child.
    fn composed_parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Returns whether `node` is still attached to the document.
    fn is_connected(&self, node: &Self::Node) -> bool;

    /// Returns whether `node` is a dialog element managed by this library.
    fn is_dialog(&self, node: &Self::Node) -> bool;

    /// Moves focus to `node`.
    fn focus(&self, node: &Self::Node);

    /// Presents `dialog` modally.
    fn show_modal(&self, dialog: &Self::Node);

    /// Removes the modal presentation of `dialog`.
    fn close_modal(&self, dialog: &Self::Node);

    /// Dispatches `event` from `origin`, bubbling across shadow boundaries.
    fn dispatch(&self, origin: &Self::Node, event: &DialogEvent<Self::Node>);
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outcome of a focus restoration attempt.
pub enum FocusRestoration<N> {
    /// Focus was returned to the target.
    Restored,
    /// The target was no longer connected; nothing was focused.
    Failed {
        /// The disconnected target.
        node: N,
    },
}

/// Returns the element that really holds focus, descending through nested shadow roots.
///
/// The document only reports the outermost shadow host on the focus path, so this keeps asking
/// each host's shadow root for its own active element until one has none.
pub fn deep_active_element<D: DialogDom + ?Sized>(dom: &D) -> Option<D::Node> {
    let mut active = dom.document_active_element()?;
    while let Some(inner) = dom.shadow_active_element(&active) {
        if inner == active {
            break;
        }
        active = inner;
    }
    Some(active)
}

/// Iterates the composed ancestors of `node`, nearest first, crossing shadow hosts.
pub fn composed_ancestors<'a, D>(dom: &'a D, node: &D::Node) -> impl Iterator<Item = D::Node> + 'a
where
    D: DialogDom + ?Sized,
    D::Node: 'a,
{
    std::iter::successors(dom.composed_parent(node), move |current| {
        dom.composed_parent(current)
    })
}

/// Resolves the nearest ancestor dialog of `node`, piercing shadow boundaries.
pub fn governing_dialog<D: DialogDom + ?Sized>(dom: &D, node: &D::Node) -> Option<D::Node> {
    composed_ancestors(dom, node).find(|ancestor| dom.is_dialog(ancestor))
}

/// Focuses `target` when it is still connected, otherwise reports it back as failed.
pub fn restore_focus<D: DialogDom + ?Sized>(dom: &D, target: D::Node) -> FocusRestoration<D::Node> {
    if dom.is_connected(&target) {
        dom.focus(&target);
        FocusRestoration::Restored
    } else {
        FocusRestoration::Failed { node: target }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::memory::MemoryDom;

    #[test]
    fn deep_active_element_descends_nested_shadow_roots() {
        let dom = MemoryDom::new();
        let outer_host = dom.create_element("cc-toolbar");
        dom.append_child(dom.body(), outer_host);
        let outer_root = dom.attach_shadow(outer_host);
        let inner_host = dom.create_element("cc-button");
        dom.append_child(outer_root, inner_host);
        let inner_root = dom.attach_shadow(inner_host);
        let button = dom.create_element("button");
        dom.append_child(inner_root, button);

        dom.focus(&button);

        assert_eq!(dom.document_active_element(), Some(outer_host));
        assert_eq!(deep_active_element(&dom), Some(button));
    }

    #[test]
    fn deep_active_element_is_none_without_focus() {
        let dom = MemoryDom::new();
        assert_eq!(deep_active_element(&dom), None);
    }

    #[test]
    fn governing_dialog_crosses_shadow_hosts_and_picks_nearest() {
        let dom = MemoryDom::new();
        let outer = dom.create_dialog();
        dom.append_child(dom.body(), outer);
        let panel = dom.create_element("cc-panel");
        dom.append_child(outer, panel);
        let panel_root = dom.attach_shadow(panel);
        let inner = dom.create_dialog();
        dom.append_child(panel_root, inner);
        let form_host = dom.create_element("cc-dialog-confirm-form");
        dom.append_child(inner, form_host);
        let form_root = dom.attach_shadow(form_host);
        let input = dom.create_element("input");
        dom.append_child(form_root, input);

        assert_eq!(governing_dialog(&dom, &input), Some(inner));
        assert_eq!(governing_dialog(&dom, &panel), Some(outer));
        assert_eq!(governing_dialog(&dom, &outer), None);
    }

    #[test]
    fn restore_focus_reports_disconnected_target() {
        let dom = MemoryDom::new();
        let opener = dom.create_element("button");
        dom.append_child(dom.body(), opener);

        assert_eq!(restore_focus(&dom, opener), FocusRestoration::Restored);
        assert_eq!(dom.focused(), Some(opener));

        dom.remove(opener);
        assert_eq!(
            restore_focus(&dom, opener),
            FocusRestoration::Failed { node: opener }
        );
    }
}
