//! Ordered executor for reducer-emitted dialog effects.

use crate::{
    dom::{restore_focus, DialogDom, FocusRestoration},
    model::DialogEvent,
    reducer::DialogEffect,
};

/// Applies `effects` for `dialog` against `dom` in order.
///
/// Returns the events that were dispatched so UI layers can forward them to callbacks. A failed
/// focus restoration is reported as [`DialogEvent::FocusRestorationFailed`] and never panics.
pub fn run_dialog_effects<D: DialogDom + ?Sized>(
    dom: &D,
    dialog: &D::Node,
    effects: Vec<DialogEffect<D::Node>>,
) -> Vec<DialogEvent<D::Node>> {
    let mut emitted = Vec::new();
    for effect in effects {
        match effect {
            DialogEffect::ShowModal => dom.show_modal(dialog),
            DialogEffect::HideModal => dom.close_modal(dialog),
            DialogEffect::Emit(event) => {
                dom.dispatch(dialog, &event);
                emitted.push(event);
            }
            DialogEffect::RestoreFocus(target) => {
                if let FocusRestoration::Failed { node } = restore_focus(dom, target) {
                    let event = DialogEvent::FocusRestorationFailed { node };
                    dom.dispatch(dialog, &event);
                    emitted.push(event);
                }
            }
        }
    }
    emitted
}
