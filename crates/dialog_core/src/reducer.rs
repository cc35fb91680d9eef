//! Reducer actions, side-effect intents, and transition logic for a dialog instance.

use thiserror::Error;

use crate::model::{CloseSource, DialogEvent, DialogPhase, DialogState};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Actions accepted by [`reduce_dialog`].
pub enum DialogAction<N> {
    /// Open the dialog (host set `open` or called `show()`).
    Show {
        /// Deepest focused element at the time of the request, captured as the restoration
        /// target.
        active_element: Option<N>,
    },
    /// Close the dialog.
    Hide {
        /// What asked for the close.
        source: CloseSource,
    },
    /// Mark a host submission as started or finished.
    SetWaiting {
        /// Whether a submission is in flight.
        waiting: bool,
    },
    /// The dialog element was removed from the tree.
    Disconnect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_dialog`], executed in order by the host.
pub enum DialogEffect<N> {
    /// Present the dialog modally.
    ShowModal,
    /// Remove the modal presentation.
    HideModal,
    /// Dispatch an event from the dialog element.
    Emit(DialogEvent<N>),
    /// Return focus to the captured element, or report failure if it is gone.
    RestoreFocus(N),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
/// Refused transitions. Callers treat these as no-ops; they never reach the host page.
pub enum DialogError {
    /// A user or nested-component close was requested while a submission is in flight.
    #[error("dialog close via `{}` refused while waiting", .close_source.token())]
    CloseRefusedWhileWaiting {
        /// Source of the refused close.
        close_source: CloseSource,
    },
}

/// Applies a [`DialogAction`] to a dialog's state and collects the resulting effects.
///
/// This is the only place open/close transitions happen, so a batch of property changes can
/// never produce a missed or duplicated transition: every action is checked against the current
/// phase. Opening an open dialog and closing a closed dialog are no-ops.
///
/// # Errors
///
/// Returns [`DialogError::CloseRefusedWhileWaiting`] when a close whose source does not
/// [override waiting](CloseSource::overrides_waiting) arrives while
/// `waiting` is set. The state is left untouched.
pub fn reduce_dialog<N>(
    state: &mut DialogState<N>,
    action: DialogAction<N>,
) -> Result<Vec<DialogEffect<N>>, DialogError> {
    let mut effects = Vec::new();
    match action {
        DialogAction::Show { active_element } => {
            if state.is_open() {
                return Ok(effects);
            }
            state.phase = DialogPhase::Open;
            state.restore_target = active_element;
            effects.push(DialogEffect::ShowModal);
            effects.push(DialogEffect::Emit(DialogEvent::Opened));
        }
        DialogAction::Hide { source } => {
            if !state.is_open() {
                return Ok(effects);
            }
            if state.waiting && !source.overrides_waiting() {
                return Err(DialogError::CloseRefusedWhileWaiting {
                    close_source: source,
                });
            }
            state.phase = DialogPhase::Closed;
            effects.push(DialogEffect::HideModal);
            effects.push(DialogEffect::Emit(DialogEvent::Closed));
            if let Some(target) = state.restore_target.take() {
                effects.push(DialogEffect::RestoreFocus(target));
            }
        }
        DialogAction::SetWaiting { waiting } => {
            state.waiting = waiting;
        }
        DialogAction::Disconnect => {
            if !state.is_open() {
                return Ok(effects);
            }
            state.phase = DialogPhase::Closed;
            if let Some(target) = state.restore_target.take() {
                effects.push(DialogEffect::RestoreFocus(target));
            }
        }
    }
    Ok(effects)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn opened(target: Option<u32>) -> DialogState<u32> {
        let mut state = DialogState::default();
        reduce_dialog(
            &mut state,
            DialogAction::Show {
                active_element: target,
            },
        )
        .expect("open dialog");
        state
    }

    #[test]
    fn show_captures_target_and_presents_modally() {
        let mut state = DialogState::<u32>::default();

        let effects = reduce_dialog(
            &mut state,
            DialogAction::Show {
                active_element: Some(4),
            },
        )
        .expect("open dialog");

        assert_eq!(
            effects,
            vec![
                DialogEffect::ShowModal,
                DialogEffect::Emit(DialogEvent::Opened)
            ]
        );
        assert!(state.is_open());
        assert_eq!(state.restore_target, Some(4));
    }

    #[test]
    fn show_while_open_keeps_original_target() {
        let mut state = opened(Some(4));

        let effects = reduce_dialog(
            &mut state,
            DialogAction::Show {
                active_element: Some(9),
            },
        )
        .expect("reopen");

        assert!(effects.is_empty());
        assert_eq!(state.restore_target, Some(4));
    }

    #[test]
    fn hide_consumes_target_and_restores_focus_last() {
        let mut state = opened(Some(4));

        let effects = reduce_dialog(
            &mut state,
            DialogAction::Hide {
                source: CloseSource::CloseButton,
            },
        )
        .expect("close dialog");

        assert_eq!(
            effects,
            vec![
                DialogEffect::HideModal,
                DialogEffect::Emit(DialogEvent::Closed),
                DialogEffect::RestoreFocus(4),
            ]
        );
        assert_eq!(state, DialogState::default());
    }

    #[test]
    fn hide_without_captured_target_skips_restoration() {
        let mut state = opened(None);

        let effects = reduce_dialog(
            &mut state,
            DialogAction::Hide {
                source: CloseSource::Host,
            },
        )
        .expect("close dialog");

        assert_eq!(
            effects,
            vec![
                DialogEffect::HideModal,
                DialogEffect::Emit(DialogEvent::Closed)
            ]
        );
    }

    #[test]
    fn hide_on_closed_dialog_is_noop() {
        let mut state = DialogState::<u32>::default();
        for source in [CloseSource::Host, CloseSource::Escape] {
            let effects =
                reduce_dialog(&mut state, DialogAction::Hide { source }).expect("noop close");
            assert!(effects.is_empty());
        }
        assert!(!state.is_open());
    }

    #[test]
    fn waiting_refuses_user_closes_but_not_host_close() {
        let mut state = opened(Some(4));
        reduce_dialog(&mut state, DialogAction::SetWaiting { waiting: true }).expect("wait");

        for source in [
            CloseSource::CloseButton,
            CloseSource::Escape,
            CloseSource::CloseRequest,
        ] {
            let err = reduce_dialog(&mut state, DialogAction::Hide { source })
                .expect_err("close refused while waiting");
            assert_eq!(
                err,
                DialogError::CloseRefusedWhileWaiting {
                    close_source: source
                }
            );
            assert!(state.is_open());
            assert_eq!(state.restore_target, Some(4));
        }

        let effects = reduce_dialog(
            &mut state,
            DialogAction::Hide {
                source: CloseSource::Host,
            },
        )
        .expect("host force close");
        assert!(effects.contains(&DialogEffect::RestoreFocus(4)));
        assert!(!state.is_open());
        assert!(state.waiting);
    }

    #[test]
    fn browser_close_while_waiting_still_restores_focus() {
        let mut state = opened(Some(4));
        reduce_dialog(&mut state, DialogAction::SetWaiting { waiting: true }).expect("wait");

        let effects = reduce_dialog(
            &mut state,
            DialogAction::Hide {
                source: CloseSource::Browser,
            },
        )
        .expect("browser close");

        assert_eq!(
            effects,
            vec![
                DialogEffect::HideModal,
                DialogEffect::Emit(DialogEvent::Closed),
                DialogEffect::RestoreFocus(4),
            ]
        );
        assert!(!state.is_open());
    }

    #[test]
    fn refused_close_error_names_the_source() {
        let err = DialogError::CloseRefusedWhileWaiting {
            close_source: CloseSource::Escape,
        };
        assert_eq!(
            err.to_string(),
            "dialog close via `escape` refused while waiting"
        );
    }

    #[test]
    fn disconnect_while_open_only_restores_focus() {
        let mut state = opened(Some(4));

        let effects = reduce_dialog(&mut state, DialogAction::Disconnect).expect("disconnect");

        assert_eq!(effects, vec![DialogEffect::RestoreFocus(4)]);
        assert!(!state.is_open());
        assert_eq!(state.restore_target, None);
    }

    #[test]
    fn disconnect_while_closed_is_noop() {
        let mut state = DialogState::<u32>::default();
        let effects = reduce_dialog(&mut state, DialogAction::Disconnect).expect("disconnect");
        assert!(effects.is_empty());
    }
}
