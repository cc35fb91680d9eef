use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use dialog_core::{
    ConfirmFormConfig, ConfirmFormState, DialogEvent, ScopedCloseListener, SubmitIntent,
    SubmitOutcome,
};
use leptos::ev::SubmitEvent;
use leptos::*;
use wasm_bindgen::JsCast;

use super::{next_element_id, DialogConfirmActions};
use crate::{
    dom::{dispatch_dialog_event, event_origin, EventListenerGuard, WebDom},
    primitives::{merge_layout_class, TextField},
};

#[derive(Debug, Clone, Copy)]
/// Host-side handle to a confirm form's typed value.
pub struct ConfirmFormHandle {
    state: RwSignal<ConfirmFormState>,
}

impl Default for ConfirmFormHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmFormHandle {
    /// Creates an empty form state in the current reactive owner.
    pub fn new() -> Self {
        Self {
            state: create_rw_signal(ConfirmFormState::default()),
        }
    }

    /// Clears the typed value and any validation error.
    pub fn reset_form(&self) {
        self.state.update(ConfirmFormState::reset_form);
    }

    /// Returns the typed value.
    pub fn value(&self) -> String {
        self.state.with(|state| state.value().to_string())
    }

    /// Returns the form state signal.
    pub fn state(&self) -> RwSignal<ConfirmFormState> {
        self.state
    }
}

/// Resets `state` when `event` is a close of the listener's governing dialog.
///
/// Unrelated closes leave the signal untouched so subscribers are not notified.
fn reset_on_governing_close<N: PartialEq>(
    state: RwSignal<ConfirmFormState>,
    listener: &ScopedCloseListener<N>,
    origin: &N,
    event: &DialogEvent<N>,
) -> bool {
    if !listener.accepts(origin, event) {
        return false;
    }
    state.update(ConfirmFormState::reset_form);
    true
}

/// Window listener bound once the form's governing dialog is known.
#[derive(Default)]
struct CloseBinding {
    disposed: Cell<bool>,
    guard: RefCell<Option<EventListenerGuard>>,
}

#[component]
/// Type-to-confirm form for destructive actions.
///
/// Confirm is raised (`cc-dialog-confirm` plus `on_confirm`) only when the typed value equals
/// `confirm_text_to_input` exactly. A failed submission shows an inline error and moves focus to
/// the input; afterwards every edit re-validates. Submissions while `waiting` are ignored.
///
/// The form resets when its governing dialog closes. That dialog is resolved once after mount by
/// walking composed ancestors, so closes of sibling or nested dialogs are ignored. A form
/// rendered outside any dialog never resets on its own; use [`ConfirmFormHandle::reset_form`].
///
/// `autofocus_input` sets the native `autofocus` attribute, which the browser only honors when
/// the dialog is shown. A form mounted into a dialog that is already open is focused once
/// explicitly instead.
pub fn DialogConfirmForm(
    #[prop(into)] confirm_text_to_input: MaybeSignal<String>,
    #[prop(into)] submit_label: MaybeSignal<String>,
    #[prop(optional, into)] confirm_input_label: MaybeSignal<String>,
    #[prop(optional, into)] confirm_error_message: Option<MaybeSignal<String>>,
    #[prop(optional)] autofocus_input: bool,
    #[prop(optional, into)] waiting: MaybeSignal<bool>,
    #[prop(optional, into)] cancel_label: Option<MaybeSignal<String>>,
    #[prop(default = SubmitIntent::Danger)] submit_intent: SubmitIntent,
    #[prop(optional)] handle: Option<ConfirmFormHandle>,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional)] on_close_request: Option<Callback<()>>,
    #[prop(optional)] on_confirm: Option<Callback<()>>,
) -> impl IntoView {
    let form_ref = create_node_ref::<html::Form>();
    let input_ref = create_node_ref::<html::Input>();
    let input_id = next_element_id("cc-dialog-confirm-input");
    let error_id = next_element_id("cc-dialog-confirm-error");
    let state = handle.unwrap_or_default().state();
    let config = create_memo(move |_| ConfirmFormConfig {
        confirm_text_to_input: confirm_text_to_input.get(),
        confirm_input_label: confirm_input_label.get(),
        confirm_error_message: confirm_error_message.as_ref().map(|message| message.get()),
        autofocus_input,
        waiting: waiting.get(),
        submit_label: submit_label.get(),
        cancel_label: cancel_label.as_ref().map(|label| label.get()),
        submit_intent,
    });

    let focus_input = move || {
        if let Some(input) = input_ref.get_untracked() {
            if let Err(err) = input.focus() {
                logging::warn!("confirm input rejected focus: {err:?}");
            }
        }
    };

    let binding = Rc::new(CloseBinding::default());
    {
        let binding = Rc::clone(&binding);
        form_ref.on_load(move |form| {
            let form = form.unchecked_ref::<web_sys::Element>().clone();
            // Ancestors are only reachable once the view is attached.
            request_animation_frame(move || {
                if binding.disposed.get() {
                    return;
                }
                let listener = ScopedCloseListener::resolve(&WebDom, &form);
                let Some(dialog) = listener.governing() else {
                    logging::warn!(
                        "confirm form is not inside a dialog; it will not reset on close"
                    );
                    return;
                };
                if autofocus_input && dialog.has_attribute("open") {
                    focus_input();
                }
                let Some(window) = web_sys::window() else {
                    return;
                };
                let closed = DialogEvent::<web_sys::Element>::Closed;
                *binding.guard.borrow_mut() =
                    EventListenerGuard::listen(window.unchecked_ref(), closed.event_name(), move |ev| {
                        let Some(origin) = event_origin(&ev) else {
                            return;
                        };
                        reset_on_governing_close(state, &listener, &origin, &closed);
                    });
            });
        });
    }
    on_cleanup(move || {
        binding.disposed.set(true);
        binding.guard.borrow_mut().take();
    });

    let on_input = Callback::new(move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        config.with_untracked(|config| state.update(|state| state.set_value(value, config)));
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let mut outcome = SubmitOutcome::Ignored;
        config.with_untracked(|config| state.update(|state| outcome = state.submit(config)));
        match outcome {
            SubmitOutcome::Confirmed => {
                if let Some(form) = form_ref.get_untracked() {
                    dispatch_dialog_event(form.unchecked_ref(), &DialogEvent::Confirm);
                }
                if let Some(on_confirm) = on_confirm.as_ref() {
                    on_confirm.call(());
                }
            }
            SubmitOutcome::Invalid(_) => focus_input(),
            SubmitOutcome::Ignored => {}
        }
    };

    let close_request = Callback::new(move |()| {
        if let Some(on_close_request) = on_close_request.as_ref() {
            on_close_request.call(());
        }
    });
    let error_message = move || state.with(|state| config.with(|config| state.error_message(config)));
    let invalid = Signal::derive(move || state.with(|state| state.error().is_some()));

    view! {
        <form
            node_ref=form_ref
            class=merge_layout_class("ui-dialog-confirm-form", layout_class)
            novalidate=true
            data-ui-primitive="true"
            data-ui-kind="dialog-confirm-form"
            on:submit=on_submit
        >
            <label for=input_id.clone() data-ui-slot="label">
                {move || config.with(|config| config.confirm_input_label.clone())}
            </label>
            <TextField
                id=input_id
                name="confirm"
                ui_slot="confirm-input"
                node_ref=input_ref
                autofocus=autofocus_input
                aria_describedby=error_id.clone()
                value=Signal::derive(move || state.with(|state| state.value().to_string()))
                invalid=invalid
                on_input=on_input
            />
            <p id=error_id data-ui-slot="error" role="alert" hidden=move || !invalid.get()>
                {move || error_message().unwrap_or_default()}
            </p>
            <DialogConfirmActions
                form_submit=true
                submit_label=Signal::derive(move || config.with(|config| config.submit_label.clone()))
                cancel_label=Signal::derive(move || {
                    config.with(|config| config.actions_config().cancel_label().to_string())
                })
                submit_intent=submit_intent
                waiting=Signal::derive(move || config.with(|config| config.waiting))
                on_close_request=close_request
            />
        </form>
    }
}
