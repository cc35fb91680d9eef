use dialog_core::{CloseSource, ConfirmActionsConfig, ConfirmActionsIntent, SubmitIntent};
use leptos::ev::MouseEvent;
use leptos::*;
use wasm_bindgen::JsCast;

use super::use_dialog;
use crate::{
    dom::dispatch_dialog_event,
    primitives::{merge_layout_class, Button, ButtonVariant},
};

#[component]
/// Cancel/confirm action bar for dialog content.
///
/// Cancel raises `cc-dialog-close-request` and asks the governing [`super::Dialog`] to close.
/// Confirm raises `cc-dialog-confirm` and calls `on_confirm` without touching dialog state; the
/// host closes the dialog once its action completes. While `waiting`, or while the governing
/// dialog is waiting, cancel is disabled and confirm shows progress, and neither raises anything.
///
/// With `form_submit` set, confirm renders as the submit button of an enclosing `<form>` and
/// raises nothing itself: the form validates and raises its own confirm.
pub fn DialogConfirmActions(
    #[prop(into)] submit_label: MaybeSignal<String>,
    #[prop(optional, into)] cancel_label: Option<MaybeSignal<String>>,
    #[prop(default = SubmitIntent::Primary)] submit_intent: SubmitIntent,
    #[prop(optional, into)] waiting: MaybeSignal<bool>,
    #[prop(optional)] form_submit: bool,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional)] on_close_request: Option<Callback<()>>,
    #[prop(optional)] on_confirm: Option<Callback<()>>,
) -> impl IntoView {
    let root_ref = create_node_ref::<html::Div>();
    let dialog = use_dialog();
    let config = create_memo(move |_| ConfirmActionsConfig {
        cancel_label: cancel_label.as_ref().map(|label| label.get()),
        submit_label: submit_label.get(),
        submit_intent,
        waiting: waiting.get() || dialog.is_some_and(|dialog| dialog.waiting()),
    });

    let raise = move |intent: ConfirmActionsIntent| {
        if let Some(root) = root_ref.get_untracked() {
            dispatch_dialog_event(root.unchecked_ref(), &intent.event());
        }
    };

    let cancel = Callback::new(move |_: MouseEvent| {
        let Some(intent) = config.with_untracked(ConfirmActionsConfig::on_cancel) else {
            return;
        };
        raise(intent);
        if let Some(on_close_request) = on_close_request.as_ref() {
            on_close_request.call(());
        }
        if let Some(dialog) = dialog.as_ref() {
            dialog.request_close(CloseSource::CloseRequest);
        }
    });

    let submit = Callback::new(move |ev: MouseEvent| {
        let intent = config.with_untracked(ConfirmActionsConfig::on_submit);
        if form_submit {
            if intent.is_none() {
                ev.prevent_default();
            }
            return;
        }
        let Some(intent) = intent else {
            return;
        };
        raise(intent);
        if let Some(on_confirm) = on_confirm.as_ref() {
            on_confirm.call(());
        }
    });

    view! {
        <div
            node_ref=root_ref
            class=merge_layout_class("ui-dialog-confirm-actions", layout_class)
            data-ui-primitive="true"
            data-ui-kind="dialog-confirm-actions"
        >
            <Button
                ui_slot="cancel"
                variant=ButtonVariant::Standard
                disabled=Signal::derive(move || config.with(|config| config.waiting))
                on_click=cancel
            >
                {move || config.with(|config| config.cancel_label().to_string())}
            </Button>
            <Button
                ui_slot="submit"
                variant=ButtonVariant::from(submit_intent)
                button_type=if form_submit { "submit" } else { "button" }
                waiting=Signal::derive(move || config.with(|config| config.waiting))
                on_click=submit
            >
                {move || config.with(|config| config.submit_label.clone())}
            </Button>
        </div>
    }
}
