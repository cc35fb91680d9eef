//! Modal dialog component, its handle and context, and the nested confirm components.
//!
//! [`Dialog`] keeps one `dialog_core` state machine per instance. Every transition, whether it
//! comes from the host through [`DialogHandle`], from the close control, from the cancellation
//! key, or from a nested [`DialogConfirmActions`], goes through `reduce_dialog`, and the
//! resulting effects run against [`WebDom`].

use std::{
    cell::RefCell,
    rc::Rc,
    sync::atomic::{AtomicUsize, Ordering},
};

use dialog_core::{
    deep_active_element, reduce_dialog, run_dialog_effects, CloseSource, DialogAction,
    DialogConfig, DialogEvent, DialogPhase, DialogState, DialogStyle,
};
use leptos::ev::{KeyboardEvent, MouseEvent};
use leptos::*;
use wasm_bindgen::JsCast;

use crate::{
    dom::{EventListenerGuard, WebDom},
    primitives::{bool_token, merge_layout_class, Button, ButtonSize, ButtonVariant},
};

mod confirm_actions;
mod confirm_form;

pub use confirm_actions::DialogConfirmActions;
pub use confirm_form::{ConfirmFormHandle, DialogConfirmForm};

static NEXT_ELEMENT_ID: AtomicUsize = AtomicUsize::new(1);

fn next_element_id(prefix: &str) -> String {
    format!("{prefix}-{}", NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed))
}

#[derive(Debug, Clone, Copy)]
/// Host-side handle owning a dialog's `open` property.
///
/// Setting `open` (or calling [`show`](Self::show)/[`hide`](Self::hide)) is the host-driven path
/// and may close the dialog even while it is waiting. The dialog writes `false` back when it
/// closes itself.
pub struct DialogHandle {
    open: RwSignal<bool>,
}

impl Default for DialogHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogHandle {
    /// Creates a closed dialog handle in the current reactive owner.
    pub fn new() -> Self {
        Self {
            open: create_rw_signal(false),
        }
    }

    /// Opens the dialog.
    pub fn show(&self) {
        self.open.set(true);
    }

    /// Closes the dialog. Closing a closed dialog does nothing.
    pub fn hide(&self) {
        self.open.set(false);
    }

    /// Sets the `open` property.
    pub fn set_open(&self, open: bool) {
        self.open.set(open);
    }

    /// Returns the `open` property, tracking it when read in a reactive scope.
    pub fn is_open(&self) -> bool {
        self.open.get()
    }
}

#[derive(Clone, Copy)]
/// Context provided by [`Dialog`] to the components it governs.
pub struct DialogContext {
    request_close: Callback<CloseSource>,
    waiting: Signal<bool>,
}

impl DialogContext {
    /// Asks the governing dialog to close. Refused while the dialog is waiting.
    pub fn request_close(&self, source: CloseSource) {
        self.request_close.call(source);
    }

    /// Returns whether the governing dialog is waiting on a host submission.
    pub fn waiting(&self) -> bool {
        self.waiting.get()
    }
}

/// Returns the nearest governing [`DialogContext`], if rendered inside a [`Dialog`].
pub fn use_dialog() -> Option<DialogContext> {
    use_context::<DialogContext>()
}

struct DialogController {
    state: RefCell<DialogState<web_sys::Element>>,
    element: RefCell<Option<web_sys::Element>>,
    listeners: RefCell<Vec<EventListenerGuard>>,
    handle: DialogHandle,
    on_open: Option<Callback<()>>,
    on_close: Option<Callback<()>>,
    on_focus_restoration_fail: Option<Callback<web_sys::Element>>,
}

impl DialogController {
    fn mount(&self, element: web_sys::Element) {
        *self.element.borrow_mut() = Some(element);
    }

    fn is_open(&self) -> bool {
        self.state.borrow().is_open()
    }

    /// Runs one transition and its effects. No state borrow is held while effects run, so
    /// callbacks and DOM listeners may dispatch again.
    fn apply(&self, action: DialogAction<web_sys::Element>) -> Vec<DialogEvent<web_sys::Element>> {
        let effects = match reduce_dialog(&mut self.state.borrow_mut(), action) {
            Ok(effects) => effects,
            Err(err) => {
                logging::debug_warn!("{err}");
                return Vec::new();
            }
        };
        if effects.is_empty() {
            return Vec::new();
        }
        let Some(element) = self.element.borrow().clone() else {
            logging::warn!("dialog effects dropped before the dialog element mounted");
            return Vec::new();
        };
        run_dialog_effects(&WebDom, &element, effects)
    }

    fn dispatch(&self, action: DialogAction<web_sys::Element>) {
        for event in self.apply(action) {
            match event {
                DialogEvent::Opened => {
                    if let Some(on_open) = self.on_open.as_ref() {
                        on_open.call(());
                    }
                }
                DialogEvent::Closed => {
                    if let Some(on_close) = self.on_close.as_ref() {
                        on_close.call(());
                    }
                }
                DialogEvent::FocusRestorationFailed { node } => {
                    if let Some(on_fail) = self.on_focus_restoration_fail.as_ref() {
                        on_fail.call(node);
                    }
                }
                DialogEvent::CloseRequest | DialogEvent::Confirm => {}
            }
        }
    }

    fn sync_open(&self, open: bool) {
        let action = if open {
            DialogAction::Show {
                active_element: deep_active_element(&WebDom),
            }
        } else {
            DialogAction::Hide {
                source: CloseSource::Host,
            }
        };
        self.dispatch(action);
    }

    fn request_close(&self, source: CloseSource) {
        self.dispatch(DialogAction::Hide { source });
        if !self.is_open() && self.handle.open.get_untracked() {
            self.handle.open.set(false);
        }
    }

    /// Best-effort focus restoration when the dialog leaves the tree while open. Callbacks are
    /// not invoked: the owning view is being torn down.
    fn disconnect(&self) {
        for event in self.apply(DialogAction::Disconnect) {
            if let DialogEvent::FocusRestorationFailed { node } = event {
                logging::warn!(
                    "dialog removed while open; focus target <{}> is disconnected",
                    node.tag_name().to_lowercase()
                );
            }
        }
    }
}

/// Resolves the display props of a [`Dialog`], falling back to `config` for any prop the host
/// did not pass.
fn seed_dialog_props(
    config: DialogConfig,
    heading: Option<MaybeSignal<String>>,
    content_body: Option<MaybeSignal<String>>,
    waiting: Option<MaybeSignal<bool>>,
) -> (MaybeSignal<String>, Option<MaybeSignal<String>>, MaybeSignal<bool>) {
    (
        heading.unwrap_or(MaybeSignal::Static(config.heading)),
        content_body.or_else(|| config.content_body.map(MaybeSignal::Static)),
        waiting.unwrap_or(MaybeSignal::Static(config.waiting)),
    )
}

#[component]
/// Modal dialog with focus capture on open and focus restoration on close.
///
/// Opening records the deepest focused element (piercing shadow roots) and presents the
/// `<dialog>` modally. Closing hides it, dispatches `cc-dialog-close`, and returns focus to the
/// recorded element; when that element was removed meanwhile, `cc-dialog-focus-restoration-fail`
/// is dispatched with it as detail and `on_focus_restoration_fail` is called instead.
///
/// While `waiting` is true the close control, the cancellation key, and close requests from
/// nested components are refused; only the host can close through `handle`. A close the browser
/// performs on the element itself is always synced.
///
/// `config` seeds plain-data attributes: `open` opens the dialog on mount, and `heading`,
/// `content_body` and `waiting` apply where the matching prop is not passed.
pub fn Dialog(
    handle: DialogHandle,
    #[prop(optional)] config: Option<DialogConfig>,
    #[prop(optional, into)] heading: Option<MaybeSignal<String>>,
    #[prop(optional, into)] content_body: Option<MaybeSignal<String>>,
    #[prop(optional, into)] waiting: Option<MaybeSignal<bool>>,
    #[prop(optional, into)] close_label: Option<String>,
    #[prop(optional)] style: Option<DialogStyle>,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional)] on_open: Option<Callback<()>>,
    #[prop(optional)] on_close: Option<Callback<()>>,
    #[prop(optional)] on_focus_restoration_fail: Option<Callback<web_sys::Element>>,
    children: Children,
) -> impl IntoView {
    let config = config.unwrap_or_default();
    if config.open {
        handle.show();
    }
    let (heading, content_body, waiting) =
        seed_dialog_props(config, heading, content_body, waiting);
    let dialog_ref = create_node_ref::<html::Dialog>();
    let heading_id = next_element_id("cc-dialog-heading");
    let close_label = close_label.unwrap_or_else(|| "Close".to_string());
    let controller = Rc::new(DialogController {
        state: RefCell::new(DialogState::default()),
        element: RefCell::new(None),
        listeners: RefCell::new(Vec::new()),
        handle,
        on_open,
        on_close,
        on_focus_restoration_fail,
    });

    {
        let controller = Rc::clone(&controller);
        create_effect(move |_| {
            let waiting = waiting.get();
            controller.dispatch(DialogAction::SetWaiting { waiting });
        });
    }

    {
        let controller = Rc::clone(&controller);
        create_effect(move |_| {
            let open = handle.open.get();
            let Some(dialog) = dialog_ref.get() else {
                return;
            };
            // Host callbacks run inside; their reads must not subscribe this effect.
            untrack(|| {
                controller.mount(dialog.unchecked_ref::<web_sys::Element>().clone());
                controller.sync_open(open);
            });
        });
    }

    {
        let controller = Rc::clone(&controller);
        dialog_ref.on_load(move |dialog| {
            let cancel_controller = Rc::clone(&controller);
            let cancel = EventListenerGuard::listen(
                dialog.unchecked_ref::<web_sys::EventTarget>(),
                "cancel",
                move |ev| {
                    ev.prevent_default();
                    cancel_controller.request_close(CloseSource::Escape);
                },
            );
            // `close` also follows our own `close()` calls; by then the state is already closed
            // and the hide is a no-op. A dialog that is open again was reopened meanwhile.
            let close_controller = Rc::clone(&controller);
            let native: web_sys::HtmlDialogElement = (*dialog).clone();
            let close = EventListenerGuard::listen(
                dialog.unchecked_ref::<web_sys::EventTarget>(),
                "close",
                move |_| {
                    if !native.open() {
                        close_controller.request_close(CloseSource::Browser);
                    }
                },
            );
            controller.listeners.borrow_mut().extend(cancel.into_iter().chain(close));
        });
    }

    {
        let controller = Rc::clone(&controller);
        on_cleanup(move || {
            if controller.is_open() {
                controller.disconnect();
            }
            controller.listeners.borrow_mut().clear();
        });
    }

    let request_close = {
        let controller = Rc::clone(&controller);
        Callback::new(move |source: CloseSource| controller.request_close(source))
    };
    provide_context(DialogContext {
        request_close,
        waiting: Signal::derive(move || waiting.get()),
    });

    let on_keydown = {
        let controller = Rc::clone(&controller);
        move |ev: KeyboardEvent| {
            if ev.key() == "Escape" {
                ev.prevent_default();
                ev.stop_propagation();
                controller.request_close(CloseSource::Escape);
            }
        }
    };
    let close_click = {
        let controller = Rc::clone(&controller);
        Callback::new(move |_: MouseEvent| controller.request_close(CloseSource::CloseButton))
    };

    view! {
        <dialog
            node_ref=dialog_ref
            class=merge_layout_class("ui-dialog", layout_class)
            style=style.and_then(|style| style.to_style())
            aria-labelledby=heading_id.clone()
            aria-busy=move || bool_token(waiting.get())
            data-ui-primitive="true"
            data-ui-kind="dialog"
            data-ui-state=move || {
                if handle.open.get() {
                    DialogPhase::Open.token()
                } else {
                    DialogPhase::Closed.token()
                }
            }
            on:keydown=on_keydown
        >
            <header data-ui-slot="header">
                <h2 id=heading_id data-ui-slot="heading">
                    {move || heading.get()}
                </h2>
                <Button
                    variant=ButtonVariant::Quiet
                    size=ButtonSize::Sm
                    ui_slot="close"
                    aria_label=close_label.clone()
                    title=close_label
                    disabled=waiting
                    on_click=close_click
                >
                    <span aria-hidden="true">"\u{00d7}"</span>
                </Button>
            </header>
            {content_body.map(|body| view! { <p data-ui-slot="body">{move || body.get()}</p> })}
            <div data-ui-slot="content">{children()}</div>
        </dialog>
    }
}
