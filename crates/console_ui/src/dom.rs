//! `web-sys` implementation of the dialog host tree plus DOM event plumbing.

use dialog_core::{DialogDom, DialogEvent};
use leptos::logging;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

const DIALOG_KIND: &str = "dialog";

#[derive(Debug, Clone, Copy, Default)]
/// Browser document implementing [`DialogDom`] over [`web_sys::Element`] handles.
///
/// Active elements are read per shadow root and composed parents step from a shadow root to its
/// host, so focus capture and governing-dialog lookup work across web-component boundaries.
pub struct WebDom;

impl DialogDom for WebDom {
    type Node = web_sys::Element;

    fn document_active_element(&self) -> Option<web_sys::Element> {
        web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.active_element())
    }

    fn shadow_active_element(&self, host: &web_sys::Element) -> Option<web_sys::Element> {
        host.shadow_root().and_then(|root| root.active_element())
    }

    fn composed_parent(&self, node: &web_sys::Element) -> Option<web_sys::Element> {
        let parent = node.parent_node()?;
        if let Some(root) = parent.dyn_ref::<web_sys::ShadowRoot>() {
            return Some(root.host());
        }
        parent.dyn_into::<web_sys::Element>().ok()
    }

    fn is_connected(&self, node: &web_sys::Element) -> bool {
        node.is_connected()
    }

    fn is_dialog(&self, node: &web_sys::Element) -> bool {
        node.get_attribute("data-ui-kind").as_deref() == Some(DIALOG_KIND)
    }

    fn focus(&self, node: &web_sys::Element) {
        let Some(element) = node.dyn_ref::<web_sys::HtmlElement>() else {
            return;
        };
        if let Err(err) = element.focus() {
            logging::warn!("focus restoration target rejected focus: {err:?}");
        }
    }

    fn show_modal(&self, dialog: &web_sys::Element) {
        let Some(dialog) = dialog.dyn_ref::<web_sys::HtmlDialogElement>() else {
            logging::warn!("dialog host is not a <dialog> element");
            return;
        };
        if dialog.open() {
            return;
        }
        if let Err(err) = dialog.show_modal() {
            logging::warn!("dialog show_modal failed: {err:?}");
        }
    }

    fn close_modal(&self, dialog: &web_sys::Element) {
        if let Some(dialog) = dialog.dyn_ref::<web_sys::HtmlDialogElement>() {
            dialog.close();
        }
    }

    fn dispatch(&self, origin: &web_sys::Element, event: &DialogEvent<web_sys::Element>) {
        dispatch_dialog_event(origin, event);
    }
}

/// Dispatches `event` from `origin` as a bubbling, composed `CustomEvent`.
///
/// The disconnected node of a focus-restoration failure travels as the event detail.
pub(crate) fn dispatch_dialog_event(
    origin: &web_sys::Element,
    event: &DialogEvent<web_sys::Element>,
) {
    let detail = event
        .detail()
        .map(|node| JsValue::from(node.clone()))
        .unwrap_or(JsValue::NULL);
    let init = web_sys::CustomEventInit::new();
    init.set_bubbles(true);
    init.set_composed(true);
    init.set_detail(&detail);

    match web_sys::CustomEvent::new_with_event_init_dict(event.event_name(), &init) {
        Ok(custom) => {
            if let Err(err) = origin.dispatch_event(&custom) {
                logging::warn!("dispatch `{}` failed: {err:?}", event.event_name());
            }
        }
        Err(err) => logging::warn!("create `{}` event failed: {err:?}", event.event_name()),
    }
}

/// Returns the original target of `event`, before shadow-boundary retargeting.
pub(crate) fn event_origin(event: &web_sys::Event) -> Option<web_sys::Element> {
    event
        .composed_path()
        .get(0)
        .dyn_into::<web_sys::Element>()
        .ok()
}

/// Event listener that is removed from its target when dropped.
pub(crate) struct EventListenerGuard {
    target: web_sys::EventTarget,
    event_name: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl EventListenerGuard {
    /// Registers `handler` for `event_name` on `target`.
    pub(crate) fn listen(
        target: &web_sys::EventTarget,
        event_name: &'static str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        if let Err(err) =
            target.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
        {
            logging::warn!("listen for `{event_name}` failed: {err:?}");
            return None;
        }
        Some(Self {
            target: target.clone(),
            event_name,
            closure,
        })
    }
}

impl Drop for EventListenerGuard {
    fn drop(&mut self) {
        let _ = self.target.remove_event_listener_with_callback(
            self.event_name,
            self.closure.as_ref().unchecked_ref(),
        );
    }
}
