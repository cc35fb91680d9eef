use dialog_core::{
    deep_active_element, memory::DispatchedEvent, reduce_dialog, run_dialog_effects, CloseSource,
    ConfirmFormConfig, ConfirmFormState, DialogAction, DialogDom, DialogError, DialogEvent,
    DialogState, MemoryDom, NodeId, ScopedCloseListener, SubmitOutcome,
};
use pretty_assertions::assert_eq;

struct MountedDialog {
    node: NodeId,
    state: DialogState<NodeId>,
}

impl MountedDialog {
    fn mount(dom: &MemoryDom, parent: NodeId) -> Self {
        let node = dom.create_dialog();
        dom.append_child(parent, node);
        Self {
            node,
            state: DialogState::default(),
        }
    }

    fn dispatch(
        &mut self,
        dom: &MemoryDom,
        action: DialogAction<NodeId>,
    ) -> Result<Vec<DialogEvent<NodeId>>, DialogError> {
        let effects = reduce_dialog(&mut self.state, action)?;
        Ok(run_dialog_effects(dom, &self.node, effects))
    }

    fn show(&mut self, dom: &MemoryDom) -> Vec<DialogEvent<NodeId>> {
        let active_element = deep_active_element(dom);
        self.dispatch(dom, DialogAction::Show { active_element })
            .expect("show never fails")
    }

    fn hide(&mut self, dom: &MemoryDom) -> Vec<DialogEvent<NodeId>> {
        self.dispatch(
            dom,
            DialogAction::Hide {
                source: CloseSource::Host,
            },
        )
        .expect("host hide never fails")
    }
}

fn opener(dom: &MemoryDom) -> NodeId {
    let button = dom.create_element("button");
    dom.append_child(dom.body(), button);
    dom.focus(&button);
    button
}

#[test]
fn hide_returns_focus_to_opener() {
    let dom = MemoryDom::new();
    let opener = opener(&dom);
    let mut dialog = MountedDialog::mount(&dom, dom.body());

    assert_eq!(dialog.show(&dom), vec![DialogEvent::Opened]);
    assert!(dom.is_modal_open(dialog.node));
    let inside = dom.create_element("input");
    dom.append_child(dialog.node, inside);
    dom.focus(&inside);

    assert_eq!(dialog.hide(&dom), vec![DialogEvent::Closed]);

    assert!(!dom.is_modal_open(dialog.node));
    assert_eq!(dom.focused(), Some(opener));
}

#[test]
fn focus_returns_to_opener_inside_another_shadow_root() {
    let dom = MemoryDom::new();
    let toolbar = dom.create_element("cc-toolbar");
    dom.append_child(dom.body(), toolbar);
    let toolbar_root = dom.attach_shadow(toolbar);
    let button_host = dom.create_element("cc-button");
    dom.append_child(toolbar_root, button_host);
    let button_root = dom.attach_shadow(button_host);
    let button = dom.create_element("button");
    dom.append_child(button_root, button);
    dom.focus(&button);

    let app = dom.create_element("cc-app");
    dom.append_child(dom.body(), app);
    let app_root = dom.attach_shadow(app);
    let mut dialog = MountedDialog::mount(&dom, app_root);

    dialog.show(&dom);
    assert_eq!(dialog.state.restore_target, Some(button));
    dialog.hide(&dom);

    assert_eq!(dom.focused(), Some(button));
}

#[test]
fn removed_opener_raises_restoration_failure_with_the_node() {
    let dom = MemoryDom::new();
    let opener = opener(&dom);
    let mut dialog = MountedDialog::mount(&dom, dom.body());
    dialog.show(&dom);

    dom.remove(opener);
    let emitted = dialog.hide(&dom);

    assert_eq!(
        emitted,
        vec![
            DialogEvent::Closed,
            DialogEvent::FocusRestorationFailed { node: opener },
        ]
    );
    let failure = dom
        .events()
        .into_iter()
        .find(|dispatched| dispatched.event.event_name() == "cc-dialog-focus-restoration-fail")
        .expect("failure event dispatched");
    assert_eq!(
        failure,
        DispatchedEvent {
            origin: dialog.node,
            event: DialogEvent::FocusRestorationFailed { node: opener },
        }
    );
    assert_eq!(failure.event.detail(), Some(&opener));
}

#[test]
fn hide_twice_emits_a_single_close() {
    let dom = MemoryDom::new();
    opener(&dom);
    let mut dialog = MountedDialog::mount(&dom, dom.body());
    dialog.show(&dom);
    dom.take_events();

    dialog.hide(&dom);
    assert!(dialog.hide(&dom).is_empty());

    let closes = dom
        .events()
        .iter()
        .filter(|dispatched| dispatched.event == DialogEvent::Closed)
        .count();
    assert_eq!(closes, 1);
}

#[test]
fn every_reopen_captures_a_fresh_target() {
    let dom = MemoryDom::new();
    let first = opener(&dom);
    let mut dialog = MountedDialog::mount(&dom, dom.body());
    dialog.show(&dom);
    dialog.hide(&dom);

    let second = dom.create_element("a");
    dom.append_child(dom.body(), second);
    dom.focus(&second);
    dialog.show(&dom);
    dialog.hide(&dom);

    assert_ne!(first, second);
    assert_eq!(dom.focused(), Some(second));
}

#[test]
fn waiting_dialog_ignores_user_closes_until_host_forces_close() {
    let dom = MemoryDom::new();
    let opener = opener(&dom);
    let mut dialog = MountedDialog::mount(&dom, dom.body());
    dialog.show(&dom);
    dialog
        .dispatch(&dom, DialogAction::SetWaiting { waiting: true })
        .expect("set waiting");

    let refused = dialog.dispatch(
        &dom,
        DialogAction::Hide {
            source: CloseSource::Escape,
        },
    );
    assert!(matches!(
        refused,
        Err(DialogError::CloseRefusedWhileWaiting { .. })
    ));
    assert!(dom.is_modal_open(dialog.node));

    dialog.hide(&dom);
    assert!(!dom.is_modal_open(dialog.node));
    assert_eq!(dom.focused(), Some(opener));
}

#[test]
fn removing_an_open_dialog_still_restores_focus() {
    let dom = MemoryDom::new();
    let opener = opener(&dom);
    let mut dialog = MountedDialog::mount(&dom, dom.body());
    dialog.show(&dom);
    dom.take_events();

    dom.remove(dialog.node);
    let emitted = dialog
        .dispatch(&dom, DialogAction::Disconnect)
        .expect("disconnect");

    assert!(emitted.is_empty());
    assert!(dom.events().is_empty());
    assert_eq!(dom.focused(), Some(opener));
    assert!(!dialog.state.is_open());
}

struct MountedForm {
    listener: ScopedCloseListener<NodeId>,
    state: ConfirmFormState,
}

impl MountedForm {
    fn mount(dom: &MemoryDom, dialog: NodeId) -> Self {
        let host = dom.create_element("cc-dialog-confirm-form");
        dom.append_child(dialog, host);
        let root = dom.attach_shadow(host);
        let form = dom.create_element("form");
        dom.append_child(root, form);
        Self {
            listener: ScopedCloseListener::resolve(dom, &form),
            state: ConfirmFormState::default(),
        }
    }

    fn deliver(&mut self, events: &[DispatchedEvent]) {
        for dispatched in events {
            self.state
                .handle_dialog_event(&self.listener, &dispatched.origin, &dispatched.event);
        }
    }
}

#[test]
fn confirm_fires_only_for_exact_text() {
    let config = ConfirmFormConfig::new("delete-me", "Delete");
    let mut state = ConfirmFormState::default();

    state.set_value("delete-me", &config);
    assert_eq!(state.submit(&config), SubmitOutcome::Confirmed);

    state.set_value("Delete-Me", &config);
    assert!(matches!(state.submit(&config), SubmitOutcome::Invalid(_)));
    assert!(state.error_message(&config).is_some());
}

#[test]
fn closing_governing_dialog_resets_its_form() {
    let dom = MemoryDom::new();
    let mut dialog = MountedDialog::mount(&dom, dom.body());
    let mut form = MountedForm::mount(&dom, dialog.node);
    let config = ConfirmFormConfig::new("delete-me", "Delete");
    dialog.show(&dom);
    form.state.set_value("delete", &config);
    form.state.submit(&config);

    dialog.hide(&dom);
    form.deliver(&dom.take_events());

    assert_eq!(form.state, ConfirmFormState::default());
}

#[test]
fn closing_one_dialog_leaves_a_sibling_dialog_form_untouched() {
    let dom = MemoryDom::new();
    let config = ConfirmFormConfig::new("delete-me", "Delete");
    let mut first = MountedDialog::mount(&dom, dom.body());
    let mut second = MountedDialog::mount(&dom, dom.body());
    let mut first_form = MountedForm::mount(&dom, first.node);
    let mut second_form = MountedForm::mount(&dom, second.node);
    first.show(&dom);
    second.show(&dom);
    first_form.state.set_value("some text", &config);
    second_form.state.set_value("some text", &config);
    dom.take_events();

    second.hide(&dom);
    let events = dom.take_events();
    first_form.deliver(&events);
    second_form.deliver(&events);

    assert_eq!(first_form.state.value(), "some text");
    assert_eq!(second_form.state.value(), "");
    assert!(dom.is_modal_open(first.node));
}

#[test]
fn nested_dialog_close_does_not_reset_outer_form() {
    let dom = MemoryDom::new();
    let config = ConfirmFormConfig::new("delete-me", "Delete");
    let mut outer = MountedDialog::mount(&dom, dom.body());
    let mut outer_form = MountedForm::mount(&dom, outer.node);
    let mut inner = MountedDialog::mount(&dom, outer.node);
    let mut inner_form = MountedForm::mount(&dom, inner.node);
    outer.show(&dom);
    inner.show(&dom);
    outer_form.state.set_value("outer", &config);
    inner_form.state.set_value("inner", &config);

    inner.hide(&dom);
    let events = dom.take_events();
    outer_form.deliver(&events);
    inner_form.deliver(&events);

    assert_eq!(outer_form.state.value(), "outer");
    assert_eq!(inner_form.state.value(), "");
    assert_eq!(dom.top_modal(), Some(outer.node));
}
