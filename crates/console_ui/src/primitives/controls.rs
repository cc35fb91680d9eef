use super::*;

#[component]
/// Shared button primitive with standardized variant, size, and waiting states.
///
/// `waiting` keeps the button focusable but marks it `aria-disabled` and swaps in a
/// [`LoadingIndicator`] ahead of the label; clicks are still delivered so callers decide what a
/// click during a pending action means.
pub fn Button(
    #[prop(default = ButtonVariant::Standard)] variant: ButtonVariant,
    #[prop(default = ButtonSize::Md)] size: ButtonSize,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional, into)] aria_label: MaybeSignal<String>,
    #[prop(optional, into)] title: MaybeSignal<String>,
    #[prop(optional)] ui_slot: Option<&'static str>,
    #[prop(default = "button")] button_type: &'static str,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional, into)] waiting: MaybeSignal<bool>,
    #[prop(optional)] on_click: Option<Callback<MouseEvent>>,
    children: Children,
) -> impl IntoView {
    let class = merge_layout_class("ui-button", layout_class);
    view! {
        <button
            type=button_type
            class=class
            id=id
            aria-label=move || aria_label.get()
            title=move || title.get()
            disabled=move || disabled.get()
            aria-disabled=move || bool_token(waiting.get())
            aria-busy=move || bool_token(waiting.get())
            data-ui-primitive="true"
            data-ui-kind="button"
            data-ui-slot=ui_slot
            data-ui-variant=variant.token()
            data-ui-size=size.token()
            data-ui-state=move || if waiting.get() { "waiting" } else { "idle" }
            data-ui-disabled=move || bool_token(disabled.get())
            on:click=move |ev| {
                if let Some(on_click) = on_click.as_ref() {
                    on_click.call(ev);
                }
            }
        >
            <Show when=move || waiting.get() fallback=|| ()>
                <LoadingIndicator ui_slot="leading" />
            </Show>
            {children()}
        </button>
    }
}

#[component]
/// Indeterminate progress indicator shown while a submission is in flight.
pub fn LoadingIndicator(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional)] ui_slot: Option<&'static str>,
) -> impl IntoView {
    view! {
        <span
            class=merge_layout_class("ui-loading-indicator", layout_class)
            role="progressbar"
            aria-hidden="true"
            data-ui-primitive="true"
            data-ui-kind="loading-indicator"
            data-ui-slot=ui_slot
        >
            <svg viewBox="0 0 24 24" aria-hidden="true">
                <circle data-ui-slot="track" cx="12" cy="12" r="9"></circle>
                <circle data-ui-slot="fill" cx="12" cy="12" r="9"></circle>
            </svg>
        </span>
    }
}

#[component]
/// Shared text input primitive.
pub fn TextField(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] id: Option<String>,
    #[prop(optional, into)] name: Option<String>,
    #[prop(optional, into)] aria_label: MaybeSignal<String>,
    #[prop(optional, into)] aria_describedby: Option<String>,
    #[prop(optional)] node_ref: NodeRef<html::Input>,
    #[prop(optional)] autofocus: bool,
    #[prop(optional)] ui_slot: Option<&'static str>,
    #[prop(optional, into)] value: MaybeSignal<String>,
    #[prop(optional, into)] disabled: MaybeSignal<bool>,
    #[prop(optional, into)] invalid: MaybeSignal<bool>,
    #[prop(optional)] on_input: Option<Callback<web_sys::Event>>,
) -> impl IntoView {
    view! {
        <input
            class=merge_layout_class("ui-field", layout_class)
            id=id
            name=name
            aria-label=move || aria_label.get()
            aria-describedby=aria_describedby
            aria-invalid=move || bool_token(invalid.get())
            node_ref=node_ref
            autofocus=autofocus
            autocomplete="off"
            spellcheck="false"
            type="text"
            prop:value=move || value.get()
            disabled=move || disabled.get()
            data-ui-primitive="true"
            data-ui-kind="text-field"
            data-ui-slot=ui_slot
            data-ui-invalid=move || bool_token(invalid.get())
            data-ui-disabled=move || bool_token(disabled.get())
            on:input=move |ev| {
                if let Some(on_input) = on_input.as_ref() {
                    on_input.call(ev);
                }
            }
        />
    }
}
