//! Dialog state, close sources, emitted events, and plain-data configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Presentation phase of a dialog instance.
pub enum DialogPhase {
    /// Dialog is not presented.
    #[default]
    Closed,
    /// Dialog is presented modally.
    Open,
}

impl DialogPhase {
    /// Returns a stable string token for `data-ui-state` attributes.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Runtime state of one dialog instance.
///
/// `N` is the host node handle (a `web_sys::Element` in the browser, a
/// [`crate::NodeId`] in [`crate::MemoryDom`]). The restoration target is a relation to a host
/// node, never ownership of it: the node may be removed from the tree at any time.
pub struct DialogState<N> {
    /// Current presentation phase.
    pub phase: DialogPhase,
    /// Whether a host submission is in flight.
    pub waiting: bool,
    /// Element that held focus when the dialog opened.
    pub restore_target: Option<N>,
}

impl<N> Default for DialogState<N> {
    fn default() -> Self {
        Self {
            phase: DialogPhase::Closed,
            waiting: false,
            restore_target: None,
        }
    }
}

impl<N> DialogState<N> {
    /// Returns whether the dialog is currently presented.
    pub fn is_open(&self) -> bool {
        self.phase == DialogPhase::Open
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Origin of a close transition.
pub enum CloseSource {
    /// Host set `open` to false or called `hide()`. Allowed while waiting.
    Host,
    /// The dialog's own close control was clicked.
    CloseButton,
    /// The cancellation key was pressed.
    Escape,
    /// A nested consumer (Confirm Actions cancel) asked the dialog to close.
    CloseRequest,
    /// The browser already closed the native dialog element on its own. Allowed while waiting,
    /// since the presentation is gone either way.
    Browser,
}

impl CloseSource {
    /// Returns whether this source may close the dialog while a submission is in flight.
    pub const fn overrides_waiting(self) -> bool {
        matches!(self, Self::Host | Self::Browser)
    }

    /// Returns a stable string token for logs and debugging hooks.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Host => "host",
            Self::CloseButton => "close-button",
            Self::Escape => "escape",
            Self::CloseRequest => "close-request",
            Self::Browser => "browser",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Notifications raised out of the dialog components' boundary.
pub enum DialogEvent<N> {
    /// Dialog entered the open phase.
    Opened,
    /// Dialog entered the closed phase.
    Closed,
    /// Focus could not be returned because the restoration target was disconnected.
    FocusRestorationFailed {
        /// The disconnected restoration target.
        node: N,
    },
    /// A nested action bar asked the governing dialog to close.
    CloseRequest,
    /// A nested action bar or form confirmed the pending action.
    Confirm,
}

impl<N> DialogEvent<N> {
    /// Returns the DOM event type used when the event is dispatched as a `CustomEvent`.
    pub const fn event_name(&self) -> &'static str {
        match self {
            Self::Opened => "cc-dialog-open",
            Self::Closed => "cc-dialog-close",
            Self::FocusRestorationFailed { .. } => "cc-dialog-focus-restoration-fail",
            Self::CloseRequest => "cc-dialog-close-request",
            Self::Confirm => "cc-dialog-confirm",
        }
    }

    /// Returns the node carried as event detail, if any.
    pub fn detail(&self) -> Option<&N> {
        match self {
            Self::FocusRestorationFailed { node } => Some(node),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Styling intent of a confirm control.
pub enum SubmitIntent {
    /// Standard emphasized confirmation.
    #[default]
    Primary,
    /// Destructive confirmation.
    Danger,
}

impl SubmitIntent {
    /// Returns the button variant token the confirm control renders with.
    pub const fn button_variant_token(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
/// Plain-data dialog attributes as a host would pass them.
pub struct DialogConfig {
    /// Whether the dialog should be presented.
    pub open: bool,
    /// Whether a host submission is in flight.
    pub waiting: bool,
    /// Heading text.
    pub heading: String,
    /// Optional body text rendered above slotted children.
    pub content_body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
/// Host-configurable CSS custom properties. Cosmetic only.
pub struct DialogStyle {
    /// Value for `--cc-dialog-confirm-actions-margin-top`.
    pub confirm_actions_margin_top: Option<String>,
    /// Value for `--cc-dialog-max-width`.
    pub max_width: Option<String>,
}

impl DialogStyle {
    /// Renders the configured custom properties as an inline `style` value.
    ///
    /// Returns `None` when nothing is configured so callers can omit the attribute.
    pub fn to_style(&self) -> Option<String> {
        let declarations = [
            (
                "--cc-dialog-confirm-actions-margin-top",
                self.confirm_actions_margin_top.as_deref(),
            ),
            ("--cc-dialog-max-width", self.max_width.as_deref()),
        ];
        let style = declarations
            .into_iter()
            .filter_map(|(name, value)| value.map(|value| format!("{name}:{value};")))
            .collect::<String>();
        if style.is_empty() {
            None
        } else {
            Some(style)
        }
    }
}
