//! Cancel/confirm action bar model.

use serde::{Deserialize, Serialize};

use crate::model::{DialogEvent, SubmitIntent};

/// Cancel label used when the host does not override it.
pub const DEFAULT_CANCEL_LABEL: &str = "Cancel";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Plain-data attributes of the confirm action bar.
pub struct ConfirmActionsConfig {
    /// Optional cancel label override.
    #[serde(default)]
    pub cancel_label: Option<String>,
    /// Confirm label.
    pub submit_label: String,
    /// Confirm styling intent.
    #[serde(default)]
    pub submit_intent: SubmitIntent,
    /// Whether a host submission is in flight.
    #[serde(default)]
    pub waiting: bool,
}

impl ConfirmActionsConfig {
    /// Creates a primary action bar with the default cancel label.
    pub fn new(submit_label: impl Into<String>) -> Self {
        Self {
            cancel_label: None,
            submit_label: submit_label.into(),
            submit_intent: SubmitIntent::Primary,
            waiting: false,
        }
    }

    /// Returns the label rendered on the cancel control.
    pub fn cancel_label(&self) -> &str {
        self.cancel_label.as_deref().unwrap_or(DEFAULT_CANCEL_LABEL)
    }

    /// Translates a cancel click. Cancel is disabled while waiting.
    pub fn on_cancel(&self) -> Option<ConfirmActionsIntent> {
        (!self.waiting).then_some(ConfirmActionsIntent::CloseRequest)
    }

    /// Translates a confirm click. The confirm control shows progress while waiting.
    pub fn on_submit(&self) -> Option<ConfirmActionsIntent> {
        (!self.waiting).then_some(ConfirmActionsIntent::Confirm)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Intent raised by the action bar. The bar never changes dialog state itself.
pub enum ConfirmActionsIntent {
    /// Ask the governing dialog to close.
    CloseRequest,
    /// Confirm the pending action; the host decides when to close.
    Confirm,
}

impl ConfirmActionsIntent {
    /// Returns the event raised for this intent.
    pub fn event<N>(self) -> DialogEvent<N> {
        match self {
            Self::CloseRequest => DialogEvent::CloseRequest,
            Self::Confirm => DialogEvent::Confirm,
        }
    }
}
