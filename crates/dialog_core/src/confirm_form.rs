//! Type-to-confirm form model: exact-text validation, submission gating, and scoped reset.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    confirm_actions::ConfirmActionsConfig,
    model::{DialogEvent, SubmitIntent},
    scope::ScopedCloseListener,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Plain-data attributes of the confirm form.
pub struct ConfirmFormConfig {
    /// Exact text the user must type.
    pub confirm_text_to_input: String,
    /// Label of the confirmation input.
    #[serde(default)]
    pub confirm_input_label: String,
    /// Message shown instead of the default validation messages.
    #[serde(default)]
    pub confirm_error_message: Option<String>,
    /// Whether the input takes focus when the dialog opens.
    #[serde(default)]
    pub autofocus_input: bool,
    /// Whether a host submission is in flight.
    #[serde(default)]
    pub waiting: bool,
    /// Confirm label of the embedded action bar.
    pub submit_label: String,
    /// Optional cancel label override of the embedded action bar.
    #[serde(default)]
    pub cancel_label: Option<String>,
    /// Confirm styling intent of the embedded action bar.
    #[serde(default = "destructive_intent")]
    pub submit_intent: SubmitIntent,
}

fn destructive_intent() -> SubmitIntent {
    SubmitIntent::Danger
}

impl ConfirmFormConfig {
    /// Creates a destructive confirm form requiring `confirm_text_to_input`.
    pub fn new(confirm_text_to_input: impl Into<String>, submit_label: impl Into<String>) -> Self {
        Self {
            confirm_text_to_input: confirm_text_to_input.into(),
            confirm_input_label: String::new(),
            confirm_error_message: None,
            autofocus_input: false,
            waiting: false,
            submit_label: submit_label.into(),
            cancel_label: None,
            submit_intent: destructive_intent(),
        }
    }

    /// Returns the configuration of the embedded action bar.
    pub fn actions_config(&self) -> ConfirmActionsConfig {
        ConfirmActionsConfig {
            cancel_label: self.cancel_label.clone(),
            submit_label: self.submit_label.clone(),
            submit_intent: self.submit_intent,
            waiting: self.waiting,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Field-level validation failures. Shown inline, never propagated.
pub enum ConfirmFieldError {
    /// Nothing was typed.
    #[error("Please enter a value")]
    Empty,
    /// The typed text differs from the required text.
    #[error("Please type \"{expected}\" to confirm")]
    Mismatch {
        /// Required text.
        expected: String,
    },
}

/// Checks `value` against `expected` by exact, case-sensitive comparison without trimming.
///
/// # Errors
///
/// Returns [`ConfirmFieldError::Empty`] for an empty mismatching value and
/// [`ConfirmFieldError::Mismatch`] for any other mismatch.
pub fn validate_confirm_text(value: &str, expected: &str) -> Result<(), ConfirmFieldError> {
    if value == expected {
        Ok(())
    } else if value.is_empty() {
        Err(ConfirmFieldError::Empty)
    } else {
        Err(ConfirmFieldError::Mismatch {
            expected: expected.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result of a submission attempt.
pub enum SubmitOutcome {
    /// Validation passed; the form raises its confirm event.
    Confirmed,
    /// Validation failed; focus moves to the input and nothing is raised.
    Invalid(ConfirmFieldError),
    /// A submission is already in flight.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Typed value and displayed validation error of a confirm form.
pub struct ConfirmFormState {
    value: String,
    error: Option<ConfirmFieldError>,
}

impl ConfirmFormState {
    /// Returns the typed value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the displayed validation error.
    pub fn error(&self) -> Option<&ConfirmFieldError> {
        self.error.as_ref()
    }

    /// Returns the message to display for the current error, honoring the host override.
    pub fn error_message(&self, config: &ConfirmFormConfig) -> Option<String> {
        self.error.as_ref().map(|error| {
            config
                .confirm_error_message
                .clone()
                .unwrap_or_else(|| error.to_string())
        })
    }

    /// Replaces the typed value.
    ///
    /// Once an error is displayed the value is re-validated on every edit so a corrected value
    /// clears it; before the first failed submission no error is shown.
    pub fn set_value(&mut self, value: impl Into<String>, config: &ConfirmFormConfig) {
        self.value = value.into();
        if self.error.is_some() {
            self.error = validate_confirm_text(&self.value, &config.confirm_text_to_input).err();
        }
    }

    /// Validates the typed value and reports whether the confirm event should be raised.
    pub fn submit(&mut self, config: &ConfirmFormConfig) -> SubmitOutcome {
        if config.waiting {
            return SubmitOutcome::Ignored;
        }
        match validate_confirm_text(&self.value, &config.confirm_text_to_input) {
            Ok(()) => {
                self.error = None;
                SubmitOutcome::Confirmed
            }
            Err(error) => {
                self.error = Some(error.clone());
                SubmitOutcome::Invalid(error)
            }
        }
    }

    /// Clears the typed value and any validation error.
    pub fn reset_form(&mut self) {
        self.value.clear();
        self.error = None;
    }

    /// Resets the form when `event` is a close of its governing dialog.
    ///
    /// Returns whether a reset happened.
    pub fn handle_dialog_event<N: PartialEq>(
        &mut self,
        listener: &ScopedCloseListener<N>,
        origin: &N,
        event: &DialogEvent<N>,
    ) -> bool {
        if listener.accepts(origin, event) {
            self.reset_form();
            true
        } else {
            false
        }
    }
}
