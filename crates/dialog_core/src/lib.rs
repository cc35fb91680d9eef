//! Headless focus-lifecycle engine for the console dialog components.
//!
//! The crate is runtime-agnostic: it owns the dialog state machine, the confirm-form and
//! confirm-actions models, and the focus/ancestor algorithms, all expressed against the
//! [`DialogDom`] host trait. Browser bindings live in `console_ui`; [`MemoryDom`] backs headless
//! hosts and tests.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod confirm_actions;
pub mod confirm_form;
pub mod dom;
pub mod executor;
pub mod memory;
pub mod model;
pub mod reducer;
pub mod scope;

pub use confirm_actions::{ConfirmActionsConfig, ConfirmActionsIntent};
pub use confirm_form::{
    validate_confirm_text, ConfirmFieldError, ConfirmFormConfig, ConfirmFormState, SubmitOutcome,
};
pub use dom::{
    composed_ancestors, deep_active_element, governing_dialog, restore_focus, DialogDom,
    FocusRestoration,
};
pub use executor::run_dialog_effects;
pub use memory::{MemoryDom, NodeId};
pub use model::{
    CloseSource, DialogConfig, DialogEvent, DialogPhase, DialogState, DialogStyle, SubmitIntent,
};
pub use reducer::{reduce_dialog, DialogAction, DialogEffect, DialogError};
pub use scope::ScopedCloseListener;
