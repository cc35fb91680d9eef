//! Leptos components for the console dialog family.
//!
//! The crate owns the browser-facing half of the dialog system: the [`Dialog`] modal with its
//! focus lifecycle, the [`DialogConfirmActions`] cancel/confirm bar, the [`DialogConfirmForm`]
//! type-to-confirm form, and the handful of control primitives they render with. State machines
//! and validation live in `dialog_core`; this crate binds them to `web-sys` through [`WebDom`]
//! and to Leptos signals.
//!
//! Every primitive carries the stable `data-ui-*` DOM contract consumed by the console CSS
//! layers, and every dialog notification is dispatched as a bubbling, composed `CustomEvent`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod dialog;
mod dom;
mod primitives;

pub use dialog::{
    use_dialog, ConfirmFormHandle, Dialog, DialogConfirmActions, DialogConfirmForm,
    DialogContext, DialogHandle,
};
pub use dialog_core::{CloseSource, DialogStyle, SubmitIntent};
pub use dom::WebDom;
pub use primitives::{Button, ButtonSize, ButtonVariant, LoadingIndicator, TextField};

/// Convenience imports for application crates consuming the dialog components.
pub mod prelude {
    pub use crate::{
        Button, ButtonSize, ButtonVariant, ConfirmFormHandle, Dialog, DialogConfirmActions,
        DialogConfirmForm, DialogHandle, DialogStyle, LoadingIndicator, SubmitIntent, TextField,
    };
}
