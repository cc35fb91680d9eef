//! Control primitives rendered by the dialog components.

use leptos::ev::MouseEvent;
use leptos::*;

use dialog_core::SubmitIntent;

mod controls;

pub use controls::{Button, LoadingIndicator, TextField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Shared button variants.
pub enum ButtonVariant {
    /// Standard action button.
    #[default]
    Standard,
    /// Primary emphasized action button.
    Primary,
    /// Quiet button for secondary chrome such as close controls.
    Quiet,
    /// Danger/destructive button.
    Danger,
}

impl ButtonVariant {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Primary => "primary",
            Self::Quiet => "quiet",
            Self::Danger => "danger",
        }
    }
}

impl From<SubmitIntent> for ButtonVariant {
    fn from(intent: SubmitIntent) -> Self {
        match intent {
            SubmitIntent::Primary => Self::Primary,
            SubmitIntent::Danger => Self::Danger,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Shared button sizing tokens.
pub enum ButtonSize {
    /// Dense button.
    Sm,
    /// Default button.
    #[default]
    Md,
}

impl ButtonSize {
    pub(crate) fn token(self) -> &'static str {
        match self {
            Self::Sm => "sm",
            Self::Md => "md",
        }
    }
}

pub(crate) fn merge_layout_class(base: &'static str, layout_class: Option<&'static str>) -> String {
    match layout_class {
        Some(layout_class) if !layout_class.is_empty() => format!("{base} {layout_class}"),
        _ => base.to_string(),
    }
}

pub(crate) fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
