//! Shared UI building blocks

pub mod message;
pub mod spinner;

pub use message::{ErrorMessage, FieldError, SuccessMessage};
pub use spinner::{LoadingScreen, Spinner, SpinnerSize};
