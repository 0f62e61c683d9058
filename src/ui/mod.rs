//! UI module for consistent CLI output
//!
//! Styled step/outro helpers plus a spinner, with automatic fallback to
//! plain output in CI and non-interactive environments.

mod context;
mod output;
mod progress;

pub use context::UiContext;
pub use output::{outro_success, outro_warn, step_error, step_ok, step_ok_detail, step_warn};
pub use progress::TaskSpinner;
