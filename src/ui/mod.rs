//! Terminal output for the CLI
//!
//! `cliclack` draws spinners and prompts on a terminal. Everything falls
//! back to plain tagged lines when stdout is piped or a CI variable is set.

mod context;
mod output;
mod prompts;
mod spinner;
mod theme;

pub use context::UiContext;
pub use output::{remark, step_info, step_ok, step_ok_detail, step_warn_hint};
pub use prompts::confirm;
pub use spinner::TaskSpinner;
pub use theme::{init_theme, LintTheme};
