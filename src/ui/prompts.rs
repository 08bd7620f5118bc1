//! Confirmation prompts with a non-interactive fallback

use super::context::UiContext;
use crate::error::{LintError, LintResult};

/// Ask a yes/no question.
///
/// Returns `true` under auto-yes and `default` without a terminal.
pub async fn confirm(ctx: &UiContext, message: &str, default: bool) -> LintResult<bool> {
    if ctx.auto_yes() {
        return Ok(true);
    }
    if !ctx.is_interactive() {
        return Ok(default);
    }

    let message = message.to_string();
    tokio::task::spawn_blocking(move || {
        cliclack::confirm(&message)
            .initial_value(default)
            .interact()
    })
    .await
    .map_err(|e| LintError::Internal(format!("Prompt task failed: {}", e)))?
    .map_err(|e| LintError::User(format!("Prompt failed: {}", e)))
}
