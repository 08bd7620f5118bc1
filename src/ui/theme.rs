//! Prompt styling
//!
//! The only prompts lintcache shows guard destructive store changes, so an
//! open prompt carries the warning accent and settled ones fade out.

use cliclack::{Theme, ThemeState};
use console::Style;

#[derive(Debug, Clone)]
pub struct LintTheme {
    accent: Style,
}

impl Default for LintTheme {
    fn default() -> Self {
        Self {
            accent: Style::new().yellow(),
        }
    }
}

impl LintTheme {
    fn tone(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => self.accent.clone(),
            ThemeState::Error(_) => Style::new().red().bold(),
            ThemeState::Cancel | ThemeState::Submit => Style::new().dim(),
        }
    }
}

impl Theme for LintTheme {
    fn bar_color(&self, state: &ThemeState) -> Style {
        self.tone(state)
    }

    fn state_symbol_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Submit => Style::new().green(),
            other => self.tone(other),
        }
    }
}

/// Install [`LintTheme`] for all later prompts
pub fn init_theme() {
    cliclack::set_theme(LintTheme::default());
}
