//! Terminal detection for choosing between rich and plain output

use std::io::IsTerminal;

/// Environment variables set by common CI systems
const CI_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "BUILDKITE",
    "JENKINS_URL",
];

/// How the current invocation should talk to the user
#[derive(Debug, Clone)]
pub struct UiContext {
    interactive: bool,
    auto_yes: bool,
}

impl UiContext {
    /// Inspect the terminal and environment
    pub fn detect() -> Self {
        Self {
            interactive: std::io::stdout().is_terminal()
                && std::io::stdin().is_terminal()
                && !running_in_ci(),
            auto_yes: false,
        }
    }

    /// Plain output, prompts answered with their defaults
    pub fn non_interactive() -> Self {
        Self {
            interactive: false,
            auto_yes: false,
        }
    }

    /// Answer every confirmation with yes
    pub fn with_auto_yes(mut self, yes: bool) -> Self {
        self.auto_yes = yes;
        self
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn auto_yes(&self) -> bool {
        self.auto_yes
    }

    /// Spinners and cliclack framing are only drawn on a real terminal
    pub fn use_fancy_output(&self) -> bool {
        self.interactive
    }
}

fn running_in_ci() -> bool {
    CI_VARS.iter().any(|var| std::env::var_os(var).is_some())
}
