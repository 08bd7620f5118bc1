//! About command - who runs this bot

use crate::config::Config;
use crate::error::LintResult;
use crate::setup;

/// Execute the about command
pub async fn execute(config: &Config) -> LintResult<()> {
    let identity = setup::ensure(&config.service);
    println!(
        "Contact {} for help with the lintcache bot.",
        identity.contact_email
    );
    println!("Requests are sent as: {}", identity.user_agent);
    Ok(())
}
