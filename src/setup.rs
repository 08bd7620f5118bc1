//! Process-wide one-time setup
//!
//! The first request to arrive binds the contact address and the user agent
//! sent to upstream hosts. Later requests, including ones racing the first,
//! see the same identity.

use crate::config::schema::ServiceConfig;
use std::sync::OnceLock;
use tracing::info;

static IDENTITY: OnceLock<Identity> = OnceLock::new();

/// Identity bound by the one-time setup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub contact_email: String,
    pub user_agent: String,
}

impl Identity {
    fn from_config(service: &ServiceConfig) -> Self {
        Self {
            contact_email: service.contact_email.clone(),
            user_agent: format!(
                "lintcache/{} (+{})",
                env!("CARGO_PKG_VERSION"),
                service.bot_url
            ),
        }
    }
}

/// Run the one-time setup if no request has done so yet
pub fn ensure(service: &ServiceConfig) -> &'static Identity {
    IDENTITY.get_or_init(|| {
        let identity = Identity::from_config(service);
        info!("Contact email: {}", identity.contact_email);
        identity
    })
}

/// Identity bound by setup, if it has run
pub fn identity() -> Option<&'static Identity> {
    IDENTITY.get()
}

/// User agent for upstream requests
pub fn user_agent() -> String {
    identity()
        .map(|id| id.user_agent.clone())
        .unwrap_or_else(|| format!("lintcache/{}", env!("CARGO_PKG_VERSION")))
}
