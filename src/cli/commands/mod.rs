//! CLI command implementations

pub mod about;
pub mod config;
pub mod refresh;
pub mod show;
pub mod store;

pub use about::execute as about;
pub use config::execute as config;
pub use refresh::execute as refresh;
pub use show::execute as show;
pub use store::execute as store;

use crate::error::{ErrorKind, LintError};
use tracing::{debug, error, info};

/// Log the full failure and return what the caller is allowed to see.
///
/// Internal failures are logged as errors, upstream failures as info.
pub(crate) fn present_failure(identifier: &str, err: LintError) -> LintError {
    match err.kind() {
        ErrorKind::Internal => error!("Error processing package {}: {}", identifier, err),
        ErrorKind::Remote { .. } => info!("Error processing package {}: {}", identifier, err),
        ErrorKind::BadRequest | ErrorKind::NotFound => {
            debug!("Rejected package {}: {}", identifier, err)
        }
    }
    err.into_presented()
}
