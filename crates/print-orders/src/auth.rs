use crate::types::{OrderError, Result};
use serde::{Deserialize, Serialize};

/// Gatekeeper for the staff-only order management commands
pub trait Authenticator {
    fn authenticate(&self, username: &str, password: &str) -> Result<()>;
}

/// Single admin account read from the shop configuration.
/// With no username configured every login is refused.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl Authenticator for AdminCredentials {
    fn authenticate(&self, username: &str, password: &str) -> Result<()> {
        if self.username.is_empty() {
            log::warn!("admin login attempted but no admin account is configured");
            return Err(OrderError::Unauthorized);
        }
        if username == self.username && password == self.password {
            Ok(())
        } else {
            log::warn!("rejected admin login for {}", username);
            Err(OrderError::Unauthorized)
        }
    }
}
