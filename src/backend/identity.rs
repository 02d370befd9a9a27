//! Identity contract.
//!
//! The hosted identity service is external; the client only needs the profile of
//! whoever is signed in, or the knowledge that nobody is.

use async_trait::async_trait;

use super::{BackendError, UserProfile};
use crate::config::IdentityConfig;

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the signed-in user, or `None` when unauthenticated.
    async fn current_user(&self) -> Result<Option<UserProfile>, BackendError>;
}

/// Identity resolved once at start-up from the configured session.
#[derive(Debug, Clone, Default)]
pub struct SessionIdentity {
    profile: Option<UserProfile>,
}

impl SessionIdentity {
    pub fn new(profile: Option<UserProfile>) -> Self {
        Self { profile }
    }

    pub fn unauthenticated() -> Self {
        Self { profile: None }
    }

    /// A session exists only when a user id is configured.
    pub fn from_config(config: &IdentityConfig) -> Self {
        let profile = config.user_id.map(|user_id| UserProfile {
            user_id,
            name: config.name.clone(),
            role: config.role,
        });
        Self { profile }
    }
}

#[async_trait]
impl IdentityProvider for SessionIdentity {
    async fn current_user(&self) -> Result<Option<UserProfile>, BackendError> {
        Ok(self.profile.clone())
    }
}
