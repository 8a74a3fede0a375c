use crate::connect::operations::update_user;
use crate::connect::types::UpdateUserVariables;
use crate::connect::DataConnect;
use crate::error::{MarqueeError, Result};
use crate::state::{StateStore, SAVED_USER_KEY};
use std::sync::Arc;

/// Profile of a signed-in user as reported by the identity provider
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthUser {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

impl AuthUser {
    /// Local part of the email address
    pub fn username(&self) -> Result<String> {
        let email = self
            .email
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| MarqueeError::invalid("signed-in user has no email address"))?;

        let local = email.split('@').next().unwrap_or_default().trim();
        if local.is_empty() {
            return Err(MarqueeError::invalid(format!(
                "cannot derive a username from '{}'",
                email
            )));
        }

        Ok(local.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    SignedOut,
    AlreadySynced,
    Synced,
}

/// Writes the user's profile to the backend on first sign-in, once per store
pub struct ProfileSync<S: StateStore> {
    store: S,
}

impl<S: StateStore> ProfileSync<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// React to an auth state change
    pub async fn on_auth_state_changed(
        &self,
        dc: &Arc<DataConnect>,
        user: Option<&AuthUser>,
    ) -> Result<SyncOutcome> {
        let Some(user) = user else {
            return Ok(SyncOutcome::SignedOut);
        };

        if self.store.flag(SAVED_USER_KEY)? {
            tracing::debug!("Profile already synced, skipping UpdateUser");
            return Ok(SyncOutcome::AlreadySynced);
        }

        let vars = UpdateUserVariables {
            username: user.username()?,
            display_name: user.display_name.clone(),
            image_url: user.photo_url.clone(),
        };

        update_user(dc, &vars).await?;
        self.store.set(SAVED_USER_KEY, "true")?;

        tracing::info!("Synced profile for {}", vars.username);
        Ok(SyncOutcome::Synced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_is_email_local_part() {
        let user = AuthUser {
            email: Some("ana.lima@example.com".to_string()),
            ..Default::default()
        };
        assert_eq!(user.username().unwrap(), "ana.lima");
    }

    #[test]
    fn test_username_requires_email() {
        assert!(AuthUser::default().username().is_err());

        let user = AuthUser {
            email: Some("@example.com".to_string()),
            ..Default::default()
        };
        assert!(user.username().is_err());
    }
}
