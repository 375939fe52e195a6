use tracing::{debug, error, info, warn};

use crate::auth::password::PasswordHasher;
use crate::auth::validation;
use crate::db::models::{UserProfile, UserRecord};
use crate::db::UserStore;
use crate::error::StoreError;

/// Mediates every read and write of user credentials against a [`UserStore`].
pub struct CredentialGateway<S> {
    store: S,
    hasher: PasswordHasher,
}

impl<S: UserStore> CredentialGateway<S> {
    pub fn new(store: S, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Check a username/password pair.
    ///
    /// Returns `Ok(false)` for an unknown username or a wrong password. Store
    /// failures are returned as errors so callers can tell "wrong
    /// credentials" apart from "store unavailable".
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<bool, StoreError> {
        Ok(self.check(username, password).await?.is_some())
    }

    /// Like [`authenticate`](Self::authenticate), but a mismatch is
    /// [`StoreError::AuthenticationFailed`] and success yields the profile.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserProfile, StoreError> {
        self.check(username, password)
            .await?
            .map(|record| record.profile())
            .ok_or(StoreError::AuthenticationFailed)
    }

    /// Create a user with a freshly salted password hash.
    ///
    /// Uniqueness is left to the store; a taken username comes back as
    /// [`StoreError::DuplicateUser`].
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<bool, StoreError> {
        let username = validation::username(username)?;
        validation::password(password)?;
        let email = validation::email(email)?;

        let record = UserRecord::new(
            username.to_string(),
            email.to_string(),
            self.hasher.hash(password),
        );

        match self.store.insert(&record).await {
            Ok(rows) => {
                let created = rows == 1;
                if created {
                    info!("Registered user {} ({})", username, record.id);
                } else {
                    warn!("Insert for {} affected {} rows", username, rows);
                }
                Ok(created)
            }
            Err(e @ StoreError::DuplicateUser { .. }) => {
                warn!("Registration rejected, username taken: {}", username);
                Err(e)
            }
            Err(e) => {
                error!("Registration failed for {}: {}", username, e);
                Err(e)
            }
        }
    }

    async fn check(&self, username: &str, password: &str) -> Result<Option<UserRecord>, StoreError> {
        let username = validation::login_username(username)?;
        validation::password(password)?;

        // register never stores such a name
        if !validation::fits_username_limit(username) {
            self.hasher.burn(password);
            debug!("Authentication failed: username exceeds length limit");
            return Ok(None);
        }

        let record = match self.store.find_by_username(username).await {
            Ok(record) => record,
            Err(e) => {
                error!("Credential lookup failed for {}: {}", username, e);
                return Err(e);
            }
        };

        let Some(record) = record else {
            self.hasher.burn(password);
            debug!("Authentication failed for {}: unknown user", username);
            return Ok(None);
        };

        let Some(stored) = record.password() else {
            error!("Stored credentials for {} are corrupt", username);
            return Err(StoreError::unavailable("stored credential record is corrupt"));
        };

        if self.hasher.verify(password, &stored) {
            debug!("Authentication succeeded for {}", username);
            Ok(Some(record))
        } else {
            debug!("Authentication failed for {}: password mismatch", username);
            Ok(None)
        }
    }
}
