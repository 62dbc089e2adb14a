//! Administrator session.
//!
//! The session is a single persisted flag (`isAdmin` = `"true"`) in the same
//! namespace as the content, so it survives restarts and is shared by every
//! page. Credential checks sit behind [`AuthProvider`].

use tracing::{debug, info, warn};

use crate::config::AuthConfig;
use crate::error::{Error, Result};
use crate::storage::KeyValueBackend;
use crate::store::{keys, PortalStore};

const FLAG_SET: &str = "true";

/// A username and password as typed at the login prompt.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Decides whether a credential pair grants administrator access.
pub trait AuthProvider {
    fn authenticate(&self, credentials: &Credentials) -> bool;
}

/// One fixed administrator account, taken from configuration.
#[derive(Debug, Clone)]
pub struct FixedCredentials {
    expected: Credentials,
}

impl FixedCredentials {
    #[must_use]
    pub fn new(expected: Credentials) -> Self {
        Self { expected }
    }
}

impl From<&AuthConfig> for FixedCredentials {
    fn from(config: &AuthConfig) -> Self {
        Self::new(Credentials::new(&config.username, &config.password))
    }
}

impl Default for FixedCredentials {
    fn default() -> Self {
        Self::from(&AuthConfig::default())
    }
}

impl AuthProvider for FixedCredentials {
    fn authenticate(&self, credentials: &Credentials) -> bool {
        *credentials == self.expected
    }
}

/// Proof that an administrator is logged in.
///
/// Only [`SessionGate::current_session`] hands these out, so code holding a
/// `Session` may perform admin edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    _private: (),
}

/// Login, logout and session lookup against the persisted flag.
#[derive(Debug, Clone, Default)]
pub struct SessionGate<P = FixedCredentials> {
    provider: P,
}

impl SessionGate {
    /// Gate checking against the configured administrator account.
    #[must_use]
    pub fn from_config(auth: &AuthConfig) -> Self {
        Self::new(FixedCredentials::from(auth))
    }
}

impl<P: AuthProvider> SessionGate<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Check `credentials` and, when they match, persist the session flag.
    ///
    /// A mismatch returns `false` and leaves any existing session alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag cannot be written.
    pub fn login<B: KeyValueBackend>(
        &self,
        store: &mut PortalStore<B>,
        credentials: &Credentials,
    ) -> Result<bool> {
        if !self.provider.authenticate(credentials) {
            warn!(username = credentials.username.as_str(), "login rejected");
            return Ok(false);
        }
        store.backend_mut().set(keys::ADMIN_FLAG, FLAG_SET)?;
        info!(username = credentials.username.as_str(), "administrator logged in");
        Ok(true)
    }

    /// # Errors
    ///
    /// Returns an error if the flag cannot be read.
    pub fn is_authenticated<B: KeyValueBackend>(&self, store: &PortalStore<B>) -> Result<bool> {
        Ok(store.backend().get(keys::ADMIN_FLAG)?.as_deref() == Some(FLAG_SET))
    }

    /// Clear the session flag. Logging out twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag cannot be removed.
    pub fn logout<B: KeyValueBackend>(&self, store: &mut PortalStore<B>) -> Result<()> {
        if store.backend_mut().remove(keys::ADMIN_FLAG)? {
            info!("administrator logged out");
        } else {
            debug!("logout without a session");
        }
        Ok(())
    }

    /// The active session, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the flag cannot be read.
    pub fn current_session<B: KeyValueBackend>(
        &self,
        store: &PortalStore<B>,
    ) -> Result<Option<Session>> {
        Ok(self
            .is_authenticated(store)?
            .then_some(Session { _private: () }))
    }

    /// The active session, or [`Error::AdminRequired`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::AdminRequired`] when nobody is logged in.
    pub fn require_admin<B: KeyValueBackend>(&self, store: &PortalStore<B>) -> Result<Session> {
        self.current_session(store)?.ok_or(Error::AdminRequired)
    }
}
